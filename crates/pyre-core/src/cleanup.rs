//! Artifact deletion, twice over: a scoped guard on the invocation path and
//! an exit-time safety net for paths that bypass it. The duplication is
//! intentional. Both attempts are silent on failure; cleanup never changes
//! the run outcome.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use tracing::debug;

static SCHEDULED: OnceLock<Mutex<Vec<PathBuf>>> = OnceLock::new();

/// Register `path` for best-effort deletion when the process terminates
/// through the normal exit path (including `std::process::exit`, which skips
/// destructors). Unix only; a no-op elsewhere.
pub fn remove_on_exit(path: &Path) {
    let registry = SCHEDULED.get_or_init(|| {
        #[cfg(unix)]
        // SAFETY: registering a handler with no preconditions; the handler
        // only touches this static registry.
        unsafe {
            libc::atexit(remove_scheduled);
        }
        Mutex::new(Vec::new())
    });
    if let Ok(mut paths) = registry.lock() {
        paths.push(path.to_path_buf());
    }
}

#[cfg(unix)]
extern "C" fn remove_scheduled() {
    if let Some(registry) = SCHEDULED.get() {
        if let Ok(paths) = registry.lock() {
            for path in paths.iter() {
                let _ = fs::remove_file(path);
            }
        }
    }
}

/// Deletes the artifact when dropped, on both the success and the failure
/// branch of an invocation. Armed only after entry-point resolution
/// succeeds; a resolution failure leaves deletion to the safety net.
pub struct ArtifactGuard {
    path: PathBuf,
}

impl ArtifactGuard {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Drop for ArtifactGuard {
    fn drop(&mut self) {
        debug!(artifact = %self.path.display(), "deleting artifact");
        let _ = fs::remove_file(&self.path);
    }
}

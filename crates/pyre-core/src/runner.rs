//! The linear run sequence: parse -> schedule safety-net deletion ->
//! resolve -> invoke -> delete. Two exit branches (success,
//! failure-with-cleanup) and one early abort (resolution failure, safety-net
//! cleanup only).

use std::path::PathBuf;

use tracing::debug;

use crate::cleanup::{self, ArtifactGuard};
use crate::errors::RunFailure;
use crate::loader::ArtifactLoader;

/// One parsed invocation: `[options, artifact, entry point, forwarded...]`.
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Opaque options token. Only the `-debug ` substring is recognized.
    pub options: String,
    /// Artifact to load; deleted after the run regardless of outcome.
    pub artifact: PathBuf,
    /// Namespace-qualified entry point id resolved inside the artifact.
    pub entry_point: String,
    /// Passed through verbatim, in order; none are consumed by the runner.
    pub forwarded: Vec<String>,
}

impl RunRequest {
    /// Substring containment, not a tokenized flag: `"xx-debug yy"` enables
    /// diagnostics, `"run-debugging"` does not (no trailing space). Kept
    /// bug-compatible with the historical options contract.
    pub fn debug_enabled(&self) -> bool {
        self.options.contains("-debug ")
    }
}

/// Run the request to completion. The payload blocks this thread for as long
/// as it runs; whatever failure it raises comes back as
/// [`RunFailure::Payload`] with its original identity intact.
pub fn run<L: ArtifactLoader>(loader: &L, request: RunRequest) -> Result<(), RunFailure> {
    cleanup::remove_on_exit(&request.artifact);
    debug!(artifact = %request.artifact.display(), "removal scheduled for process exit");

    let module = loader.load(&request.artifact).map_err(RunFailure::Load)?;
    let entry = loader
        .resolve(&module, &request.entry_point)
        .map_err(RunFailure::Load)?;
    debug!(entry = %request.entry_point, "entry point resolved");

    // Armed only now: a resolution failure above leaves the artifact to the
    // exit-time safety net instead of deleting it eagerly.
    let _burn = ArtifactGuard::new(request.artifact.clone());

    debug!(
        entry = %request.entry_point,
        args = request.forwarded.len(),
        "invoking entry point"
    );
    entry.invoke(request.forwarded).map_err(RunFailure::Payload)
}

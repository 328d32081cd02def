//! The plugin-loading capability: `load(path) -> Module`,
//! `resolve(&Module, id) -> EntryPoint`. [`DylibLoader`] is the production
//! implementation over the platform dynamic loader; tests substitute fakes
//! at the same seam.

use std::ffi::CString;
use std::os::raw::{c_char, c_int};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use libloading::{Library, Symbol};

use crate::entry::EntryPoint;
use crate::errors::{ArgumentError, LoadError, PayloadError, PayloadExit};

pub trait ArtifactLoader {
    type Module;

    /// Load the artifact's code namespace into the process.
    fn load(&self, path: &Path) -> Result<Self::Module, LoadError>;

    /// Locate the entry point named by `entry_id` inside a loaded module.
    /// Must fail here, not at invocation time, when the entry is missing.
    fn resolve(&self, module: &Self::Module, entry_id: &str) -> Result<EntryPoint, LoadError>;
}

/// ABI every native entry point exports: argc/argv in, status out.
/// A zero return is success; anything else becomes [`PayloadExit`].
type RawEntryFn = unsafe extern "C" fn(c_int, *const *const c_char) -> c_int;

/// Map a namespace-qualified entry id to the exported symbol carrying its
/// `main`: separators become underscores, `_main` is appended. Case is
/// preserved: `com.example.Tool` -> `com_example_Tool_main`.
pub fn entry_symbol(entry_id: &str) -> String {
    let mut symbol: String = entry_id
        .chars()
        .map(|c| if c == '.' || c == '-' { '_' } else { c })
        .collect();
    symbol.push_str("_main");
    symbol
}

/// A loaded dynamic library plus the path it came from.
pub struct DylibModule {
    lib: Arc<Library>,
    path: PathBuf,
}

pub struct DylibLoader;

impl ArtifactLoader for DylibLoader {
    type Module = DylibModule;

    fn load(&self, path: &Path) -> Result<DylibModule, LoadError> {
        // SAFETY: loading a library runs its initializers. The artifact is
        // trusted to the same degree as the payload it carries; the runner
        // makes no sandboxing promises.
        let lib = unsafe { Library::new(path) }.map_err(|err| LoadError::Artifact {
            path: path.to_path_buf(),
            source: Box::new(err),
        })?;
        Ok(DylibModule {
            lib: Arc::new(lib),
            path: path.to_path_buf(),
        })
    }

    fn resolve(&self, module: &DylibModule, entry_id: &str) -> Result<EntryPoint, LoadError> {
        let symbol = entry_symbol(entry_id);
        // Probe eagerly so a missing entry point aborts the run before
        // invocation and before the explicit cleanup guard exists.
        // SAFETY: only the symbol's presence is checked here.
        unsafe { module.lib.get::<RawEntryFn>(symbol.as_bytes()) }.map_err(|err| {
            LoadError::EntryPoint {
                path: module.path.clone(),
                entry: entry_id.to_string(),
                symbol: symbol.clone(),
                source: Box::new(err),
            }
        })?;

        let lib = Arc::clone(&module.lib);
        Ok(EntryPoint::new(move |args| {
            invoke_native(&lib, &symbol, args)
        }))
    }
}

fn invoke_native(lib: &Library, symbol: &str, args: Vec<String>) -> Result<(), PayloadError> {
    let mut owned = Vec::with_capacity(args.len());
    for (index, arg) in args.into_iter().enumerate() {
        let arg = CString::new(arg).map_err(|_| ArgumentError { index })?;
        owned.push(arg);
    }
    let argv: Vec<*const c_char> = owned.iter().map(|arg| arg.as_ptr()).collect();

    // The probe in `resolve` validated this symbol already.
    let entry: Symbol<'_, RawEntryFn> = unsafe { lib.get(symbol.as_bytes()) }?;

    // SAFETY: the exported entry point promises the argc/argv ABI. `owned`
    // outlives the call, so every argv pointer stays valid throughout.
    let status = unsafe { entry(argv.len() as c_int, argv.as_ptr()) };
    if status == 0 {
        Ok(())
    } else {
        Err(Box::new(PayloadExit { status }))
    }
}

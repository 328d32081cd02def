//! Load an artifact, invoke its entry point, burn the artifact.
//!
//! The runner performs one linear sequence: parse, schedule a safety-net
//! deletion, resolve the entry point, invoke it with the forwarded argument
//! list, and delete the artifact file whether the invocation succeeded or
//! not. Payload failures propagate with their original identity; cleanup
//! failures are always swallowed.
#![allow(unsafe_code)]

pub mod cleanup;
pub mod entry;
pub mod errors;
pub mod loader;
pub mod runner;

pub use cleanup::{remove_on_exit, ArtifactGuard};
pub use entry::EntryPoint;
pub use errors::{ArgumentError, LoadError, PayloadError, PayloadExit, RunFailure};
pub use loader::{entry_symbol, ArtifactLoader, DylibLoader, DylibModule};
pub use runner::{run, RunRequest};

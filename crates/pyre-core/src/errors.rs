use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The original failure raised by an invoked entry point, carried without
/// any wrapping layer. Callers can downcast to the concrete type.
pub type PayloadError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The artifact or its entry point could not be resolved. Fatal; aborts the
/// run before invocation and before the explicit cleanup step.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load artifact {}: {}", .path.display(), .source)]
    Artifact {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("entry point `{}` (symbol `{}`) not found in {}: {}", .entry, .symbol, .path.display(), .source)]
    EntryPoint {
        path: PathBuf,
        entry: String,
        symbol: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// A native entry point returned a nonzero status. Forwarded verbatim as the
/// wrapper's own exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("entry point exited with status {status}")]
pub struct PayloadExit {
    pub status: i32,
}

/// A forwarded argument cannot cross the C boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("forwarded argument {index} contains an interior NUL byte")]
pub struct ArgumentError {
    pub index: usize,
}

/// Outcome of a failed run. Exactly one of these surfaces per run, with full
/// fidelity; cleanup never contributes to it.
#[derive(Debug)]
pub enum RunFailure {
    /// Resolution failed; nothing was invoked.
    Load(LoadError),
    /// The entry point raised. Carries the original failure value.
    Payload(PayloadError),
}

impl RunFailure {
    /// Downcast a payload failure to its concrete error type.
    pub fn payload_ref<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            RunFailure::Payload(err) => err.downcast_ref::<E>(),
            RunFailure::Load(_) => None,
        }
    }
}

impl fmt::Display for RunFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunFailure::Load(err) => fmt::Display::fmt(err, f),
            // Transparent: the payload's own message, no wrapper text.
            RunFailure::Payload(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for RunFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunFailure::Load(err) => std::error::Error::source(err),
            RunFailure::Payload(err) => std::error::Error::source(err.as_ref()),
        }
    }
}

impl From<LoadError> for RunFailure {
    fn from(err: LoadError) -> Self {
        RunFailure::Load(err)
    }
}

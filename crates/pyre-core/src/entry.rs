use std::fmt;

use crate::errors::PayloadError;

/// A resolved entry point: a first-class callable obtained from an
/// [`ArtifactLoader`](crate::loader::ArtifactLoader). Consumed on invocation;
/// an entry point runs at most once per run.
pub struct EntryPoint {
    call: Box<dyn FnOnce(Vec<String>) -> Result<(), PayloadError> + Send>,
}

impl EntryPoint {
    pub fn new<F>(call: F) -> Self
    where
        F: FnOnce(Vec<String>) -> Result<(), PayloadError> + Send + 'static,
    {
        Self {
            call: Box::new(call),
        }
    }

    /// Invoke synchronously with the forwarded argument list. Blocks for as
    /// long as the payload runs; any failure it raises comes back unaltered.
    pub fn invoke(self, args: Vec<String>) -> Result<(), PayloadError> {
        (self.call)(args)
    }
}

impl fmt::Debug for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EntryPoint(..)")
    }
}

//! Exit codes for the pyre wrapper. Part of the public contract.
//! A nonzero status returned by the entry point itself is forwarded
//! verbatim instead of these.

pub const SUCCESS: i32 = 0;
pub const PAYLOAD_FAILED: i32 = 1; // Entry point raised without its own status
pub const LOAD_ERROR: i32 = 2; // Artifact or entry point could not be resolved

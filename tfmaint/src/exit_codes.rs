//! Stable exit codes for the wrapper itself.
//!
//! When the tool runs and fails, its own exit code is used instead.

/// Action completed, or the operator declined confirmation.
pub const OK: i32 = 0;
/// No action given, bad arguments, unreadable config, or the tool could not be spawned.
pub const INVALID: i32 = 1;
/// The action token is not one the wrapper knows.
pub const UNSUPPORTED: i32 = 2;

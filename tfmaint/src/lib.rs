//! Thin command-line wrapper around Terraform.
//!
//! Loads `config.yaml`, maps one action token (`init`, `plan`, `apply`,
//! `destroy`, `custom`) to a single Terraform invocation, and exits with the
//! tool's exit code on failure. The layout keeps a strict separation:
//!
//! - **[`core`]**: Pure logic (action parsing, invocation building). No I/O.
//! - **[`io`]**: Side effects (config loading, prompts, process execution),
//!   behind traits so tests can substitute them.
//!
//! [`dispatch`] ties the two together for the CLI.

pub mod core;
pub mod dispatch;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

//! Deterministic, pure logic for the wrapper.
//!
//! Core modules are free of I/O side effects: they turn CLI tokens and the
//! parsed configuration into invocation requests that `io` executes.

pub mod action;
pub mod config;
pub mod invocation;

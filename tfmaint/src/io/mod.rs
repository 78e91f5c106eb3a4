//! I/O helpers: configuration, prompts and process execution.

pub mod config;
pub mod confirm;
pub mod process;
pub mod runner;

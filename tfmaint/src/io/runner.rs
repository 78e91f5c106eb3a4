//! Tool runner abstraction.
//!
//! The [`ToolRunner`] trait decouples dispatch from actually spawning the
//! external tool. Tests use recording runners that return scripted results
//! without spawning processes.

use std::process::Command;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use crate::core::invocation::{Invocation, InvocationResult};
use crate::io::process::run_command;

/// Abstraction over how an [`Invocation`] is executed.
pub trait ToolRunner {
    /// Run the invocation to completion. A non-zero exit is reported through
    /// [`InvocationResult::exit_code`], not as an `Err`; errors mean the tool
    /// could not be run at all.
    fn run(&self, invocation: &Invocation) -> Result<InvocationResult>;
}

/// Runner that spawns the invocation as a real child process.
pub struct ProcessRunner;

impl ProcessRunner {
    /// Translate an invocation into a `Command`.
    ///
    /// The child inherits this process's environment with the overlay applied
    /// on top; `Command::envs` never writes to our own environment.
    pub fn command(invocation: &Invocation) -> Command {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .current_dir(&invocation.workdir)
            .envs(&invocation.env);
        cmd
    }
}

impl ToolRunner for ProcessRunner {
    #[instrument(skip_all, fields(workdir = %invocation.workdir.display()))]
    fn run(&self, invocation: &Invocation) -> Result<InvocationResult> {
        info!(command = %invocation.command_line(), "running");
        debug!(overlay = ?invocation.env.keys().collect::<Vec<_>>(), "environment overlay");

        let output = run_command(Self::command(invocation)).with_context(|| {
            format!(
                "run `{}` in {}",
                invocation.command_line(),
                invocation.workdir.display()
            )
        })?;

        Ok(InvocationResult {
            exit_code: output.exit_code(),
            stdout: output.stdout_lossy(),
            stderr: output.stderr_lossy(),
        })
    }
}

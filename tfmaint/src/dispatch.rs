//! Orchestration for a single wrapper action.
//!
//! Dispatch gates destructive actions behind confirmation, runs exactly one
//! tool invocation, and logs its output: stdout at info, stderr at error.

use anyhow::Result;
use tracing::{error, info, instrument};

use crate::core::action::Action;
use crate::core::config::WrapperConfig;
use crate::core::invocation::{InvocationResult, build_invocation};
use crate::io::confirm::Confirmer;
use crate::io::runner::ToolRunner;

/// How a dispatched action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The tool ran and exited zero.
    Completed,
    /// The operator declined the confirmation prompt; nothing ran.
    Cancelled,
    /// The tool ran and exited non-zero with `code`.
    Failed { code: i32 },
}

impl DispatchOutcome {
    /// Process exit code for this outcome.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Completed | Self::Cancelled => crate::exit_codes::OK,
            Self::Failed { code } => code,
        }
    }
}

/// Binds the loaded config to a runner and a confirmer.
pub struct Dispatcher<'a, R, C> {
    config: &'a WrapperConfig,
    runner: &'a R,
    confirmer: &'a C,
}

impl<'a, R: ToolRunner, C: Confirmer> Dispatcher<'a, R, C> {
    pub fn new(config: &'a WrapperConfig, runner: &'a R, confirmer: &'a C) -> Self {
        Self {
            config,
            runner,
            confirmer,
        }
    }

    /// Run `action`. Spawns at most one tool process.
    #[instrument(skip_all, fields(action = %action))]
    pub fn dispatch(&self, action: &Action) -> Result<DispatchOutcome> {
        if let Some(prompt) = action.confirmation_prompt()
            && !self.confirmer.confirm(prompt)?
        {
            info!("{}", action.cancelled_message());
            return Ok(DispatchOutcome::Cancelled);
        }

        info!("{}", action.progress_message());
        let invocation = build_invocation(action, self.config);
        let result = self.runner.run(&invocation)?;
        log_result(&result);

        if result.success() {
            Ok(DispatchOutcome::Completed)
        } else {
            error!(exit_code = result.exit_code, "{} failed", invocation.program);
            Ok(DispatchOutcome::Failed {
                code: result.exit_code,
            })
        }
    }
}

fn log_result(result: &InvocationResult) {
    let stdout = result.stdout.trim_end();
    if !stdout.is_empty() {
        info!("{stdout}");
    }
    let stderr = result.stderr.trim_end();
    if !stderr.is_empty() {
        error!("{stderr}");
    }
}

//! Action tokens accepted on the command line.

use std::fmt;

use thiserror::Error;

/// Action names accepted on the command line, in usage order.
pub const ACTION_NAMES: [&str; 5] = ["init", "plan", "apply", "destroy", "custom"];

/// A single wrapper action, resolved from the CLI token and any trailing tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Init,
    Plan,
    Apply,
    Destroy,
    /// Raw arguments forwarded verbatim to the tool.
    Custom(Vec<String>),
}

/// Reasons an action token cannot be turned into an [`Action`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("unsupported action: {0}")]
    Unsupported(String),

    #[error("custom action requires at least one argument for the tool")]
    MissingCustomArgs,
}

impl Action {
    /// Resolve `name` plus the tokens that followed it.
    ///
    /// Trailing tokens are only meaningful for `custom`; the fixed actions
    /// ignore them and the caller decides whether to warn.
    pub fn parse(name: &str, rest: Vec<String>) -> Result<Self, ActionError> {
        match name {
            "init" => Ok(Self::Init),
            "plan" => Ok(Self::Plan),
            "apply" => Ok(Self::Apply),
            "destroy" => Ok(Self::Destroy),
            "custom" if rest.is_empty() => Err(ActionError::MissingCustomArgs),
            "custom" => Ok(Self::Custom(rest)),
            other => Err(ActionError::Unsupported(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Plan => "plan",
            Self::Apply => "apply",
            Self::Destroy => "destroy",
            Self::Custom(_) => "custom",
        }
    }

    /// Question the operator must answer "yes" to before this action runs.
    ///
    /// `None` means the action runs without confirmation.
    pub fn confirmation_prompt(&self) -> Option<&'static str> {
        match self {
            Self::Apply => Some("Are you sure you want to apply the Terraform changes?"),
            Self::Destroy => {
                Some("Are you sure you want to destroy the Terraform-managed infrastructure?")
            }
            Self::Init | Self::Plan | Self::Custom(_) => None,
        }
    }

    pub fn progress_message(&self) -> &'static str {
        match self {
            Self::Init => "Initializing Terraform...",
            Self::Plan => "Planning Terraform deployment...",
            Self::Apply => "Applying Terraform deployment...",
            Self::Destroy => "Destroying Terraform deployment...",
            Self::Custom(_) => "Running custom Terraform command...",
        }
    }

    pub fn cancelled_message(&self) -> &'static str {
        match self {
            Self::Apply => "Apply cancelled.",
            Self::Destroy => "Destroy cancelled.",
            _ => "Action cancelled.",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One-line usage string shown when no action is given.
pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [--config <PATH>] [--yes] [{}] [ARGS...]",
        ACTION_NAMES.join("|")
    )
}

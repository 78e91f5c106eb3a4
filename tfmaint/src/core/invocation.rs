//! Mapping from an [`Action`] to the exact tool invocation it performs.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::action::Action;
use crate::core::config::WrapperConfig;

/// One external-tool call: program, argv tail, cwd and environment overlay.
///
/// The overlay is layered on top of the inherited environment of the child
/// only; building or running an invocation never touches this process's env.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub workdir: PathBuf,
    pub env: BTreeMap<String, String>,
}

impl Invocation {
    /// Full argv including the program name, e.g. `["terraform", "plan", ...]`.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }

    /// Space-joined command line for log output.
    pub fn command_line(&self) -> String {
        self.argv().join(" ")
    }
}

/// Outcome of a finished invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl InvocationResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Build the invocation for `action` against `config`.
pub fn build_invocation(action: &Action, config: &WrapperConfig) -> Invocation {
    let var_file = format!("-var-file={}", config.terraform.vars_file);
    let args: Vec<String> = match action {
        Action::Init => vec!["init".to_string()],
        Action::Plan => vec!["plan".to_string(), var_file],
        Action::Apply => vec!["apply".to_string(), var_file, "-auto-approve".to_string()],
        Action::Destroy => vec![
            "destroy".to_string(),
            var_file,
            "-auto-approve".to_string(),
        ],
        Action::Custom(raw) => raw.clone(),
    };

    Invocation {
        program: config.terraform.binary.clone(),
        args,
        workdir: PathBuf::from(&config.terraform.dir),
        env: config.environment.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TerraformConfig;

    fn config(dir: &str, vars_file: &str) -> WrapperConfig {
        WrapperConfig {
            terraform: TerraformConfig {
                dir: dir.to_string(),
                vars_file: vars_file.to_string(),
                binary: "terraform".to_string(),
            },
            environment: BTreeMap::from([("TF_LOG".to_string(), "WARN".to_string())]),
        }
    }

    #[test]
    fn init_has_no_var_file() {
        let inv = build_invocation(&Action::Init, &config("/infra", "prod.tfvars"));
        assert_eq!(inv.argv(), vec!["terraform", "init"]);
    }

    #[test]
    fn plan_passes_var_file() {
        let inv = build_invocation(&Action::Plan, &config("/infra", "prod.tfvars"));
        assert_eq!(
            inv.argv(),
            vec!["terraform", "plan", "-var-file=prod.tfvars"]
        );
        assert_eq!(inv.workdir, PathBuf::from("/infra"));
    }

    #[test]
    fn apply_and_destroy_auto_approve() {
        let cfg = config("/infra", "prod.tfvars");
        assert_eq!(
            build_invocation(&Action::Apply, &cfg).argv(),
            vec!["terraform", "apply", "-var-file=prod.tfvars", "-auto-approve"]
        );
        assert_eq!(
            build_invocation(&Action::Destroy, &cfg).argv(),
            vec![
                "terraform",
                "destroy",
                "-var-file=prod.tfvars",
                "-auto-approve"
            ]
        );
    }

    #[test]
    fn custom_forwards_tokens_verbatim() {
        let tokens = vec![
            "state".to_string(),
            "rm".to_string(),
            "module.a[\"x y\"]".to_string(),
            "-var-file=other.tfvars".to_string(),
        ];
        let inv = build_invocation(
            &Action::Custom(tokens.clone()),
            &config("/infra", "prod.tfvars"),
        );
        assert_eq!(inv.program, "terraform");
        assert_eq!(inv.args, tokens);
    }

    #[test]
    fn every_action_carries_environment_overlay() {
        let cfg = config("/infra", "prod.tfvars");
        for action in [
            Action::Init,
            Action::Plan,
            Action::Apply,
            Action::Destroy,
            Action::Custom(vec!["version".to_string()]),
        ] {
            let inv = build_invocation(&action, &cfg);
            assert_eq!(inv.env.get("TF_LOG").map(String::as_str), Some("WARN"));
        }
    }

    #[test]
    fn configured_binary_is_used() {
        let mut cfg = config("/infra", "prod.tfvars");
        cfg.terraform.binary = "/opt/tf/1.9/terraform".to_string();
        let inv = build_invocation(&Action::Init, &cfg);
        assert_eq!(inv.command_line(), "/opt/tf/1.9/terraform init");
    }
}

//! Wrapper configuration model.
//!
//! Plain data plus validation; reading the file lives in `io::config`.

use std::collections::BTreeMap;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Executable invoked when `terraform.binary` is not set.
pub const DEFAULT_TERRAFORM_BINARY: &str = "terraform";

/// Wrapper configuration (YAML).
///
/// Loaded once at startup and passed by reference to the dispatcher; nothing
/// mutates it afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WrapperConfig {
    pub terraform: TerraformConfig,

    /// Extra variables layered over the inherited environment of each child.
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TerraformConfig {
    /// Working directory for every tool invocation.
    pub dir: String,

    /// Passed as `-var-file=<vars_file>`; resolved by the tool relative to `dir`.
    pub vars_file: String,

    /// Executable name or path (looked up on `PATH` when bare).
    #[serde(default = "default_binary")]
    pub binary: String,
}

fn default_binary() -> String {
    DEFAULT_TERRAFORM_BINARY.to_string()
}

impl WrapperConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml(contents: &str) -> Result<Self> {
        let cfg: WrapperConfig = serde_yaml::from_str(contents).context("parse config yaml")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.terraform.dir.trim().is_empty() {
            return Err(anyhow!("terraform.dir must be a non-empty path"));
        }
        if self.terraform.vars_file.trim().is_empty() {
            return Err(anyhow!("terraform.vars_file must be a non-empty path"));
        }
        if self.terraform.binary.trim().is_empty() {
            return Err(anyhow!("terraform.binary must be non-empty"));
        }
        for key in self.environment.keys() {
            if key.is_empty() || key.contains('=') || key.contains('\0') {
                return Err(anyhow!("environment key {key:?} is not a valid variable name"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
terraform:
  dir: /infra
  vars_file: prod.tfvars
environment:
  TF_LOG: DEBUG
  AWS_PROFILE: prod
"#;

    #[test]
    fn parses_full_config() {
        let cfg = WrapperConfig::from_yaml(FULL).expect("parse");
        assert_eq!(cfg.terraform.dir, "/infra");
        assert_eq!(cfg.terraform.vars_file, "prod.tfvars");
        assert_eq!(cfg.terraform.binary, DEFAULT_TERRAFORM_BINARY);
        assert_eq!(
            cfg.environment.get("AWS_PROFILE").map(String::as_str),
            Some("prod")
        );
    }

    #[test]
    fn environment_defaults_to_empty() {
        let cfg = WrapperConfig::from_yaml("terraform:\n  dir: .\n  vars_file: dev.tfvars\n")
            .expect("parse");
        assert!(cfg.environment.is_empty());
    }

    #[test]
    fn binary_can_be_overridden() {
        let cfg = WrapperConfig::from_yaml(
            "terraform:\n  dir: .\n  vars_file: dev.tfvars\n  binary: tofu\n",
        )
        .expect("parse");
        assert_eq!(cfg.terraform.binary, "tofu");
    }

    #[test]
    fn missing_vars_file_is_rejected() {
        let err = WrapperConfig::from_yaml("terraform:\n  dir: /infra\n").expect_err("missing");
        assert!(format!("{err:#}").contains("vars_file"), "{err:#}");
    }

    #[test]
    fn missing_terraform_section_is_rejected() {
        assert!(WrapperConfig::from_yaml("environment: {}\n").is_err());
    }

    #[test]
    fn blank_dir_is_rejected() {
        let err = WrapperConfig::from_yaml("terraform:\n  dir: ''\n  vars_file: a.tfvars\n")
            .expect_err("blank dir");
        assert!(err.to_string().contains("terraform.dir"));
    }

    #[test]
    fn invalid_environment_key_is_rejected() {
        let yaml = "terraform:\n  dir: .\n  vars_file: a.tfvars\nenvironment:\n  'A=B': x\n";
        assert!(WrapperConfig::from_yaml(yaml).is_err());
    }
}

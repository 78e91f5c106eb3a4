//! Test-only helpers: scripted runners and confirmers, sample configs and a
//! fake-tool workspace.

use std::cell::RefCell;
use std::collections::BTreeMap;

use anyhow::{Result, anyhow};

use crate::core::invocation::{Invocation, InvocationResult};
use crate::core::config::{DEFAULT_TERRAFORM_BINARY, TerraformConfig, WrapperConfig};
use crate::io::confirm::Confirmer;
use crate::io::runner::ToolRunner;

/// Deterministic config with the default binary and no environment overlay.
pub fn sample_config(dir: &str, vars_file: &str) -> WrapperConfig {
    WrapperConfig {
        terraform: TerraformConfig {
            dir: dir.to_string(),
            vars_file: vars_file.to_string(),
            binary: DEFAULT_TERRAFORM_BINARY.to_string(),
        },
        environment: BTreeMap::new(),
    }
}

/// Runner that records every invocation and returns a fixed result.
pub struct RecordingRunner {
    calls: RefCell<Vec<Invocation>>,
    exit_code: Option<i32>,
}

impl RecordingRunner {
    pub fn succeeding() -> Self {
        Self::with_exit_code(0)
    }

    pub fn with_exit_code(code: i32) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            exit_code: Some(code),
        }
    }

    /// Every run errors as if the program could not be spawned.
    pub fn failing_to_spawn() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            exit_code: None,
        }
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }
}

impl ToolRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<InvocationResult> {
        self.calls.borrow_mut().push(invocation.clone());
        let exit_code = self
            .exit_code
            .ok_or_else(|| anyhow!("spawn {}: not found", invocation.program))?;
        Ok(InvocationResult {
            exit_code,
            stdout: "recorded stdout\n".to_string(),
            stderr: String::new(),
        })
    }
}

/// Confirmer that gives the same answer every time and records each prompt.
pub struct ScriptedConfirmer {
    answer: bool,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedConfirmer {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: RefCell::new(Vec::new()),
        }
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok(self.answer)
    }
}

#[cfg(unix)]
pub use fake_tool::{FAKE_ENV_KEY, FAKE_ENV_VALUE, TestWorkspace};

#[cfg(unix)]
mod fake_tool {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result};
    use tempfile::TempDir;

    /// Overlay variable the fake tool records, set in the generated config.
    pub const FAKE_ENV_KEY: &str = "TFMAINT_FAKE_OVERLAY";
    pub const FAKE_ENV_VALUE: &str = "from-config";

    /// Temp directory with `config.yaml`, an `infra/` working directory and a
    /// fake `terraform` script that records how it was called.
    pub struct TestWorkspace {
        temp: TempDir,
    }

    impl TestWorkspace {
        pub fn new() -> Result<Self> {
            let temp = tempfile::tempdir().context("create tempdir")?;
            let root = temp.path().canonicalize().context("canonicalize tempdir")?;
            let infra = root.join("infra");
            let bin = root.join("bin");
            fs::create_dir_all(&infra).context("create infra dir")?;
            fs::create_dir_all(&bin).context("create bin dir")?;

            let tool = bin.join("terraform");
            fs::write(&tool, fake_script(&root)).context("write fake terraform")?;
            fs::set_permissions(&tool, fs::Permissions::from_mode(0o755))
                .context("chmod fake terraform")?;

            let config = format!(
                "terraform:\n  dir: '{}'\n  vars_file: prod.tfvars\n  binary: '{}'\nenvironment:\n  {FAKE_ENV_KEY}: {FAKE_ENV_VALUE}\n",
                infra.display(),
                tool.display(),
            );
            fs::write(root.join("config.yaml"), config).context("write config.yaml")?;

            Ok(Self { temp })
        }

        pub fn path(&self) -> &Path {
            self.temp.path()
        }

        pub fn config_path(&self) -> PathBuf {
            self.path().join("config.yaml")
        }

        pub fn infra_dir(&self) -> PathBuf {
            self.root().join("infra")
        }

        /// Make subsequent fake tool runs exit with `code`.
        pub fn set_exit_code(&self, code: i32) -> Result<()> {
            fs::write(self.root().join("exit_code"), code.to_string()).context("write exit_code")
        }

        /// Number of times the fake tool has run.
        pub fn call_count(&self) -> usize {
            fs::read_to_string(self.root().join("calls.log"))
                .map(|log| log.lines().count())
                .unwrap_or(0)
        }

        /// Arguments of the most recent run, one entry per argv element.
        pub fn last_args(&self) -> Result<Vec<String>> {
            let raw = fs::read_to_string(self.root().join("args.txt")).context("read args.txt")?;
            Ok(raw.lines().map(str::to_string).collect())
        }

        pub fn last_cwd(&self) -> Result<PathBuf> {
            let raw = fs::read_to_string(self.root().join("cwd.txt")).context("read cwd.txt")?;
            Ok(PathBuf::from(raw.trim_end()))
        }

        /// Value of [`FAKE_ENV_KEY`] seen by the most recent run.
        pub fn last_overlay_value(&self) -> Result<String> {
            fs::read_to_string(self.root().join("env.txt")).context("read env.txt")
        }

        fn root(&self) -> PathBuf {
            self.temp
                .path()
                .canonicalize()
                .unwrap_or_else(|_| self.temp.path().to_path_buf())
        }
    }

    fn fake_script(root: &Path) -> String {
        let root = root.display();
        format!(
            r#"#!/bin/sh
printf '%s\n' "$@" > '{root}/args.txt'
pwd -P > '{root}/cwd.txt'
printf '%s' "${{{FAKE_ENV_KEY}-}}" > '{root}/env.txt'
echo call >> '{root}/calls.log'
echo "fake terraform stdout"
echo "fake terraform stderr" >&2
code=0
if [ -f '{root}/exit_code' ]; then code=$(cat '{root}/exit_code'); fi
exit "$code"
"#
        )
    }
}

//! Loading the wrapper configuration from `config.yaml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::config::WrapperConfig;

/// Default config file, resolved against the current directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Load config from a YAML file.
///
/// Unlike optional state files, a missing config is an error: the wrapper has
/// no sensible default working directory or variables file.
pub fn load_config(path: &Path) -> Result<WrapperConfig> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    WrapperConfig::from_yaml(&contents).with_context(|| format!("load {}", path.display()))
}

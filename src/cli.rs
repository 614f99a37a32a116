pub mod check_config;
pub mod classify;
pub mod cn;
pub mod merge;

use anyhow::{Context, Result};
use class_merge::{MergeConfig, Placement};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the rule table of a command comes from.
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    /// Rule table replacing the bundled Tailwind table
    pub config: Option<PathBuf>,
    /// Rule file layered on top of the base table
    pub extend: Option<PathBuf>,
    /// Overrides the placement of both files
    pub placement: Option<Placement>,
}

/// Load the rule table named on the command line, or the bundled Tailwind
/// table when no file is given, then apply `--extend` and `--placement`.
pub fn load_config(options: &ConfigOptions) -> Result<MergeConfig> {
    let config = match &options.config {
        Some(path) => {
            let content = read_file(path)?;
            MergeConfig::from_toml_str(&content)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        }
        None => MergeConfig::tailwind().context("Bundled Tailwind config is invalid")?,
    };

    let config = match &options.extend {
        Some(path) => {
            let content = read_file(path)?;
            config
                .extend_from_toml_str(&content)
                .with_context(|| format!("Invalid extension file {}", path.display()))?
        }
        None => config,
    };

    Ok(match options.placement {
        Some(placement) => config.with_placement(placement),
        None => config,
    })
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))
}

use crate::cli::{ConfigOptions, load_config};
use anyhow::Result;
use class_merge::Placement;
use std::path::Path;

pub struct CheckConfigResult {
    pub rules: usize,
    pub groups: usize,
    pub conflicts: usize,
    pub placement: Placement,
}

/// Validate a rule file, either on its own or, with `as_extension`, layered
/// on top of the bundled Tailwind table.
pub fn execute(path: &Path, as_extension: bool) -> Result<CheckConfigResult> {
    let path = Some(path.to_path_buf());
    let options = if as_extension {
        ConfigOptions {
            extend: path,
            ..ConfigOptions::default()
        }
    } else {
        ConfigOptions {
            config: path,
            ..ConfigOptions::default()
        }
    };
    let config = load_config(&options)?;

    Ok(CheckConfigResult {
        rules: config.rule_count(),
        groups: config.group_ids().len(),
        conflicts: config.conflict_count(),
        placement: config.placement(),
    })
}

use crate::cli::{ConfigOptions, load_config};
use anyhow::Result;

pub struct MergeResult {
    /// One merged class list per input, in input order
    pub merged: Vec<String>,
    /// Number of classes dropped across all inputs
    pub classes_removed: usize,
}

pub fn execute(options: &ConfigOptions, inputs: &[String]) -> Result<MergeResult> {
    let config = load_config(options)?;

    let mut classes_removed = 0;
    let merged = inputs
        .iter()
        .map(|input| {
            let output = config.merge(input);
            classes_removed +=
                input.split_whitespace().count() - output.split_whitespace().count();
            output
        })
        .collect();

    Ok(MergeResult {
        merged,
        classes_removed,
    })
}

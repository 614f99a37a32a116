use crate::cli::{ConfigOptions, load_config};
use anyhow::Result;
use class_merge::classify;

pub struct ClassifyResult {
    /// `TOKEN group=ID variants=KEY`, or `TOKEN -` when no group matches
    pub lines: Vec<String>,
    pub unclassified: usize,
}

pub fn execute(options: &ConfigOptions, tokens: &[String]) -> Result<ClassifyResult> {
    let config = load_config(options)?;

    let mut unclassified = 0;
    let lines: Vec<String> = tokens
        .iter()
        .flat_map(|token| token.split_whitespace())
        .map(|token| match classify(&config, token) {
            Some(classified) => format!(
                "{} group={} variants={}",
                token, classified.group, classified.variant_key
            ),
            None => {
                unclassified += 1;
                format!("{} -", token)
            }
        })
        .collect();

    Ok(ClassifyResult {
        lines,
        unclassified,
    })
}

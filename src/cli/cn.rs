use crate::cli::{ConfigOptions, load_config};
use anyhow::{Context, Result};
use class_merge::ClassValue;

pub struct CnResult {
    pub merged: String,
}

/// Parse every argument as a JSON class value, then flatten and merge them
/// together, the way `cn(...)` treats its arguments.
pub fn execute(options: &ConfigOptions, arguments: &[String]) -> Result<CnResult> {
    let config = load_config(options)?;

    let values = arguments
        .iter()
        .enumerate()
        .map(|(i, argument)| {
            let json: serde_json::Value = serde_json::from_str(argument)
                .with_context(|| format!("Argument {} is not valid JSON: {}", i + 1, argument))?;
            Ok(ClassValue::from_json(&json))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CnResult {
        merged: config.cn(&values),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::{Expect, expect};

    fn check(arguments: &[&str], expected: Expect) {
        let arguments: Vec<String> = arguments.iter().map(|a| a.to_string()).collect();
        let actual = match execute(&ConfigOptions::default(), &arguments) {
            Ok(result) => result.merged,
            Err(err) => format!("error: {:#}", err),
        };
        expected.assert_eq(&actual);
    }

    #[test]
    fn conditional_object() {
        check(
            &[
                r#""border-b-[1px] flex items-center justify-between p-6 gap-2 transition-all""#,
                r#"{"h-0 p-0 overflow-hidden": true}"#,
            ],
            expect!["border-b-[1px] flex items-center justify-between gap-2 transition-all h-0 p-0 overflow-hidden"],
        );
    }

    #[test]
    fn nested_arrays_and_falsy_values() {
        check(
            &[
                r#"["px-2", null, false, 0, ["py-1", ["text-sm"]]]"#,
                r#"{"p-4": 1, "text-lg": "", "shadow": []}"#,
            ],
            expect!["text-sm p-4 shadow"],
        );
    }

    #[test]
    fn invalid_json() {
        check(
            &[r#""p-2""#, "p-4"],
            expect!["error: Argument 2 is not valid JSON: p-4: expected value at line 1 column 1"],
        );
    }
}

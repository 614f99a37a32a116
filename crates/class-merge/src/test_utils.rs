//! Reading `.cases` files: txtar archives between `## BEGIN` and `## END`,
//! each preceded by a one-line title.

use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseBlock {
    /// Last non-empty line before `## BEGIN`
    pub title: String,
    /// Txtar content between the markers
    pub archive: String,
    /// Line number of `## BEGIN`
    pub line: usize,
}

pub fn parse_cases(content: &str) -> Vec<CaseBlock> {
    let mut cases = Vec::new();
    let mut title = String::new();
    let mut current: Option<CaseBlock> = None;

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;

        if line == "## BEGIN" {
            assert!(
                current.is_none(),
                "Found '## BEGIN' at line {} while already inside a test case",
                line_number
            );
            current = Some(CaseBlock {
                title: std::mem::take(&mut title),
                archive: String::new(),
                line: line_number,
            });
        } else if line == "## END" {
            let case = current.take().unwrap_or_else(|| {
                panic!(
                    "Found '## END' at line {} without matching '## BEGIN'",
                    line_number
                )
            });
            cases.push(case);
        } else if let Some(case) = current.as_mut() {
            if !case.archive.is_empty() {
                case.archive.push('\n');
            }
            case.archive.push_str(line);
        } else if !line.trim().is_empty() {
            title = line.trim().to_string();
        }
    }

    assert!(
        current.is_none(),
        "Reached end of file while inside a test case (missing '## END')"
    );

    cases
}

/// Read and split a file under `test_data/`.
pub fn read_cases(name: &str) -> Vec<CaseBlock> {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("test_data");
    path.push(name);

    let content = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("Failed to read {}: {}", path.display(), err));
    parse_cases(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_cases_titles_and_lines() {
        let content = indoc! {"
            Padding overrides padding

            ## BEGIN
            -- in --
            p-2 p-4
            -- out --
            p-4
            ## END

            Unknown classes survive
            ## BEGIN
            -- in --
            foo p-2
            -- out --
            foo p-2
            ## END
        "};

        let cases = parse_cases(content);
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].title, "Padding overrides padding");
        assert_eq!(cases[0].line, 3);
        assert_eq!(cases[0].archive, "-- in --\np-2 p-4\n-- out --\np-4");
        assert_eq!(cases[1].title, "Unknown classes survive");
        assert_eq!(cases[1].line, 11);
    }

    #[test]
    #[should_panic(expected = "Found '## END' at line 2 without matching '## BEGIN'")]
    fn test_parse_cases_unmatched_end() {
        parse_cases("some content\n## END");
    }

    #[test]
    #[should_panic(expected = "Reached end of file while inside a test case")]
    fn test_parse_cases_unmatched_begin() {
        parse_cases("## BEGIN\nsome content");
    }
}

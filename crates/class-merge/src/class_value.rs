use std::borrow::Cow;

/// One argument to [`cn`](crate::cn): a class string, a nested list, or a
/// map of classes to flags.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassValue<'a> {
    /// `null`, `undefined` or any value that contributes nothing.
    Empty,
    Literal(Cow<'a, str>),
    Number(f64),
    /// Booleans never produce a class; they exist so `cond && "class"`
    /// style inputs can be passed through unchanged.
    Bool(bool),
    List(Vec<ClassValue<'a>>),
    /// Keys are emitted when their flag is set.
    Conditional(Vec<(Cow<'a, str>, bool)>),
}

impl<'a> ClassValue<'a> {
    pub fn conditional<K, I>(entries: I) -> Self
    where
        K: Into<Cow<'a, str>>,
        I: IntoIterator<Item = (K, bool)>,
    {
        ClassValue::Conditional(
            entries
                .into_iter()
                .map(|(key, flag)| (key.into(), flag))
                .collect(),
        )
    }

    /// Convert a JSON value using JavaScript truthiness. Object entries are
    /// kept when their value is truthy.
    pub fn from_json(value: &serde_json::Value) -> ClassValue<'static> {
        use serde_json::Value;

        match value {
            Value::Null => ClassValue::Empty,
            Value::Bool(b) => ClassValue::Bool(*b),
            Value::Number(n) => n.as_f64().map_or(ClassValue::Empty, ClassValue::Number),
            Value::String(s) => ClassValue::Literal(Cow::Owned(s.clone())),
            Value::Array(items) => {
                ClassValue::List(items.iter().map(ClassValue::from_json).collect())
            }
            Value::Object(map) => ClassValue::Conditional(
                map.iter()
                    .map(|(key, flag)| (Cow::Owned(key.clone()), is_truthy(flag)))
                    .collect(),
            ),
        }
    }

    fn collect_into(&'a self, out: &mut Vec<Cow<'a, str>>) {
        match self {
            ClassValue::Empty | ClassValue::Bool(_) => {}
            ClassValue::Literal(s) => out.extend(s.split_whitespace().map(Cow::Borrowed)),
            ClassValue::Number(n) => {
                if *n != 0.0 && !n.is_nan() {
                    out.push(Cow::Owned(format_number(*n)));
                }
            }
            ClassValue::List(items) => {
                for item in items {
                    item.collect_into(out);
                }
            }
            ClassValue::Conditional(entries) => {
                for (key, _) in entries.iter().filter(|(_, flag)| *flag) {
                    out.extend(key.split_whitespace().map(Cow::Borrowed));
                }
            }
        }
    }
}

/// Render a number the way JavaScript's `String(n)` does.
fn format_number(n: f64) -> String {
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = n.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let scientific = format!("{:e}", n);
        match scientific.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => scientific,
        }
    } else {
        n.to_string()
    }
}

fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Flatten class values depth-first into a single space-separated string.
/// Never fails; anything that can't produce a class is skipped.
pub fn normalize(values: &[ClassValue<'_>]) -> String {
    let mut tokens = Vec::new();
    for value in values {
        value.collect_into(&mut tokens);
    }
    tokens.join(" ")
}

impl<'a> From<&'a str> for ClassValue<'a> {
    fn from(s: &'a str) -> Self {
        ClassValue::Literal(Cow::Borrowed(s))
    }
}

impl From<String> for ClassValue<'_> {
    fn from(s: String) -> Self {
        ClassValue::Literal(Cow::Owned(s))
    }
}

impl From<bool> for ClassValue<'_> {
    fn from(b: bool) -> Self {
        ClassValue::Bool(b)
    }
}

impl From<f64> for ClassValue<'_> {
    fn from(n: f64) -> Self {
        ClassValue::Number(n)
    }
}

impl From<i64> for ClassValue<'_> {
    fn from(n: i64) -> Self {
        ClassValue::Number(n as f64)
    }
}

impl From<i32> for ClassValue<'_> {
    fn from(n: i32) -> Self {
        ClassValue::Number(f64::from(n))
    }
}

impl<'a, T: Into<ClassValue<'a>>> From<Option<T>> for ClassValue<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(ClassValue::Empty, Into::into)
    }
}

impl<'a, T: Into<ClassValue<'a>>> From<Vec<T>> for ClassValue<'a> {
    fn from(items: Vec<T>) -> Self {
        ClassValue::List(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_normalize_literals_and_lists() {
        let values = vec![
            ClassValue::from("a"),
            ClassValue::from(vec!["b", "c"]),
            ClassValue::List(vec![ClassValue::from("d"), vec!["e"].into()]),
        ];
        assert_eq!(normalize(&values), "a b c d e");
    }

    #[test]
    fn test_normalize_skips_falsy_values() {
        let values = vec![
            ClassValue::Empty,
            ClassValue::from(""),
            ClassValue::from(false),
            ClassValue::from(true),
            ClassValue::from(0),
            ClassValue::from(f64::NAN),
            ClassValue::from(None::<&str>),
            ClassValue::from(Some("kept")),
        ];
        assert_eq!(normalize(&values), "kept");
    }

    #[test]
    fn test_normalize_numbers() {
        let values = vec![ClassValue::from(1), ClassValue::from(1.5), ClassValue::from(-2)];
        assert_eq!(normalize(&values), "1 1.5 -2");
    }

    #[test]
    fn test_normalize_number_edge_cases() {
        let values = vec![
            ClassValue::from(1e21),
            ClassValue::from(1.5e21),
            ClassValue::from(1e20),
            ClassValue::from(f64::INFINITY),
            ClassValue::from(f64::NEG_INFINITY),
            ClassValue::from(1e-7),
            ClassValue::from(0.000001),
            ClassValue::from(-0.0),
        ];
        assert_eq!(
            normalize(&values),
            "1e+21 1.5e+21 100000000000000000000 Infinity -Infinity 1e-7 0.000001"
        );
    }

    #[test]
    fn test_normalize_conditional_map() {
        let values = vec![ClassValue::conditional([
            ("a", true),
            ("b", false),
            ("c d", true),
        ])];
        assert_eq!(normalize(&values), "a c d");
    }

    #[test]
    fn test_normalize_whitespace() {
        let values = vec![
            ClassValue::from("  a   b "),
            ClassValue::from("\n"),
            ClassValue::from("c\td"),
        ];
        let normalized = normalize(&values);
        assert_eq!(normalized, "a b c d");
        assert!(!normalized.contains("  "));
    }

    #[test]
    fn test_from_json() {
        let value = ClassValue::from_json(&json!([
            "a",
            null,
            0,
            3,
            false,
            ["b", ["c"]],
            { "d": true, "e": 0, "f": "yes", "g": "", "h": [] }
        ]));
        assert_eq!(normalize(&[value]), "a 3 b c d f h");
    }
}

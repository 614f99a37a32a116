use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

static TSHIRT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(\.\d+)?)?(xs|sm|md|lg|xl)$").unwrap());

static FRACTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+/\d+$").unwrap());

static LENGTH_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\d+(%|px|r?em|[sdl]?v([hwib]|min|max)|pt|pc|in|cm|mm|cap|ch|ex|r?lh|cq(w|h|i|b|min|max))|\b(calc|min|max|clamp)\(.+\)|^0$",
    )
    .unwrap()
});

static COLOR_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(rgba?|hsla?|hwb|(ok)?(lab|lch)|color-mix)\(.+\)$").unwrap()
});

static IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(url|image|image-set|cross-fade|element|(repeating-)?(linear|radial|conic)-gradient)\(.+\)$")
        .unwrap()
});

static SHADOW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(inset_)?-?((\d+)?\.?(\d+)[a-z]+|0)_-?((\d+)?\.?(\d+)[a-z]+|0)").unwrap()
});

/// Value-shape predicates referenced by name from a merge config.
///
/// Plain validators look at the text after `prefix-`. The `arbitrary-*`
/// family only accepts bracketed `[value]` or parenthesised `(--var)` values
/// and checks the optional `label:` hint before falling back to the shape
/// of the value itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Validator {
    Any,
    Number,
    Integer,
    Percent,
    Fraction,
    Tshirt,
    ArbitraryAny,
    ArbitraryLength,
    ArbitraryNumber,
    ArbitraryColor,
    ArbitraryImage,
    ArbitraryShadow,
    ArbitraryPosition,
    ArbitraryFamilyName,
    ArbitraryVariable,
}

/// A bracketed or parenthesised value, e.g. `[length:var(--x)]` or `(--x)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArbitraryValue<'a> {
    pub label: Option<&'a str>,
    pub value: &'a str,
    /// Written with the `(...)` CSS-variable shorthand.
    pub variable: bool,
}

impl<'a> ArbitraryValue<'a> {
    pub fn parse(raw: &'a str) -> Option<Self> {
        let (inner, variable) =
            if let Some(inner) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
                (inner, false)
            } else if let Some(inner) = raw.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
                (inner, true)
            } else {
                return None;
            };

        if inner.is_empty() {
            return None;
        }

        let (label, value) = match inner.split_once(':') {
            Some((label, value)) if is_label(label) && !value.is_empty() => (Some(label), value),
            _ => (None, inner),
        };

        Some(ArbitraryValue {
            label,
            value,
            variable,
        })
    }

    fn labelled(&self, accepted: &[&str]) -> Option<bool> {
        self.label.map(|label| accepted.contains(&label))
    }
}

fn is_label(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_lowercase())
        && s.chars().all(|c| c.is_ascii_lowercase() || c == '-')
}

impl Validator {
    pub fn is_arbitrary(self) -> bool {
        !matches!(
            self,
            Validator::Any
                | Validator::Number
                | Validator::Integer
                | Validator::Percent
                | Validator::Fraction
                | Validator::Tshirt
        )
    }

    /// Check the part of a class after its prefix, e.g. `4` in `p-4`.
    pub fn accepts(self, value: &str) -> bool {
        match ArbitraryValue::parse(value) {
            Some(arbitrary) => self.is_arbitrary() && self.accepts_arbitrary(&arbitrary),
            None => !self.is_arbitrary() && self.accepts_plain(value),
        }
    }

    fn accepts_plain(self, value: &str) -> bool {
        match self {
            Validator::Any => !value.is_empty(),
            Validator::Number => is_number(value),
            Validator::Integer => is_integer(value),
            Validator::Percent => value.strip_suffix('%').is_some_and(is_number),
            Validator::Fraction => FRACTION.is_match(value),
            Validator::Tshirt => TSHIRT.is_match(value),
            _ => false,
        }
    }

    fn accepts_arbitrary(self, arbitrary: &ArbitraryValue<'_>) -> bool {
        let value = arbitrary.value;
        match self {
            Validator::ArbitraryAny => true,
            Validator::ArbitraryVariable => arbitrary.variable,
            Validator::ArbitraryLength => arbitrary
                .labelled(&["length", "size"])
                .unwrap_or_else(|| is_length(value)),
            Validator::ArbitraryNumber => arbitrary
                .labelled(&["number"])
                .unwrap_or_else(|| is_number(value)),
            Validator::ArbitraryColor => arbitrary
                .labelled(&["color"])
                .unwrap_or_else(|| value.starts_with('#') || COLOR_FUNCTION.is_match(value)),
            Validator::ArbitraryImage => arbitrary
                .labelled(&["image", "url"])
                .unwrap_or_else(|| IMAGE.is_match(value)),
            Validator::ArbitraryShadow => arbitrary
                .labelled(&["shadow"])
                .unwrap_or_else(|| SHADOW.is_match(value)),
            Validator::ArbitraryPosition => arbitrary
                .labelled(&["position", "percentage"])
                .unwrap_or(false),
            Validator::ArbitraryFamilyName => {
                arbitrary.labelled(&["family-name"]).unwrap_or(false)
            }
            _ => false,
        }
    }
}

fn is_integer(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn is_number(value: &str) -> bool {
    !value.is_empty()
        && value.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && value.parse::<f64>().is_ok()
}

fn is_length(value: &str) -> bool {
    LENGTH_UNIT.is_match(value) && !COLOR_FUNCTION.is_match(value)
}

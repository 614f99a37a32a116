use crate::config::MergeConfig;
use std::fmt;

/// The semantic group a class belongs to. Two classes in the same group set
/// the same CSS property, so only one of them can take effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassGroupId<'a> {
    /// A group named in the merge config.
    Configured(&'a str),
    /// An arbitrary property class such as `[paint-order:normal]`, grouped
    /// by its property name.
    ArbitraryProperty(&'a str),
}

impl fmt::Display for ClassGroupId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassGroupId::Configured(id) => write!(f, "{}", id),
            ClassGroupId::ArbitraryProperty(property) => write!(f, "[{}]", property),
        }
    }
}

/// Normalized variants of a class. Two classes only conflict when their
/// keys are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VariantKey {
    /// Whether the class has an important modifier (!)
    pub important: bool,
    /// Sorted and joined variants
    pub variants: String,
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.variants)?;
        if self.important {
            write!(f, "!")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedToken<'a> {
    pub group: ClassGroupId<'a>,
    pub variant_key: VariantKey,
}

/// Classify a single class.
/// Returns None if the class doesn't belong to a known group.
pub fn classify<'a>(config: &'a MergeConfig, class: &'a str) -> Option<ClassifiedToken<'a>> {
    let mut variants: Vec<&str> = Vec::new();
    let mut bracket_depth: u32 = 0;
    let mut paren_depth: u32 = 0;
    let mut variant_start = 0;

    for (i, c) in class.bytes().enumerate() {
        if bracket_depth == 0 && paren_depth == 0 && c == b':' {
            variants.push(&class[variant_start..i]);
            variant_start = i + 1;
            continue;
        }

        match c {
            b'[' => bracket_depth += 1,
            b']' => bracket_depth = bracket_depth.saturating_sub(1),
            b'(' => paren_depth += 1,
            b')' => paren_depth = paren_depth.saturating_sub(1),
            _ => {}
        }
    }

    // Base class is everything after the last variant separator
    let base_with_important = &class[variant_start..];

    // Important modifier (! at end or start)
    let (base, important) = if let Some(stripped) = base_with_important.strip_suffix('!') {
        (stripped, true)
    } else if let Some(stripped) = base_with_important.strip_prefix('!') {
        (stripped, true)
    } else {
        (base_with_important, false)
    };

    let group = classify_base(config, base)?;

    Some(ClassifiedToken {
        group,
        variant_key: VariantKey {
            important,
            variants: sort_variants(config, &variants).join(":"),
        },
    })
}

fn classify_base<'a>(config: &'a MergeConfig, base: &'a str) -> Option<ClassGroupId<'a>> {
    if let Some(property) = arbitrary_property(base) {
        return Some(ClassGroupId::ArbitraryProperty(property));
    }

    let (core, negative) = match base.strip_prefix('-') {
        Some(core) => (core, true),
        None => (base, false),
    };

    // Look up without a postfix modifier first, e.g. `text-lg/7` or
    // `bg-red-500/50`, then fall back to the whole class (`w-1/2`).
    let stripped =
        postfix_position(core).and_then(|slash| config.group_of(&core[..slash], negative));

    stripped
        .or_else(|| config.group_of(core, negative))
        .map(ClassGroupId::Configured)
}

/// `[property:value]` yields `property`.
fn arbitrary_property(base: &str) -> Option<&str> {
    let inner = base.strip_prefix('[')?.strip_suffix(']')?;
    let (property, value) = inner.split_once(':')?;
    if property.is_empty() || value.is_empty() || property.contains(['[', '(']) {
        return None;
    }
    Some(property)
}

/// Position of the last `/` outside brackets and parens.
fn postfix_position(core: &str) -> Option<usize> {
    let mut depth: u32 = 0;
    let mut position = None;
    for (i, c) in core.bytes().enumerate() {
        match c {
            b'[' | b'(' => depth += 1,
            b']' | b')' => depth = depth.saturating_sub(1),
            b'/' if depth == 0 => position = Some(i),
            _ => {}
        }
    }
    position.filter(|&pos| pos > 0)
}

/// Sort variants to normalize for conflict detection.
/// Order-sensitive variants (*, before, after, arbitrary, etc.) are NOT
/// sorted - they split the list into independently sorted runs.
fn sort_variants<'a>(config: &MergeConfig, variants: &[&'a str]) -> Vec<&'a str> {
    let mut result: Vec<&'a str> = Vec::with_capacity(variants.len());
    let mut current_segment: Vec<&'a str> = Vec::new();

    for &variant in variants {
        if config.is_order_sensitive(variant) {
            current_segment.sort_unstable();
            result.append(&mut current_segment);
            result.push(variant);
        } else {
            current_segment.push(variant);
        }
    }

    current_segment.sort_unstable();
    result.append(&mut current_segment);

    result
}

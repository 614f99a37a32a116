use crate::validators::Validator;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Rule table for the Tailwind v4 class groups, shipped as data.
pub const TAILWIND_CONFIG: &str = include_str!("default_config.toml");

/// Where the surviving class of a conflict ends up in the merged output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// The later class stays where it was written.
    #[default]
    Last,
    /// The later class takes the slot of the earliest class it replaced.
    First,
}

impl FromStr for Placement {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last" => Ok(Placement::Last),
            "first" => Ok(Placement::First),
            other => Err(ConfigError::UnknownPlacement(other.to_string())),
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Last => write!(f, "last"),
            Placement::First => write!(f, "first"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse merge config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Rule #{index} has an empty group id")]
    EmptyGroupId { index: usize },

    #[error("Rule #{index} for group '{group}' has neither `exact` classes nor a `prefix`")]
    EmptyRule { group: String, index: usize },

    #[error("Rule #{index} for group '{group}' has a prefix but accepts no values")]
    PrefixWithoutValues { group: String, index: usize },

    #[error("Conflict entry '{group}' names unknown group '{unknown}'")]
    UnknownConflictGroup { group: String, unknown: String },

    #[error("Unknown placement '{0}', expected 'last' or 'first'")]
    UnknownPlacement(String),
}

/// One `[[group]]` table. A group may be described by several rules; they
/// are tried in the order they were written.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct GroupRule {
    pub id: String,
    #[serde(default)]
    pub exact: Vec<String>,
    pub prefix: Option<String>,
    /// Literal scale steps accepted after `prefix-`.
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub validators: Vec<Validator>,
    /// Whether the prefix alone is a class, e.g. `border` or `shadow`.
    #[serde(default)]
    pub bare: bool,
    /// Whether `-prefix-value` is accepted.
    #[serde(default)]
    pub negative: bool,
}

impl GroupRule {
    fn matches(&self, core: &str, negative: bool) -> bool {
        if negative && !self.negative {
            return false;
        }

        if !negative && self.exact.iter().any(|class| class == core) {
            return true;
        }

        let Some(prefix) = &self.prefix else {
            return false;
        };
        let Some(rest) = core.strip_prefix(prefix.as_str()) else {
            return false;
        };
        if rest.is_empty() {
            return self.bare;
        }
        let Some(value) = rest.strip_prefix('-') else {
            return false;
        };

        self.values.iter().any(|v| v == value)
            || self.validators.iter().any(|validator| validator.accepts(value))
    }

    fn index_keys(&self) -> impl Iterator<Item = &str> {
        self.exact
            .iter()
            .map(String::as_str)
            .chain(self.prefix.as_deref())
            .map(first_segment)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    placement: Option<Placement>,
    #[serde(default)]
    order_sensitive_variants: Vec<String>,
    #[serde(default, rename = "group")]
    groups: Vec<GroupRule>,
    #[serde(default)]
    conflicts: BTreeMap<String, Vec<String>>,
}

/// Immutable rule set used by the classifier and merger.
///
/// Built once through [`MergeConfig::from_toml_str`] or
/// [`MergeConfig::tailwind`] and then shared by reference; nothing mutates
/// it afterwards, so it can be read from any number of threads.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    rules: Vec<GroupRule>,
    /// First `-`-separated segment of every exact class and prefix, mapped
    /// to the rules that mention it, in authored order.
    index: HashMap<String, Vec<usize>>,
    conflicts: HashMap<String, Vec<String>>,
    order_sensitive: HashSet<String>,
    placement: Placement,
}

impl MergeConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(toml_str)?;
        Self::from_raw(raw)
    }

    /// The bundled Tailwind v4 rule table.
    pub fn tailwind() -> Result<Self, ConfigError> {
        Self::from_toml_str(TAILWIND_CONFIG)
    }

    /// Layer another rule file on top of this config.
    ///
    /// Rules of `extra` are tried before the existing rules, keeping the
    /// order each side was written in, so an added group can take classes
    /// that an existing catch-all rule would otherwise match. Conflict lists
    /// and order-sensitive variants are merged, and `placement` replaces the
    /// current one when given. The result is validated like a fresh config.
    pub fn extend_from_toml_str(&self, extra: &str) -> Result<Self, ConfigError> {
        let extra: RawConfig = toml::from_str(extra)?;

        let mut conflicts: BTreeMap<String, Vec<String>> = self
            .conflicts
            .iter()
            .map(|(group, claimed)| (group.clone(), claimed.clone()))
            .collect();
        for (group, claimed) in extra.conflicts {
            let existing = conflicts.entry(group).or_default();
            for id in claimed {
                if !existing.contains(&id) {
                    existing.push(id);
                }
            }
        }

        let mut order_sensitive_variants: Vec<String> =
            self.order_sensitive.iter().cloned().collect();
        order_sensitive_variants.extend(
            extra
                .order_sensitive_variants
                .into_iter()
                .filter(|variant| !self.order_sensitive.contains(variant)),
        );

        let mut groups = extra.groups;
        groups.extend(self.rules.iter().cloned());

        Self::from_raw(RawConfig {
            placement: Some(extra.placement.unwrap_or(self.placement)),
            order_sensitive_variants,
            groups,
            conflicts,
        })
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let mut known = HashSet::new();
        let mut index: HashMap<String, Vec<usize>> = HashMap::new();

        for (i, rule) in raw.groups.iter().enumerate() {
            if rule.id.is_empty() {
                return Err(ConfigError::EmptyGroupId { index: i });
            }
            if rule.exact.is_empty() && rule.prefix.is_none() {
                return Err(ConfigError::EmptyRule {
                    group: rule.id.clone(),
                    index: i,
                });
            }
            if rule.prefix.is_some()
                && !rule.bare
                && rule.values.is_empty()
                && rule.validators.is_empty()
            {
                return Err(ConfigError::PrefixWithoutValues {
                    group: rule.id.clone(),
                    index: i,
                });
            }

            known.insert(rule.id.as_str());
            for key in rule.index_keys() {
                let slots = index.entry(key.to_string()).or_default();
                if slots.last() != Some(&i) {
                    slots.push(i);
                }
            }
        }

        for (group, claimed) in &raw.conflicts {
            let unknown = std::iter::once(group)
                .chain(claimed)
                .find(|id| !known.contains(id.as_str()));
            if let Some(unknown) = unknown {
                return Err(ConfigError::UnknownConflictGroup {
                    group: group.clone(),
                    unknown: unknown.clone(),
                });
            }
        }

        Ok(MergeConfig {
            index,
            conflicts: raw.conflicts.into_iter().collect(),
            order_sensitive: raw.order_sensitive_variants.into_iter().collect(),
            placement: raw.placement.unwrap_or_default(),
            rules: raw.groups,
        })
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Distinct group ids in the order they first appear.
    pub fn group_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rules
            .iter()
            .map(|rule| rule.id.as_str())
            .filter(|id| seen.insert(*id))
            .collect()
    }

    pub fn conflict_count(&self) -> usize {
        self.conflicts.len()
    }

    /// Groups that a class of `group` also overrides.
    pub fn conflicts_of(&self, group: &str) -> &[String] {
        self.conflicts.get(group).map_or(&[], Vec::as_slice)
    }

    /// Whether a variant keeps its position when variants are normalized.
    /// Arbitrary variants like `[&>*]` always do.
    pub fn is_order_sensitive(&self, variant: &str) -> bool {
        variant.starts_with('[') || self.order_sensitive.contains(variant)
    }

    /// Find the group of a class with variants, important marker and
    /// negative sign already removed. The first matching rule wins.
    pub(crate) fn group_of(&self, core: &str, negative: bool) -> Option<&str> {
        let candidates = self.index.get(first_segment(core))?;
        candidates
            .iter()
            .map(|&i| &self.rules[i])
            .find(|rule| rule.matches(core, negative))
            .map(|rule| rule.id.as_str())
    }
}

fn first_segment(s: &str) -> &str {
    s.split('-').next().unwrap_or(s)
}

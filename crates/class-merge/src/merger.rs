use crate::class_value::{ClassValue, normalize};
use crate::classify::{ClassGroupId, VariantKey, classify};
use crate::config::{MergeConfig, Placement};
use std::collections::HashMap;

/// Who holds a group under a given variant key.
#[derive(Debug, Clone, Copy)]
struct Claim {
    /// Index of the surviving class
    survivor: usize,
    /// Whether the survivor belongs to the group itself rather than
    /// claiming it through the conflict table
    own: bool,
    /// Whether an earlier class of the group may still lend the survivor its
    /// position. Cleared once a kept class in between overrides the group.
    movable: bool,
}

/// Stateful class merger that tracks claimed groups and determines conflicts.
/// Classes are fed in reverse order so the first class to claim a group is
/// the one written last.
struct ClassMerger<'a> {
    config: &'a MergeConfig,
    claims: HashMap<VariantKey, HashMap<ClassGroupId<'a>, Claim>>,
    /// Output position of every class, indexed like the input
    slots: Vec<usize>,
}

impl<'a> ClassMerger<'a> {
    fn new(config: &'a MergeConfig, len: usize) -> Self {
        ClassMerger {
            config,
            claims: HashMap::new(),
            slots: (0..len).collect(),
        }
    }

    /// Classify the class at `index` and return whether it should be kept
    fn should_keep(&mut self, index: usize, class: &'a str) -> bool {
        let config = self.config;
        let Some(token) = classify(config, class) else {
            // Unknown class - always keep
            return true;
        };

        let groups = self.claims.entry(token.variant_key).or_default();

        // Skip - a later class already covers this group with the same variants
        if let Some(claim) = groups.get(&token.group) {
            if claim.own && claim.movable {
                self.slots[claim.survivor] = index;
            }
            return false;
        }

        groups.insert(
            token.group,
            Claim {
                survivor: index,
                own: true,
                movable: true,
            },
        );
        if let ClassGroupId::Configured(id) = token.group {
            for conflict in config.conflicts_of(id) {
                // A survivor of `conflict` written later must not move in
                // front of this class, or this class would override it.
                groups
                    .entry(ClassGroupId::Configured(conflict.as_str()))
                    .and_modify(|claim| claim.movable = false)
                    .or_insert(Claim {
                        survivor: index,
                        own: false,
                        movable: false,
                    });
            }
        }

        true
    }
}

impl MergeConfig {
    /// Merge a whitespace-separated class list, removing classes that a later
    /// class overrides.
    pub fn merge(&self, input: &str) -> String {
        let classes: Vec<&str> = input.split_whitespace().collect();
        let mut merger = ClassMerger::new(self, classes.len());
        let mut kept: Vec<usize> = Vec::with_capacity(classes.len());

        for (index, class) in classes.iter().copied().enumerate().rev() {
            if merger.should_keep(index, class) {
                kept.push(index);
            }
        }

        match self.placement() {
            Placement::Last => kept.reverse(),
            Placement::First => kept.sort_by_key(|&index| merger.slots[index]),
        }

        let kept: Vec<&str> = kept.into_iter().map(|index| classes[index]).collect();
        kept.join(" ")
    }

    /// Flatten class values and merge the result.
    pub fn cn(&self, values: &[ClassValue<'_>]) -> String {
        self.merge(&normalize(values))
    }
}

#[cfg(test)]
mod tests {
    use crate::class_value::ClassValue;
    use crate::config::{MergeConfig, Placement};
    use pretty_assertions::assert_eq;

    fn tailwind() -> MergeConfig {
        MergeConfig::tailwind().unwrap()
    }

    #[test]
    fn test_later_class_wins() {
        assert_eq!(tailwind().merge("p-2 p-4"), "p-4");
    }

    #[test]
    fn test_unknown_classes_are_kept() {
        assert_eq!(tailwind().merge("foo-bar p-2 p-4"), "foo-bar p-4");
        assert_eq!(tailwind().merge("foo foo p-2"), "foo foo p-2");
    }

    #[test]
    fn test_variants_scope_conflicts() {
        assert_eq!(tailwind().merge("hover:p-2 p-4"), "hover:p-2 p-4");
        assert_eq!(tailwind().merge("hover:dark:p-2 dark:hover:p-4"), "dark:hover:p-4");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tailwind().merge(""), "");
        assert_eq!(tailwind().merge("   \n\t "), "");
        assert_eq!(tailwind().cn(&[]), "");
    }

    #[test]
    fn test_conflict_table() {
        assert_eq!(tailwind().merge("px-2 py-1 p-4"), "p-4");
        assert_eq!(tailwind().merge("p-4 px-2"), "p-4 px-2");
    }

    #[test]
    fn test_merge_is_idempotent() {
        let config = tailwind();
        for input in [
            "p-2 p-4 hover:p-2 foo",
            "px-2 p-4 px-3 m-1 -m-2 text-lg/7 leading-9",
            "border-b-[1px] flex p-6 gap-2 h-0 p-0 overflow-hidden",
        ] {
            let once = config.merge(input);
            assert_eq!(config.merge(&once), once);
        }
    }

    #[test]
    fn test_cn_with_conditional_map() {
        let merged = tailwind().cn(&[
            "border-b-[1px] flex items-center justify-between p-6 gap-2 transition-all".into(),
            ClassValue::conditional([("h-0 p-0 overflow-hidden", true)]),
        ]);
        assert_eq!(
            merged,
            "border-b-[1px] flex items-center justify-between gap-2 transition-all h-0 p-0 overflow-hidden"
        );
    }

    #[test]
    fn test_first_placement_keeps_earliest_position() {
        let config = tailwind().with_placement(Placement::First);
        assert_eq!(
            config.merge("border-b-[1px] flex p-6 gap-2 h-0 p-0 overflow-hidden"),
            "border-b-[1px] flex p-0 gap-2 h-0 overflow-hidden"
        );
        assert_eq!(config.merge("p-1 m-1 p-2 m-2 p-3"), "p-3 m-2");
        assert_eq!(config.merge("foo-bar p-2 p-4"), "foo-bar p-4");
    }

    #[test]
    fn test_first_placement_stops_at_overriding_class() {
        let config = tailwind().with_placement(Placement::First);
        assert_eq!(config.merge("px-1 p-2 px-3"), "p-2 px-3");
        assert_eq!(config.merge("px-1 px-2 p-2 px-3"), "p-2 px-3");
        // px-4 may still take the slot of px-3, which sits after p-2
        assert_eq!(config.merge("px-1 m-1 p-2 px-3 px-4"), "m-1 p-2 px-4");
    }

    #[test]
    fn test_first_placement_is_idempotent() {
        let config = tailwind().with_placement(Placement::First);
        for input in [
            "px-1 p-2 px-3",
            "px-1 m-1 p-2 px-3 px-4",
            "p-2 p-4 hover:p-2 foo",
            "px-2 p-4 px-3 m-1 -m-2 text-lg/7 leading-9",
            "border-b-[1px] flex p-6 gap-2 h-0 p-0 overflow-hidden",
        ] {
            let once = config.merge(input);
            assert_eq!(config.merge(&once), once, "merging {:?}", input);
        }
    }

    #[test]
    fn test_first_placement_with_conflict_table() {
        let config = tailwind().with_placement(Placement::First);
        // px-2 is removed by p-4 through the conflict table, so p-4 keeps its
        // own position relative to m-1.
        assert_eq!(config.merge("px-2 m-1 p-4"), "m-1 p-4");
        assert_eq!(config.merge("p-2 px-2 m-1 p-4"), "p-4 m-1");
    }
}

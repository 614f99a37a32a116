//! Stable per-component class names, e.g. `base-button-root` or
//! `base--disabled`, that sit next to the utility classes of a component.

use std::collections::HashMap;
use std::fmt;

const GLOBAL_CLASS_PREFIX: &str = "base";

/// Component states that share one class name across all components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalState {
    Active,
    Checked,
    Completed,
    Disabled,
    Error,
    Expanded,
    Focused,
    FocusVisible,
    Open,
    ReadOnly,
    Required,
    Selected,
}

impl GlobalState {
    pub const ALL: [GlobalState; 12] = [
        GlobalState::Active,
        GlobalState::Checked,
        GlobalState::Completed,
        GlobalState::Disabled,
        GlobalState::Error,
        GlobalState::Expanded,
        GlobalState::Focused,
        GlobalState::FocusVisible,
        GlobalState::Open,
        GlobalState::ReadOnly,
        GlobalState::Required,
        GlobalState::Selected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GlobalState::Active => "active",
            GlobalState::Checked => "checked",
            GlobalState::Completed => "completed",
            GlobalState::Disabled => "disabled",
            GlobalState::Error => "error",
            GlobalState::Expanded => "expanded",
            GlobalState::Focused => "focused",
            GlobalState::FocusVisible => "focusVisible",
            GlobalState::Open => "open",
            GlobalState::ReadOnly => "readOnly",
            GlobalState::Required => "required",
            GlobalState::Selected => "selected",
        }
    }

    /// Look up a slot name that denotes a global state.
    pub fn from_slot(slot: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.as_str() == slot)
    }
}

impl fmt::Display for GlobalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `base--<state>` for global states, `base-<component>-<slot>` otherwise.
pub fn generate_utility_class(component: &str, slot: &str) -> String {
    match GlobalState::from_slot(slot) {
        Some(state) => format!("{}--{}", GLOBAL_CLASS_PREFIX, state),
        None => format!("{}-{}-{}", GLOBAL_CLASS_PREFIX, component, slot),
    }
}

/// Build the class string of every slot of a component.
///
/// Each slot lists its keys; absent and empty keys are skipped. A key is
/// mapped through `get_utility_class` (empty results are dropped) and then
/// followed by the caller's override from `classes`, if any.
pub fn compose_classes<K, F>(
    slots: &[(K, &[Option<&str>])],
    get_utility_class: F,
    classes: Option<&HashMap<String, String>>,
) -> Vec<(K, String)>
where
    K: Clone,
    F: Fn(&str) -> String,
{
    slots
        .iter()
        .map(|(slot, keys)| {
            let mut parts: Vec<String> = Vec::new();
            for key in keys.iter().flatten().filter(|key| !key.is_empty()) {
                let utility_class = get_utility_class(key);
                if !utility_class.is_empty() {
                    parts.push(utility_class);
                }
                if let Some(extra) = classes
                    .and_then(|classes| classes.get(*key))
                    .filter(|extra| !extra.is_empty())
                {
                    parts.push(extra.clone());
                }
            }
            (slot.clone(), parts.join(" "))
        })
        .collect()
}

//! Merge utility CSS class lists so that a later class replaces earlier
//! classes that set the same property.
//!
//! ```
//! use class_merge::{ClassValue, cn, tw_merge};
//!
//! assert_eq!(tw_merge("px-2 py-1 p-3"), "p-3");
//! assert_eq!(
//!     cn(&["p-2 text-sm".into(), ClassValue::conditional([("p-4", true)])]),
//!     "text-sm p-4"
//! );
//! ```

use std::sync::OnceLock;

mod class_value;
mod classify;
mod config;
mod merger;
pub mod slots;
mod validators;

#[cfg(test)]
mod test_utils;

pub use class_value::{ClassValue, normalize};
pub use classify::{ClassGroupId, ClassifiedToken, VariantKey, classify};
pub use config::{ConfigError, MergeConfig, Placement, TAILWIND_CONFIG};
pub use validators::{ArbitraryValue, Validator};

static TAILWIND: OnceLock<MergeConfig> = OnceLock::new();

/// The bundled Tailwind config, built on first use.
pub fn tailwind_config() -> &'static MergeConfig {
    TAILWIND.get_or_init(|| {
        MergeConfig::tailwind().expect("bundled tailwind config is covered by tests")
    })
}

/// Merge Tailwind CSS classes, removing conflicting classes
pub fn tw_merge(input: &str) -> String {
    tailwind_config().merge(input)
}

/// Flatten class values and merge them with the bundled Tailwind config.
pub fn cn(values: &[ClassValue<'_>]) -> String {
    tailwind_config().cn(values)
}

//! Rule implementations for keylint.
//!
//! Each rule is a pure function over the loaded dictionary and the view index,
//! taking only the inputs it needs and returning [`Violation`]s in discovery
//! order. A `disable` severity turns a rule into a no-op.
//!
//! ## Module Structure
//!
//! - `zombie`: keys defined but never referenced
//! - `absent`: keys referenced but missing from language files
//! - `empty`: keys with a blank value
//! - `suggestions`: "did you mean" candidates shared by the rules above

pub mod absent;
pub mod empty;
pub mod suggestions;
pub mod zombie;

pub use absent::check_keys_on_views;
pub use empty::check_empty_keys;
pub use zombie::check_zombie_keys;

use crate::{
    config::RulesConfig,
    core::{Dictionary, ViewIndex},
    issues::Violation,
};

/// Run every rule in fixed order: zombie, absent, empty.
pub fn evaluate(dictionary: &Dictionary, views: &ViewIndex, rules: &RulesConfig) -> Vec<Violation> {
    let mut violations =
        check_zombie_keys(dictionary, views, rules.deep_search(), rules.zombie_keys);
    violations.extend(check_keys_on_views(dictionary, views, rules.keys_on_views));
    violations.extend(check_empty_keys(dictionary, rules.empty_keys));
    violations
}

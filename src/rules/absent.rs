//! Absent key detection rule.
//!
//! Detects keys referenced by a view but missing from one or more language
//! files.

use crate::{
    core::{Dictionary, ViewIndex},
    issues::{ErrorFlow, ErrorType, Violation},
    rules::suggestions::suggest,
};

/// One violation per (referenced key, referencing view) pair, listing the
/// language files that lack the key.
///
/// Prefix references never reach this rule: the view index only holds exact
/// references.
pub fn check_keys_on_views(
    dictionary: &Dictionary,
    views: &ViewIndex,
    error_type: ErrorType,
) -> Vec<Violation> {
    if !error_type.is_enabled() {
        return Vec::new();
    }

    let known = dictionary.key_names();

    views
        .references()
        .iter()
        .flat_map(|reference| {
            let missing = dictionary.missing_in(&reference.name);
            if missing.is_empty() {
                return Vec::new();
            }
            let suggestions = if dictionary.contains(&reference.name) {
                Vec::new()
            } else {
                suggest(&reference.name, known.iter().copied())
            };

            reference
                .views
                .iter()
                .map(|(view, location)| {
                    Violation::new(&reference.name, ErrorFlow::KeysOnViews, error_type, view)
                        .with_absented_path(missing.clone())
                        .with_suggestions(suggestions.clone())
                        .with_location(Some(location.clone()))
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

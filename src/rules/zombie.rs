//! Zombie key detection rule.
//!
//! Detects keys defined in a language file but never referenced by any view.

use crate::{
    core::{Dictionary, ViewIndex},
    issues::{ErrorFlow, ErrorType, Violation},
    rules::suggestions::suggest,
};

/// Check every key instance against the view references.
///
/// With `deep` set, a key is also used when a referenced prefix covers it
/// (`home` covers `home.title`). One violation per key instance, anchored at
/// its language file. Suggestions come from referenced names defined in no
/// language file, the other half of a typical typo.
pub fn check_zombie_keys(
    dictionary: &Dictionary,
    views: &ViewIndex,
    deep: bool,
    error_type: ErrorType,
) -> Vec<Violation> {
    if !error_type.is_enabled() {
        return Vec::new();
    }

    let undefined: Vec<&str> = views
        .references()
        .iter()
        .map(|r| r.name.as_str())
        .filter(|name| !dictionary.contains(name))
        .collect();

    dictionary
        .keys
        .iter()
        .filter(|key| !views.is_referenced(&key.name))
        .filter(|key| !(deep && views.is_covered_by_prefix(&key.name)))
        .map(|key| {
            Violation::new(
                &key.name,
                ErrorFlow::ZombieKeys,
                error_type,
                key.language_path(),
            )
            .with_suggestions(suggest(&key.name, undefined.iter().copied()))
            .with_location(Some(key.location()))
        })
        .collect()
}

//! Empty key detection rule.

use crate::{
    core::Dictionary,
    issues::{ErrorFlow, ErrorType, Violation},
};

/// Keys whose string value is blank after trimming, one violation per language
/// file defining them that way.
pub fn check_empty_keys(dictionary: &Dictionary, error_type: ErrorType) -> Vec<Violation> {
    if !error_type.is_enabled() {
        return Vec::new();
    }

    dictionary
        .keys
        .iter()
        .filter(|key| key.is_empty())
        .map(|key| {
            Violation::new(&key.name, ErrorFlow::EmptyKeys, error_type, key.language_path())
                .with_location(Some(key.location()))
        })
        .collect()
}

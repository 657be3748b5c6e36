//! Key and language listings for the `keys` and `languages` commands.

use std::collections::HashMap;

use serde::Serialize;

use super::{Dictionary, Key, ViewIndex};

/// Usage figures for one language file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSummary {
    pub path: String,
    pub keys: usize,
    pub used_keys: usize,
    pub empty_keys: usize,
}

/// Every distinct key, merged across language files, with the views using it.
///
/// Keys keep first-seen order. The merged value is the first file's value.
pub fn key_inventory(dictionary: &Dictionary, views: &ViewIndex) -> Vec<Key> {
    let mut merged: Vec<Key> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for key in &dictionary.keys {
        match positions.get(key.name.as_str()) {
            Some(&i) => {
                let languages = &mut merged[i].languages;
                for language in &key.languages {
                    if !languages.contains(language) {
                        languages.push(language.clone());
                    }
                }
            }
            None => {
                positions.insert(&key.name, merged.len());
                let mut key = key.clone();
                key.views = views.views_of(&key.name).into_iter().map(String::from).collect();
                merged.push(key);
            }
        }
    }

    merged
}

/// Per-language key counts, in language file order.
pub fn language_inventory(dictionary: &Dictionary, views: &ViewIndex, deep: bool) -> Vec<LanguageSummary> {
    dictionary
        .files
        .iter()
        .map(|file| {
            let keys: Vec<&Key> = dictionary.keys_in(file).collect();
            LanguageSummary {
                path: file.clone(),
                keys: keys.len(),
                used_keys: keys
                    .iter()
                    .filter(|k| {
                        views.is_referenced(&k.name) || (deep && views.is_covered_by_prefix(&k.name))
                    })
                    .count(),
                empty_keys: keys.iter().filter(|k| k.is_empty()).count(),
            }
        })
        .collect()
}

//! "Did you mean" candidates for misspelled keys.

use crate::utils::edit_distance;

const MAX_SUGGESTIONS: usize = 3;

/// Candidates within a small edit distance of `name`, closest first.
///
/// The allowed distance grows with the name length (a third of it), between 1
/// and 3. Ties keep candidate order. `name` itself is never suggested.
pub fn suggest<'a>(name: &str, candidates: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let threshold = (name.chars().count() / 3).clamp(1, 3);

    let mut close: Vec<(usize, &str)> = candidates
        .into_iter()
        .filter(|candidate| *candidate != name)
        .filter_map(|candidate| {
            let distance = edit_distance(name, candidate);
            (distance <= threshold).then_some((distance, candidate))
        })
        .collect();

    close.sort_by_key(|(distance, _)| *distance);
    close.dedup_by(|a, b| a.1 == b.1);

    close
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}

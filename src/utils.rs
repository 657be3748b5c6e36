//! Common utility functions shared across the codebase.

/// Levenshtein distance between two strings, counted in characters.
///
/// # Examples
///
/// ```
/// use keylint::utils::edit_distance;
///
/// assert_eq!(edit_distance("home.title", "home.title"), 0);
/// assert_eq!(edit_distance("home.titel", "home.title"), 2);
/// assert_eq!(edit_distance("home.tile", "home.title"), 1);
/// assert_eq!(edit_distance("", "abc"), 3);
/// ```
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != *cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

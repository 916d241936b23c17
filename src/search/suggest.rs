//! Suggestion index over the company directory

use super::directory::CompanyDirectory;

/// Maximum number of suggestions shown at once
pub const MAX_SUGGESTIONS: usize = 4;

/// Produce up to [`MAX_SUGGESTIONS`] company names containing `query`
///
/// Matching is case-insensitive substring containment. An empty query
/// yields no suggestions. Results keep the directory's enumeration order.
pub fn suggest(query: &str, directory: &CompanyDirectory) -> Vec<String> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    directory
        .names()
        .filter(|name| name.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect()
}

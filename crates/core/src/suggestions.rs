//! Search suggestions shown while the search box has text.

use crate::constants::MAX_SUGGESTIONS;
use crate::doctor::{Catalogue, Doctor};

/// Up to `limit` doctors from the whole catalogue whose name contains `search`
/// (case-insensitive). Empty search gives no suggestions.
///
/// Suggestions ignore the other filter dimensions and are listed in catalogue order.
pub fn suggestions<'a>(catalogue: &'a Catalogue, search: &str, limit: usize) -> Vec<&'a Doctor> {
    if search.is_empty() {
        return Vec::new();
    }

    let needle = search.to_lowercase();
    catalogue
        .doctors()
        .iter()
        .filter(|d| d.name_matches(&needle))
        .take(limit)
        .collect()
}

/// [`suggestions`] with the standard limit.
pub fn default_suggestions<'a>(catalogue: &'a Catalogue, search: &str) -> Vec<&'a Doctor> {
    suggestions(catalogue, search, MAX_SUGGESTIONS)
}

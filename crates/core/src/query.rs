//! URL synchronizer.
//!
//! Converts [`FilterState`] to and from the query string of a shareable URL.
//! Parameters equal to their default are left out so that links stay short,
//! and loading always starts from the defaults so that a bare URL gives the
//! initial view.
//!
//! Parsing never fails: absent, repeated or unrecognised values keep the
//! default for that dimension.

use crate::constants::{
    SEARCH_PARAM, SORT_PARAM, SPECIALTIES_PARAM, SPECIALTY_SEPARATOR, TYPE_PARAM,
};
use crate::filters::{ConsultationType, FilterState, SortKey};
use url::form_urlencoded;

/// Reads a filter state from a query string (with or without a leading `?`).
///
/// Only the first occurrence of each recognised parameter is used.
pub fn load_state_from_query(query: &str) -> FilterState {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut state = FilterState::default();
    let mut seen_search = false;
    let mut seen_type = false;
    let mut seen_specialties = false;
    let mut seen_sort = false;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            SEARCH_PARAM if !seen_search => {
                seen_search = true;
                state.search = value.into_owned();
            }
            TYPE_PARAM if !seen_type => {
                seen_type = true;
                if let Ok(consultation) = value.parse::<ConsultationType>() {
                    state.consultation = consultation;
                }
            }
            SPECIALTIES_PARAM if !seen_specialties => {
                seen_specialties = true;
                for name in value.split(SPECIALTY_SEPARATOR) {
                    state.select_specialty(name);
                }
            }
            SORT_PARAM if !seen_sort => {
                seen_sort = true;
                if let Ok(sort) = value.parse::<SortKey>() {
                    state.sort = sort;
                }
            }
            _ => {}
        }
    }

    state
}

/// Writes the non-default dimensions of `state` as a query string, without `?`.
///
/// Returns an empty string for the default state.
pub fn update_url_state(state: &FilterState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    if !state.search.is_empty() {
        serializer.append_pair(SEARCH_PARAM, &state.search);
    }
    if state.consultation != ConsultationType::default() {
        serializer.append_pair(TYPE_PARAM, state.consultation.as_str());
    }
    if !state.specialties.is_empty() {
        serializer.append_pair(SPECIALTIES_PARAM, &state.specialties.join(SPECIALTY_SEPARATOR));
    }
    if state.sort != SortKey::default() {
        serializer.append_pair(SORT_PARAM, state.sort.as_str());
    }

    serializer.finish()
}

/// Builds a relative URL for `state` under `path`.
pub fn href(path: &str, state: &FilterState) -> String {
    let query = update_url_state(state);
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

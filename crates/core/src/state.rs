//! Application state and reducer-style transitions.
//!
//! [`Directory`] is the single owner of the loaded catalogue and the current
//! [`FilterState`]. Every user event is expressed as an [`Action`] and applied by
//! [`transition`], a pure function; callers then re-derive the view and the URL
//! from the new state in one place.

use std::sync::Arc;

use crate::badges::BadgeKind;
use crate::doctor::{Catalogue, Doctor};
use crate::filters::{ConsultationType, FilterState, SortKey};
use crate::pipeline::apply_filters;
use crate::query;
use crate::suggestions::default_suggestions;

/// A user event that changes the filter state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Search text typed into the search box.
    SetSearch(String),
    /// A search suggestion was picked; search becomes that doctor's full name.
    SelectSuggestion { doctor_id: String },
    SetConsultation(ConsultationType),
    SelectSpecialty(String),
    DeselectSpecialty(String),
    /// A specialty checkbox changed.
    ToggleSpecialty { name: String, selected: bool },
    SetSort(SortKey),
    /// A badge's remove button; resets that one dimension.
    RemoveBadge(BadgeKind),
    /// Back to the initial view.
    Reset,
    /// History navigation: the state is replaced by the one read from the URL.
    Navigate(FilterState),
}

/// Applies `action` to `state`.
///
/// The catalogue is only consulted to resolve suggestion ids; an unknown id
/// leaves the state unchanged.
pub fn transition(catalogue: &Catalogue, mut state: FilterState, action: Action) -> FilterState {
    match action {
        Action::SetSearch(search) => state.search = search,
        Action::SelectSuggestion { doctor_id } => match catalogue.find(&doctor_id) {
            Some(doctor) => state.search = doctor.name.clone(),
            None => tracing::debug!("ignoring unknown suggestion id {}", doctor_id),
        },
        Action::SetConsultation(consultation) => state.consultation = consultation,
        Action::SelectSpecialty(name) => state.select_specialty(name),
        Action::DeselectSpecialty(name) => state.deselect_specialty(&name),
        Action::ToggleSpecialty { name, selected } => {
            if selected {
                state.select_specialty(name);
            } else {
                state.deselect_specialty(&name);
            }
        }
        Action::SetSort(sort) => state.sort = sort,
        Action::RemoveBadge(kind) => match kind {
            BadgeKind::Search => state.search.clear(),
            BadgeKind::Consultation => state.consultation = ConsultationType::default(),
            BadgeKind::Specialty(name) => state.deselect_specialty(&name),
        },
        Action::Reset => state = FilterState::default(),
        Action::Navigate(next) => state = next,
    }
    state
}

/// The catalogue plus the current filter state.
#[derive(Clone, Debug)]
pub struct Directory {
    catalogue: Arc<Catalogue>,
    filters: FilterState,
}

impl Directory {
    /// Starts from the default filter state.
    pub fn new(catalogue: Arc<Catalogue>) -> Self {
        Self::with_filters(catalogue, FilterState::default())
    }

    pub fn with_filters(catalogue: Arc<Catalogue>, filters: FilterState) -> Self {
        Self { catalogue, filters }
    }

    /// Starts from the state encoded in a URL query string.
    pub fn from_query(catalogue: Arc<Catalogue>, query_text: &str) -> Self {
        Self::with_filters(catalogue, query::load_state_from_query(query_text))
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Applies one action and returns the new state.
    pub fn dispatch(&mut self, action: Action) -> &FilterState {
        let current = std::mem::take(&mut self.filters);
        self.filters = transition(&self.catalogue, current, action);
        &self.filters
    }

    /// The derived view for the current state.
    pub fn view(&self) -> Vec<&Doctor> {
        apply_filters(&self.catalogue, &self.filters)
    }

    /// Suggestions for the current search text.
    pub fn suggestions(&self) -> Vec<&Doctor> {
        default_suggestions(&self.catalogue, &self.filters.search)
    }

    /// Query string for the current state (no leading `?`).
    pub fn query(&self) -> String {
        query::update_url_state(&self.filters)
    }

    /// URL of the state reached from the current one by `action`, without
    /// changing the current state.
    pub fn href_after(&self, path: &str, action: Action) -> String {
        let next = transition(&self.catalogue, self.filters.clone(), action);
        query::href(path, &next)
    }
}

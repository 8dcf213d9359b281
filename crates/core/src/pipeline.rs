//! Filter/sort pipeline.
//!
//! A pure function from the catalogue and a filter state to the ordered list of
//! matching doctors. The catalogue is only borrowed; the result is rebuilt on
//! every call.

use std::cmp::Ordering;

use crate::doctor::{Catalogue, Doctor};
use crate::filters::{ConsultationType, FilterState, SortDirection, SortField, SortKey};

/// Returns the doctors matching every active predicate, ordered by `state.sort`.
///
/// Predicates are: name contains the search text (case-insensitive, skipped when
/// empty); offers the selected consultation type; has at least one selected
/// specialty (skipped when none are selected). Ties keep catalogue order.
pub fn apply_filters<'a>(catalogue: &'a Catalogue, state: &FilterState) -> Vec<&'a Doctor> {
    let needle = state.search.to_lowercase();

    let mut matching: Vec<&Doctor> = catalogue
        .doctors()
        .iter()
        .filter(|d| needle.is_empty() || d.name_matches(&needle))
        .filter(|d| offers(d, state.consultation))
        .filter(|d| state.specialties.is_empty() || d.has_any_specialty(&state.specialties))
        .collect();

    sort_doctors(&mut matching, state.sort);
    matching
}

/// Stable sort by the numeric value of the chosen field.
///
/// Doctors whose value could not be read from the published text go last in
/// either direction.
pub fn sort_doctors(doctors: &mut [&Doctor], sort: SortKey) {
    match sort.field {
        SortField::Fees => {
            doctors.sort_by(|a, b| compare_known(a.fee.amount, b.fee.amount, sort.direction))
        }
        SortField::Experience => doctors.sort_by(|a, b| {
            compare_known(a.experience.years, b.experience.years, sort.direction)
        }),
    }
}

fn compare_known<T: Ord>(a: Option<T>, b: Option<T>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match direction {
            SortDirection::Asc => a.cmp(&b),
            SortDirection::Desc => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn offers(doctor: &Doctor, consultation: ConsultationType) -> bool {
    match consultation {
        ConsultationType::Video => doctor.video_consult,
        ConsultationType::Clinic => doctor.in_clinic,
    }
}

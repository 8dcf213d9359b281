//! Active-filter badges.
//!
//! One removable badge per non-default filter dimension. Removing a badge
//! resets exactly that dimension (see [`crate::state::Action::RemoveBadge`]).

use crate::filters::{ConsultationType, FilterState};

/// The dimension a badge stands for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BadgeKind {
    Search,
    Consultation,
    Specialty(String),
}

impl BadgeKind {
    /// Short machine name, used as a `data-type` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeKind::Search => "search",
            BadgeKind::Consultation => "type",
            BadgeKind::Specialty(_) => "specialty",
        }
    }

    /// The specialty carried by a specialty badge, empty otherwise.
    pub fn value(&self) -> &str {
        match self {
            BadgeKind::Specialty(name) => name,
            _ => "",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Badge {
    pub kind: BadgeKind,
    pub label: String,
}

/// Badges for `state`, in the order search, consultation type, specialties.
pub fn active_badges(state: &FilterState) -> Vec<Badge> {
    let mut badges = Vec::new();

    if !state.search.is_empty() {
        badges.push(Badge {
            kind: BadgeKind::Search,
            label: format!("Search: {}", state.search),
        });
    }

    if state.consultation != ConsultationType::default() {
        badges.push(Badge {
            kind: BadgeKind::Consultation,
            label: format!("Type: {}", state.consultation.label()),
        });
    }

    for specialty in &state.specialties {
        badges.push(Badge {
            kind: BadgeKind::Specialty(specialty.clone()),
            label: format!("Specialty: {specialty}"),
        });
    }

    badges
}

//! Filter state: the user's current search, consultation type, specialty and sort selections.

use std::fmt;
use std::str::FromStr;

/// Which consultation capability a doctor must offer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConsultationType {
    #[default]
    Video,
    Clinic,
}

impl ConsultationType {
    /// Value used in the `type` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            ConsultationType::Video => "video",
            ConsultationType::Clinic => "clinic",
        }
    }

    /// Human-readable label used on badges.
    pub fn label(self) -> &'static str {
        match self {
            ConsultationType::Video => "Video Consult",
            ConsultationType::Clinic => "In Clinic",
        }
    }
}

impl fmt::Display for ConsultationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsultationType {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video" => Ok(ConsultationType::Video),
            "clinic" => Ok(ConsultationType::Clinic),
            other => Err(UnknownValue(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortField {
    Fees,
    Experience,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Field and direction of the result ordering. Defaults to fees ascending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    pub const FEES_ASC: SortKey = SortKey::new(SortField::Fees, SortDirection::Asc);
    pub const FEES_DESC: SortKey = SortKey::new(SortField::Fees, SortDirection::Desc);
    pub const EXPERIENCE_ASC: SortKey = SortKey::new(SortField::Experience, SortDirection::Asc);
    pub const EXPERIENCE_DESC: SortKey = SortKey::new(SortField::Experience, SortDirection::Desc);

    /// Every sort key, in the order the sort control lists them.
    pub const ALL: [SortKey; 4] = [
        SortKey::FEES_ASC,
        SortKey::FEES_DESC,
        SortKey::EXPERIENCE_ASC,
        SortKey::EXPERIENCE_DESC,
    ];

    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Value used in the `sort` query parameter, e.g. `fees_asc`.
    pub fn as_str(self) -> &'static str {
        match (self.field, self.direction) {
            (SortField::Fees, SortDirection::Asc) => "fees_asc",
            (SortField::Fees, SortDirection::Desc) => "fees_desc",
            (SortField::Experience, SortDirection::Asc) => "experience_asc",
            (SortField::Experience, SortDirection::Desc) => "experience_desc",
        }
    }

    /// Label used by the sort control.
    pub fn label(self) -> &'static str {
        match (self.field, self.direction) {
            (SortField::Fees, SortDirection::Asc) => "Fees: Low to High",
            (SortField::Fees, SortDirection::Desc) => "Fees: High to Low",
            (SortField::Experience, SortDirection::Asc) => "Experience: Low to High",
            (SortField::Experience, SortDirection::Desc) => "Experience: High to Low",
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::FEES_ASC
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownValue(s.to_string()))
    }
}

/// A query or CLI value that names no known option.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised value: {0:?}")]
pub struct UnknownValue(pub String);

/// Current view selections.
///
/// `specialties` behaves as a set that remembers selection order; use
/// [`FilterState::select_specialty`] rather than pushing directly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub consultation: ConsultationType,
    pub specialties: Vec<String>,
    pub sort: SortKey,
}

impl FilterState {
    /// True if every dimension holds its default.
    pub fn is_default(&self) -> bool {
        self == &FilterState::default()
    }

    pub fn is_specialty_selected(&self, name: &str) -> bool {
        self.specialties.iter().any(|s| s == name)
    }

    /// Adds a specialty unless it is already selected or blank.
    pub fn select_specialty(&mut self, name: impl Into<String>) {
        let name = name.into();
        if name.is_empty() || self.is_specialty_selected(&name) {
            return;
        }
        self.specialties.push(name);
    }

    /// Removes exactly one specialty, leaving the others in order.
    pub fn deselect_specialty(&mut self, name: &str) {
        self.specialties.retain(|s| s != name);
    }
}

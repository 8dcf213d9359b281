//! JSON bodies returned by the directory API.
//!
//! These are wire types: they flatten the domain [`Doctor`] into plain fields
//! and never leak domain internals such as the catalogue.

use directory_core::Doctor;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// One doctor as shown on a result card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DoctorRes {
    pub id: String,
    pub name: String,
    pub photo: String,
    pub primary_specialty: Option<String>,
    pub specialities: Vec<String>,
    pub introduction: String,
    /// Experience as published.
    pub experience: String,
    /// Absent when the published text does not start with a number.
    pub experience_years: Option<u32>,
    /// Fee as published.
    pub fee: String,
    /// Absent when the published text has no digits.
    pub fee_amount: Option<u64>,
    pub languages: Vec<String>,
    pub video_consult: bool,
    pub in_clinic: bool,
}

impl From<&Doctor> for DoctorRes {
    fn from(doctor: &Doctor) -> Self {
        Self {
            id: doctor.id.clone(),
            name: doctor.name.clone(),
            photo: doctor.photo.clone(),
            primary_specialty: doctor.primary_specialty().map(str::to_string),
            specialities: doctor.specialities.iter().map(|s| s.name.clone()).collect(),
            introduction: doctor.introduction.clone(),
            experience: doctor.experience.label.clone(),
            experience_years: doctor.experience.years,
            fee: doctor.fee.label.clone(),
            fee_amount: doctor.fee.amount,
            languages: doctor.languages.clone(),
            video_consult: doctor.video_consult,
            in_clinic: doctor.in_clinic,
        }
    }
}

/// The derived view for one filter state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListDoctorsRes {
    pub count: usize,
    /// Canonical query string of the filter state that produced this list.
    pub query: String,
    pub doctors: Vec<DoctorRes>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SuggestionRes {
    pub id: String,
    pub name: String,
}

impl From<&Doctor> for SuggestionRes {
    fn from(doctor: &Doctor) -> Self {
        Self {
            id: doctor.id.clone(),
            name: doctor.name.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListSuggestionsRes {
    pub suggestions: Vec<SuggestionRes>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListSpecialtiesRes {
    pub specialties: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub message: String,
}

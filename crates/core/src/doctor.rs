//! Doctor records: wire model, validated domain model and the catalogue.
//!
//! Responsibilities:
//! - Define the domain-level [`Doctor`] with typed numeric fee and experience values
//! - Define a lenient wire model matching the published JSON data set
//! - Translate wire records into domain records in a single validated step
//! - Own the immutable record set as a [`Catalogue`]
//!
//! Notes:
//! - Records are never mutated after ingestion; views borrow from the catalogue
//! - A record without an id or name fails the whole load; fee and experience
//!   text without a usable number is kept, with no amount for ordering

use crate::{DirectoryError, DirectoryResult};
use serde::Deserialize;

// ============================================================================
// Public domain-level types
// ============================================================================

/// Consultation fee as published, plus the amount used for ordering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fee {
    /// Text as published, e.g. `"₹ 500"`.
    pub label: String,
    /// All digits of the label read as one number; `None` if there are none.
    pub amount: Option<u64>,
}

/// Years of experience as published, plus the number used for ordering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Experience {
    /// Text as published, e.g. `"13 Years of experience"`.
    pub label: String,
    /// Leading digits of the label; `None` if it does not start with a number.
    pub years: Option<u32>,
}

/// A named medical specialty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Specialty {
    pub name: String,
}

/// A validated doctor record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub photo: String,
    pub introduction: String,
    pub experience: Experience,
    pub fee: Fee,
    pub languages: Vec<String>,
    pub specialities: Vec<Specialty>,
    /// Offers video consultations.
    pub video_consult: bool,
    /// Offers in-clinic consultations.
    pub in_clinic: bool,
}

impl Doctor {
    /// The first listed specialty, shown on the result card.
    pub fn primary_specialty(&self) -> Option<&str> {
        self.specialities.first().map(|s| s.name.as_str())
    }

    /// Case-insensitive substring match on the display name.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn name_matches(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
    }

    /// Returns true if any of this doctor's specialties is in `selected`.
    pub fn has_any_specialty(&self, selected: &[String]) -> bool {
        self.specialities
            .iter()
            .any(|s| selected.iter().any(|name| name == &s.name))
    }
}

/// The immutable, validated set of doctor records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalogue {
    doctors: Vec<Doctor>,
}

impl Catalogue {
    pub fn new(doctors: Vec<Doctor>) -> Self {
        Self { doctors }
    }

    /// Parse and validate a catalogue from the JSON array served by the data source.
    ///
    /// This uses `serde_path_to_error` so that schema mismatches name the failing
    /// field, e.g. `[3].video_consult`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Deserialization`] if the text is not an array of
    /// doctor records, or [`DirectoryError::InvalidRecord`] if a record has a blank
    /// id or name.
    pub fn from_json(json_text: &str) -> DirectoryResult<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(json_text);

        let wire = match serde_path_to_error::deserialize::<_, Vec<DoctorWire>>(&mut deserializer)
        {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let path = if path.is_empty() || path == "." {
                    "<root>".to_string()
                } else {
                    path
                };
                return Err(DirectoryError::Deserialization {
                    path,
                    message: err.into_inner().to_string(),
                });
            }
        };

        let doctors = wire
            .into_iter()
            .map(wire_to_domain)
            .collect::<DirectoryResult<Vec<_>>>()?;

        Ok(Self::new(doctors))
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }

    /// Looks up a doctor by identifier.
    pub fn find(&self, id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    /// Union of all specialty names, in first-seen order.
    pub fn specialty_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for doctor in &self.doctors {
            for specialty in &doctor.specialities {
                if !names.contains(&specialty.name.as_str()) {
                    names.push(&specialty.name);
                }
            }
        }
        names
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// The published data set uses both string and numeric identifiers.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum IdWire {
    Text(String),
    Number(u64),
}

impl IdWire {
    fn into_string(self) -> String {
        match self {
            IdWire::Text(s) => s,
            IdWire::Number(n) => n.to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
struct SpecialtyWire {
    name: String,
}

/// Wire representation of one doctor. Unknown keys (clinic details and the
/// like) are ignored.
#[derive(Clone, Debug, Deserialize)]
struct DoctorWire {
    id: IdWire,
    name: String,
    #[serde(default)]
    photo: Option<String>,
    #[serde(default)]
    doctor_introduction: Option<String>,
    experience: String,
    fees: String,
    #[serde(default)]
    languages: Vec<String>,
    #[serde(default)]
    specialities: Vec<SpecialtyWire>,
    #[serde(default)]
    video_consult: bool,
    #[serde(default)]
    in_clinic: bool,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn wire_to_domain(wire: DoctorWire) -> DirectoryResult<Doctor> {
    let id = wire.id.into_string();
    let invalid = |reason: String| DirectoryError::InvalidRecord {
        id: id.clone(),
        reason,
    };

    if id.trim().is_empty() {
        return Err(invalid("id cannot be empty".into()));
    }
    if wire.name.trim().is_empty() {
        return Err(invalid("name cannot be empty".into()));
    }

    let amount = parse_fee_amount(&wire.fees);
    if amount.is_none() {
        tracing::debug!("doctor {} has no numeric fee in {:?}", id, wire.fees);
    }
    let years = parse_experience_years(&wire.experience);
    if years.is_none() {
        tracing::debug!("doctor {} has no leading years in {:?}", id, wire.experience);
    }

    Ok(Doctor {
        id,
        name: wire.name,
        photo: wire.photo.unwrap_or_default(),
        introduction: wire.doctor_introduction.unwrap_or_default(),
        experience: Experience {
            label: wire.experience,
            years,
        },
        fee: Fee {
            label: wire.fees,
            amount,
        },
        languages: wire.languages,
        specialities: wire
            .specialities
            .into_iter()
            .map(|s| Specialty { name: s.name })
            .collect(),
        video_consult: wire.video_consult,
        in_clinic: wire.in_clinic,
    })
}

/// Strips every non-digit and reads the rest as one number.
///
/// Returns `None` if there are no digits or the number does not fit.
pub(crate) fn parse_fee_amount(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Reads the leading digits after any leading whitespace.
pub(crate) fn parse_experience_years(text: &str) -> Option<u32> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
      {
        "id": "111943",
        "name": "Dr. Sheetal Sharma",
        "photo": "https://example.test/sheetal.jpg",
        "doctor_introduction": "MBBS, MD",
        "specialities": [{ "name": "Dermatologist" }, { "name": "Cosmetologist" }],
        "fees": "₹ 1,500",
        "experience": "13 Years of experience",
        "languages": ["English", "Hindi"],
        "clinic": { "name": "Skin Clinic" },
        "video_consult": true,
        "in_clinic": false
      },
      {
        "id": 42,
        "name": "Dr. Arjun Rao",
        "fees": "₹ 300",
        "experience": "  7 Years",
        "specialities": [{ "name": "Dentist" }, { "name": "Dermatologist" }],
        "in_clinic": true
      }
    ]"#;

    #[test]
    fn parses_sample_json() {
        let catalogue = Catalogue::from_json(SAMPLE).expect("parse sample");
        assert_eq!(catalogue.len(), 2);

        let first = &catalogue.doctors()[0];
        assert_eq!(first.id, "111943");
        assert_eq!(first.fee.amount, Some(1500));
        assert_eq!(first.fee.label, "₹ 1,500");
        assert_eq!(first.experience.years, Some(13));
        assert_eq!(first.primary_specialty(), Some("Dermatologist"));
        assert!(first.video_consult);
        assert!(!first.in_clinic);

        let second = &catalogue.doctors()[1];
        assert_eq!(second.id, "42");
        assert_eq!(second.experience.years, Some(7));
        assert!(second.photo.is_empty());
        assert!(second.languages.is_empty());
        assert!(!second.video_consult);
    }

    #[test]
    fn specialty_union_keeps_first_seen_order() {
        let catalogue = Catalogue::from_json(SAMPLE).expect("parse sample");
        assert_eq!(
            catalogue.specialty_names(),
            vec!["Dermatologist", "Cosmetologist", "Dentist"]
        );
    }

    #[test]
    fn finds_doctor_by_id() {
        let catalogue = Catalogue::from_json(SAMPLE).expect("parse sample");
        assert_eq!(
            catalogue.find("42").map(|d| d.name.as_str()),
            Some("Dr. Arjun Rao")
        );
        assert!(catalogue.find("nope").is_none());
    }

    #[test]
    fn keeps_record_with_fee_without_digits() {
        let input = r#"[
          {"id": "1", "name": "Dr. A", "fees": "₹ 300", "experience": "3 Years"},
          {"id": "2", "name": "Dr. B", "fees": "Free", "experience": "5 Years"}
        ]"#;
        let catalogue = Catalogue::from_json(input).expect("parse with free fee");
        assert_eq!(catalogue.len(), 2);

        let free = catalogue.find("2").expect("free doctor listed");
        assert_eq!(free.fee.label, "Free");
        assert_eq!(free.fee.amount, None);
        assert_eq!(free.experience.years, Some(5));
    }

    #[test]
    fn keeps_record_with_experience_without_leading_digits() {
        let input =
            r#"[{"id": "1", "name": "Dr. A", "fees": "₹ 100", "experience": "Years: 3"}]"#;
        let catalogue = Catalogue::from_json(input).expect("parse odd experience");
        let doctor = &catalogue.doctors()[0];
        assert_eq!(doctor.experience.label, "Years: 3");
        assert_eq!(doctor.experience.years, None);
        assert_eq!(doctor.fee.amount, Some(100));
    }

    #[test]
    fn rejects_blank_id() {
        let input = r#"[{"id": " ", "name": "Dr. A", "fees": "₹ 100", "experience": "3"}]"#;
        let err = Catalogue::from_json(input).expect_err("should reject blank id");
        match err {
            DirectoryError::InvalidRecord { reason, .. } => assert!(reason.contains("id")),
            other => panic!("expected InvalidRecord error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_blank_name() {
        let input = r#"[{"id": "1", "name": "  ", "fees": "₹ 100", "experience": "3"}]"#;
        let err = Catalogue::from_json(input).expect_err("should reject blank name");
        assert!(matches!(err, DirectoryError::InvalidRecord { .. }));
    }

    #[test]
    fn schema_mismatch_reports_path() {
        let input = r#"[{"id": "1", "name": "Dr. A", "fees": "₹ 100", "experience": "3",
                        "video_consult": "yes"}]"#;
        let err = Catalogue::from_json(input).expect_err("should reject wrong type");
        match err {
            DirectoryError::Deserialization { path, .. } => {
                assert!(path.contains("video_consult"), "path was {path}");
            }
            other => panic!("expected Deserialization error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_array_content() {
        let err = Catalogue::from_json("<html>oops</html>").expect_err("should reject html");
        assert!(matches!(err, DirectoryError::Deserialization { .. }));
    }

    #[test]
    fn numeric_extraction() {
        assert_eq!(parse_fee_amount("₹500"), Some(500));
        assert_eq!(parse_fee_amount("Rs. 1,200 only"), Some(1200));
        assert_eq!(parse_fee_amount("none"), None);
        assert_eq!(parse_experience_years("12 Years"), Some(12));
        assert_eq!(parse_experience_years(" 4yrs 6 months"), Some(4));
        assert_eq!(parse_experience_years("about 4"), None);
    }
}

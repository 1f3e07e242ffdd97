//! Doctor records

use crate::id::{RecordId, RecordKind};
use crate::record::{normalize_optional, ParseValueError, Record, Validate};
use crate::serde_compat;
use crate::validation::{FieldChecks, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Specializations offered in the doctor picker
///
/// Stored specialization is free text; this list only seeds pickers.
pub const SPECIALIZATIONS: [&str; 10] = [
    "Cardiology",
    "Neurology",
    "Orthopedics",
    "Pediatrics",
    "Dermatology",
    "General Medicine",
    "Oncology",
    "Radiology",
    "Psychiatry",
    "Surgery",
];

/// Doctor availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    /// On duty and free
    Available,
    /// On duty, occupied
    Busy,
    /// Away
    #[serde(rename = "On Leave")]
    OnLeave,
}

impl Availability {
    /// All values in picker order
    pub const ALL: [Availability; 3] = [Self::Available, Self::Busy, Self::OnLeave];

    /// Stored and displayed form
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Busy => "Busy",
            Self::OnLeave => "On Leave",
        }
    }
}

impl Display for Availability {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Availability {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        Self::ALL
            .into_iter()
            .find(|a| {
                let name: String = a.as_str().chars().filter(|c| !c.is_whitespace()).collect();
                name.eq_ignore_ascii_case(&wanted)
            })
            .ok_or_else(|| ParseValueError::new("availability", s))
    }
}

/// A doctor on staff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    /// Stable id (`d_…`)
    pub id: RecordId,
    /// Full name, usually with title
    pub name: String,
    /// Specialization
    pub specialization: String,
    /// Current availability
    pub availability: Availability,
    /// Years of experience
    #[serde(
        default,
        deserialize_with = "serde_compat::opt_u32_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub experience: Option<u32>,
    /// Contact number
    #[serde(
        default,
        deserialize_with = "serde_compat::blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
}

impl Doctor {
    /// Label used by appointment pickers
    #[must_use]
    pub fn option_label(&self) -> String {
        format!("{} — {}", self.name, self.specialization)
    }
}

/// Input for adding a doctor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorDraft {
    /// Full name
    pub name: String,
    /// Specialty, free text
    pub specialization: String,
    /// Current availability
    pub availability: Availability,
    /// Years of practice
    pub experience: Option<u32>,
    /// Contact number
    pub phone: Option<String>,
}

impl DoctorDraft {
    /// Draft with the required fields
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        specialization: impl Into<String>,
        availability: Availability,
    ) -> Self {
        Self {
            name: name.into(),
            specialization: specialization.into(),
            availability,
            experience: None,
            phone: None,
        }
    }

    /// With years of experience
    #[inline]
    #[must_use]
    pub fn with_experience(mut self, years: u32) -> Self {
        self.experience = Some(years);
        self
    }

    /// With phone
    #[inline]
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

impl Validate for DoctorDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        FieldChecks::new()
            .required("name", &self.name)
            .required("specialization", &self.specialization)
            .phone("phone", self.phone.as_deref().unwrap_or_default())
            .finish()
    }
}

/// Partial doctor update
///
/// `Some("")` for `phone` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorPatch {
    /// New name
    pub name: Option<String>,
    /// New specialty
    pub specialization: Option<String>,
    /// New availability
    pub availability: Option<Availability>,
    /// New years of practice
    pub experience: Option<u32>,
    /// New contact number
    pub phone: Option<String>,
}

impl Validate for DoctorPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        FieldChecks::new()
            .required_if_set("name", self.name.as_deref())
            .required_if_set("specialization", self.specialization.as_deref())
            .phone("phone", self.phone.as_deref().unwrap_or_default())
            .finish()
    }
}

impl Record for Doctor {
    const KIND: RecordKind = RecordKind::Doctor;
    type Draft = DoctorDraft;
    type Patch = DoctorPatch;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_draft(id: RecordId, draft: DoctorDraft) -> Self {
        Self {
            id,
            name: draft.name.trim().to_string(),
            specialization: draft.specialization.trim().to_string(),
            availability: draft.availability,
            experience: draft.experience,
            phone: normalize_optional(draft.phone),
        }
    }

    fn apply_patch(&mut self, patch: DoctorPatch) {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(spec) = patch.specialization {
            self.specialization = spec.trim().to_string();
        }
        if let Some(availability) = patch.availability {
            self.availability = availability;
        }
        if patch.experience.is_some() {
            self.experience = patch.experience;
        }
        if patch.phone.is_some() {
            self.phone = normalize_optional(patch.phone);
        }
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_parses_loosely() {
        assert_eq!("on leave".parse::<Availability>(), Ok(Availability::OnLeave));
        assert_eq!("OnLeave".parse::<Availability>(), Ok(Availability::OnLeave));
        assert_eq!("on-leave".parse::<Availability>(), Ok(Availability::OnLeave));
        assert_eq!("busy".parse::<Availability>(), Ok(Availability::Busy));
        assert!("asleep".parse::<Availability>().is_err());
    }

    #[test]
    fn draft_phone_is_optional_but_checked() {
        let d = DoctorDraft::new("Dr. Arjun Mehra", "Cardiology", Availability::Available);
        assert!(d.validate().is_ok());
        assert!(d.clone().with_phone("+91 98765 11111").validate().is_ok());
        assert!(d.with_phone("call me").validate().unwrap_err().has_field("phone"));
    }

    #[test]
    fn draft_requires_specialization() {
        let d = DoctorDraft::new("Dr. Priya Sharma", " ", Availability::Busy);
        assert!(d.validate().unwrap_err().has_field("specialization"));
    }

    #[test]
    fn decodes_legacy_blob() {
        let raw = r#"{"id":"d_4","name":"Dr. Sneha Patel","specialization":"Pediatrics",
                      "availability":"On Leave","experience":"6","phone":"+91 98765 44444"}"#;
        let d: Doctor = serde_json::from_str(raw).unwrap();
        assert_eq!(d.availability, Availability::OnLeave);
        assert_eq!(d.experience, Some(6));
    }

    #[test]
    fn blank_experience_reads_as_absent() {
        let raw = r#"{"id":"d_9","name":"Dr. X","specialization":"Surgery",
                      "availability":"Busy","experience":"","phone":""}"#;
        let d: Doctor = serde_json::from_str(raw).unwrap();
        assert_eq!(d.experience, None);
        assert_eq!(d.phone, None);
    }

    #[test]
    fn option_label_joins_name_and_specialization() {
        let d = Doctor::from_draft(
            RecordId::from("d_1"),
            DoctorDraft::new("Dr. Rahul Verma", "Orthopedics", Availability::Available),
        );
        assert_eq!(d.option_label(), "Dr. Rahul Verma — Orthopedics");
    }
}

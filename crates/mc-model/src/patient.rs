//! Patient records

use crate::id::{RecordId, RecordKind};
use crate::record::{normalize_optional, ParseValueError, Record, Validate};
use crate::serde_compat;
use crate::validation::{FieldChecks, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Patient gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Other / unspecified
    Other,
}

impl Gender {
    /// All values in picker order
    pub const ALL: [Gender; 3] = [Self::Male, Self::Female, Self::Other];

    /// Stored form
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseValueError::new("gender", s))
    }
}

/// A registered patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Stable id (`p_…`)
    pub id: RecordId,
    /// Full name
    pub name: String,
    /// Age in years, 1–120
    #[serde(deserialize_with = "serde_compat::u32_lenient")]
    pub age: u32,
    /// Gender
    pub gender: Gender,
    /// Contact number
    pub phone: String,
    /// Presenting condition
    #[serde(default)]
    pub disease: String,
    /// Date of admission
    pub admission_date: NaiveDate,
    /// Blood group, if known
    #[serde(
        default,
        deserialize_with = "serde_compat::blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub blood_group: Option<String>,
    /// Free-form notes
    #[serde(
        default,
        deserialize_with = "serde_compat::blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
}

/// Input for registering a patient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientDraft {
    /// Full name
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Gender
    pub gender: Gender,
    /// Contact number
    pub phone: String,
    /// Presenting condition
    pub disease: String,
    /// Date of admission
    pub admission_date: NaiveDate,
    /// Blood group, if known
    pub blood_group: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
}

impl PatientDraft {
    /// Draft with the required fields
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        age: u32,
        gender: Gender,
        phone: impl Into<String>,
        disease: impl Into<String>,
        admission_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            age,
            gender,
            phone: phone.into(),
            disease: disease.into(),
            admission_date,
            blood_group: None,
            notes: None,
        }
    }

    /// With blood group
    #[inline]
    #[must_use]
    pub fn with_blood_group(mut self, blood_group: impl Into<String>) -> Self {
        self.blood_group = Some(blood_group.into());
        self
    }

    /// With notes
    #[inline]
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

impl Validate for PatientDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        FieldChecks::new()
            .required("name", &self.name)
            .age("age", self.age)
            .required("phone", &self.phone)
            .phone("phone", &self.phone)
            .required("disease", &self.disease)
            .finish()
    }
}

/// Partial patient update
///
/// `None` keeps the stored value. For the optional text fields, `Some("")`
/// clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientPatch {
    /// New name
    pub name: Option<String>,
    /// New age
    pub age: Option<u32>,
    /// New gender
    pub gender: Option<Gender>,
    /// New contact number
    pub phone: Option<String>,
    /// New condition
    pub disease: Option<String>,
    /// New admission date
    pub admission_date: Option<NaiveDate>,
    /// New blood group; blank clears it
    pub blood_group: Option<String>,
    /// New notes; blank clears them
    pub notes: Option<String>,
}

impl PatientPatch {
    /// Whether the patch changes nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Validate for PatientPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut checks = FieldChecks::new();
        checks
            .required_if_set("name", self.name.as_deref())
            .required_if_set("phone", self.phone.as_deref())
            .required_if_set("disease", self.disease.as_deref());
        if let Some(age) = self.age {
            checks.age("age", age);
        }
        if let Some(phone) = &self.phone {
            checks.phone("phone", phone);
        }
        checks.finish()
    }
}

impl Record for Patient {
    const KIND: RecordKind = RecordKind::Patient;
    type Draft = PatientDraft;
    type Patch = PatientPatch;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_draft(id: RecordId, draft: PatientDraft) -> Self {
        Self {
            id,
            name: draft.name.trim().to_string(),
            age: draft.age,
            gender: draft.gender,
            phone: draft.phone.trim().to_string(),
            disease: draft.disease.trim().to_string(),
            admission_date: draft.admission_date,
            blood_group: normalize_optional(draft.blood_group),
            notes: normalize_optional(draft.notes),
        }
    }

    fn apply_patch(&mut self, patch: PatientPatch) {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(gender) = patch.gender {
            self.gender = gender;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone.trim().to_string();
        }
        if let Some(disease) = patch.disease {
            self.disease = disease.trim().to_string();
        }
        if let Some(date) = patch.admission_date {
            self.admission_date = date;
        }
        if patch.blood_group.is_some() {
            self.blood_group = normalize_optional(patch.blood_group);
        }
        if patch.notes.is_some() {
            self.notes = normalize_optional(patch.notes);
        }
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn draft(age: u32) -> PatientDraft {
        PatientDraft::new("Meera Joshi", age, Gender::Female, "+91 99001 33333", "Migraine", date("2026-02-10"))
    }

    #[test]
    fn draft_age_boundaries() {
        assert!(draft(1).validate().is_ok());
        assert!(draft(120).validate().is_ok());
        assert!(draft(0).validate().unwrap_err().has_field("age"));
        assert!(draft(130).validate().unwrap_err().has_field("age"));
    }

    #[test]
    fn draft_requires_fields() {
        let mut d = draft(30);
        d.name = "   ".into();
        d.phone = String::new();
        let err = d.validate().unwrap_err();
        assert!(err.has_field("name"));
        assert!(err.has_field("phone"));
        assert!(!err.has_field("disease"));
    }

    #[test]
    fn from_draft_trims_and_drops_blanks() {
        let d = PatientDraft {
            name: "  Rohan Desai ".into(),
            blood_group: Some("  ".into()),
            notes: Some(" follow up ".into()),
            ..draft(52)
        };
        let p = Patient::from_draft(RecordId::from("p_9"), d);
        assert_eq!(p.name, "Rohan Desai");
        assert_eq!(p.blood_group, None);
        assert_eq!(p.notes.as_deref(), Some("follow up"));
    }

    #[test]
    fn patch_keeps_unset_fields() {
        let mut p = Patient::from_draft(RecordId::from("p_1"), draft(38).with_blood_group("A+"));
        let before = p.clone();
        p.apply_patch(PatientPatch {
            disease: Some("Hypertension".into()),
            ..PatientPatch::default()
        });
        assert_eq!(p.disease, "Hypertension");
        assert_eq!(p.name, before.name);
        assert_eq!(p.blood_group.as_deref(), Some("A+"));
    }

    #[test]
    fn patch_clears_optional_with_blank() {
        let mut p = Patient::from_draft(RecordId::from("p_1"), draft(38).with_notes("x"));
        p.apply_patch(PatientPatch {
            notes: Some(String::new()),
            ..PatientPatch::default()
        });
        assert_eq!(p.notes, None);
    }

    #[test]
    fn patch_validation_only_checks_set_fields() {
        assert!(PatientPatch::default().validate().is_ok());
        let bad = PatientPatch {
            age: Some(121),
            ..PatientPatch::default()
        };
        assert!(bad.validate().unwrap_err().has_field("age"));
    }

    #[test]
    fn decodes_legacy_string_fields() {
        let raw = r#"{
            "id": "p_2", "name": "Rohan Desai", "age": "52", "gender": "Male",
            "phone": "+91 99001 22222", "disease": "Type 2 Diabetes",
            "admissionDate": "2026-02-05", "bloodGroup": "O+", "notes": ""
        }"#;
        let p: Patient = serde_json::from_str(raw).unwrap();
        assert_eq!(p.age, 52);
        assert_eq!(p.blood_group.as_deref(), Some("O+"));
        assert_eq!(p.notes, None);
    }

    #[test]
    fn encodes_camel_case() {
        let p = Patient::from_draft(RecordId::from("p_1"), draft(38));
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["admissionDate"], "2026-02-10");
        assert_eq!(json["age"], 38);
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn gender_parses_case_insensitively() {
        assert_eq!("female".parse::<Gender>(), Ok(Gender::Female));
        assert!("unknown".parse::<Gender>().is_err());
    }
}

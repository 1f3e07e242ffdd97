//! Record filters
//!
//! A filter is a conjunction: free-text search AND every set facet. An
//! unset facet or an empty search term matches everything.

use crate::resolve::Resolver;
use crate::text::SearchTerm;
use mc_model::{Appointment, AppointmentStatus, Availability, Doctor, Gender, Patient, ParseValueError};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Predicate over one record kind
pub trait RecordFilter<R> {
    /// Whether `record` belongs in the view
    fn matches(&self, record: &R, resolver: &Resolver<'_>) -> bool;
}

/// Patient status facet
///
/// Patients carry no status field; `Active` selects every patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatientStatus {
    /// Currently registered
    Active,
}

impl Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("active")
    }
}

impl FromStr for PatientStatus {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("active") {
            Ok(Self::Active)
        } else {
            Err(ParseValueError::new("patient status", s))
        }
    }
}

/// Patients list filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientFilter {
    /// Matched against name, disease and phone
    pub search: SearchTerm,
    /// Exact gender facet
    pub gender: Option<Gender>,
    /// Status facet
    pub status: Option<PatientStatus>,
}

impl PatientFilter {
    /// Set the search term
    #[must_use]
    pub fn with_search(mut self, term: impl Into<SearchTerm>) -> Self {
        self.search = term.into();
        self
    }

    /// Set the gender facet
    #[must_use]
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }
}

impl RecordFilter<Patient> for PatientFilter {
    fn matches(&self, p: &Patient, _resolver: &Resolver<'_>) -> bool {
        if self.gender.is_some_and(|g| g != p.gender) {
            return false;
        }
        // status: every stored patient is Active
        self.search
            .found_in_any([p.name.as_str(), p.disease.as_str(), p.phone.as_str()])
    }
}

/// Doctors list filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorFilter {
    /// Matched against name and specialization
    pub search: SearchTerm,
    /// Exact availability facet
    pub availability: Option<Availability>,
    /// Exact specialization facet
    pub specialization: Option<String>,
}

impl DoctorFilter {
    /// Set the search term
    #[must_use]
    pub fn with_search(mut self, term: impl Into<SearchTerm>) -> Self {
        self.search = term.into();
        self
    }

    /// Set the availability facet
    #[must_use]
    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = Some(availability);
        self
    }

    /// Set the specialization facet
    #[must_use]
    pub fn with_specialization(mut self, specialization: impl Into<String>) -> Self {
        self.specialization = Some(specialization.into());
        self
    }
}

impl RecordFilter<Doctor> for DoctorFilter {
    fn matches(&self, d: &Doctor, _resolver: &Resolver<'_>) -> bool {
        if self.availability.is_some_and(|a| a != d.availability) {
            return false;
        }
        if self
            .specialization
            .as_deref()
            .is_some_and(|s| s != d.specialization)
        {
            return false;
        }
        self.search
            .found_in_any([d.name.as_str(), d.specialization.as_str()])
    }
}

/// Appointments list filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    /// Matched against resolved patient and doctor names and the reason
    pub search: SearchTerm,
    /// Exact status facet
    pub status: Option<AppointmentStatus>,
}

impl AppointmentFilter {
    /// Set the search term
    #[must_use]
    pub fn with_search(mut self, term: impl Into<SearchTerm>) -> Self {
        self.search = term.into();
        self
    }

    /// Set the status facet
    #[must_use]
    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = Some(status);
        self
    }
}

impl RecordFilter<Appointment> for AppointmentFilter {
    fn matches(&self, a: &Appointment, resolver: &Resolver<'_>) -> bool {
        if self.status.is_some_and(|s| s != a.status) {
            return false;
        }
        // Dangling references search as empty names, never as "Unknown"
        let patient = resolver.patient_name(&a.patient_id).unwrap_or("");
        let doctor = resolver.doctor_name(&a.doctor_id).unwrap_or("");
        self.search
            .found_in_any([patient, doctor, a.reason.as_str()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use mc_model::RecordId;

    fn patient(name: &str, gender: Gender, disease: &str) -> Patient {
        Patient {
            id: RecordId::from("p_1"),
            name: name.into(),
            age: 30,
            gender,
            phone: "+91 90000 11111".into(),
            disease: disease.into(),
            admission_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            blood_group: None,
            notes: None,
        }
    }

    #[test]
    fn patient_search_covers_name_disease_phone() {
        let resolver = Resolver::default();
        let p = patient("Rahul Verma", Gender::Male, "Asthma");

        assert!(PatientFilter::default().with_search("rahul").matches(&p, &resolver));
        assert!(PatientFilter::default().with_search("ASTH").matches(&p, &resolver));
        assert!(PatientFilter::default().with_search("90000").matches(&p, &resolver));
        assert!(!PatientFilter::default().with_search("diabetes").matches(&p, &resolver));
    }

    #[test]
    fn gender_facet_is_conjunctive() {
        let resolver = Resolver::default();
        let p = patient("Rahul Verma", Gender::Male, "Asthma");
        let filter = PatientFilter::default()
            .with_search("rahul")
            .with_gender(Gender::Female);
        assert!(!filter.matches(&p, &resolver));
    }

    #[test]
    fn active_status_passes_everyone() {
        let resolver = Resolver::default();
        let p = patient("Rahul Verma", Gender::Male, "Asthma");
        let filter = PatientFilter {
            status: Some(PatientStatus::Active),
            ..PatientFilter::default()
        };
        assert!(filter.matches(&p, &resolver));
        assert_eq!("Active".parse::<PatientStatus>().unwrap(), PatientStatus::Active);
        assert!("discharged".parse::<PatientStatus>().is_err());
    }

    #[test]
    fn doctor_facets() {
        let resolver = Resolver::default();
        let d = Doctor {
            id: RecordId::from("d_1"),
            name: "Dr. Kapoor".into(),
            specialization: "Neurology".into(),
            availability: Availability::OnLeave,
            experience: None,
            phone: None,
        };
        assert!(DoctorFilter::default().with_search("neuro").matches(&d, &resolver));
        assert!(DoctorFilter::default()
            .with_availability(Availability::OnLeave)
            .matches(&d, &resolver));
        assert!(!DoctorFilter::default()
            .with_specialization("Cardiology")
            .matches(&d, &resolver));
    }

    #[test]
    fn dangling_appointment_does_not_match_unknown() {
        let resolver = Resolver::default();
        let a = Appointment {
            id: RecordId::from("a_1"),
            patient_id: RecordId::from("p_404"),
            doctor_id: RecordId::from("d_404"),
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            reason: "Checkup".into(),
            status: AppointmentStatus::Scheduled,
        };
        assert!(!AppointmentFilter::default().with_search("unknown").matches(&a, &resolver));
        assert!(AppointmentFilter::default().with_search("check").matches(&a, &resolver));
        assert!(!AppointmentFilter::default()
            .with_status(AppointmentStatus::Cancelled)
            .matches(&a, &resolver));
    }
}

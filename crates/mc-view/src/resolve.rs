//! Cross-reference resolution
//!
//! Provides [`Resolver`], which turns the patient and doctor ids held by an
//! appointment into display names. Lookups never fail: a dangling reference
//! renders as [`UNKNOWN`] and the appointment itself is left untouched.

use mc_model::{Appointment, AppointmentStatus, Doctor, Patient, RecordId};
use serde::Serialize;
use std::collections::HashMap;

/// Display name for a reference whose target no longer exists
pub const UNKNOWN: &str = "Unknown";

/// Doctor label used in a patient's appointment history
pub const UNKNOWN_DOCTOR: &str = "Unknown Doctor";

/// Id-to-record index over the current collections
#[derive(Debug, Clone, Default)]
pub struct Resolver<'a> {
    patients: HashMap<&'a str, &'a Patient>,
    doctors: HashMap<&'a str, &'a Doctor>,
}

impl<'a> Resolver<'a> {
    /// Create new resolver over the given collections
    ///
    /// If an id appears twice the first record wins, matching a linear scan.
    #[must_use]
    pub fn new(patients: &'a [Patient], doctors: &'a [Doctor]) -> Self {
        let mut by_patient = HashMap::with_capacity(patients.len());
        for p in patients {
            by_patient.entry(p.id.as_str()).or_insert(p);
        }
        let mut by_doctor = HashMap::with_capacity(doctors.len());
        for d in doctors {
            by_doctor.entry(d.id.as_str()).or_insert(d);
        }
        Self {
            patients: by_patient,
            doctors: by_doctor,
        }
    }

    /// Patient with the given id
    #[inline]
    #[must_use]
    pub fn patient(&self, id: &RecordId) -> Option<&'a Patient> {
        self.patients.get(id.as_str()).copied()
    }

    /// Doctor with the given id
    #[inline]
    #[must_use]
    pub fn doctor(&self, id: &RecordId) -> Option<&'a Doctor> {
        self.doctors.get(id.as_str()).copied()
    }

    /// Patient name, if the patient exists
    #[inline]
    #[must_use]
    pub fn patient_name(&self, id: &RecordId) -> Option<&'a str> {
        self.patient(id).map(|p| p.name.as_str())
    }

    /// Doctor name, if the doctor exists
    #[inline]
    #[must_use]
    pub fn doctor_name(&self, id: &RecordId) -> Option<&'a str> {
        self.doctor(id).map(|d| d.name.as_str())
    }

    /// Patient name for display, [`UNKNOWN`] when dangling
    #[must_use]
    pub fn patient_display(&self, id: &RecordId) -> &'a str {
        self.patient_name(id).unwrap_or(UNKNOWN)
    }

    /// Doctor name for display, [`UNKNOWN`] when dangling
    #[must_use]
    pub fn doctor_display(&self, id: &RecordId) -> &'a str {
        self.doctor_name(id).unwrap_or(UNKNOWN)
    }

    /// Appointment joined with its display names
    #[must_use]
    pub fn resolve<'r>(&self, appointment: &'r Appointment) -> ResolvedAppointment<'r>
    where
        'a: 'r,
    {
        ResolvedAppointment {
            appointment,
            patient_name: self.patient_display(&appointment.patient_id),
            doctor_name: self.doctor_display(&appointment.doctor_id),
            doctor_specialization: self
                .doctor(&appointment.doctor_id)
                .map(|d| d.specialization.as_str()),
        }
    }

    /// Every appointment of one patient, in collection order
    #[must_use]
    pub fn history<'r>(
        &self,
        patient_id: &RecordId,
        appointments: &'r [Appointment],
    ) -> Vec<HistoryEntry<'r>>
    where
        'a: 'r,
    {
        appointments
            .iter()
            .filter(|a| &a.patient_id == patient_id)
            .map(|a| HistoryEntry {
                id: &a.id,
                date: a.date,
                time: a.time,
                doctor_name: self.doctor_name(&a.doctor_id).unwrap_or(UNKNOWN_DOCTOR),
                reason: &a.reason,
                status: a.status,
            })
            .collect()
    }
}

/// Appointment row with resolved names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAppointment<'r> {
    /// The stored record
    #[serde(flatten)]
    pub appointment: &'r Appointment,
    /// Patient name or [`UNKNOWN`]
    pub patient_name: &'r str,
    /// Doctor name or [`UNKNOWN`]
    pub doctor_name: &'r str,
    /// Doctor specialization when the doctor exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_specialization: Option<&'r str>,
}

/// One line of a patient's appointment history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry<'r> {
    /// Appointment id
    pub id: &'r RecordId,
    /// Visit date
    pub date: chrono::NaiveDate,
    /// Visit time
    #[serde(serialize_with = "mc_model::serde_compat::hh_mm::serialize")]
    pub time: chrono::NaiveTime,
    /// Doctor name or [`UNKNOWN_DOCTOR`]
    pub doctor_name: &'r str,
    /// Visit reason
    pub reason: &'r str,
    /// Current status
    pub status: AppointmentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use mc_model::{Availability, Gender};

    fn patient(id: &str, name: &str) -> Patient {
        Patient {
            id: RecordId::from(id),
            name: name.into(),
            age: 40,
            gender: Gender::Female,
            phone: "+91 98765 43210".into(),
            disease: "Hypertension".into(),
            admission_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            blood_group: None,
            notes: None,
        }
    }

    fn doctor(id: &str, name: &str) -> Doctor {
        Doctor {
            id: RecordId::from(id),
            name: name.into(),
            specialization: "Cardiology".into(),
            availability: Availability::Available,
            experience: Some(12),
            phone: None,
        }
    }

    fn appointment(id: &str, patient: &str, doctor: &str) -> Appointment {
        Appointment {
            id: RecordId::from(id),
            patient_id: RecordId::from(patient),
            doctor_id: RecordId::from(doctor),
            date: NaiveDate::from_ymd_opt(2026, 2, 20).unwrap(),
            time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            reason: "Follow-up".into(),
            status: AppointmentStatus::Scheduled,
        }
    }

    #[test]
    fn resolves_existing_references() {
        let patients = vec![patient("p_1", "Ananya Rao")];
        let doctors = vec![doctor("d_1", "Dr. Mehta")];
        let resolver = Resolver::new(&patients, &doctors);
        let appt = appointment("a_1", "p_1", "d_1");

        let row = resolver.resolve(&appt);
        assert_eq!(row.patient_name, "Ananya Rao");
        assert_eq!(row.doctor_name, "Dr. Mehta");
        assert_eq!(row.doctor_specialization, Some("Cardiology"));
    }

    #[test]
    fn dangling_references_render_unknown() {
        let patients = vec![patient("p_1", "Ananya Rao")];
        let resolver = Resolver::new(&patients, &[]);
        let appt = appointment("a_1", "p_9", "d_9");

        assert_eq!(resolver.patient_display(&appt.patient_id), UNKNOWN);
        assert_eq!(resolver.doctor_display(&appt.doctor_id), UNKNOWN);
        assert!(resolver.doctor_name(&appt.doctor_id).is_none());
    }

    #[test]
    fn duplicate_ids_resolve_to_first() {
        let patients = vec![patient("p_1", "First"), patient("p_1", "Second")];
        let resolver = Resolver::new(&patients, &[]);
        assert_eq!(resolver.patient_name(&RecordId::from("p_1")), Some("First"));
    }

    #[test]
    fn history_uses_unknown_doctor_label() {
        let patients = vec![patient("p_1", "Ananya Rao")];
        let doctors = vec![doctor("d_1", "Dr. Mehta")];
        let appts = vec![
            appointment("a_1", "p_1", "d_1"),
            appointment("a_2", "p_2", "d_1"),
            appointment("a_3", "p_1", "d_7"),
        ];
        let resolver = Resolver::new(&patients, &doctors);

        let history = resolver.history(&RecordId::from("p_1"), &appts);
        let names: Vec<_> = history.iter().map(|h| h.doctor_name).collect();
        assert_eq!(names, ["Dr. Mehta", UNKNOWN_DOCTOR]);
    }
}

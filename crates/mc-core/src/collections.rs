//! The three record collections and per-kind repository hooks

use crate::error::RepoError;
use mc_model::{
    Appointment, AppointmentDraft, AppointmentPatch, Doctor, Patient, Record, RecordId,
    RecordKind, ValidationError,
};
use serde::Serialize;

/// Patients, doctors and appointments in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Collections {
    pub(crate) patients: Vec<Patient>,
    pub(crate) doctors: Vec<Doctor>,
    pub(crate) appointments: Vec<Appointment>,
}

impl Collections {
    /// Create new set from existing collections
    #[must_use]
    pub fn new(patients: Vec<Patient>, doctors: Vec<Doctor>, appointments: Vec<Appointment>) -> Self {
        Self {
            patients,
            doctors,
            appointments,
        }
    }

    /// All patients
    #[inline]
    #[must_use]
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    /// All doctors
    #[inline]
    #[must_use]
    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    /// All appointments
    #[inline]
    #[must_use]
    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    /// No patients and no doctors
    #[inline]
    #[must_use]
    pub fn is_unpopulated(&self) -> bool {
        self.patients.is_empty() && self.doctors.is_empty()
    }

    fn has_patient(&self, id: &RecordId) -> bool {
        self.patients.iter().any(|p| &p.id == id)
    }

    fn has_doctor(&self, id: &RecordId) -> bool {
        self.doctors.iter().any(|d| &d.id == id)
    }

    fn check_refs(
        &self,
        patient_id: Option<&RecordId>,
        doctor_id: Option<&RecordId>,
    ) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if patient_id.is_some_and(|id| !self.has_patient(id)) {
            missing.push(mc_model::FieldError {
                field: "patientId",
                message: "Select an existing patient".to_owned(),
            });
        }
        if doctor_id.is_some_and(|id| !self.has_doctor(id)) {
            missing.push(mc_model::FieldError {
                field: "doctorId",
                message: "Select an existing doctor".to_owned(),
            });
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { fields: missing })
        }
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for mc_model::Patient {}
    impl Sealed for mc_model::Doctor {}
    impl Sealed for mc_model::Appointment {}
}

/// A record kind the repository stores
///
/// Implemented for [`Patient`], [`Doctor`] and [`Appointment`] only.
pub trait Stored: Record + sealed::Sealed {
    /// Collection holding this kind
    fn slot(c: &Collections) -> &Vec<Self>;

    /// Mutable collection holding this kind
    fn slot_mut(c: &mut Collections) -> &mut Vec<Self>;

    /// Collection-level precondition for creating a record
    ///
    /// # Errors
    /// Returns [`RepoError::MissingPrerequisite`] when creation cannot start
    fn ready(_c: &Collections) -> Result<(), RepoError> {
        Ok(())
    }

    /// Cross-reference checks on a validated draft
    ///
    /// # Errors
    /// Returns [`ValidationError`] naming fields that point nowhere
    fn check_draft(_c: &Collections, _draft: &Self::Draft) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Cross-reference checks on a validated patch
    ///
    /// # Errors
    /// Returns [`ValidationError`] naming fields that point nowhere
    fn check_patch(_c: &Collections, _patch: &Self::Patch) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Remove dependants of a record that was just deleted
    fn cascade(_c: &mut Collections, _removed: &Self) -> Vec<Appointment> {
        Vec::new()
    }
}

impl Stored for Patient {
    fn slot(c: &Collections) -> &Vec<Self> {
        &c.patients
    }

    fn slot_mut(c: &mut Collections) -> &mut Vec<Self> {
        &mut c.patients
    }

    fn cascade(c: &mut Collections, removed: &Self) -> Vec<Appointment> {
        let (gone, kept) = std::mem::take(&mut c.appointments)
            .into_iter()
            .partition(|a| a.patient_id == removed.id);
        c.appointments = kept;
        gone
    }
}

impl Stored for Doctor {
    fn slot(c: &Collections) -> &Vec<Self> {
        &c.doctors
    }

    fn slot_mut(c: &mut Collections) -> &mut Vec<Self> {
        &mut c.doctors
    }
}

impl Stored for Appointment {
    fn slot(c: &Collections) -> &Vec<Self> {
        &c.appointments
    }

    fn slot_mut(c: &mut Collections) -> &mut Vec<Self> {
        &mut c.appointments
    }

    fn ready(c: &Collections) -> Result<(), RepoError> {
        if c.patients.is_empty() {
            return Err(RepoError::MissingPrerequisite(RecordKind::Patient));
        }
        if c.doctors.is_empty() {
            return Err(RepoError::MissingPrerequisite(RecordKind::Doctor));
        }
        Ok(())
    }

    fn check_draft(c: &Collections, draft: &AppointmentDraft) -> Result<(), ValidationError> {
        c.check_refs(Some(&draft.patient_id), Some(&draft.doctor_id))
    }

    fn check_patch(c: &Collections, patch: &AppointmentPatch) -> Result<(), ValidationError> {
        c.check_refs(patch.patient_id.as_ref(), patch.doctor_id.as_ref())
    }
}

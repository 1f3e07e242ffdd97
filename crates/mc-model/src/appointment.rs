//! Appointment records and the status machine
//!
//! An appointment starts `scheduled` and may move once, to `completed` or
//! `cancelled`. Both of those are terminal.

use crate::id::{RecordId, RecordKind};
use crate::record::{ParseValueError, Record, Validate};
use crate::serde_compat;
use crate::validation::{FieldChecks, ValidationError};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Appointment lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    /// Booked, not yet happened
    #[default]
    Scheduled,
    /// Took place
    Completed,
    /// Called off
    Cancelled,
}

impl AppointmentStatus {
    /// All values
    pub const ALL: [AppointmentStatus; 3] = [Self::Scheduled, Self::Completed, Self::Cancelled];

    /// Stored form
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether no further transition exists
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        allowed_transitions(self).is_empty()
    }
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseValueError::new("appointment status", s))
    }
}

/// Rejected status change
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal status transition: {from} -> {to}")]
pub struct IllegalTransition {
    /// Current status
    pub from: AppointmentStatus,
    /// Requested status
    pub to: AppointmentStatus,
}

/// Statuses reachable from `from`
#[must_use]
pub fn allowed_transitions(from: AppointmentStatus) -> &'static [AppointmentStatus] {
    use AppointmentStatus::{Cancelled, Completed, Scheduled};
    match from {
        Scheduled => &[Completed, Cancelled],
        Completed | Cancelled => &[],
    }
}

/// Validates a status change
///
/// # Errors
/// Returns [`IllegalTransition`] unless `to` is reachable from `from`
pub fn validate_transition(
    from: AppointmentStatus,
    to: AppointmentStatus,
) -> Result<(), IllegalTransition> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(IllegalTransition { from, to })
    }
}

/// A booked visit linking a patient to a doctor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Stable id (`a_…`)
    pub id: RecordId,
    /// Patient reference; deleting the patient deletes this appointment
    pub patient_id: RecordId,
    /// Doctor reference; may dangle after the doctor is deleted
    pub doctor_id: RecordId,
    /// Day of the visit
    pub date: NaiveDate,
    /// Time of the visit
    #[serde(with = "serde_compat::hh_mm")]
    pub time: NaiveTime,
    /// Reason for the visit
    #[serde(default)]
    pub reason: String,
    /// Lifecycle state
    #[serde(default)]
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Move to a new status
    ///
    /// # Errors
    /// Returns [`IllegalTransition`] and leaves the status unchanged when
    /// the move is not allowed
    pub fn transition(&mut self, to: AppointmentStatus) -> Result<(), IllegalTransition> {
        validate_transition(self.status, to)?;
        self.status = to;
        Ok(())
    }
}

/// Input for booking an appointment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentDraft {
    /// Patient being seen
    pub patient_id: RecordId,
    /// Doctor seeing them
    pub doctor_id: RecordId,
    /// Appointment day
    pub date: NaiveDate,
    /// Start time
    pub time: NaiveTime,
    /// Reason for the visit
    pub reason: String,
}

impl AppointmentDraft {
    /// Create new draft
    #[must_use]
    pub fn new(
        patient_id: RecordId,
        doctor_id: RecordId,
        date: NaiveDate,
        time: NaiveTime,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            patient_id,
            doctor_id,
            date,
            time,
            reason: reason.into(),
        }
    }
}

impl Validate for AppointmentDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        FieldChecks::new()
            .required("patientId", self.patient_id.as_str())
            .required("doctorId", self.doctor_id.as_str())
            .required("reason", &self.reason)
            .finish()
    }
}

/// Partial appointment update
///
/// Status is deliberately absent; it only moves through
/// [`Appointment::transition`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentPatch {
    /// New patient
    pub patient_id: Option<RecordId>,
    /// New doctor
    pub doctor_id: Option<RecordId>,
    /// New day
    pub date: Option<NaiveDate>,
    /// New start time
    pub time: Option<NaiveTime>,
    /// New reason
    pub reason: Option<String>,
}

impl Validate for AppointmentPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        FieldChecks::new()
            .required_if_set("patientId", self.patient_id.as_ref().map(RecordId::as_str))
            .required_if_set("doctorId", self.doctor_id.as_ref().map(RecordId::as_str))
            .required_if_set("reason", self.reason.as_deref())
            .finish()
    }
}

impl Record for Appointment {
    const KIND: RecordKind = RecordKind::Appointment;
    type Draft = AppointmentDraft;
    type Patch = AppointmentPatch;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_draft(id: RecordId, draft: AppointmentDraft) -> Self {
        Self {
            id,
            patient_id: draft.patient_id,
            doctor_id: draft.doctor_id,
            date: draft.date,
            time: draft.time,
            reason: draft.reason.trim().to_string(),
            status: AppointmentStatus::Scheduled,
        }
    }

    fn apply_patch(&mut self, patch: AppointmentPatch) {
        if let Some(patient_id) = patch.patient_id {
            self.patient_id = patient_id;
        }
        if let Some(doctor_id) = patch.doctor_id {
            self.doctor_id = doctor_id;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(time) = patch.time {
            self.time = time;
        }
        if let Some(reason) = patch.reason {
            self.reason = reason.trim().to_string();
        }
    }

    fn display_name(&self) -> &str {
        &self.reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AppointmentStatus::{Cancelled, Completed, Scheduled};

    fn booked() -> Appointment {
        Appointment::from_draft(
            RecordId::from("a_1"),
            AppointmentDraft::new(
                RecordId::from("p_1"),
                RecordId::from("d_1"),
                NaiveDate::from_ymd_opt(2026, 2, 20).unwrap(),
                NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
                "Follow-up on migraine medication",
            ),
        )
    }

    #[test]
    fn new_appointments_are_scheduled() {
        assert_eq!(booked().status, Scheduled);
    }

    #[test]
    fn scheduled_moves_once() {
        let mut a = booked();
        assert!(a.transition(Completed).is_ok());
        assert_eq!(a.status, Completed);

        let err = a.transition(Cancelled).unwrap_err();
        assert_eq!(err, IllegalTransition { from: Completed, to: Cancelled });
        assert_eq!(a.status, Completed);
    }

    #[test]
    fn terminal_states() {
        assert!(!Scheduled.is_terminal());
        assert!(Completed.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(validate_transition(Cancelled, Scheduled).is_err());
        assert!(validate_transition(Scheduled, Scheduled).is_err());
    }

    #[test]
    fn time_round_trips_as_hh_mm() {
        let json = serde_json::to_value(booked()).unwrap();
        assert_eq!(json["time"], "14:30");
        assert_eq!(json["status"], "scheduled");
        assert_eq!(json["patientId"], "p_1");
    }

    #[test]
    fn decodes_seconds_and_missing_status() {
        let raw = r#"{"id":"a_7","patientId":"p_1","doctorId":"d_2",
                      "date":"2026-02-10","time":"10:00:00","reason":"Review"}"#;
        let a: Appointment = serde_json::from_str(raw).unwrap();
        assert_eq!(a.time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        assert_eq!(a.status, Scheduled);
    }

    #[test]
    fn draft_requires_reason() {
        let mut d = AppointmentDraft::new(
            RecordId::from("p_1"),
            RecordId::from("d_1"),
            NaiveDate::from_ymd_opt(2026, 2, 20).unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            "",
        );
        assert!(d.validate().unwrap_err().has_field("reason"));
        d.reason = "Checkup".into();
        assert!(d.validate().is_ok());
    }
}

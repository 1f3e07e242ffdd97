//! Dashboard summary
//!
//! Headline counts plus three short preview lists. The date is supplied by
//! the caller so the summary stays a pure function of its inputs.

use crate::resolve::Resolver;
use chrono::{NaiveDate, NaiveTime};
use mc_model::{Appointment, AppointmentStatus, Availability, Doctor, Patient, RecordId};
use serde::Serialize;

/// Sidebar counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Badges {
    /// All patients
    pub patients: usize,
    /// All doctors
    pub doctors: usize,
    /// Scheduled appointments
    pub scheduled: usize,
}

/// Recent patient row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientPreview<'a> {
    /// Patient id
    pub id: &'a RecordId,
    /// Name
    pub name: &'a str,
    /// Disease, may be empty
    pub disease: &'a str,
    /// Age in years
    pub age: u32,
}

/// Upcoming appointment row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPreview<'a> {
    /// Appointment id
    pub id: &'a RecordId,
    /// Resolved patient name
    pub patient_name: &'a str,
    /// Resolved doctor name
    pub doctor_name: &'a str,
    /// Visit date
    pub date: NaiveDate,
    /// Visit time
    #[serde(serialize_with = "mc_model::serde_compat::hh_mm::serialize")]
    pub time: NaiveTime,
}

/// Doctor availability row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorPreview<'a> {
    /// Doctor id
    pub id: &'a RecordId,
    /// Name
    pub name: &'a str,
    /// Specialization
    pub specialization: &'a str,
    /// Availability
    pub availability: Availability,
}

/// Everything the dashboard shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary<'a> {
    /// Date the "today" count refers to
    pub today: NaiveDate,
    /// Patient count
    pub total_patients: usize,
    /// Doctors whose availability is `Available`
    pub doctors_available: usize,
    /// Scheduled appointments dated `today`
    pub appointments_today: usize,
    /// Sidebar counters
    pub badges: Badges,
    /// Last added patients, newest first
    pub recent_patients: Vec<PatientPreview<'a>>,
    /// Last added scheduled appointments, newest first
    pub scheduled: Vec<AppointmentPreview<'a>>,
    /// First doctors in collection order
    pub doctors: Vec<DoctorPreview<'a>>,
}

/// Build the dashboard for `today`, with `preview_len` rows per list
#[must_use]
pub fn summarize<'a>(
    patients: &'a [Patient],
    doctors: &'a [Doctor],
    appointments: &'a [Appointment],
    resolver: &Resolver<'a>,
    today: NaiveDate,
    preview_len: usize,
) -> DashboardSummary<'a> {
    let scheduled: Vec<&Appointment> = appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Scheduled)
        .collect();

    let recent_patients = patients
        .iter()
        .rev()
        .take(preview_len)
        .map(|p| PatientPreview {
            id: &p.id,
            name: &p.name,
            disease: &p.disease,
            age: p.age,
        })
        .collect();

    let scheduled_preview = scheduled
        .iter()
        .copied()
        .rev()
        .take(preview_len)
        .map(|a| AppointmentPreview {
            id: &a.id,
            patient_name: resolver.patient_display(&a.patient_id),
            doctor_name: resolver.doctor_display(&a.doctor_id),
            date: a.date,
            time: a.time,
        })
        .collect();

    let doctor_preview = doctors
        .iter()
        .take(preview_len)
        .map(|d| DoctorPreview {
            id: &d.id,
            name: &d.name,
            specialization: &d.specialization,
            availability: d.availability,
        })
        .collect();

    DashboardSummary {
        today,
        total_patients: patients.len(),
        doctors_available: doctors
            .iter()
            .filter(|d| d.availability == Availability::Available)
            .count(),
        appointments_today: scheduled.iter().filter(|a| a.date == today).count(),
        badges: Badges {
            patients: patients.len(),
            doctors: doctors.len(),
            scheduled: scheduled.len(),
        },
        recent_patients,
        scheduled: scheduled_preview,
        doctors: doctor_preview,
    }
}

//! Demo data set
//!
//! Five doctors, five patients and four appointments. Two appointments fall
//! on the supplied date so the dashboard has something to count.

use crate::collections::Collections;
use chrono::{NaiveDate, NaiveTime};
use mc_model::{
    Appointment, AppointmentStatus, Availability, Doctor, Gender, Patient, RecordId, RecordKind,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

fn doctor(n: u32, name: &str, specialization: &str, availability: Availability, years: u32) -> Doctor {
    Doctor {
        id: RecordId::new(RecordKind::Doctor, n),
        name: name.to_owned(),
        specialization: specialization.to_owned(),
        availability,
        experience: Some(years),
        phone: Some(format!("+91 98765 {}", n.to_string().repeat(5))),
    }
}

#[allow(clippy::too_many_arguments)]
fn patient(
    n: u32,
    name: &str,
    age: u32,
    gender: Gender,
    disease: &str,
    admitted: NaiveDate,
    blood_group: &str,
    notes: Option<&str>,
) -> Patient {
    Patient {
        id: RecordId::new(RecordKind::Patient, n),
        name: name.to_owned(),
        age,
        gender,
        phone: format!("+91 99001 {}", n.to_string().repeat(5)),
        disease: disease.to_owned(),
        admission_date: admitted,
        blood_group: Some(blood_group.to_owned()),
        notes: notes.map(str::to_owned),
    }
}

fn appointment(
    n: u32,
    patient: u32,
    doctor: u32,
    on: NaiveDate,
    at: NaiveTime,
    reason: &str,
    status: AppointmentStatus,
) -> Appointment {
    Appointment {
        id: RecordId::new(RecordKind::Appointment, n),
        patient_id: RecordId::new(RecordKind::Patient, patient),
        doctor_id: RecordId::new(RecordKind::Doctor, doctor),
        date: on,
        time: at,
        reason: reason.to_owned(),
        status,
    }
}

/// Build the demo collections, with two visits dated `today`
#[must_use]
pub fn demo_collections(today: NaiveDate) -> Collections {
    use AppointmentStatus::{Completed, Scheduled};
    use Availability::{Available, Busy, OnLeave};
    use Gender::{Female, Male};

    let doctors = vec![
        doctor(1, "Dr. Arjun Mehra", "Cardiology", Available, 12),
        doctor(2, "Dr. Priya Sharma", "Neurology", Busy, 8),
        doctor(3, "Dr. Rahul Verma", "Orthopedics", Available, 15),
        doctor(4, "Dr. Sneha Patel", "Pediatrics", OnLeave, 6),
        doctor(5, "Dr. Vikram Singh", "Dermatology", Available, 10),
    ];

    let patients = vec![
        patient(1, "Aanya Krishnamurthy", 38, Female, "Hypertension", date(2026, 2, 1), "A+", Some("Allergic to penicillin")),
        patient(2, "Rohan Desai", 52, Male, "Type 2 Diabetes", date(2026, 2, 5), "O+", None),
        patient(3, "Meera Joshi", 29, Female, "Migraine", date(2026, 2, 10), "B-", None),
        patient(4, "Aryan Kapoor", 67, Male, "Coronary Artery", date(2026, 2, 12), "AB+", Some("Post-op monitoring")),
        patient(5, "Divya Nair", 44, Female, "Appendicitis", date(2026, 2, 15), "O-", None),
    ];

    let appointments = vec![
        appointment(1, 1, 1, today, time(9, 30), "Routine blood pressure checkup", Scheduled),
        appointment(2, 2, 2, today, time(11, 0), "Diabetes management consultation", Scheduled),
        appointment(3, 3, 3, date(2026, 2, 20), time(14, 30), "Follow-up on migraine medication", Scheduled),
        appointment(4, 4, 1, date(2026, 2, 10), time(10, 0), "Post-operative cardiac review", Completed),
    ];

    Collections::new(patients, doctors, appointments)
}

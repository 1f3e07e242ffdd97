//! Testing utilities for the MediCare workspace
//!
//! Shared fixtures, bulk builders and a store that fails on demand.

#![allow(missing_docs)]

use chrono::{NaiveDate, NaiveTime};
use mc_core::{RepoConfig, Repository};
use mc_model::{
    Appointment, AppointmentDraft, Availability, Doctor, DoctorDraft, Gender, Patient,
    PatientDraft, RecordId,
};
use mc_store::{MemoryStore, PersistentStore, StoreError, StoreKey};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn patient_draft(name: &str) -> PatientDraft {
    PatientDraft::new(name, 42, Gender::Female, "+91 99001 12345", "Hypertension", date(2026, 2, 1))
}

pub fn doctor_draft(name: &str) -> DoctorDraft {
    DoctorDraft::new(name, "Cardiology", Availability::Available).with_experience(10)
}

pub fn appointment_draft(patient: &RecordId, doctor: &RecordId) -> AppointmentDraft {
    AppointmentDraft::new(
        patient.clone(),
        doctor.clone(),
        date(2026, 2, 20),
        time(10, 30),
        "Routine checkup",
    )
}

pub fn memory_repo() -> Repository<MemoryStore> {
    Repository::open(MemoryStore::new(), RepoConfig::default())
}

pub fn repo_on<S: PersistentStore>(store: S) -> Repository<S> {
    Repository::open(store, RepoConfig::default())
}

/// Ids created by [`populate`]
#[derive(Debug, Clone, Default)]
pub struct Seeded {
    pub patients: Vec<RecordId>,
    pub doctors: Vec<RecordId>,
    pub appointments: Vec<RecordId>,
}

/// Create `patients` patients named `Patient NNN`, `doctors` doctors and one
/// appointment per patient with the first doctor
pub fn populate<S: PersistentStore>(
    repo: &mut Repository<S>,
    patients: usize,
    doctors: usize,
) -> Seeded {
    let mut seeded = Seeded::default();
    for n in 1..=patients {
        let id = repo
            .create::<Patient>(patient_draft(&format!("Patient {n:03}")))
            .unwrap()
            .into_value();
        seeded.patients.push(id);
    }
    for n in 1..=doctors {
        let id = repo
            .create::<Doctor>(doctor_draft(&format!("Dr. Number {n}")))
            .unwrap()
            .into_value();
        seeded.doctors.push(id);
    }
    if let Some(doctor) = seeded.doctors.first().cloned() {
        for patient in &seeded.patients {
            let id = repo
                .create::<Appointment>(appointment_draft(patient, &doctor))
                .unwrap()
                .into_value();
            seeded.appointments.push(id);
        }
    }
    seeded
}

/// In-memory store whose reads and writes can be made to fail per key
#[derive(Debug, Default)]
pub struct FailingStore {
    inner: MemoryStore,
    failing_saves: Mutex<HashSet<StoreKey>>,
    failing_loads: Mutex<HashSet<StoreKey>>,
    attempted_saves: AtomicUsize,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every save fails
    pub fn rejecting_all() -> Self {
        let store = Self::new();
        store.fail_saves(StoreKey::ALL);
        store
    }

    pub fn with_entries<I, B>(entries: I) -> Self
    where
        I: IntoIterator<Item = (StoreKey, B)>,
        B: Into<Vec<u8>>,
    {
        Self {
            inner: MemoryStore::with_entries(entries),
            ..Self::default()
        }
    }

    pub fn fail_saves(&self, keys: impl IntoIterator<Item = StoreKey>) {
        self.failing_saves.lock().extend(keys);
    }

    pub fn fail_loads(&self, keys: impl IntoIterator<Item = StoreKey>) {
        self.failing_loads.lock().extend(keys);
    }

    pub fn heal(&self) {
        self.failing_saves.lock().clear();
        self.failing_loads.lock().clear();
    }

    pub fn attempted_saves(&self) -> usize {
        self.attempted_saves.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

impl PersistentStore for FailingStore {
    fn load(&self, key: StoreKey) -> Result<Option<Vec<u8>>, StoreError> {
        if self.failing_loads.lock().contains(&key) {
            return Err(StoreError::io(
                key,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "load refused"),
            ));
        }
        self.inner.load(key)
    }

    fn save(&self, key: StoreKey, bytes: &[u8]) -> Result<(), StoreError> {
        self.attempted_saves.fetch_add(1, Ordering::SeqCst);
        if self.failing_saves.lock().contains(&key) {
            return Err(StoreError::Rejected {
                key,
                reason: "quota exceeded".to_owned(),
            });
        }
        self.inner.save(key, bytes)
    }

    fn back_up(&self, key: StoreKey, bytes: &[u8]) -> Result<(), StoreError> {
        self.inner.back_up(key, bytes)
    }
}

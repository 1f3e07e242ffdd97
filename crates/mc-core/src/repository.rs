//! Record repository
//!
//! Provides [`Repository`], the single owner of the three collections. Every
//! mutation validates first, changes memory second and writes all three
//! collections through to the store last. A failed write never undoes the
//! change; it is returned in the [`Committed`] receipt.

use crate::collections::{Collections, Stored};
use crate::committed::{Committed, Removal};
use crate::config::RepoConfig;
use crate::demo::demo_collections;
use crate::error::{PersistError, RepoError};
use chrono::NaiveDate;
use mc_model::{
    Appointment, AppointmentStatus, Doctor, IdGenerator, Patient, Record, RecordId, RecordKind,
    Validate,
};
use mc_store::{PersistentStore, StoreKey, Theme};
use mc_view::{
    global_search, summarize, AppointmentQuery, DashboardSummary, DoctorQuery, HistoryEntry, Page,
    PatientQuery, Resolver, SearchHit,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

/// A patient with every appointment that references it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientDetail<'a> {
    /// The patient
    pub patient: &'a Patient,
    /// Appointments in insertion order
    pub history: Vec<HistoryEntry<'a>>,
}

/// Owner and sole mutator of the record collections
pub struct Repository<S> {
    store: S,
    config: RepoConfig,
    data: Collections,
    ids: IdGenerator,
    theme: Theme,
}

impl<S> std::fmt::Debug for Repository<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("config", &self.config)
            .field("patients", &self.data.patients.len())
            .field("doctors", &self.data.doctors.len())
            .field("appointments", &self.data.appointments.len())
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

impl<S: PersistentStore> Repository<S> {
    /// Load the collections from `store`
    ///
    /// Missing or undecodable blobs load as empty collections. With
    /// [`RepoConfig::seed_demo_when_empty`] set, an unpopulated store gets the
    /// demo data, dated from the local clock.
    pub fn open(store: S, config: RepoConfig) -> Self {
        let data = Collections::new(
            load_collection(&store, StoreKey::Patients),
            load_collection(&store, StoreKey::Doctors),
            load_collection(&store, StoreKey::Appointments),
        );
        let theme = match store.load(StoreKey::Theme) {
            Ok(raw) => Theme::from_stored(raw.as_deref()),
            Err(e) => {
                warn!(error = %e, "Theme unreadable, using default");
                Theme::default()
            }
        };

        let mut repo = Self {
            store,
            ids: IdGenerator::new(config.id_strategy),
            config,
            data,
            theme,
        };
        repo.observe_ids();
        info!(
            patients = repo.data.patients.len(),
            doctors = repo.data.doctors.len(),
            appointments = repo.data.appointments.len(),
            "Opened repository"
        );

        if repo.config.seed_demo_when_empty && repo.data.is_unpopulated() {
            let today = chrono::Local::now().date_naive();
            let receipt = repo.seed_demo(today);
            if !receipt.is_durable() {
                warn!(failures = receipt.persist_failures.len(), "Demo data not persisted");
            }
        }
        repo
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    /// Backing store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// All collections at once
    #[inline]
    #[must_use]
    pub fn collections(&self) -> &Collections {
        &self.data
    }

    /// Every record of one kind, in insertion order
    #[inline]
    #[must_use]
    pub fn list<R: Stored>(&self) -> &[R] {
        R::slot(&self.data)
    }

    /// Record by id
    #[must_use]
    pub fn get<R: Stored>(&self, id: &RecordId) -> Option<&R> {
        R::slot(&self.data).iter().find(|r| r.id() == id)
    }

    /// Validate and append a new record, returning its id
    ///
    /// # Errors
    /// - [`RepoError::MissingPrerequisite`] when booking with no patients or no doctors
    /// - [`RepoError::Validation`] when a field is missing, malformed or points nowhere
    pub fn create<R: Stored>(&mut self, draft: R::Draft) -> Result<Committed<RecordId>, RepoError> {
        R::ready(&self.data)?;
        draft.validate()?;
        R::check_draft(&self.data, &draft)?;

        let taken = R::slot(&self.data);
        let id = self
            .ids
            .next_unique(R::KIND, |candidate| taken.iter().any(|r| r.id() == candidate));
        let record = R::from_draft(id.clone(), draft);
        R::slot_mut(&mut self.data).push(record);

        info!(kind = %R::KIND, %id, "Created record");
        Ok(self.persist(id))
    }

    /// Merge the set fields of `patch` into an existing record
    ///
    /// # Errors
    /// - [`RepoError::NotFound`] if no record has this id (checked first)
    /// - [`RepoError::Validation`] if a set field is invalid
    pub fn update<R: Stored>(
        &mut self,
        id: &RecordId,
        patch: R::Patch,
    ) -> Result<Committed<R>, RepoError> {
        let pos = self.position::<R>(id)?;
        patch.validate()?;
        R::check_patch(&self.data, &patch)?;

        let record = &mut R::slot_mut(&mut self.data)[pos];
        record.apply_patch(patch);
        let updated = record.clone();

        info!(kind = %R::KIND, %id, "Updated record");
        Ok(self.persist(updated))
    }

    /// Remove a record; deleting a patient also removes its appointments
    ///
    /// # Errors
    /// Returns [`RepoError::NotFound`] if no record has this id; nothing is removed
    pub fn delete<R: Stored>(&mut self, id: &RecordId) -> Result<Committed<Removal<R>>, RepoError> {
        let pos = self.position::<R>(id)?;
        let removed = R::slot_mut(&mut self.data).remove(pos);
        let cascaded = R::cascade(&mut self.data, &removed);

        info!(kind = %R::KIND, %id, cascaded = cascaded.len(), "Deleted record");
        Ok(self.persist(Removal { removed, cascaded }))
    }

    /// Mark a scheduled appointment completed
    ///
    /// # Errors
    /// [`RepoError::NotFound`] or [`RepoError::InvalidTransition`] on a terminal appointment
    pub fn complete_appointment(&mut self, id: &RecordId) -> Result<Committed<Appointment>, RepoError> {
        self.transition(id, AppointmentStatus::Completed)
    }

    /// Mark a scheduled appointment cancelled
    ///
    /// # Errors
    /// [`RepoError::NotFound`] or [`RepoError::InvalidTransition`] on a terminal appointment
    pub fn cancel_appointment(&mut self, id: &RecordId) -> Result<Committed<Appointment>, RepoError> {
        self.transition(id, AppointmentStatus::Cancelled)
    }

    fn transition(
        &mut self,
        id: &RecordId,
        to: AppointmentStatus,
    ) -> Result<Committed<Appointment>, RepoError> {
        let pos = self.position::<Appointment>(id)?;
        let appointment = &mut self.data.appointments[pos];
        appointment
            .transition(to)
            .map_err(|e| RepoError::InvalidTransition {
                id: id.clone(),
                from: e.from,
                to: e.to,
            })?;
        let updated = appointment.clone();

        info!(%id, status = %to, "Appointment status changed");
        Ok(self.persist(updated))
    }

    /// Name lookups over the current collections
    #[inline]
    #[must_use]
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.data.patients, &self.data.doctors)
    }

    /// Patients query with the configured page size and default sort
    #[must_use]
    pub fn patient_query(&self) -> PatientQuery {
        PatientQuery::for_patients(self.config.patient_page_size)
    }

    /// Doctors query with the configured page size
    #[must_use]
    pub fn doctor_query(&self) -> DoctorQuery {
        DoctorQuery::for_doctors(self.config.doctor_page_size)
    }

    /// Appointments query with the configured page size
    #[must_use]
    pub fn appointment_query(&self) -> AppointmentQuery {
        AppointmentQuery::for_appointments(self.config.appointment_page_size)
    }

    /// Current page of the patients list
    #[must_use]
    pub fn patients_view(&self, query: &PatientQuery) -> Page<&Patient> {
        query.run(&self.data.patients, &self.resolver())
    }

    /// Current page of the doctors list
    #[must_use]
    pub fn doctors_view(&self, query: &DoctorQuery) -> Page<&Doctor> {
        query.run(&self.data.doctors, &self.resolver())
    }

    /// Current page of the appointments list
    #[must_use]
    pub fn appointments_view(&self, query: &AppointmentQuery) -> Page<&Appointment> {
        query.run(&self.data.appointments, &self.resolver())
    }

    /// Patient with its appointment history
    #[must_use]
    pub fn patient_detail(&self, id: &RecordId) -> Option<PatientDetail<'_>> {
        let patient = self.get::<Patient>(id)?;
        let history = self.resolver().history(id, &self.data.appointments);
        Some(PatientDetail { patient, history })
    }

    /// Dashboard counts and previews for `today`
    #[must_use]
    pub fn dashboard(&self, today: NaiveDate) -> DashboardSummary<'_> {
        summarize(
            &self.data.patients,
            &self.data.doctors,
            &self.data.appointments,
            &self.resolver(),
            today,
            self.config.dashboard_preview_len,
        )
    }

    /// Search every collection for `term`
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<SearchHit<'_>> {
        global_search(
            term,
            &self.data.patients,
            &self.data.doctors,
            &self.data.appointments,
            &self.resolver(),
            self.config.search_limit,
        )
    }

    /// Current theme
    #[inline]
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip and persist the theme
    pub fn toggle_theme(&mut self) -> Committed<Theme> {
        self.theme = self.theme.toggled();
        info!(theme = %self.theme, "Theme changed");
        let failures = match self.store.save(StoreKey::Theme, self.theme.as_str().as_bytes()) {
            Ok(()) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to persist theme");
                vec![PersistError::from(e)]
            }
        };
        Committed {
            value: self.theme,
            persist_failures: failures,
        }
    }

    /// Replace every collection with the demo data set
    pub fn seed_demo(&mut self, today: NaiveDate) -> Committed<()> {
        self.data = demo_collections(today);
        self.observe_ids();
        info!(
            patients = self.data.patients.len(),
            doctors = self.data.doctors.len(),
            appointments = self.data.appointments.len(),
            "Seeded demo data"
        );
        self.persist(())
    }

    fn position<R: Stored>(&self, id: &RecordId) -> Result<usize, RepoError> {
        R::slot(&self.data)
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| RepoError::not_found(R::KIND, id))
    }

    fn observe_ids(&mut self) {
        let ids = &mut self.ids;
        ids.observe_all(RecordKind::Patient, self.data.patients.iter().map(|p| &p.id));
        ids.observe_all(RecordKind::Doctor, self.data.doctors.iter().map(|d| &d.id));
        ids.observe_all(
            RecordKind::Appointment,
            self.data.appointments.iter().map(|a| &a.id),
        );
    }

    fn persist<T>(&self, value: T) -> Committed<T> {
        let blobs = [
            (StoreKey::Patients, serde_json::to_vec(&self.data.patients)),
            (StoreKey::Doctors, serde_json::to_vec(&self.data.doctors)),
            (StoreKey::Appointments, serde_json::to_vec(&self.data.appointments)),
        ];

        let mut failures = Vec::new();
        for (key, encoded) in blobs {
            let outcome = encoded
                .map_err(|source| PersistError::Encode { key, source })
                .and_then(|bytes| self.store.save(key, &bytes).map_err(PersistError::from));
            match outcome {
                Ok(()) => debug!(%key, "Persisted collection"),
                Err(e) => {
                    warn!(%key, error = %e, "Failed to persist collection");
                    failures.push(e);
                }
            }
        }

        Committed {
            value,
            persist_failures: failures,
        }
    }
}

fn load_collection<T, S>(store: &S, key: StoreKey) -> Vec<T>
where
    T: DeserializeOwned,
    S: PersistentStore,
{
    let bytes = match store.load(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            debug!(%key, "No stored collection");
            return Vec::new();
        }
        Err(e) => {
            warn!(%key, error = %e, "Store unreadable, starting empty");
            return Vec::new();
        }
    };
    // a stored `null` reads the same as a missing blob
    match serde_json::from_slice::<Option<Vec<T>>>(&bytes) {
        Ok(records) => {
            let records = records.unwrap_or_default();
            debug!(%key, count = records.len(), "Loaded collection");
            records
        }
        Err(e) => {
            warn!(%key, error = %e, "Undecodable collection, starting empty");
            match store.back_up(key, &bytes) {
                Ok(()) => info!(%key, "Backed up undecodable collection"),
                Err(e) => warn!(%key, error = %e, "Could not back up undecodable collection"),
            }
            Vec::new()
        }
    }
}

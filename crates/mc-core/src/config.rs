//! Repository configuration

use mc_model::IdStrategy;
use mc_view::{DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_LIMIT};
use serde::{Deserialize, Serialize};

/// Dashboard preview rows per list
pub const DEFAULT_PREVIEW_LEN: usize = 4;

/// Repository settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    /// Patients per page
    pub patient_page_size: usize,
    /// Doctors per page; unset shows every doctor
    pub doctor_page_size: Option<usize>,
    /// Appointments per page; unset shows every appointment
    pub appointment_page_size: Option<usize>,
    /// How new ids are minted
    pub id_strategy: IdStrategy,
    /// Load the demo data set when a store holds no patients and no doctors
    pub seed_demo_when_empty: bool,
    /// Global search result cap
    pub search_limit: usize,
    /// Dashboard preview rows per list
    pub dashboard_preview_len: usize,
}

impl RepoConfig {
    /// Create new config with defaults
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With patient page size
    #[inline]
    #[must_use]
    pub fn with_patient_page_size(mut self, size: usize) -> Self {
        self.patient_page_size = size.max(1);
        self
    }

    /// With doctor page size
    #[inline]
    #[must_use]
    pub fn with_doctor_page_size(mut self, size: Option<usize>) -> Self {
        self.doctor_page_size = size.map(|s| s.max(1));
        self
    }

    /// With appointment page size
    #[inline]
    #[must_use]
    pub fn with_appointment_page_size(mut self, size: Option<usize>) -> Self {
        self.appointment_page_size = size.map(|s| s.max(1));
        self
    }

    /// With id strategy
    #[inline]
    #[must_use]
    pub fn with_id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.id_strategy = strategy;
        self
    }

    /// With demo seeding on an empty store
    #[inline]
    #[must_use]
    pub fn with_demo_seed(mut self, enabled: bool) -> Self {
        self.seed_demo_when_empty = enabled;
        self
    }

    /// With global search cap
    #[inline]
    #[must_use]
    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    /// With dashboard preview length
    #[inline]
    #[must_use]
    pub fn with_preview_len(mut self, len: usize) -> Self {
        self.dashboard_preview_len = len;
        self
    }
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            patient_page_size: DEFAULT_PAGE_SIZE,
            doctor_page_size: None,
            appointment_page_size: None,
            id_strategy: IdStrategy::Sequential,
            seed_demo_when_empty: false,
            search_limit: DEFAULT_SEARCH_LIMIT,
            dashboard_preview_len: DEFAULT_PREVIEW_LEN,
        }
    }
}

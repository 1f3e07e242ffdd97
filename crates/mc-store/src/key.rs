//! Storage keys

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four blobs the application persists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StoreKey {
    /// Patient collection
    Patients,
    /// Doctor collection
    Doctors,
    /// Appointment collection
    Appointments,
    /// Display theme flag
    Theme,
}

impl StoreKey {
    /// Every key, collections first
    pub const ALL: [StoreKey; 4] = [Self::Patients, Self::Doctors, Self::Appointments, Self::Theme];

    /// Key string as written to the backend
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Patients => "mc_patients",
            Self::Doctors => "mc_doctors",
            Self::Appointments => "mc_appointments",
            Self::Theme => "mc_theme",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

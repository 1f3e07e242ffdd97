//! Error types for the record repository
//!
//! Two families:
//! - [`RepoError`] aborts an operation before anything changes
//! - [`PersistError`] is reported after the in-memory change has happened

use mc_model::{AppointmentStatus, RecordId, RecordKind, ValidationError};
use mc_store::{StoreError, StoreKey};

/// Operation rejected; no state changed
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// No record with this id
    #[error("{kind} {id} not found")]
    NotFound {
        /// Collection searched
        kind: RecordKind,
        /// Id looked up
        id: RecordId,
    },

    /// Input failed field validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Status change not allowed from the current status
    #[error("appointment {id} is {from} and cannot become {to}")]
    InvalidTransition {
        /// Appointment id
        id: RecordId,
        /// Current status
        from: AppointmentStatus,
        /// Requested status
        to: AppointmentStatus,
    },

    /// Booking needs at least one record of this kind
    #[error("add at least one {0} before booking an appointment")]
    MissingPrerequisite(RecordKind),
}

impl RepoError {
    /// Create not found error
    #[inline]
    #[must_use]
    pub fn not_found(kind: RecordKind, id: &RecordId) -> Self {
        Self::NotFound {
            kind,
            id: id.clone(),
        }
    }

    /// Check if the caller can fix this by changing the input
    #[inline]
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::MissingPrerequisite(_))
    }
}

/// Write-through failure after a mutation
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// The store refused or failed the write
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A collection could not be encoded
    #[error("cannot encode {key}: {source}")]
    Encode {
        /// Key being written
        key: StoreKey,
        /// Encoder error
        #[source]
        source: serde_json::Error,
    },
}

impl PersistError {
    /// Key the failure concerns, if known
    #[must_use]
    pub fn key(&self) -> Option<StoreKey> {
        match self {
            Self::Store(e) => e.key(),
            Self::Encode { key, .. } => Some(*key),
        }
    }
}

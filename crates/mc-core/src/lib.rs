//! MediCare Core
//!
//! The record repository: sole owner of the patient, doctor and appointment
//! collections.
//!
//! # Overview
//!
//! - **Repository**: CRUD generic over [`Stored`] record kinds, with the
//!   patient-to-appointment delete cascade and one-way appointment status
//!   changes
//! - **Write-through**: every mutation saves all three collections; failures
//!   come back in a [`Committed`] receipt instead of undoing the change
//! - **Views**: list pages, patient detail, dashboard and global search
//!   derived on demand from the current collections
//! - **Config**: [`RepoConfig`] with builder-style setters
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use mc_core::{RepoConfig, Repository};
//! use mc_model::{Gender, Patient, PatientDraft};
//! use mc_store::MemoryStore;
//!
//! let mut repo = Repository::open(MemoryStore::new(), RepoConfig::default());
//! let admitted = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
//! let draft = PatientDraft::new("Meera Joshi", 29, Gender::Female, "+91 99001 33333", "Migraine", admitted);
//!
//! let id = repo.create::<Patient>(draft).unwrap().into_value();
//! assert_eq!(repo.get::<Patient>(&id).unwrap().name, "Meera Joshi");
//! ```

#![warn(missing_docs)]

pub mod collections;
pub mod committed;
pub mod config;
pub mod demo;
pub mod error;
pub mod repository;

// Re-exports
pub use collections::{Collections, Stored};
pub use committed::{Committed, Removal};
pub use config::{RepoConfig, DEFAULT_PREVIEW_LEN};
pub use demo::demo_collections;
pub use error::{PersistError, RepoError};
pub use repository::{PatientDetail, Repository};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for repository users
    pub use crate::{Committed, RepoConfig, RepoError, Repository};
    pub use mc_model::prelude::*;
    pub use mc_store::{DirStore, MemoryStore, PersistentStore, Theme};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! MediCare Record Model
//!
//! Typed records for the three hospital collections, plus the pieces every
//! layer above needs to agree on.
//!
//! # Overview
//!
//! - **Records**: [`Patient`], [`Doctor`], [`Appointment`] with their drafts
//!   (create input) and patches (partial update input)
//! - **Ids**: [`RecordId`] of the form `<prefix>_<token>`, produced by
//!   [`IdGenerator`]
//! - **Validation**: per-field [`ValidationError`]s collected before any
//!   mutation happens
//! - **Status machine**: one-way appointment transitions
//!
//! # Example
//!
//! ```rust
//! use mc_model::{IdGenerator, IdStrategy, RecordKind};
//!
//! let mut ids = IdGenerator::new(IdStrategy::Sequential);
//! let first = ids.next_id(RecordKind::Patient);
//! let second = ids.next_id(RecordKind::Patient);
//!
//! assert_eq!(first.as_str(), "p_1");
//! assert_ne!(first, second);
//! ```

#![warn(missing_docs)]

pub mod appointment;
pub mod doctor;
pub mod id;
pub mod idgen;
pub mod patient;
pub mod record;
pub mod serde_compat;
pub mod validation;

// Re-exports
pub use appointment::{
    allowed_transitions, validate_transition, Appointment, AppointmentDraft, AppointmentPatch,
    AppointmentStatus, IllegalTransition,
};
pub use doctor::{Availability, Doctor, DoctorDraft, DoctorPatch, SPECIALIZATIONS};
pub use id::{RecordId, RecordKind};
pub use idgen::{IdGenerator, IdStrategy};
pub use patient::{Gender, Patient, PatientDraft, PatientPatch};
pub use record::{ParseValueError, Record, Validate};
pub use validation::{FieldChecks, FieldError, ValidationError, AGE_RANGE};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for record handling
    pub use crate::{
        Appointment, AppointmentDraft, AppointmentStatus, Availability, Doctor, DoctorDraft,
        Gender, Patient, PatientDraft, Record, RecordId, RecordKind, Validate,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

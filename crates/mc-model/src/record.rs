//! Common record contract
//!
//! Provides [`Record`], the trait that lets the repository treat the three
//! collections uniformly, and [`Validate`] for create and update inputs.

use crate::id::{RecordId, RecordKind};
use crate::validation::ValidationError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Input that can be checked before it touches a collection
pub trait Validate {
    /// Check every field
    ///
    /// # Errors
    /// Returns all failing fields at once
    fn validate(&self) -> Result<(), ValidationError>;
}

/// A record stored in one of the three collections
pub trait Record: Clone + Debug + Serialize + DeserializeOwned {
    /// Which collection this record lives in
    const KIND: RecordKind;

    /// Create input
    type Draft: Validate + Debug;

    /// Partial update input; unset fields keep their values
    type Patch: Validate + Debug;

    /// Record id
    fn id(&self) -> &RecordId;

    /// Build a fresh record from a validated draft
    fn from_draft(id: RecordId, draft: Self::Draft) -> Self;

    /// Merge a validated patch into this record
    fn apply_patch(&mut self, patch: Self::Patch);

    /// Name shown in lists and search results
    fn display_name(&self) -> &str;
}

/// Text that does not name a known enum value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {what}: {value:?}")]
pub struct ParseValueError {
    /// What was being parsed
    pub what: &'static str,
    /// The rejected input
    pub value: String,
}

impl ParseValueError {
    /// Create new parse error
    #[inline]
    #[must_use]
    pub fn new(what: &'static str, value: impl Into<String>) -> Self {
        Self {
            what,
            value: value.into(),
        }
    }
}

/// Trim and drop empty optional text
#[must_use]
pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

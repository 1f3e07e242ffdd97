//! Mutation receipts

use crate::error::PersistError;
use mc_model::Appointment;

/// Result of a mutation that has been applied in memory
///
/// The change stands even when `persist_failures` is non-empty; the store
/// simply does not reflect it yet.
#[derive(Debug)]
#[must_use = "persist failures are reported through the receipt"]
pub struct Committed<T> {
    /// Operation output
    pub value: T,
    /// Writes that failed while saving the collections
    pub persist_failures: Vec<PersistError>,
}

impl<T> Committed<T> {
    /// Every write succeeded
    #[inline]
    #[must_use]
    pub fn is_durable(&self) -> bool {
        self.persist_failures.is_empty()
    }

    /// Drop the failure list
    #[inline]
    pub fn into_value(self) -> T {
        self.value
    }
}

/// What a delete took out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal<R> {
    /// The deleted record
    pub removed: R,
    /// Appointments deleted along with it
    pub cascaded: Vec<Appointment>,
}

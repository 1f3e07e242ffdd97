//! MediCare View Pipeline
//!
//! Pure derivation of what to display from the record collections.
//!
//! # Overview
//!
//! Every list view is `collection -> filter -> sort -> paginate`:
//! - **Filters**: [`PatientFilter`], [`DoctorFilter`], [`AppointmentFilter`]
//! - **Sort**: [`SortSpec`] over a [`Sortable`] record's columns
//! - **Pages**: [`PageRequest`] in, [`Page`] out
//! - **Query state**: [`ListQuery`] carries the current parameters and resets
//!   to page 1 when they change
//!
//! Appointments only hold ids, so names come from the [`Resolver`], which
//! never fails: dangling references display as [`UNKNOWN`].
//!
//! Nothing here mutates a record. Identical inputs give identical pages.
//!
//! # Example
//!
//! ```rust
//! use mc_view::{PatientQuery, Resolver};
//!
//! let patients = Vec::new();
//! let doctors = Vec::new();
//! let resolver = Resolver::new(&patients, &doctors);
//!
//! let query = PatientQuery::for_patients(10);
//! let page = query.run(&patients, &resolver);
//! assert!(page.items.is_empty());
//! assert!(!page.controls_visible());
//! ```

#![warn(missing_docs)]

pub mod dashboard;
pub mod filter;
pub mod page;
pub mod pipeline;
pub mod query;
pub mod resolve;
pub mod search;
pub mod sort;
pub mod text;

// Re-exports
pub use dashboard::{
    summarize, AppointmentPreview, Badges, DashboardSummary, DoctorPreview, PatientPreview,
};
pub use filter::{AppointmentFilter, DoctorFilter, PatientFilter, PatientStatus, RecordFilter};
pub use page::{paginate, total_pages, EmptyState, Page, PageRequest, DEFAULT_PAGE_SIZE};
pub use pipeline::{derive_view, filter_records};
pub use query::{AppointmentQuery, DoctorQuery, ListQuery, PatientQuery};
pub use resolve::{HistoryEntry, ResolvedAppointment, Resolver, UNKNOWN, UNKNOWN_DOCTOR};
pub use search::{global_search, SearchHit, DEFAULT_SEARCH_LIMIT};
pub use sort::{
    sort_records, AppointmentColumn, DoctorColumn, PatientColumn, SortDirection, SortSpec, Sortable,
};
pub use text::SearchTerm;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

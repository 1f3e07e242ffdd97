//! Global search across all three collections

use crate::resolve::Resolver;
use crate::text::SearchTerm;
use mc_model::{Appointment, Doctor, Patient, RecordId, RecordKind};
use serde::Serialize;

/// Result cap for [`global_search`]
pub const DEFAULT_SEARCH_LIMIT: usize = 8;

/// One search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit<'a> {
    /// Collection the hit came from
    pub kind: RecordKind,
    /// Record id
    pub id: &'a RecordId,
    /// Headline: patient or doctor name
    pub name: &'a str,
    /// Secondary line: disease, specialization or reason
    pub detail: &'a str,
}

/// Search patients, then doctors, then appointments
///
/// The term is trimmed; a blank term finds nothing.
#[must_use]
pub fn global_search<'a>(
    term: &str,
    patients: &'a [Patient],
    doctors: &'a [Doctor],
    appointments: &'a [Appointment],
    resolver: &Resolver<'a>,
    limit: usize,
) -> Vec<SearchHit<'a>> {
    let term = SearchTerm::new(term.trim());
    if term.is_empty() {
        return Vec::new();
    }

    let patient_hits = patients
        .iter()
        .filter(|p| term.found_in_any([p.name.as_str(), p.disease.as_str()]))
        .map(|p| SearchHit {
            kind: RecordKind::Patient,
            id: &p.id,
            name: &p.name,
            detail: &p.disease,
        });

    let doctor_hits = doctors
        .iter()
        .filter(|d| term.found_in_any([d.name.as_str(), d.specialization.as_str()]))
        .map(|d| SearchHit {
            kind: RecordKind::Doctor,
            id: &d.id,
            name: &d.name,
            detail: &d.specialization,
        });

    let appointment_hits = appointments.iter().filter_map(|a| {
        let patient = resolver.patient_name(&a.patient_id).unwrap_or("");
        term.found_in_any([patient, a.reason.as_str()])
            .then_some(SearchHit {
                kind: RecordKind::Appointment,
                id: &a.id,
                name: patient,
                detail: &a.reason,
            })
    });

    patient_hits
        .chain(doctor_hits)
        .chain(appointment_hits)
        .take(limit)
        .collect()
}

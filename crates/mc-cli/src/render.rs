//! Text and JSON output
//!
//! Text output is a plain aligned table; JSON output is the camelCase form of
//! the same view, so scripts see what the text shows.

use mc_core::PatientDetail;
use mc_model::{Appointment, Doctor, Patient, RecordKind};
use mc_view::{DashboardSummary, EmptyState, Page, Resolver, SearchHit};
use serde::Serialize;
use std::io::{self, Write};

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned tables for people
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Pretty JSON followed by a newline
///
/// # Errors
/// Returns the write or encode failure as an I/O error
pub fn json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

/// Column-aligned text table
#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create new table with these headers
    #[must_use]
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    /// Append a row; missing cells print blank
    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }

    /// Write headers, a rule and every row
    ///
    /// # Errors
    /// Returns the underlying write error
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let widths = self.widths();
        writeln!(out, "{}", pad_line(self.headers.iter().copied(), &widths))?;
        let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        writeln!(out, "{}", rule.join("  "))?;
        for row in &self.rows {
            let cells = row.iter().map(String::as_str).chain(std::iter::repeat(""));
            writeln!(out, "{}", pad_line(cells, &widths))?;
        }
        Ok(())
    }
}

fn pad_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect();
    padded.join("  ").trim_end().to_string()
}

/// Message shown in place of an empty table
#[must_use]
pub fn empty_message(state: EmptyState, kind: RecordKind) -> String {
    match state {
        EmptyState::NoRecords => format!("No {kind}s yet."),
        EmptyState::NoMatches => format!("No {kind}s match the current filters."),
    }
}

fn footer<W: Write, T>(out: &mut W, page: &Page<T>) -> io::Result<()> {
    if page.controls_visible() {
        let last = (page.first_row() + page.items.len()).saturating_sub(1);
        writeln!(
            out,
            "Showing {}-{last} of {} (page {}/{})",
            page.first_row(),
            page.total_matches,
            page.page,
            page.total_pages
        )?;
    }
    Ok(())
}

fn empty<W: Write, T>(out: &mut W, page: &Page<T>, kind: RecordKind) -> io::Result<bool> {
    match page.empty {
        Some(state) => {
            writeln!(out, "{}", empty_message(state, kind))?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Patients page as a table
///
/// # Errors
/// Returns the underlying write error
pub fn patients<W: Write>(out: &mut W, page: &Page<&Patient>) -> io::Result<()> {
    if empty(out, page, RecordKind::Patient)? {
        return Ok(());
    }
    let mut table = Table::new(&["ID", "NAME", "AGE", "GENDER", "PHONE", "DISEASE", "ADMITTED", "BLOOD"]);
    for p in &page.items {
        table.row(vec![
            p.id.to_string(),
            p.name.clone(),
            p.age.to_string(),
            p.gender.to_string(),
            p.phone.clone(),
            p.disease.clone(),
            p.admission_date.to_string(),
            p.blood_group.clone().unwrap_or_default(),
        ]);
    }
    table.write_to(out)?;
    footer(out, page)
}

/// Doctors page as a table
///
/// # Errors
/// Returns the underlying write error
pub fn doctors<W: Write>(out: &mut W, page: &Page<&Doctor>) -> io::Result<()> {
    if empty(out, page, RecordKind::Doctor)? {
        return Ok(());
    }
    let mut table = Table::new(&["ID", "NAME", "SPECIALIZATION", "AVAILABILITY", "EXPERIENCE", "PHONE"]);
    for d in &page.items {
        table.row(vec![
            d.id.to_string(),
            d.name.clone(),
            d.specialization.clone(),
            d.availability.to_string(),
            d.experience.map(|y| format!("{y} yrs")).unwrap_or_default(),
            d.phone.clone().unwrap_or_default(),
        ]);
    }
    table.write_to(out)?;
    footer(out, page)
}

/// Booking choices, one doctor per line
///
/// # Errors
/// Returns the underlying write error
pub fn doctor_picker<W: Write>(out: &mut W, doctors: &[Doctor]) -> io::Result<()> {
    if doctors.is_empty() {
        return writeln!(out, "No doctors yet.");
    }
    let mut table = Table::new(&["ID", "DOCTOR"]);
    for d in doctors {
        table.row(vec![d.id.to_string(), d.option_label()]);
    }
    table.write_to(out)
}

/// Appointments page as a table, names resolved
///
/// # Errors
/// Returns the underlying write error
pub fn appointments<W: Write>(
    out: &mut W,
    page: &Page<&Appointment>,
    resolver: &Resolver<'_>,
) -> io::Result<()> {
    if empty(out, page, RecordKind::Appointment)? {
        return Ok(());
    }
    let mut table = Table::new(&["ID", "PATIENT", "DOCTOR", "DATE", "TIME", "REASON", "STATUS"]);
    for a in &page.items {
        let resolved = resolver.resolve(a);
        table.row(vec![
            a.id.to_string(),
            resolved.patient_name.to_string(),
            resolved.doctor_name.to_string(),
            a.date.to_string(),
            a.time.format("%H:%M").to_string(),
            a.reason.clone(),
            a.status.to_string(),
        ]);
    }
    table.write_to(out)?;
    footer(out, page)
}

/// One patient with its history
///
/// # Errors
/// Returns the underlying write error
pub fn patient_detail<W: Write>(out: &mut W, detail: &PatientDetail<'_>) -> io::Result<()> {
    let p = detail.patient;
    writeln!(out, "{} ({})", p.name, p.id)?;
    writeln!(out, "  Age:        {}", p.age)?;
    writeln!(out, "  Gender:     {}", p.gender)?;
    writeln!(out, "  Phone:      {}", p.phone)?;
    writeln!(out, "  Disease:    {}", p.disease)?;
    writeln!(out, "  Admitted:   {}", p.admission_date)?;
    if let Some(group) = &p.blood_group {
        writeln!(out, "  Blood:      {group}")?;
    }
    if let Some(notes) = &p.notes {
        writeln!(out, "  Notes:      {notes}")?;
    }
    writeln!(out)?;

    if detail.history.is_empty() {
        return writeln!(out, "No appointments.");
    }
    let mut table = Table::new(&["ID", "DATE", "TIME", "DOCTOR", "REASON", "STATUS"]);
    for entry in &detail.history {
        table.row(vec![
            entry.id.to_string(),
            entry.date.to_string(),
            entry.time.format("%H:%M").to_string(),
            entry.doctor_name.to_string(),
            entry.reason.to_string(),
            entry.status.to_string(),
        ]);
    }
    table.write_to(out)
}

/// Dashboard counts and previews
///
/// # Errors
/// Returns the underlying write error
pub fn dashboard<W: Write>(out: &mut W, summary: &DashboardSummary<'_>) -> io::Result<()> {
    writeln!(out, "Dashboard for {}", summary.today)?;
    writeln!(out, "  Total patients:      {}", summary.total_patients)?;
    writeln!(out, "  Doctors available:   {}", summary.doctors_available)?;
    writeln!(out, "  Appointments today:  {}", summary.appointments_today)?;
    writeln!(
        out,
        "  Badges:              patients {} / doctors {} / scheduled {}",
        summary.badges.patients, summary.badges.doctors, summary.badges.scheduled
    )?;

    writeln!(out, "\nRecent patients")?;
    if summary.recent_patients.is_empty() {
        writeln!(out, "{}", empty_message(EmptyState::NoRecords, RecordKind::Patient))?;
    } else {
        let mut table = Table::new(&["ID", "NAME", "DISEASE", "AGE"]);
        for p in &summary.recent_patients {
            table.row(vec![p.id.to_string(), p.name.to_string(), p.disease.to_string(), p.age.to_string()]);
        }
        table.write_to(out)?;
    }

    writeln!(out, "\nUpcoming appointments")?;
    if summary.scheduled.is_empty() {
        writeln!(out, "Nothing scheduled.")?;
    } else {
        let mut table = Table::new(&["ID", "PATIENT", "DOCTOR", "DATE", "TIME"]);
        for a in &summary.scheduled {
            table.row(vec![
                a.id.to_string(),
                a.patient_name.to_string(),
                a.doctor_name.to_string(),
                a.date.to_string(),
                a.time.format("%H:%M").to_string(),
            ]);
        }
        table.write_to(out)?;
    }

    writeln!(out, "\nDoctors")?;
    if summary.doctors.is_empty() {
        writeln!(out, "{}", empty_message(EmptyState::NoRecords, RecordKind::Doctor))?;
    } else {
        let mut table = Table::new(&["ID", "NAME", "SPECIALIZATION", "AVAILABILITY"]);
        for d in &summary.doctors {
            table.row(vec![
                d.id.to_string(),
                d.name.to_string(),
                d.specialization.to_string(),
                d.availability.to_string(),
            ]);
        }
        table.write_to(out)?;
    }
    Ok(())
}

/// Global search results
///
/// # Errors
/// Returns the underlying write error
pub fn search_hits<W: Write>(out: &mut W, term: &str, hits: &[SearchHit<'_>]) -> io::Result<()> {
    if hits.is_empty() {
        return writeln!(out, "No results for {:?}.", term.trim());
    }
    let mut table = Table::new(&["KIND", "ID", "NAME", "DETAIL"]);
    for hit in hits {
        table.row(vec![
            hit.kind.to_string(),
            hit.id.to_string(),
            hit.name.to_string(),
            hit.detail.to_string(),
        ]);
    }
    table.write_to(out)
}

//! Command execution
//!
//! [`Shell`] owns one [`Repository`] and turns parsed arguments into
//! repository calls. Persist failures do not fail a command; they are kept as
//! warnings for the caller to print after the result.

use crate::render::{self, OutputFormat};
use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::ArgMatches;
use mc_core::{Committed, RepoError, Repository, Stored};
use mc_model::{
    Appointment, AppointmentDraft, AppointmentPatch, AppointmentStatus, Availability, Doctor,
    DoctorDraft, DoctorPatch, Gender, Patient, PatientDraft, PatientPatch, RecordId, RecordKind,
};
use mc_store::PersistentStore;
use mc_view::{
    AppointmentColumn, AppointmentQuery, DoctorColumn, DoctorQuery, ListQuery, PatientColumn,
    PatientQuery, PatientStatus, SearchTerm, SortSpec,
};
use serde::Serialize;
use serde_json::json;
use std::io::{self, Write};
use tracing::debug;

/// Executes parsed commands against a repository
pub struct Shell<S, W> {
    repo: Repository<S>,
    out: W,
    format: OutputFormat,
    today: NaiveDate,
    warnings: Vec<String>,
}

impl<S: PersistentStore, W: Write> Shell<S, W> {
    /// Create new shell writing results to `out`
    ///
    /// `today` fills in omitted admission and visit dates.
    pub fn new(repo: Repository<S>, out: W, format: OutputFormat, today: NaiveDate) -> Self {
        Self {
            repo,
            out,
            format,
            today,
            warnings: Vec::new(),
        }
    }

    /// Persist failures collected so far
    #[inline]
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Underlying repository
    #[inline]
    #[must_use]
    pub fn repository(&self) -> &Repository<S> {
        &self.repo
    }

    /// Output sink
    #[inline]
    #[must_use]
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Run one top-level command
    ///
    /// # Errors
    /// Repository rejections, missing confirmation and output failures
    pub fn run(&mut self, matches: &ArgMatches) -> Result<()> {
        let Some((name, m)) = matches.subcommand() else {
            bail!("no command given");
        };
        debug!(command = name, "Running command");
        match name {
            "patients" => self.patients(m),
            "doctors" => self.doctors(m),
            "appointments" => self.appointments(m),
            "search" => self.search(m),
            "dashboard" => self.dashboard(m),
            "theme" => self.theme(m),
            "seed" => self.seed(m),
            other => bail!("unknown command {other:?}"),
        }
    }

    fn patients(&mut self, matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("list", m)) => self.list_patients(m),
            Some(("show", m)) => self.show_patient(m),
            Some(("add", m)) => {
                let draft = patient_draft(m, self.today)?;
                self.create::<Patient>(draft)
            }
            Some(("update", m)) => {
                let patch = patient_patch(m);
                if patch.is_empty() {
                    bail!("nothing to update; pass at least one field");
                }
                self.update::<Patient>(&record_id(m)?, patch)
            }
            Some(("delete", m)) => self.delete::<Patient>(m),
            _ => bail!("unknown patients command"),
        }
    }

    fn doctors(&mut self, matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("list", m)) => self.list_doctors(m),
            Some(("picker", _)) => self.doctor_picker(),
            Some(("add", m)) => {
                let draft = doctor_draft(m)?;
                self.create::<Doctor>(draft)
            }
            Some(("update", m)) => {
                let patch = doctor_patch(m);
                if patch == DoctorPatch::default() {
                    bail!("nothing to update; pass at least one field");
                }
                self.update::<Doctor>(&record_id(m)?, patch)
            }
            Some(("delete", m)) => self.delete::<Doctor>(m),
            _ => bail!("unknown doctors command"),
        }
    }

    fn doctor_picker(&mut self) -> Result<()> {
        let doctors = self.repo.list::<Doctor>();
        let choices: Vec<_> = doctors
            .iter()
            .map(|d| json!({ "id": d.id, "label": d.option_label() }))
            .collect();
        emit(&mut self.out, self.format, &choices, |out| render::doctor_picker(out, doctors))?;
        Ok(())
    }

    fn appointments(&mut self, matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("list", m)) => self.list_appointments(m),
            Some(("book", m)) => {
                let draft = appointment_draft(m, self.today)?;
                self.create::<Appointment>(draft)
            }
            Some(("update", m)) => {
                let patch = appointment_patch(m);
                if patch == AppointmentPatch::default() {
                    bail!("nothing to update; pass at least one field");
                }
                self.update::<Appointment>(&record_id(m)?, patch)
            }
            Some(("complete", m)) => self.transition(m, AppointmentStatus::Completed),
            Some(("cancel", m)) => self.transition(m, AppointmentStatus::Cancelled),
            Some(("delete", m)) => self.delete::<Appointment>(m),
            _ => bail!("unknown appointments command"),
        }
    }

    fn list_patients(&mut self, m: &ArgMatches) -> Result<()> {
        let mut query = match m.get_one::<usize>("page-size") {
            Some(&size) => PatientQuery::for_patients(size),
            None => self.repo.patient_query(),
        };
        query.update_filter(|f| {
            if let Some(term) = m.get_one::<String>("search") {
                f.search = SearchTerm::new(term.as_str());
            }
            f.gender = m.get_one::<Gender>("gender").copied();
            f.status = m.get_one::<PatientStatus>("status").copied();
        });
        if let Some(&column) = m.get_one::<PatientColumn>("sort") {
            query.set_sort(Some(sort_spec(column, m.get_flag("desc"))));
        }

        let total = self.repo.patients_view(&query).total_pages;
        select_page(&mut query, m, total)?;
        let page = self.repo.patients_view(&query);
        emit(&mut self.out, self.format, &page, |out| render::patients(out, &page))?;
        Ok(())
    }

    fn list_doctors(&mut self, m: &ArgMatches) -> Result<()> {
        let mut query = match m.get_one::<usize>("page-size") {
            Some(&size) => DoctorQuery::for_doctors(Some(size)),
            None => self.repo.doctor_query(),
        };
        query.update_filter(|f| {
            if let Some(term) = m.get_one::<String>("search") {
                f.search = SearchTerm::new(term.as_str());
            }
            f.availability = m.get_one::<Availability>("availability").copied();
            f.specialization = m.get_one::<String>("specialization").cloned();
        });
        if let Some(&column) = m.get_one::<DoctorColumn>("sort") {
            query.set_sort(Some(sort_spec(column, m.get_flag("desc"))));
        }

        let total = self.repo.doctors_view(&query).total_pages;
        select_page(&mut query, m, total)?;
        let page = self.repo.doctors_view(&query);
        emit(&mut self.out, self.format, &page, |out| render::doctors(out, &page))?;
        Ok(())
    }

    fn list_appointments(&mut self, m: &ArgMatches) -> Result<()> {
        let mut query = match m.get_one::<usize>("page-size") {
            Some(&size) => AppointmentQuery::for_appointments(Some(size)),
            None => self.repo.appointment_query(),
        };
        query.update_filter(|f| {
            if let Some(term) = m.get_one::<String>("search") {
                f.search = SearchTerm::new(term.as_str());
            }
            f.status = m.get_one::<AppointmentStatus>("status").copied();
        });
        if let Some(&column) = m.get_one::<AppointmentColumn>("sort") {
            query.set_sort(Some(sort_spec(column, m.get_flag("desc"))));
        }

        let total = self.repo.appointments_view(&query).total_pages;
        select_page(&mut query, m, total)?;
        let page = self.repo.appointments_view(&query);
        let resolver = self.repo.resolver();
        match self.format {
            OutputFormat::Json => {
                let resolved = page.map(|a| resolver.resolve(a));
                render::json(&mut self.out, &resolved)?;
            }
            OutputFormat::Text => render::appointments(&mut self.out, &page, &resolver)?,
        }
        Ok(())
    }

    fn show_patient(&mut self, m: &ArgMatches) -> Result<()> {
        let id = record_id(m)?;
        let detail = self
            .repo
            .patient_detail(&id)
            .ok_or_else(|| RepoError::not_found(RecordKind::Patient, &id))?;
        emit(&mut self.out, self.format, &detail, |out| render::patient_detail(out, &detail))?;
        Ok(())
    }

    fn search(&mut self, m: &ArgMatches) -> Result<()> {
        let term = required::<String>(m, "term")?;
        let hits = self.repo.search(term);
        emit(&mut self.out, self.format, &hits, |out| render::search_hits(out, term, &hits))?;
        Ok(())
    }

    fn dashboard(&mut self, m: &ArgMatches) -> Result<()> {
        let today = m.get_one::<NaiveDate>("today").copied().unwrap_or(self.today);
        let summary = self.repo.dashboard(today);
        emit(&mut self.out, self.format, &summary, |out| render::dashboard(out, &summary))?;
        Ok(())
    }

    fn theme(&mut self, m: &ArgMatches) -> Result<()> {
        let theme = if m.get_flag("toggle") {
            let receipt = self.repo.toggle_theme();
            self.settle(receipt)
        } else {
            self.repo.theme()
        };
        emit(&mut self.out, self.format, &json!({ "theme": theme }), |out| {
            writeln!(out, "Theme: {theme}")
        })?;
        Ok(())
    }

    fn seed(&mut self, m: &ArgMatches) -> Result<()> {
        if !self.repo.collections().is_unpopulated() {
            confirm(m, "replacing existing records with demo data")?;
        }
        let receipt = self.repo.seed_demo(self.today);
        self.settle(receipt);

        let data = self.repo.collections();
        let counts = json!({
            "patients": data.patients().len(),
            "doctors": data.doctors().len(),
            "appointments": data.appointments().len(),
        });
        emit(&mut self.out, self.format, &counts, |out| {
            writeln!(
                out,
                "Loaded demo data: {} patients, {} doctors, {} appointments",
                data.patients().len(),
                data.doctors().len(),
                data.appointments().len()
            )
        })?;
        Ok(())
    }

    fn create<R: Stored>(&mut self, draft: R::Draft) -> Result<()> {
        let receipt = self.repo.create::<R>(draft)?;
        let id = self.settle(receipt);
        let record = self
            .repo
            .get::<R>(&id)
            .with_context(|| format!("{} {id} vanished after create", R::KIND))?;
        emit(&mut self.out, self.format, record, |out| {
            writeln!(out, "Added {} {id}", R::KIND)
        })?;
        Ok(())
    }

    fn update<R: Stored>(&mut self, id: &RecordId, patch: R::Patch) -> Result<()> {
        let receipt = self.repo.update::<R>(id, patch)?;
        let record = self.settle(receipt);
        emit(&mut self.out, self.format, &record, |out| {
            writeln!(out, "Updated {} {id}", R::KIND)
        })?;
        Ok(())
    }

    fn delete<R: Stored>(&mut self, m: &ArgMatches) -> Result<()> {
        let id = record_id(m)?;
        confirm(m, &format!("deleting {} {id}", R::KIND))?;
        let receipt = self.repo.delete::<R>(&id)?;
        let removal = self.settle(receipt);

        let cascaded: Vec<&RecordId> = removal.cascaded.iter().map(|a| &a.id).collect();
        let report = json!({ "removed": &removal.removed, "cascaded": &cascaded });
        emit(&mut self.out, self.format, &report, |out| match cascaded.len() {
            0 => writeln!(out, "Deleted {} {id}", R::KIND),
            n => writeln!(out, "Deleted {} {id} and {n} appointment(s)", R::KIND),
        })?;
        Ok(())
    }

    fn transition(&mut self, m: &ArgMatches, to: AppointmentStatus) -> Result<()> {
        let id = record_id(m)?;
        let verb = match to {
            AppointmentStatus::Cancelled => "cancelling",
            _ => "completing",
        };
        confirm(m, &format!("{verb} appointment {id}"))?;
        let receipt = match to {
            AppointmentStatus::Cancelled => self.repo.cancel_appointment(&id)?,
            _ => self.repo.complete_appointment(&id)?,
        };
        let appointment = self.settle(receipt);
        emit(&mut self.out, self.format, &appointment, |out| {
            writeln!(out, "Appointment {id} is now {}", appointment.status)
        })?;
        Ok(())
    }

    fn settle<T>(&mut self, receipt: Committed<T>) -> T {
        for failure in &receipt.persist_failures {
            self.warnings.push(format!("change kept in memory but not saved: {failure}"));
        }
        receipt.value
    }
}

fn emit<W: Write, T: Serialize + ?Sized>(
    out: &mut W,
    format: OutputFormat,
    value: &T,
    text: impl FnOnce(&mut W) -> io::Result<()>,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => render::json(out, value),
        OutputFormat::Text => text(out),
    }
}

fn sort_spec<C: Copy + PartialEq>(column: C, descending: bool) -> SortSpec<C> {
    if descending {
        SortSpec::descending(column)
    } else {
        SortSpec::ascending(column)
    }
}

fn select_page<F, C: Copy + PartialEq>(
    query: &mut ListQuery<F, C>,
    m: &ArgMatches,
    total_pages: usize,
) -> Result<()> {
    let wanted = m.get_one::<usize>("page").copied().unwrap_or(1);
    if !query.go_to(wanted, total_pages) {
        bail!("page {wanted} does not exist; there are {total_pages} page(s)");
    }
    Ok(())
}

fn confirm(m: &ArgMatches, action: &str) -> Result<()> {
    if m.get_flag("yes") {
        Ok(())
    } else {
        bail!("{action} needs --yes to confirm")
    }
}

fn required<'m, T: Clone + Send + Sync + 'static>(m: &'m ArgMatches, id: &str) -> Result<&'m T> {
    m.get_one::<T>(id).with_context(|| format!("missing --{id}"))
}

fn text(m: &ArgMatches, id: &str) -> Option<String> {
    m.get_one::<String>(id).cloned()
}

fn record_id(m: &ArgMatches) -> Result<RecordId> {
    required::<String>(m, "id").map(|raw| RecordId::from_raw(raw.trim()))
}

fn patient_draft(m: &ArgMatches, today: NaiveDate) -> Result<PatientDraft> {
    let admitted = m.get_one::<NaiveDate>("admitted").copied().unwrap_or(today);
    let mut draft = PatientDraft::new(
        required::<String>(m, "name")?.as_str(),
        *required::<u32>(m, "age")?,
        *required::<Gender>(m, "gender")?,
        required::<String>(m, "phone")?.as_str(),
        required::<String>(m, "disease")?.as_str(),
        admitted,
    );
    draft.blood_group = text(m, "blood-group");
    draft.notes = text(m, "notes");
    Ok(draft)
}

fn patient_patch(m: &ArgMatches) -> PatientPatch {
    PatientPatch {
        name: text(m, "name"),
        age: m.get_one::<u32>("age").copied(),
        gender: m.get_one::<Gender>("gender").copied(),
        phone: text(m, "phone"),
        disease: text(m, "disease"),
        admission_date: m.get_one::<NaiveDate>("admitted").copied(),
        blood_group: text(m, "blood-group"),
        notes: text(m, "notes"),
    }
}

fn doctor_draft(m: &ArgMatches) -> Result<DoctorDraft> {
    let availability = m
        .get_one::<Availability>("availability")
        .copied()
        .unwrap_or(Availability::Available);
    let mut draft = DoctorDraft::new(
        required::<String>(m, "name")?.as_str(),
        required::<String>(m, "specialization")?.as_str(),
        availability,
    );
    draft.experience = m.get_one::<u32>("experience").copied();
    draft.phone = text(m, "phone");
    Ok(draft)
}

fn doctor_patch(m: &ArgMatches) -> DoctorPatch {
    DoctorPatch {
        name: text(m, "name"),
        specialization: text(m, "specialization"),
        availability: m.get_one::<Availability>("availability").copied(),
        experience: m.get_one::<u32>("experience").copied(),
        phone: text(m, "phone"),
    }
}

fn appointment_draft(m: &ArgMatches, today: NaiveDate) -> Result<AppointmentDraft> {
    Ok(AppointmentDraft::new(
        RecordId::from_raw(required::<String>(m, "patient")?.trim()),
        RecordId::from_raw(required::<String>(m, "doctor")?.trim()),
        m.get_one::<NaiveDate>("date").copied().unwrap_or(today),
        *required::<NaiveTime>(m, "time")?,
        required::<String>(m, "reason")?.as_str(),
    ))
}

fn appointment_patch(m: &ArgMatches) -> AppointmentPatch {
    AppointmentPatch {
        patient_id: m.get_one::<String>("patient").map(|raw| RecordId::from_raw(raw.trim())),
        doctor_id: m.get_one::<String>("doctor").map(|raw| RecordId::from_raw(raw.trim())),
        date: m.get_one::<NaiveDate>("date").copied(),
        time: m.get_one::<NaiveTime>("time").copied(),
        reason: text(m, "reason"),
    }
}

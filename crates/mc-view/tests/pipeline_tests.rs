use chrono::{NaiveDate, NaiveTime};
use mc_model::{
    Appointment, AppointmentStatus, Availability, Doctor, Gender, Patient, RecordId, RecordKind,
};
use mc_view::{
    derive_view, global_search, summarize, AppointmentFilter, AppointmentQuery, EmptyState,
    PageRequest, PatientColumn, PatientFilter, PatientQuery, Resolver, SortSpec, UNKNOWN,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn patient(n: u64, name: &str, age: u32, gender: Gender) -> Patient {
    Patient {
        id: RecordId::new(RecordKind::Patient, n),
        name: name.to_owned(),
        age,
        gender,
        phone: format!("+91 90000 {n:05}"),
        disease: "Seasonal flu".to_owned(),
        admission_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        blood_group: None,
        notes: None,
    }
}

fn doctor(n: u64, name: &str, availability: Availability) -> Doctor {
    Doctor {
        id: RecordId::new(RecordKind::Doctor, n),
        name: name.to_owned(),
        specialization: "Cardiology".to_owned(),
        availability,
        experience: Some(5),
        phone: None,
    }
}

fn appointment(n: u64, patient: u64, doctor: u64, date: NaiveDate, reason: &str) -> Appointment {
    Appointment {
        id: RecordId::new(RecordKind::Appointment, n),
        patient_id: RecordId::new(RecordKind::Patient, patient),
        doctor_id: RecordId::new(RecordKind::Doctor, doctor),
        date,
        time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        reason: reason.to_owned(),
        status: AppointmentStatus::Scheduled,
    }
}

fn numbered_patients(count: u64) -> Vec<Patient> {
    (1..=count)
        .map(|n| patient(n, &format!("Patient {n:03}"), 30, Gender::Other))
        .collect()
}

fn ids(rows: &[&Patient]) -> Vec<String> {
    rows.iter().map(|p| p.id.to_string()).collect()
}

#[test]
fn test_twenty_five_patients_make_three_pages() {
    let patients = numbered_patients(25);
    let resolver = Resolver::new(&patients, &[]);
    let mut query = PatientQuery::for_patients(10);

    let first = query.run(&patients, &resolver);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.items[0].name, "Patient 001");
    assert!(first.controls_visible());

    assert!(query.next_page(first.total_pages));
    assert!(query.next_page(first.total_pages));
    let last = query.run(&patients, &resolver);
    assert_eq!(last.items.len(), 5);
    assert_eq!(last.items[0].name, "Patient 021");
    assert!(!last.has_next());
    assert!(!query.next_page(last.total_pages));
    assert_eq!(query.page(), 3);
}

#[test]
fn test_no_patients_vs_no_matches() {
    let empty: Vec<Patient> = Vec::new();
    let resolver = Resolver::new(&empty, &[]);
    let page = PatientQuery::for_patients(10).run(&empty, &resolver);
    assert_eq!(page.empty, Some(EmptyState::NoRecords));

    let patients = numbered_patients(3);
    let resolver = Resolver::new(&patients, &[]);
    let mut query = PatientQuery::for_patients(10);
    query.update_filter(|f| f.gender = Some(Gender::Female));
    let page = query.run(&patients, &resolver);
    assert_eq!(page.empty, Some(EmptyState::NoMatches));
    assert_eq!(page.total_pages, 1);
}

#[test]
fn test_deleted_doctor_renders_unknown() {
    let patients = vec![patient(1, "Asha", 40, Gender::Female)];
    let doctors: Vec<Doctor> = Vec::new();
    let day = NaiveDate::from_ymd_opt(2026, 2, 20).unwrap();
    let appointments = vec![appointment(1, 1, 1, day, "Checkup")];
    let resolver = Resolver::new(&patients, &doctors);

    let page = AppointmentQuery::for_appointments(None).run(&appointments, &resolver);
    let row = resolver.resolve(page.items[0]);
    assert_eq!(row.doctor_name, UNKNOWN);
    assert_eq!(row.patient_name, "Asha");

    let mut query = AppointmentQuery::for_appointments(None);
    query.set_filter(AppointmentFilter::default().with_search("asha"));
    assert_eq!(query.run(&appointments, &resolver).total_matches, 1);
}

#[test]
fn test_dashboard_counts_and_previews() {
    let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
    let tomorrow = today.succ_opt().unwrap();
    let patients = numbered_patients(6);
    let doctors = vec![
        doctor(1, "Dr. A", Availability::Available),
        doctor(2, "Dr. B", Availability::Busy),
        doctor(3, "Dr. C", Availability::Available),
    ];
    let mut appointments = vec![
        appointment(1, 1, 1, today, "One"),
        appointment(2, 2, 2, today, "Two"),
        appointment(3, 3, 9, tomorrow, "Three"),
    ];
    appointments[1].status = AppointmentStatus::Cancelled;
    let resolver = Resolver::new(&patients, &doctors);

    let summary = summarize(&patients, &doctors, &appointments, &resolver, today, 4);
    assert_eq!(summary.total_patients, 6);
    assert_eq!(summary.doctors_available, 2);
    assert_eq!(summary.appointments_today, 1);
    assert_eq!(summary.badges.scheduled, 2);

    let recent: Vec<_> = summary.recent_patients.iter().map(|p| p.name).collect();
    assert_eq!(recent, ["Patient 006", "Patient 005", "Patient 004", "Patient 003"]);

    let upcoming: Vec<_> = summary.scheduled.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(upcoming, ["a_3", "a_1"]);
    assert_eq!(summary.scheduled[0].doctor_name, UNKNOWN);
    assert_eq!(summary.doctors.len(), 3);
}

#[test]
fn test_global_search_order_and_cap() {
    let patients = vec![
        patient(1, "Kiran Rao", 30, Gender::Male),
        patient(2, "Meera Kiran", 31, Gender::Female),
    ];
    let doctors = vec![doctor(1, "Dr. Kiranmayi", Availability::Busy)];
    let day = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
    let appointments = vec![
        appointment(1, 1, 1, day, "Review"),
        appointment(2, 7, 1, day, "Kiran follow-up"),
    ];
    let resolver = Resolver::new(&patients, &doctors);

    let hits = global_search("  KIRAN ", &patients, &doctors, &appointments, &resolver, 8);
    let kinds: Vec<_> = hits.iter().map(|h| h.kind).collect();
    assert_eq!(
        kinds,
        [
            RecordKind::Patient,
            RecordKind::Patient,
            RecordKind::Doctor,
            RecordKind::Appointment,
            RecordKind::Appointment,
        ]
    );
    // dangling patient reference contributes an empty name
    assert_eq!(hits[4].name, "");

    let capped = global_search("kiran", &patients, &doctors, &appointments, &resolver, 3);
    assert_eq!(capped.len(), 3);
    assert!(global_search("   ", &patients, &doctors, &appointments, &resolver, 8).is_empty());
}

fn arb_patients() -> impl Strategy<Value = Vec<Patient>> {
    prop::collection::vec(
        (
            "[a-zA-Z ]{0,8}",
            1u32..=120,
            prop_oneof![Just(Gender::Male), Just(Gender::Female), Just(Gender::Other)],
        ),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, age, gender))| patient(i as u64 + 1, &name, age, gender))
            .collect()
    })
}

fn arb_column() -> impl Strategy<Value = PatientColumn> {
    prop::sample::select(PatientColumn::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_view_is_deterministic(
        patients in arb_patients(),
        column in arb_column(),
        term in "[a-z]{0,2}",
        page in 1usize..6,
        size in 1usize..12,
    ) {
        let resolver = Resolver::new(&patients, &[]);
        let filter = PatientFilter::default().with_search(term.as_str());
        let sort = Some(SortSpec::ascending(column));
        let req = PageRequest::new(page, size);

        let a = derive_view(&patients, &filter, sort, req, &resolver);
        let b = derive_view(&patients, &filter, sort, req, &resolver);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_descending_reverses_key_order(patients in arb_patients(), column in arb_column()) {
        let resolver = Resolver::new(&patients, &[]);
        let filter = PatientFilter::default();
        let all = PageRequest::unbounded();

        let asc = derive_view(&patients, &filter, Some(SortSpec::ascending(column)), all, &resolver);
        let desc = derive_view(&patients, &filter, Some(SortSpec::descending(column)), all, &resolver);

        let key = |p: &Patient| mc_view::Sortable::sort_key(p, column);
        let asc_keys: Vec<_> = asc.items.iter().map(|p| key(*p)).collect();
        let mut desc_keys: Vec<_> = desc.items.iter().map(|p| key(*p)).collect();
        desc_keys.reverse();
        prop_assert_eq!(asc_keys, desc_keys);
    }

    #[test]
    fn prop_pages_partition_matches(patients in arb_patients(), size in 1usize..12) {
        let resolver = Resolver::new(&patients, &[]);
        let filter = PatientFilter::default();
        let sort = Some(SortSpec::ascending(PatientColumn::Name));

        let whole = derive_view(&patients, &filter, sort, PageRequest::unbounded(), &resolver);
        let mut stitched = Vec::new();
        for page in 1..=mc_view::total_pages(patients.len(), size) {
            let view = derive_view(&patients, &filter, sort, PageRequest::new(page, size), &resolver);
            prop_assert!(view.items.len() <= size);
            stitched.extend(view.items);
        }
        prop_assert_eq!(ids(&stitched), ids(&whole.items));
    }

    #[test]
    fn prop_zero_matches_is_empty_on_every_page(patients in arb_patients(), page in 1usize..50) {
        let resolver = Resolver::new(&patients, &[]);
        let filter = PatientFilter::default().with_search("#no-such-name#");
        let view = derive_view(&patients, &filter, None, PageRequest::new(page, 10), &resolver);
        prop_assert!(view.items.is_empty());
        prop_assert_eq!(view.total_pages, 1);
        prop_assert!(view.empty.is_some());
    }
}

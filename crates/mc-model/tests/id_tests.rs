use mc_model::{IdGenerator, IdStrategy, RecordId, RecordKind};
use proptest::prelude::*;
use std::collections::HashSet;

#[test]
fn test_thousand_sequential_ids_are_distinct() {
    let mut ids = IdGenerator::new(IdStrategy::Sequential);
    let seen: HashSet<RecordId> = (0..1000).map(|_| ids.next_id(RecordKind::Appointment)).collect();
    assert_eq!(seen.len(), 1000);
}

#[test]
fn test_thousand_ulid_ids_are_distinct() {
    let mut ids = IdGenerator::new(IdStrategy::Ulid);
    let seen: HashSet<RecordId> = (0..1000).map(|_| ids.next_id(RecordKind::Patient)).collect();
    assert_eq!(seen.len(), 1000);
}

#[test]
fn test_kinds_do_not_share_counters() {
    let mut ids = IdGenerator::new(IdStrategy::Sequential);
    ids.observe(RecordKind::Doctor, &RecordId::from("d_99"));
    assert_eq!(ids.next_id(RecordKind::Patient).as_str(), "p_1");
    assert_eq!(ids.next_id(RecordKind::Doctor).as_str(), "d_100");
}

proptest! {
    #[test]
    fn prop_generated_ids_never_collide_with_observed(
        existing in proptest::collection::hash_set(0u64..5_000, 0..60),
        burst in 1usize..200,
    ) {
        let existing: HashSet<RecordId> = existing
            .into_iter()
            .map(|n| RecordId::new(RecordKind::Patient, n))
            .collect();

        let mut ids = IdGenerator::new(IdStrategy::Sequential);
        ids.observe_all(RecordKind::Patient, &existing);

        let mut fresh = HashSet::new();
        for _ in 0..burst {
            let id = ids.next_id(RecordKind::Patient);
            prop_assert!(!existing.contains(&id));
            prop_assert!(fresh.insert(id));
        }
    }
}

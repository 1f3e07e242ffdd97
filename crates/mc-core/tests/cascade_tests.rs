use mc_model::{Appointment, Doctor, Patient};
use mc_test_utils::{memory_repo, populate};
use proptest::prelude::*;
use std::collections::HashSet;

proptest! {
    #[test]
    fn prop_no_appointment_outlives_its_patient(
        patients in 1usize..12,
        doctors in 1usize..4,
        deletions in prop::collection::vec(any::<prop::sample::Index>(), 0..8),
    ) {
        let mut repo = memory_repo();
        let seeded = populate(&mut repo, patients, doctors);

        for pick in deletions {
            let id = seeded.patients[pick.index(seeded.patients.len())].clone();
            let before = repo.list::<Appointment>().len();
            match repo.delete::<Patient>(&id) {
                Ok(receipt) => {
                    let removal = receipt.into_value();
                    prop_assert_eq!(before - removal.cascaded.len(), repo.list::<Appointment>().len());
                }
                // already deleted by an earlier pick
                Err(_) => prop_assert_eq!(before, repo.list::<Appointment>().len()),
            }
        }

        let live: HashSet<_> = repo.list::<Patient>().iter().map(|p| p.id.clone()).collect();
        prop_assert!(repo.list::<Appointment>().iter().all(|a| live.contains(&a.patient_id)));
        prop_assert_eq!(repo.list::<Doctor>().len(), doctors);
    }

    #[test]
    fn prop_doctor_delete_never_removes_appointments(doctors in 1usize..5, pick in any::<prop::sample::Index>()) {
        let mut repo = memory_repo();
        let seeded = populate(&mut repo, 3, doctors);
        let id = seeded.doctors[pick.index(doctors)].clone();

        let removal = repo.delete::<Doctor>(&id).unwrap().into_value();
        prop_assert!(removal.cascaded.is_empty());
        prop_assert_eq!(repo.list::<Appointment>().len(), 3);
    }
}

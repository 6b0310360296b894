#![allow(clippy::unwrap_used)]
//! Racing availability writes against one store.

use std::sync::Barrier;

use uuid::Uuid;

use classbook_test::component::availability::AvailabilityRejection;
use classbook_test::component::error::ServiceError;
use classbook_test::component::snapshot::CalendarSnapshot;
use classbook_test::component::store::{AvailabilityStore, InMemoryAvailabilityStore};

use super::helpers::{date, ist_service, morning_slot};

const REQUESTS: usize = 8;

/// Every request passes the pre-check against the same stale index; the
/// store lets exactly one of them through.
#[test_log::test]
fn concurrent_mark_available_stores_one_slot() {
    let service = ist_service();
    let store = InMemoryAvailabilityStore::new();
    let teacher_id = Uuid::new_v4();
    let day = date(2024, 7, 2);
    let index = service.build_calendar_index(&CalendarSnapshot::default(), None);
    let barrier = Barrier::new(REQUESTS);

    let outcomes: Vec<Result<(), ServiceError>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..REQUESTS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    service.mark_available(&index, &store, morning_slot(teacher_id, day))
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(outcomes.iter().filter(|outcome| outcome.is_ok()).count(), 1);
    for outcome in outcomes.iter().filter(|outcome| outcome.is_err()) {
        assert!(matches!(
            outcome,
            Err(ServiceError::Rejected(AvailabilityRejection::AlreadyAvailable))
        ));
    }
    assert_eq!(store.slots_for(teacher_id).unwrap().len(), 1);
}

/// Different teachers on the same date never contend.
#[test]
fn concurrent_writes_for_distinct_teachers_all_succeed() {
    let service = ist_service();
    let store = InMemoryAvailabilityStore::new();
    let teachers: Vec<Uuid> = (0..6).map(|_| Uuid::new_v4()).collect();
    let index = service.build_calendar_index(&CalendarSnapshot::default(), None);

    std::thread::scope(|scope| {
        for teacher_id in &teachers {
            let (service, store, index) = (&service, &store, &index);
            scope.spawn(move || {
                service
                    .mark_available(index, store, morning_slot(*teacher_id, date(2024, 7, 2)))
                    .unwrap();
            });
        }
    });

    for teacher_id in teachers {
        assert_eq!(store.slots_for(teacher_id).unwrap().len(), 1);
    }
}

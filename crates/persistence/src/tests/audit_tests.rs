// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_case, create_test_event, with_hearing};
use crate::{SqliteCaseStore, StoredAuditEvent};

#[test]
fn test_audit_event_round_trips_through_store() {
    let store: SqliteCaseStore = SqliteCaseStore::new_in_memory().unwrap();
    store.put_case(&create_test_case("1234")).unwrap();

    store
        .write_case(
            "1234",
            &with_hearing(create_test_case("1234"), "H1", 1),
            1,
            &create_test_event("1234", "CREATE_HEARING"),
        )
        .unwrap();

    let events: Vec<StoredAuditEvent> = store.audit_events("1234").unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].case_version, 2);
    assert_eq!(events[0].event, create_test_event("1234", "CREATE_HEARING"));
}

#[test]
fn test_audit_events_are_ordered_and_scoped_to_case() {
    let store: SqliteCaseStore = SqliteCaseStore::new_in_memory().unwrap();
    store.put_case(&create_test_case("1234")).unwrap();
    store.put_case(&create_test_case("5678")).unwrap();

    store
        .write_case(
            "1234",
            &with_hearing(create_test_case("1234"), "H1", 1),
            1,
            &create_test_event("1234", "CREATE_HEARING"),
        )
        .unwrap();
    store
        .write_case(
            "5678",
            &create_test_case("5678"),
            1,
            &create_test_event("5678", "CREATE_HEARING"),
        )
        .unwrap();
    store
        .write_case(
            "1234",
            &with_hearing(create_test_case("1234"), "H1", 2),
            2,
            &create_test_event("1234", "UPDATE_HEARING"),
        )
        .unwrap();

    let events: Vec<StoredAuditEvent> = store.audit_events("1234").unwrap();
    let names: Vec<&str> = events.iter().map(|e| e.event.action.name.as_str()).collect();
    assert_eq!(names, vec!["CREATE_HEARING", "UPDATE_HEARING"]);
    assert!(events[0].event_id < events[1].event_id);
    assert_eq!(events[1].case_version, 3);
}

#[test]
fn test_case_without_events_lists_nothing() {
    let store: SqliteCaseStore = SqliteCaseStore::new_in_memory().unwrap();
    store.put_case(&create_test_case("1234")).unwrap();

    assert!(store.audit_events("1234").unwrap().is_empty());
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hearing_sync::{CaseStore, CaseStoreError, VersionedCase};
use hearing_sync_domain::CaseSnapshot;

use super::{create_test_case, create_test_event, with_hearing};
use crate::{PersistenceError, SqliteCaseStore};

fn store_with_case(case_id: &str) -> SqliteCaseStore {
    let store: SqliteCaseStore = SqliteCaseStore::new_in_memory().unwrap();
    store.put_case(&create_test_case(case_id)).unwrap();
    store
}

#[test]
fn test_new_case_starts_at_version_one() {
    let store: SqliteCaseStore = store_with_case("1234");

    let read: VersionedCase = store.read("1234").unwrap();

    assert_eq!(read.version, 1);
    assert_eq!(read.snapshot, create_test_case("1234"));
}

#[test]
fn test_put_existing_case_increments_version() {
    let store: SqliteCaseStore = store_with_case("1234");

    let mut edited: CaseSnapshot = create_test_case("1234");
    edited.urgent = true;
    let version: i64 = store.put_case(&edited).unwrap();

    assert_eq!(version, 2);
    assert!(store.get_case("1234").unwrap().snapshot.urgent);
}

#[test]
fn test_write_at_current_version_increments() {
    let store: SqliteCaseStore = store_with_case("1234");
    let updated: CaseSnapshot = with_hearing(create_test_case("1234"), "H1", 1);

    let version: i64 = store
        .write(
            "1234",
            &updated,
            1,
            &create_test_event("1234", "CREATE_HEARING"),
        )
        .unwrap();

    assert_eq!(version, 2);
    let read: VersionedCase = store.read("1234").unwrap();
    assert_eq!(read.version, 2);
    assert_eq!(read.snapshot.hearings.len(), 1);
}

#[test]
fn test_stale_version_is_a_conflict() {
    let store: SqliteCaseStore = store_with_case("1234");
    // Another actor edits the case
    store.put_case(&create_test_case("1234")).unwrap();

    let result: Result<i64, CaseStoreError> = store.write(
        "1234",
        &with_hearing(create_test_case("1234"), "H1", 1),
        1,
        &create_test_event("1234", "CREATE_HEARING"),
    );

    assert_eq!(
        result,
        Err(CaseStoreError::Conflict {
            case_id: String::from("1234"),
            expected_version: 1,
        })
    );
    let read: VersionedCase = store.read("1234").unwrap();
    assert_eq!(read.version, 2);
    assert!(read.snapshot.hearings.is_empty());
}

#[test]
fn test_conflict_writes_no_audit_event() {
    let store: SqliteCaseStore = store_with_case("1234");
    store.put_case(&create_test_case("1234")).unwrap();

    let _ = store.write(
        "1234",
        &create_test_case("1234"),
        1,
        &create_test_event("1234", "CREATE_HEARING"),
    );

    assert!(store.audit_events("1234").unwrap().is_empty());
}

#[test]
fn test_write_unknown_case_is_not_found() {
    let store: SqliteCaseStore = SqliteCaseStore::new_in_memory().unwrap();

    let result: Result<i64, PersistenceError> = store.write_case(
        "9999",
        &create_test_case("9999"),
        1,
        &create_test_event("9999", "CREATE_HEARING"),
    );

    assert!(matches!(result, Err(PersistenceError::CaseNotFound(_))));
}

#[test]
fn test_read_unknown_case_maps_to_not_found() {
    let store: SqliteCaseStore = SqliteCaseStore::new_in_memory().unwrap();

    let result: Result<VersionedCase, CaseStoreError> = store.read("9999");

    assert!(matches!(result, Err(CaseStoreError::NotFound { .. })));
}

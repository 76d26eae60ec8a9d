// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::create_test_case;
use crate::{PersistenceError, SqliteCaseStore};

#[test]
fn test_store_initialization() {
    let result: Result<SqliteCaseStore, PersistenceError> = SqliteCaseStore::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let db1: SqliteCaseStore = SqliteCaseStore::new_in_memory().unwrap();
    let db2: SqliteCaseStore = SqliteCaseStore::new_in_memory().unwrap();

    db1.put_case(&create_test_case("1234")).unwrap();

    assert!(db1.get_case("1234").is_ok());
    assert!(matches!(
        db2.get_case("1234"),
        Err(PersistenceError::CaseNotFound(_))
    ));
}

#[test]
fn test_file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cases.db");

    {
        let store: SqliteCaseStore = SqliteCaseStore::new_with_file(&path).unwrap();
        store.put_case(&create_test_case("1234")).unwrap();
    }

    let reopened: SqliteCaseStore = SqliteCaseStore::new_with_file(&path).unwrap();
    assert_eq!(reopened.get_case("1234").unwrap().version, 1);
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` case store.
//!
//! Cases are stored as JSON snapshots with a version column. Writes from
//! the engine are conditional on that version (`UPDATE ... WHERE case_id = ?
//! AND version = ?`); zero affected rows is reported as a conflict. Each
//! engine write and its audit event are committed in one transaction.
//!
//! ## Testing
//!
//! `new_in_memory()` gives every call its own shared in-memory database, so
//! tests never observe each other's rows.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::prelude::*;
use diesel::SqliteConnection;
use hearing_sync::{CaseStore, CaseStoreError, VersionedCase};
use hearing_sync_audit::AuditEvent;
use hearing_sync_domain::CaseSnapshot;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::StoredAuditEvent;
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Case store backed by a single `SQLite` connection.
///
/// The connection is guarded by a mutex so the store can be shared between
/// threads behind `&self`.
pub struct SqliteCaseStore {
    conn: Mutex<SqliteConnection>,
}

impl std::fmt::Debug for SqliteCaseStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteCaseStore").finish_non_exhaustive()
    }
}

impl SqliteCaseStore {
    /// Creates a store over a fresh in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = sqlite::open(&shared_memory_url)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates a store over a database file, creating it if needed.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError(String::from("Invalid database path"))
        })?;

        let mut conn: SqliteConnection = sqlite::open(path_str)?;
        sqlite::enable_wal_mode(&mut conn)?;

        info!(path = path_str, "Case store ready");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, SqliteConnection>, PersistenceError> {
        self.conn.lock().map_err(|_| PersistenceError::LockPoisoned)
    }

    /// Stores a case as given, outside the engine's version checks.
    ///
    /// Returns the case's new version: 1 for a new case, otherwise one more
    /// than before.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn put_case(&self, snapshot: &CaseSnapshot) -> Result<i64, PersistenceError> {
        let mut conn = self.lock()?;
        conn.transaction(|conn| mutations::put_case(conn, snapshot))
    }

    /// Reads a case and its version.
    ///
    /// # Errors
    ///
    /// Returns `CaseNotFound` for an unknown case.
    pub fn get_case(&self, case_id: &str) -> Result<VersionedCase, PersistenceError> {
        let mut conn = self.lock()?;
        queries::get_case(&mut conn, case_id)
    }

    /// Writes a case conditioned on its version and records the audit event
    /// in the same transaction.
    ///
    /// Returns the new version.
    ///
    /// # Errors
    ///
    /// Returns `VersionConflict` if the case is no longer at
    /// `expected_version`; nothing is written in that case.
    pub fn write_case(
        &self,
        case_id: &str,
        snapshot: &CaseSnapshot,
        expected_version: i64,
        event: &AuditEvent,
    ) -> Result<i64, PersistenceError> {
        let mut conn = self.lock()?;
        conn.transaction(|conn| {
            let version: i64 =
                mutations::write_case_if_version(conn, case_id, snapshot, expected_version)?;
            mutations::persist_audit_event(conn, event, version)?;
            Ok(version)
        })
    }

    /// Lists a case's audit events, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn audit_events(&self, case_id: &str) -> Result<Vec<StoredAuditEvent>, PersistenceError> {
        let mut conn = self.lock()?;
        queries::list_audit_events(&mut conn, case_id)
    }
}

impl CaseStore for SqliteCaseStore {
    fn read(&self, case_id: &str) -> Result<VersionedCase, CaseStoreError> {
        self.get_case(case_id).map_err(CaseStoreError::from)
    }

    fn write(
        &self,
        case_id: &str,
        snapshot: &CaseSnapshot,
        expected_version: i64,
        event: &AuditEvent,
    ) -> Result<i64, CaseStoreError> {
        self.write_case(case_id, snapshot, expected_version, event)
            .map_err(|e| {
                if matches!(e, PersistenceError::VersionConflict { .. }) {
                    warn!(case_id, expected_version, "Stale case version");
                }
                CaseStoreError::from(e)
            })
    }
}

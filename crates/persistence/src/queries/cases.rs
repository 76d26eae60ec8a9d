// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hearing_sync::VersionedCase;
use hearing_sync_domain::CaseSnapshot;

use crate::diesel_schema::cases;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = cases)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct CaseRow {
    snapshot_json: String,
    version: i64,
}

/// Reads a case and its version.
///
/// # Errors
///
/// Returns `CaseNotFound` for an unknown case, or an error if the stored
/// snapshot cannot be read.
pub fn get_case(conn: &mut SqliteConnection, case_id: &str) -> Result<VersionedCase, PersistenceError> {
    let row: CaseRow = cases::table
        .filter(cases::case_id.eq(case_id))
        .select(CaseRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::CaseNotFound(case_id.to_string()))?;

    let snapshot: CaseSnapshot = serde_json::from_str(&row.snapshot_json)?;
    Ok(VersionedCase {
        snapshot,
        version: row.version,
    })
}

/// Returns the current version of a case, or `None` if it does not exist.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn case_version(
    conn: &mut SqliteConnection,
    case_id: &str,
) -> Result<Option<i64>, PersistenceError> {
    Ok(cases::table
        .filter(cases::case_id.eq(case_id))
        .select(cases::version)
        .first::<i64>(conn)
        .optional()?)
}

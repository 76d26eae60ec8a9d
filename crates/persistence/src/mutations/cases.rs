// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use hearing_sync_domain::CaseSnapshot;
use tracing::debug;

use crate::diesel_schema::cases;
use crate::error::PersistenceError;
use crate::queries::case_version;

/// Stores a case unconditionally.
///
/// A new case starts at version 1; replacing an existing case increments
/// its version, so any engine write prepared against the old version
/// conflicts.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn put_case(
    conn: &mut SqliteConnection,
    snapshot: &CaseSnapshot,
) -> Result<i64, PersistenceError> {
    let snapshot_json: String = serde_json::to_string(snapshot)?;

    let version: i64 = match case_version(conn, &snapshot.case_id)? {
        Some(current) => {
            let next: i64 = current + 1;
            diesel::update(cases::table.filter(cases::case_id.eq(&snapshot.case_id)))
                .set((
                    cases::snapshot_json.eq(&snapshot_json),
                    cases::version.eq(next),
                    cases::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
                ))
                .execute(conn)?;
            next
        }
        None => {
            diesel::insert_into(cases::table)
                .values((
                    cases::case_id.eq(&snapshot.case_id),
                    cases::snapshot_json.eq(&snapshot_json),
                    cases::version.eq(1_i64),
                ))
                .execute(conn)?;
            1
        }
    };

    debug!(case_id = %snapshot.case_id, version, "Stored case");
    Ok(version)
}

/// Replaces a case only if it is still at `expected_version`.
///
/// Returns the new version.
///
/// # Errors
///
/// Returns `VersionConflict` when no row matched the version, or
/// `CaseNotFound` when the case does not exist at all.
pub fn write_case_if_version(
    conn: &mut SqliteConnection,
    case_id: &str,
    snapshot: &CaseSnapshot,
    expected_version: i64,
) -> Result<i64, PersistenceError> {
    let snapshot_json: String = serde_json::to_string(snapshot)?;
    let next: i64 = expected_version + 1;

    let affected: usize = diesel::update(
        cases::table
            .filter(cases::case_id.eq(case_id))
            .filter(cases::version.eq(expected_version)),
    )
    .set((
        cases::snapshot_json.eq(&snapshot_json),
        cases::version.eq(next),
        cases::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
    ))
    .execute(conn)?;

    if affected == 0 {
        return match case_version(conn, case_id)? {
            Some(_) => Err(PersistenceError::VersionConflict {
                case_id: case_id.to_string(),
                expected_version,
            }),
            None => Err(PersistenceError::CaseNotFound(case_id.to_string())),
        };
    }

    Ok(next)
}

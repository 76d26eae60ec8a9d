// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hearing_sync_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};

use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData, StoredAuditEvent};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct AuditEventRow {
    event_id: i64,
    case_id: String,
    case_version: i64,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
}

impl TryFrom<AuditEventRow> for StoredAuditEvent {
    type Error = PersistenceError;

    fn try_from(row: AuditEventRow) -> Result<Self, Self::Error> {
        let actor: ActorData = serde_json::from_str(&row.actor_json)?;
        let cause: CauseData = serde_json::from_str(&row.cause_json)?;
        let action: ActionData = serde_json::from_str(&row.action_json)?;
        let before: StateSnapshotData = serde_json::from_str(&row.before_snapshot_json)?;
        let after: StateSnapshotData = serde_json::from_str(&row.after_snapshot_json)?;

        Ok(Self {
            event_id: row.event_id,
            case_version: row.case_version,
            event: AuditEvent::new(
                row.case_id,
                Actor::new(actor.id, actor.actor_type),
                Cause::new(cause.id, cause.description),
                Action::new(action.name, action.details),
                StateSnapshot::new(before.data),
                StateSnapshot::new(after.data),
            ),
        })
    }
}

/// Lists a case's audit events, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be deserialized.
pub fn list_audit_events(
    conn: &mut SqliteConnection,
    case_id: &str,
) -> Result<Vec<StoredAuditEvent>, PersistenceError> {
    audit_events::table
        .filter(audit_events::case_id.eq(case_id))
        .order(audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load::<AuditEventRow>(conn)?
        .into_iter()
        .map(StoredAuditEvent::try_from)
        .collect()
}

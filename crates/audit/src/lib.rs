// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use hearing_sync_domain::HearingRecord;
use serde::{Deserialize, Serialize};

/// The entity performing a synchronization.
///
/// Usually the engine itself, or a caseworker when a trigger is raised by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "system", "caseworker").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// The engine acting on its own behalf.
    #[must_use]
    pub fn system() -> Self {
        Self::new(String::from("hearing-sync"), String::from("system"))
    }
}

impl Default for Actor {
    fn default() -> Self {
        Self::system()
    }
}

/// Why a write happened: the lifecycle trigger and the unit of work it started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// Identifies the unit of work (e.g., a request id).
    pub id: String,
    /// The trigger that started it.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// The hearing action whose outcome was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The action name (e.g., "`CREATE_HEARING`").
    pub name: String,
    /// Optional details, such as the hearing id and version.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A compact rendering of a case's hearing history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }

    /// Renders a hearing history as `id@version:STATUS` entries joined by `;`.
    #[must_use]
    pub fn of_hearings(history: &[HearingRecord]) -> Self {
        let data: String = history
            .iter()
            .map(|r| format!("{}@{}:{}", r.hearing_id, r.version, r.status))
            .collect::<Vec<String>>()
            .join(";");
        Self { data }
    }
}

/// An immutable record of one write-back to the case store.
///
/// Every successful synchronization write carries exactly one audit event,
/// stored in the same unit of work as the case itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// The case that was written.
    pub case_id: String,
    /// The actor who initiated this write.
    pub actor: Actor,
    /// The cause or reason for this write.
    pub cause: Cause,
    /// The hearing action whose outcome was written.
    pub action: Action,
    /// The hearing history before the write.
    pub before: StateSnapshot,
    /// The hearing history after the write.
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `case_id` - The case being written
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the write
    /// * `after` - The state after the write
    #[must_use]
    pub const fn new(
        case_id: String,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            case_id,
            actor,
            cause,
            action,
            before,
            after,
        }
    }
}

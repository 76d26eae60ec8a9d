// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hearing_sync_domain::CancellationReason;
use serde::{Deserialize, Serialize};

/// The event that selects which hearing action to perform.
///
/// Triggers carry intent only. The engine keeps no state of its own between
/// triggers beyond the hearing history stored on the case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleTrigger {
    /// Request a new hearing, or update the outstanding one.
    CreateHearing,
    /// Update the case's latest outstanding hearing.
    UpdateHearing,
    /// Cancel the case's latest outstanding hearing.
    CancelHearing {
        /// Reason sent to the hearing service.
        reason: CancellationReason,
    },
    /// Mark the case as adjourned, then create the next hearing.
    #[serde(rename = "ADJOURN_CREATE_HEARING")]
    AdjournCreateHearing,
    /// Any other event. Requires no hearing action.
    #[serde(other)]
    Ignored,
}

impl LifecycleTrigger {
    /// Returns the trigger's wire name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateHearing => "CREATE_HEARING",
            Self::UpdateHearing => "UPDATE_HEARING",
            Self::CancelHearing { .. } => "CANCEL_HEARING",
            Self::AdjournCreateHearing => "ADJOURN_CREATE_HEARING",
            Self::Ignored => "IGNORED",
        }
    }
}

impl std::fmt::Display for LifecycleTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The mutating call made against the hearing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HearingAction {
    Create,
    Update,
    Cancel,
}

impl HearingAction {
    /// Returns the action name used in logs and audit records.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE_HEARING",
            Self::Update => "UPDATE_HEARING",
            Self::Cancel => "CANCEL_HEARING",
        }
    }
}

impl std::fmt::Display for HearingAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

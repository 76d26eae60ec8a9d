// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hearing lifecycle status and the records kept about requested hearings.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a hearing as reported by the hearing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HearingStatus {
    HearingRequested,
    AwaitingListing,
    Listed,
    UpdateRequested,
    UpdateSubmitted,
    Exception,
    CancellationRequested,
    CancellationSubmitted,
    Cancelled,
    AwaitingActuals,
    Completed,
    Adjourned,
    Closed,
}

impl HearingStatus {
    /// Returns whether the hearing is still outstanding with the service.
    ///
    /// Outstanding hearings block the creation of a second request for the
    /// same case.
    #[must_use]
    pub const fn is_outstanding(&self) -> bool {
        matches!(
            self,
            Self::HearingRequested
                | Self::AwaitingListing
                | Self::Listed
                | Self::UpdateRequested
                | Self::UpdateSubmitted
                | Self::Exception
                | Self::AwaitingActuals
        )
    }

    /// Returns the wire representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HearingRequested => "HEARING_REQUESTED",
            Self::AwaitingListing => "AWAITING_LISTING",
            Self::Listed => "LISTED",
            Self::UpdateRequested => "UPDATE_REQUESTED",
            Self::UpdateSubmitted => "UPDATE_SUBMITTED",
            Self::Exception => "EXCEPTION",
            Self::CancellationRequested => "CANCELLATION_REQUESTED",
            Self::CancellationSubmitted => "CANCELLATION_SUBMITTED",
            Self::Cancelled => "CANCELLED",
            Self::AwaitingActuals => "AWAITING_ACTUALS",
            Self::Completed => "COMPLETED",
            Self::Adjourned => "ADJOURNED",
            Self::Closed => "CLOSED",
        }
    }
}

impl std::fmt::Display for HearingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A hearing as currently known to the hearing service.
///
/// Read-only input to the engine; only the hearing service writes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingHearingRecord {
    /// The hearing service's identifier.
    pub hearing_id: String,
    /// The current request version, when the service reports one.
    pub request_version: Option<i64>,
    /// The current lifecycle status.
    pub status: HearingStatus,
}

impl ExistingHearingRecord {
    /// Returns whether this record can be the target of an update instead
    /// of a new create: it must be outstanding and carry a version.
    #[must_use]
    pub const fn is_updatable(&self) -> bool {
        self.status.is_outstanding() && self.request_version.is_some()
    }
}

/// The case store's record of a hearing this engine has synchronized.
///
/// History entries are keyed by `hearing_id`; writing the same hearing again
/// merges into the existing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HearingRecord {
    pub hearing_id: String,
    pub version: i64,
    pub status: HearingStatus,
}

/// Inserts or merges a hearing record into a history list.
///
/// Returns `true` when the history changed.
pub fn merge_hearing_record(history: &mut Vec<HearingRecord>, record: HearingRecord) -> bool {
    match history
        .iter_mut()
        .find(|existing| existing.hearing_id == record.hearing_id)
    {
        Some(existing) => {
            if *existing == record {
                return false;
            }
            // Older versions never overwrite newer ones
            if existing.version > record.version {
                return false;
            }
            *existing = record;
            true
        }
        None => {
            history.push(record);
            true
        }
    }
}

/// Returns the most recent outstanding hearing in a history list.
#[must_use]
pub fn latest_outstanding(history: &[HearingRecord]) -> Option<&HearingRecord> {
    history.iter().rev().find(|r| r.status.is_outstanding())
}

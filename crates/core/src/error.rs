// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ports::{CaseStoreError, HearingServiceError};
use hearing_sync_domain::{DomainError, ErrorKind};

/// Errors that end a unit of work.
///
/// Every variant carries the case id and the action that was being attempted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// The hearing request could not be derived from the case.
    #[error("{action} for case {case_id} failed deriving {}: {source}", .source.field())]
    Derivation {
        case_id: String,
        action: &'static str,
        source: DomainError,
    },
    /// The hearing service call failed.
    #[error("{action} for case {case_id} failed at the hearing service: {source}")]
    HearingService {
        case_id: String,
        action: &'static str,
        source: HearingServiceError,
    },
    /// The case store failed with something other than a retryable conflict.
    #[error("{action} for case {case_id} failed at the case store: {source}")]
    CaseStore {
        case_id: String,
        action: &'static str,
        source: CaseStoreError,
    },
    /// There is no outstanding hearing to act on.
    #[error("{action} for case {case_id}: no outstanding hearing")]
    NoOutstandingHearing {
        case_id: String,
        action: &'static str,
    },
    /// The hearing service did not report a version for the hearing.
    #[error("{action} for case {case_id}: hearing {hearing_id} has no version")]
    HearingVersionUnknown {
        case_id: String,
        action: &'static str,
        hearing_id: String,
    },
    /// The outcome could not be written back within the retry budget.
    #[error(
        "{action} for case {case_id}: hearing {hearing_id} not persisted after {attempts} attempts (compensated: {compensated})"
    )]
    SyncExhausted {
        case_id: String,
        action: &'static str,
        hearing_id: String,
        attempts: u32,
        /// Whether the compensating cancellation was accepted.
        compensated: bool,
    },
}

impl CoreError {
    /// Returns the case the failed unit of work was for.
    #[must_use]
    pub fn case_id(&self) -> &str {
        match self {
            Self::Derivation { case_id, .. }
            | Self::HearingService { case_id, .. }
            | Self::CaseStore { case_id, .. }
            | Self::NoOutstandingHearing { case_id, .. }
            | Self::HearingVersionUnknown { case_id, .. }
            | Self::SyncExhausted { case_id, .. } => case_id,
        }
    }

    /// Returns the action that was being attempted.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::Derivation { action, .. }
            | Self::HearingService { action, .. }
            | Self::CaseStore { action, .. }
            | Self::NoOutstandingHearing { action, .. }
            | Self::HearingVersionUnknown { action, .. }
            | Self::SyncExhausted { action, .. } => *action,
        }
    }

    /// Returns the derivation error kind, for derivation failures.
    #[must_use]
    pub const fn domain_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Derivation { source, .. } => Some(source.kind()),
            _ => None,
        }
    }

    /// Returns the stage or field where the unit of work failed.
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::Derivation { source, .. } => source.field(),
            Self::HearingService { .. } | Self::HearingVersionUnknown { .. } => "hearingService",
            Self::CaseStore { .. } | Self::SyncExhausted { .. } => "caseStore",
            Self::NoOutstandingHearing { .. } => "hearingHistory",
        }
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Contracts the engine requires from its collaborators.
//!
//! Both collaborators are synchronous. Implementations rely on their own
//! transport timeouts; the engine never spawns work of its own.

use hearing_sync_audit::AuditEvent;
use hearing_sync_domain::{
    CancelRequest, CaseSnapshot, ExistingHearingRecord, HearingRecord, HearingRequestPayload,
    HearingStatus, PartiesNotified,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The hearing service's reply to a create, update, or cancel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HearingResponse {
    pub hearing_id: String,
    pub version_number: i64,
    pub status: HearingStatus,
}

impl HearingResponse {
    /// Converts the reply into a hearing history entry.
    #[must_use]
    pub fn to_record(&self) -> HearingRecord {
        HearingRecord {
            hearing_id: self.hearing_id.clone(),
            version: self.version_number,
            status: self.status,
        }
    }
}

/// Errors returned by the hearing service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HearingServiceError {
    /// The service rejected the request (4xx).
    #[error("Hearing service rejected the request with status {status}: {message}")]
    ClientError { status: u16, message: String },
    /// The service failed (5xx).
    #[error("Hearing service failed with status {status}: {message}")]
    ServerError { status: u16, message: String },
    /// The service could not be reached.
    #[error("Hearing service unreachable: {0}")]
    Transport(String),
    /// The service replied with a body that could not be read.
    #[error("Unreadable hearing service response: {0}")]
    InvalidResponse(String),
}

impl HearingServiceError {
    /// Returns whether the failure may clear up on its own (5xx or transport).
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::ServerError { .. } | Self::Transport(_))
    }
}

/// The external hearing-scheduling service.
pub trait HearingService {
    /// Requests a new hearing.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the request or cannot be reached.
    fn create(&self, payload: &HearingRequestPayload)
    -> Result<HearingResponse, HearingServiceError>;

    /// Updates an existing hearing.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the request or cannot be reached.
    fn update(
        &self,
        hearing_id: &str,
        payload: &HearingRequestPayload,
    ) -> Result<HearingResponse, HearingServiceError>;

    /// Cancels a hearing.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the request or cannot be reached.
    fn cancel(
        &self,
        hearing_id: &str,
        request: &CancelRequest,
    ) -> Result<HearingResponse, HearingServiceError>;

    /// Reads one hearing.
    ///
    /// # Errors
    ///
    /// Returns an error if the hearing does not exist or the service fails.
    fn get_by_id(&self, hearing_id: &str) -> Result<ExistingHearingRecord, HearingServiceError>;

    /// Lists the hearings the service holds for a case.
    ///
    /// # Errors
    ///
    /// Returns an error if the service fails.
    fn list_by_case(&self, case_id: &str)
    -> Result<Vec<ExistingHearingRecord>, HearingServiceError>;

    /// Records that parties were notified about a hearing version.
    ///
    /// Idempotent for the same hearing, version, and timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the request or cannot be reached.
    fn update_parties_notified(
        &self,
        hearing_id: &str,
        version: i64,
        received_at: OffsetDateTime,
        body: &PartiesNotified,
    ) -> Result<(), HearingServiceError>;
}

impl<T: HearingService + ?Sized> HearingService for Box<T> {
    fn create(
        &self,
        payload: &HearingRequestPayload,
    ) -> Result<HearingResponse, HearingServiceError> {
        (**self).create(payload)
    }

    fn update(
        &self,
        hearing_id: &str,
        payload: &HearingRequestPayload,
    ) -> Result<HearingResponse, HearingServiceError> {
        (**self).update(hearing_id, payload)
    }

    fn cancel(
        &self,
        hearing_id: &str,
        request: &CancelRequest,
    ) -> Result<HearingResponse, HearingServiceError> {
        (**self).cancel(hearing_id, request)
    }

    fn get_by_id(&self, hearing_id: &str) -> Result<ExistingHearingRecord, HearingServiceError> {
        (**self).get_by_id(hearing_id)
    }

    fn list_by_case(
        &self,
        case_id: &str,
    ) -> Result<Vec<ExistingHearingRecord>, HearingServiceError> {
        (**self).list_by_case(case_id)
    }

    fn update_parties_notified(
        &self,
        hearing_id: &str,
        version: i64,
        received_at: OffsetDateTime,
        body: &PartiesNotified,
    ) -> Result<(), HearingServiceError> {
        (**self).update_parties_notified(hearing_id, version, received_at, body)
    }
}

/// A case snapshot with the version token it was read at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedCase {
    pub snapshot: CaseSnapshot,
    pub version: i64,
}

/// Errors returned by the case store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaseStoreError {
    /// The case changed since it was read.
    #[error("Case {case_id} was modified concurrently (expected version {expected_version})")]
    Conflict {
        case_id: String,
        expected_version: i64,
    },
    /// The case does not exist.
    #[error("Case {case_id} not found")]
    NotFound { case_id: String },
    /// The store failed.
    #[error("Case store failure: {0}")]
    Backend(String),
}

/// The case-of-record store.
pub trait CaseStore {
    /// Reads a case and its current version.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown case, or `Backend` on store failure.
    fn read(&self, case_id: &str) -> Result<VersionedCase, CaseStoreError>;

    /// Writes a case if it is still at `expected_version`, recording `event`
    /// in the same unit of work.
    ///
    /// Returns the new version.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` when the stored version differs from
    /// `expected_version`.
    fn write(
        &self,
        case_id: &str,
        snapshot: &CaseSnapshot,
        expected_version: i64,
        event: &AuditEvent,
    ) -> Result<i64, CaseStoreError>;
}

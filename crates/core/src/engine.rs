// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State orchestration.
//!
//! Each lifecycle trigger is one unit of work:
//!
//! 1. Read the case from the store.
//! 2. Derive and validate the hearing request.
//! 3. Make exactly one mutating call to the hearing service.
//! 4. Hand the outcome to the [`SyncRetrier`] for write-back.
//!
//! Validation failures stop the unit of work before any outbound call.

use hearing_sync_audit::Cause;
use hearing_sync_domain::{
    AssembledRequest, CancelRequest, CancellationReason, CaseSnapshot, ExistingHearingRecord,
    HearingRecord, PartiesNotified, ReferenceData, build_hearing_request, latest_outstanding,
    resolve_effective_duration, validate_payload,
};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::config::{EngineConfig, ExistingHearingLookupPolicy};
use crate::error::CoreError;
use crate::ports::{CaseStore, HearingResponse, HearingService, VersionedCase};
use crate::sync::{SyncOutcome, SyncRetrier};
use crate::trigger::{HearingAction, LifecycleTrigger};

/// Action name used for parties-notified updates.
pub const PARTIES_NOTIFIED: &str = "PARTIES_NOTIFIED";

/// What a handled trigger did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncResult {
    /// A hearing action was performed and written back.
    Applied {
        action: HearingAction,
        hearing: HearingRecord,
        /// Case version after the write-back.
        case_version: i64,
    },
    /// The trigger requires no hearing action.
    Ignored,
}

/// Drives lifecycle triggers against the hearing service and case store.
#[derive(Debug)]
pub struct Engine<H, S, R> {
    hearings: H,
    store: S,
    reference: R,
    config: EngineConfig,
}

impl<H, S, R> Engine<H, S, R>
where
    H: HearingService,
    S: CaseStore,
    R: ReferenceData,
{
    /// Creates an engine over its collaborators.
    ///
    /// # Arguments
    ///
    /// * `hearings` - The external hearing service
    /// * `store` - The case-of-record store
    /// * `reference` - Reference data lookups
    /// * `config` - Retry, derivation, and lookup settings
    #[must_use]
    pub const fn new(hearings: H, store: S, reference: R, config: EngineConfig) -> Self {
        Self {
            hearings,
            store,
            reference,
            config,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn hearings(&self) -> &H {
        &self.hearings
    }

    #[must_use]
    pub const fn reference(&self) -> &R {
        &self.reference
    }

    /// Handles one lifecycle trigger for a case.
    ///
    /// # Arguments
    ///
    /// * `case_id` - The case the trigger is for
    /// * `trigger` - Selects the hearing action
    /// * `cause` - Recorded on the audit event of the write-back
    ///
    /// # Errors
    ///
    /// Returns a [`CoreError`] naming the case, the action, and the failed
    /// stage. Derivation errors are raised before any hearing service call.
    pub fn handle(
        &self,
        case_id: &str,
        trigger: &LifecycleTrigger,
        cause: &Cause,
    ) -> Result<SyncResult, CoreError> {
        info!(case_id, trigger = %trigger, cause = %cause.id, "Handling lifecycle trigger");
        match trigger {
            LifecycleTrigger::CreateHearing => self.create(case_id, false, cause),
            LifecycleTrigger::AdjournCreateHearing => self.create(case_id, true, cause),
            LifecycleTrigger::UpdateHearing => self.update(case_id, cause),
            LifecycleTrigger::CancelHearing { reason } => self.cancel(case_id, *reason, cause),
            LifecycleTrigger::Ignored => {
                debug!(case_id, "Trigger requires no hearing action");
                Ok(SyncResult::Ignored)
            }
        }
    }

    /// Records that the parties to a hearing were notified.
    ///
    /// Reads the hearing's current version, then sends the idempotent
    /// parties-notified update for that version. Returns the version notified.
    ///
    /// # Errors
    ///
    /// Returns `HearingVersionUnknown` when the service reports no version for
    /// the hearing, or `HearingService` when a call fails.
    pub fn notify_parties(
        &self,
        case_id: &str,
        hearing_id: &str,
        received_at: OffsetDateTime,
    ) -> Result<i64, CoreError> {
        let existing: ExistingHearingRecord = self
            .hearings
            .get_by_id(hearing_id)
            .map_err(|source| service_error(case_id, PARTIES_NOTIFIED, source))?;
        let version: i64 =
            existing
                .request_version
                .ok_or_else(|| CoreError::HearingVersionUnknown {
                    case_id: case_id.to_string(),
                    action: PARTIES_NOTIFIED,
                    hearing_id: hearing_id.to_string(),
                })?;

        self.hearings
            .update_parties_notified(hearing_id, version, received_at, &PartiesNotified::default())
            .map_err(|source| service_error(case_id, PARTIES_NOTIFIED, source))?;

        info!(case_id, hearing_id, version, "Parties notified");
        Ok(version)
    }

    fn create(&self, case_id: &str, adjourn: bool, cause: &Cause) -> Result<SyncResult, CoreError> {
        let action: &'static str = HearingAction::Create.as_str();
        let mut case: CaseSnapshot = self.read_case(case_id, action)?.snapshot;
        if adjourn {
            case.adjournment.in_progress = true;
        }

        if let Some((hearing_id, version)) = self.find_updatable(case_id)? {
            info!(
                case_id,
                hearing_id = %hearing_id,
                version,
                "Outstanding hearing found, updating instead of creating"
            );
            return self.update_hearing(case_id, &case, &hearing_id, version, adjourn, cause);
        }

        let assembled: AssembledRequest = self.assemble(case_id, action, &case, None)?;
        let response: HearingResponse = self
            .hearings
            .create(&assembled.payload)
            .map_err(|source| service_error(case_id, action, source))?;
        info!(
            case_id,
            action,
            hearing_id = %response.hearing_id,
            version = response.version_number,
            "Hearing requested"
        );

        self.persist(case_id, HearingAction::Create, &response, assembled.case, adjourn, cause)
    }

    fn update(&self, case_id: &str, cause: &Cause) -> Result<SyncResult, CoreError> {
        let action: &'static str = HearingAction::Update.as_str();
        let case: CaseSnapshot = self.read_case(case_id, action)?.snapshot;
        let target: HearingRecord = outstanding_target(case_id, action, &case)?;

        let version: i64 = match self.hearings.get_by_id(&target.hearing_id) {
            Ok(existing) => existing.request_version.unwrap_or(target.version),
            Err(source) => return Err(service_error(case_id, action, source)),
        };

        self.update_hearing(case_id, &case, &target.hearing_id, version, false, cause)
    }

    fn update_hearing(
        &self,
        case_id: &str,
        case: &CaseSnapshot,
        hearing_id: &str,
        version: i64,
        clear_adjournment: bool,
        cause: &Cause,
    ) -> Result<SyncResult, CoreError> {
        let action: &'static str = HearingAction::Update.as_str();
        let assembled: AssembledRequest = self.assemble(case_id, action, case, Some(version))?;
        let response: HearingResponse = self
            .hearings
            .update(hearing_id, &assembled.payload)
            .map_err(|source| service_error(case_id, action, source))?;
        info!(
            case_id,
            action,
            hearing_id = %response.hearing_id,
            version = response.version_number,
            "Hearing updated"
        );

        self.persist(
            case_id,
            HearingAction::Update,
            &response,
            assembled.case,
            clear_adjournment,
            cause,
        )
    }

    fn cancel(
        &self,
        case_id: &str,
        reason: CancellationReason,
        cause: &Cause,
    ) -> Result<SyncResult, CoreError> {
        let action: &'static str = HearingAction::Cancel.as_str();
        let case: CaseSnapshot = self.read_case(case_id, action)?.snapshot;
        let target: HearingRecord = outstanding_target(case_id, action, &case)?;

        // Only the duration gates a cancellation
        let duration: u32 =
            resolve_effective_duration(&case, &self.reference).map_err(|source| {
                CoreError::Derivation {
                    case_id: case_id.to_string(),
                    action,
                    source,
                }
            })?;
        debug!(case_id, duration, "Cancellation duration validated");

        let request: CancelRequest = CancelRequest {
            cancellation_reason_codes: vec![reason.code().to_string()],
        };
        let response: HearingResponse = self
            .hearings
            .cancel(&target.hearing_id, &request)
            .map_err(|source| service_error(case_id, action, source))?;
        info!(
            case_id,
            action,
            hearing_id = %response.hearing_id,
            reason = reason.code(),
            "Hearing cancellation requested"
        );

        self.persist(case_id, HearingAction::Cancel, &response, case, false, cause)
    }

    fn read_case(&self, case_id: &str, action: &'static str) -> Result<VersionedCase, CoreError> {
        self.store
            .read(case_id)
            .map_err(|source| CoreError::CaseStore {
                case_id: case_id.to_string(),
                action,
                source,
            })
    }

    /// Looks for an outstanding hearing with a readable version.
    fn find_updatable(&self, case_id: &str) -> Result<Option<(String, i64)>, CoreError> {
        let action: &'static str = HearingAction::Create.as_str();
        match self.hearings.list_by_case(case_id) {
            Ok(records) => Ok(records.into_iter().rev().find_map(|record| {
                if record.is_updatable() {
                    record.request_version.map(|v| (record.hearing_id, v))
                } else {
                    None
                }
            })),
            Err(source) if source.is_transient() => match self.config.lookup_policy {
                ExistingHearingLookupPolicy::ProceedToCreate => {
                    warn!(
                        case_id,
                        error = %source,
                        "Existing hearing lookup failed, creating without de-duplication"
                    );
                    Ok(None)
                }
                ExistingHearingLookupPolicy::Abort => Err(service_error(case_id, action, source)),
            },
            Err(source) => Err(service_error(case_id, action, source)),
        }
    }

    fn assemble(
        &self,
        case_id: &str,
        action: &'static str,
        case: &CaseSnapshot,
        version: Option<i64>,
    ) -> Result<AssembledRequest, CoreError> {
        build_hearing_request(case, &self.reference, &self.config.derivation, version)
            .and_then(|assembled| validate_payload(&assembled.payload).map(|()| assembled))
            .map_err(|source| CoreError::Derivation {
                case_id: case_id.to_string(),
                action,
                source,
            })
    }

    fn persist(
        &self,
        case_id: &str,
        action: HearingAction,
        response: &HearingResponse,
        derived: CaseSnapshot,
        clear_adjournment: bool,
        cause: &Cause,
    ) -> Result<SyncResult, CoreError> {
        let outcome: SyncOutcome = SyncOutcome {
            action,
            hearing: response.to_record(),
            derived,
            clear_adjournment,
        };
        let retrier: SyncRetrier<'_, S, H> = SyncRetrier::new(
            &self.store,
            &self.hearings,
            self.config.retry,
            &self.config.actor,
        );
        let case_version: i64 = retrier.persist(case_id, &outcome, cause)?;

        Ok(SyncResult::Applied {
            action,
            hearing: outcome.hearing,
            case_version,
        })
    }
}

fn outstanding_target(
    case_id: &str,
    action: &'static str,
    case: &CaseSnapshot,
) -> Result<HearingRecord, CoreError> {
    latest_outstanding(&case.hearings)
        .cloned()
        .ok_or_else(|| CoreError::NoOutstandingHearing {
            case_id: case_id.to_string(),
            action,
        })
}

fn service_error(
    case_id: &str,
    action: &'static str,
    source: crate::ports::HearingServiceError,
) -> CoreError {
    CoreError::HearingService {
        case_id: case_id.to_string(),
        action,
        source,
    }
}

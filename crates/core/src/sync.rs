// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-back of hearing outcomes under optimistic concurrency.
//!
//! Each attempt re-reads the case, merges the outcome into the fresh copy and
//! writes it conditioned on the version just read. Only version conflicts are
//! retried. When the retry budget runs out, the hearing that was just created
//! or updated is cancelled so no orphaned outstanding hearing remains.

use hearing_sync_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use hearing_sync_domain::{
    CancelRequest, CancellationReason, CaseSnapshot, HearingRecord, assign_party_ids_above,
    copy_party_ids, max_numeric_party_id, merge_hearing_record,
};
use tracing::{debug, error, info, warn};

use crate::config::RetryPolicy;
use crate::error::CoreError;
use crate::ports::{CaseStore, CaseStoreError, HearingService, VersionedCase};
use crate::trigger::HearingAction;

/// The result of one hearing service call, waiting to be written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub action: HearingAction,
    pub hearing: HearingRecord,
    /// The snapshot the request was derived from, with party ids assigned.
    pub derived: CaseSnapshot,
    /// Whether the adjournment-in-progress flag is cleared by this write.
    pub clear_adjournment: bool,
}

/// Why [`retry_on_conflict`] gave up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryError {
    /// Every attempt hit a version conflict.
    Exhausted { attempts: u32 },
    /// An attempt failed with a non-conflict error.
    Fatal(CaseStoreError),
}

/// Runs `attempt` until it succeeds, fails with a non-conflict error, or the
/// policy's attempts are used up.
///
/// `attempt` receives the 1-based attempt number. The backoff delay is slept
/// between attempts, never after the last one.
///
/// # Errors
///
/// Returns `Exhausted` after `max_attempts` conflicts, or `Fatal` with the
/// first non-conflict error.
pub fn retry_on_conflict<T, F>(policy: &RetryPolicy, mut attempt: F) -> Result<T, RetryError>
where
    F: FnMut(u32) -> Result<T, CaseStoreError>,
{
    let max_attempts: u32 = policy.max_attempts.max(1);
    for number in 1..=max_attempts {
        match attempt(number) {
            Ok(value) => return Ok(value),
            Err(CaseStoreError::Conflict {
                case_id,
                expected_version,
            }) => {
                warn!(
                    attempt = number,
                    max_attempts,
                    case_id = %case_id,
                    expected_version,
                    "Case store write conflict"
                );
                if number < max_attempts && !policy.backoff.is_zero() {
                    std::thread::sleep(policy.backoff);
                }
            }
            Err(e) => return Err(RetryError::Fatal(e)),
        }
    }
    Err(RetryError::Exhausted {
        attempts: max_attempts,
    })
}

/// Applies an outcome to a fresh snapshot.
///
/// Returns the updated snapshot, or `None` when the outcome is already fully
/// reflected in it.
fn merge_outcome(current: &CaseSnapshot, outcome: &SyncOutcome) -> Option<CaseSnapshot> {
    let mut snapshot: CaseSnapshot = current.clone();

    let merged: bool = merge_hearing_record(&mut snapshot.hearings, outcome.hearing.clone());
    let copied: bool = copy_party_ids(&outcome.derived, &mut snapshot);
    // Parties added since the read start above every id the request carried
    let reserved: u64 = max_numeric_party_id(&outcome.derived);
    let assigned: bool = match assign_party_ids_above(&mut snapshot, reserved) {
        Ok(ids) => !ids.is_empty(),
        Err(e) => {
            warn!(case_id = %snapshot.case_id, error = %e, "Party ids left unassigned");
            false
        }
    };
    let cleared: bool = outcome.clear_adjournment && snapshot.adjournment.in_progress;
    if cleared {
        snapshot.adjournment.in_progress = false;
    }

    (merged || copied || assigned || cleared).then_some(snapshot)
}

/// Persists hearing outcomes to the case store.
#[derive(Debug)]
pub struct SyncRetrier<'a, S, H> {
    store: &'a S,
    hearings: &'a H,
    policy: RetryPolicy,
    actor: &'a Actor,
}

impl<'a, S: CaseStore, H: HearingService> SyncRetrier<'a, S, H> {
    /// Creates a retrier over the given collaborators.
    #[must_use]
    pub const fn new(store: &'a S, hearings: &'a H, policy: RetryPolicy, actor: &'a Actor) -> Self {
        Self {
            store,
            hearings,
            policy,
            actor,
        }
    }

    fn write_once(
        &self,
        case_id: &str,
        outcome: &SyncOutcome,
        cause: &Cause,
    ) -> Result<i64, CaseStoreError> {
        let current: VersionedCase = self.store.read(case_id)?;
        let Some(updated) = merge_outcome(&current.snapshot, outcome) else {
            debug!(
                case_id,
                hearing_id = %outcome.hearing.hearing_id,
                version = current.version,
                "Outcome already recorded"
            );
            return Ok(current.version);
        };

        let action: Action = Action::new(
            outcome.action.as_str().to_string(),
            Some(format!(
                "hearing {} v{} {}",
                outcome.hearing.hearing_id, outcome.hearing.version, outcome.hearing.status
            )),
        );
        let event: AuditEvent = AuditEvent::new(
            case_id.to_string(),
            self.actor.clone(),
            cause.clone(),
            action,
            StateSnapshot::of_hearings(&current.snapshot.hearings),
            StateSnapshot::of_hearings(&updated.hearings),
        );

        self.store.write(case_id, &updated, current.version, &event)
    }

    fn compensate(&self, case_id: &str, outcome: &SyncOutcome) -> bool {
        let request: CancelRequest = CancelRequest {
            cancellation_reason_codes: vec![CancellationReason::Other.code().to_string()],
        };
        match self.hearings.cancel(&outcome.hearing.hearing_id, &request) {
            Ok(response) => {
                warn!(
                    case_id,
                    hearing_id = %response.hearing_id,
                    status = %response.status,
                    "Compensating cancellation accepted"
                );
                true
            }
            Err(e) => {
                error!(
                    case_id,
                    hearing_id = %outcome.hearing.hearing_id,
                    error = %e,
                    "Compensating cancellation failed"
                );
                false
            }
        }
    }

    /// Writes an outcome back to the case store.
    ///
    /// Returns the case version after the write. Writing an outcome that is
    /// already recorded changes nothing and returns the current version.
    ///
    /// # Arguments
    ///
    /// * `case_id` - The case to write
    /// * `outcome` - The hearing service result to record
    /// * `cause` - Recorded on the audit event
    ///
    /// # Errors
    ///
    /// Returns `SyncExhausted` once every attempt has conflicted (after one
    /// compensating cancellation, except for cancel outcomes), or `CaseStore`
    /// for any other store failure.
    pub fn persist(
        &self,
        case_id: &str,
        outcome: &SyncOutcome,
        cause: &Cause,
    ) -> Result<i64, CoreError> {
        let action: &'static str = outcome.action.as_str();
        match retry_on_conflict(&self.policy, |_| self.write_once(case_id, outcome, cause)) {
            Ok(version) => {
                info!(
                    case_id,
                    action,
                    hearing_id = %outcome.hearing.hearing_id,
                    case_version = version,
                    "Hearing outcome persisted"
                );
                Ok(version)
            }
            Err(RetryError::Fatal(source)) => Err(CoreError::CaseStore {
                case_id: case_id.to_string(),
                action,
                source,
            }),
            Err(RetryError::Exhausted { attempts }) => {
                error!(
                    case_id,
                    action,
                    hearing_id = %outcome.hearing.hearing_id,
                    attempts,
                    "Retry budget exhausted writing hearing outcome"
                );
                let compensated: bool =
                    outcome.action != HearingAction::Cancel && self.compensate(case_id, outcome);
                Err(CoreError::SyncExhausted {
                    case_id: case_id.to_string(),
                    action,
                    hearing_id: outcome.hearing.hearing_id.clone(),
                    attempts,
                    compensated,
                })
            }
        }
    }
}

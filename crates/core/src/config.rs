// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hearing_sync_audit::Actor;
use hearing_sync_domain::DerivationOptions;
use std::str::FromStr;
use std::time::Duration;

/// Default number of write attempts before compensating.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Default delay between write attempts.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(1000);

/// Bounded retry for case store write conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Never less than one.
    pub max_attempts: u32,
    /// Fixed delay between attempts.
    pub backoff: Duration,
}

impl RetryPolicy {
    /// Creates a retry policy. Zero attempts is raised to one.
    #[must_use]
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_BACKOFF)
    }
}

/// What CREATE does when the existing-hearing lookup fails transiently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExistingHearingLookupPolicy {
    /// Create anyway. A duplicate outstanding hearing is possible.
    #[default]
    ProceedToCreate,
    /// Fail the trigger without creating.
    Abort,
}

impl FromStr for ExistingHearingLookupPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "proceed" | "proceed-to-create" => Ok(Self::ProceedToCreate),
            "abort" => Ok(Self::Abort),
            _ => Err(format!("unknown lookup policy '{s}'")),
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EngineConfig {
    pub retry: RetryPolicy,
    pub derivation: DerivationOptions,
    pub lookup_policy: ExistingHearingLookupPolicy,
    /// Recorded on every audit event the engine writes.
    pub actor: Actor,
}

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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod config;
mod engine;
mod error;
mod ports;
mod sync;
mod trigger;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use config::{
    DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_BACKOFF, EngineConfig, ExistingHearingLookupPolicy,
    RetryPolicy,
};
pub use engine::{Engine, PARTIES_NOTIFIED, SyncResult};
pub use error::CoreError;
pub use ports::{
    CaseStore, CaseStoreError, HearingResponse, HearingService, HearingServiceError,
    VersionedCase,
};
pub use sync::{RetryError, SyncOutcome, SyncRetrier, retry_on_conflict};
pub use trigger::{HearingAction, LifecycleTrigger};

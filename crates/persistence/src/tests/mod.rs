// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod audit_tests;
mod case_store_tests;
mod initialization_tests;

use hearing_sync_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use hearing_sync_domain::{CaseSnapshot, HearingRecord, HearingStatus};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("test-actor"), String::from("system"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("CREATE_HEARING"))
}

pub fn create_test_case(case_id: &str) -> CaseSnapshot {
    let mut case: CaseSnapshot = CaseSnapshot::new(case_id, "002", "DD");
    case.regional_processing_centre = Some(String::from("Leeds"));
    case.processing_venue = Some(String::from("1001"));
    case
}

pub fn create_test_event(case_id: &str, action: &str) -> AuditEvent {
    AuditEvent::new(
        String::from(case_id),
        create_test_actor(),
        create_test_cause(),
        Action::new(String::from(action), Some(String::from("hearing H1 v1"))),
        StateSnapshot::new(String::new()),
        StateSnapshot::new(String::from("H1@1:HEARING_REQUESTED")),
    )
}

pub fn with_hearing(mut case: CaseSnapshot, hearing_id: &str, version: i64) -> CaseSnapshot {
    case.hearings.push(HearingRecord {
        hearing_id: String::from(hearing_id),
        version,
        status: HearingStatus::HearingRequested,
    });
    case
}

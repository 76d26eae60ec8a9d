// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Mutex;
use std::time::Duration;

use hearing_sync_audit::{Actor, AuditEvent, Cause};
use hearing_sync_domain::{
    CancelRequest, CaseSnapshot, DurationEntry, DurationTuple, ExistingHearingRecord,
    HearingOptions, HearingRecord, HearingRequestPayload, HearingStatus, Name, PanelMemberType,
    PartiesNotified, SessionCategory, SessionCategoryEntry, StaticReferenceData, VenueEntry, YesNo,
};
use time::OffsetDateTime;

use crate::{
    CaseStore, CaseStoreError, Engine, EngineConfig, HearingResponse, HearingService,
    HearingServiceError, RetryPolicy, VersionedCase,
};

/// One recorded hearing service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create,
    Update {
        hearing_id: String,
        version: Option<i64>,
    },
    Cancel {
        hearing_id: String,
        reasons: Vec<String>,
    },
    GetById(String),
    ListByCase(String),
    PartiesNotified {
        hearing_id: String,
        version: i64,
    },
}

/// Hearing service fake that records every call.
#[derive(Debug, Default)]
pub struct FakeHearingService {
    calls: Mutex<Vec<Call>>,
    existing: Vec<ExistingHearingRecord>,
    list_error: Option<HearingServiceError>,
    create_error: Option<HearingServiceError>,
}

impl FakeHearingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_existing(mut self, record: ExistingHearingRecord) -> Self {
        self.existing.push(record);
        self
    }

    pub fn with_list_error(mut self, error: HearingServiceError) -> Self {
        self.list_error = Some(error);
        self
    }

    pub fn with_create_error(mut self, error: HearingServiceError) -> Self {
        self.create_error = Some(error);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that change hearing state.
    pub fn mutating_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| {
                matches!(
                    c,
                    Call::Create | Call::Update { .. } | Call::Cancel { .. }
                )
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl HearingService for FakeHearingService {
    fn create(
        &self,
        _payload: &HearingRequestPayload,
    ) -> Result<HearingResponse, HearingServiceError> {
        self.record(Call::Create);
        if let Some(error) = &self.create_error {
            return Err(error.clone());
        }
        Ok(HearingResponse {
            hearing_id: String::from("H100"),
            version_number: 1,
            status: HearingStatus::HearingRequested,
        })
    }

    fn update(
        &self,
        hearing_id: &str,
        payload: &HearingRequestPayload,
    ) -> Result<HearingResponse, HearingServiceError> {
        let version: Option<i64> = payload.request_details.version_number;
        self.record(Call::Update {
            hearing_id: String::from(hearing_id),
            version,
        });
        Ok(HearingResponse {
            hearing_id: String::from(hearing_id),
            version_number: version.unwrap_or(0) + 1,
            status: HearingStatus::UpdateRequested,
        })
    }

    fn cancel(
        &self,
        hearing_id: &str,
        request: &CancelRequest,
    ) -> Result<HearingResponse, HearingServiceError> {
        self.record(Call::Cancel {
            hearing_id: String::from(hearing_id),
            reasons: request.cancellation_reason_codes.clone(),
        });
        let version: i64 = self
            .existing
            .iter()
            .find(|r| r.hearing_id == hearing_id)
            .and_then(|r| r.request_version)
            .unwrap_or(1);
        Ok(HearingResponse {
            hearing_id: String::from(hearing_id),
            version_number: version,
            status: HearingStatus::CancellationRequested,
        })
    }

    fn get_by_id(&self, hearing_id: &str) -> Result<ExistingHearingRecord, HearingServiceError> {
        self.record(Call::GetById(String::from(hearing_id)));
        self.existing
            .iter()
            .find(|r| r.hearing_id == hearing_id)
            .cloned()
            .ok_or_else(|| HearingServiceError::ClientError {
                status: 404,
                message: format!("hearing {hearing_id} not found"),
            })
    }

    fn list_by_case(
        &self,
        case_id: &str,
    ) -> Result<Vec<ExistingHearingRecord>, HearingServiceError> {
        self.record(Call::ListByCase(String::from(case_id)));
        match &self.list_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.existing.clone()),
        }
    }

    fn update_parties_notified(
        &self,
        hearing_id: &str,
        version: i64,
        _received_at: OffsetDateTime,
        _body: &PartiesNotified,
    ) -> Result<(), HearingServiceError> {
        self.record(Call::PartiesNotified {
            hearing_id: String::from(hearing_id),
            version,
        });
        Ok(())
    }
}

#[derive(Debug)]
struct StoreState {
    case: Option<CaseSnapshot>,
    version: i64,
    scripted_conflicts: u32,
    backend_error: Option<String>,
    writes: u32,
    events: Vec<AuditEvent>,
}

/// Case store fake with a version counter and scripted conflicts.
#[derive(Debug)]
pub struct FakeCaseStore {
    state: Mutex<StoreState>,
}

impl FakeCaseStore {
    pub fn new(case: CaseSnapshot) -> Self {
        Self {
            state: Mutex::new(StoreState {
                case: Some(case),
                version: 1,
                scripted_conflicts: 0,
                backend_error: None,
                writes: 0,
                events: Vec::new(),
            }),
        }
    }

    pub fn empty() -> Self {
        let store: Self = Self::new(create_test_case());
        store.state.lock().unwrap().case = None;
        store
    }

    /// The next `count` writes fail with a conflict.
    pub fn with_conflicts(self, count: u32) -> Self {
        self.state.lock().unwrap().scripted_conflicts = count;
        self
    }

    /// Every write fails with a backend error.
    pub fn with_backend_error(self, message: &str) -> Self {
        self.state.lock().unwrap().backend_error = Some(String::from(message));
        self
    }

    pub fn snapshot(&self) -> CaseSnapshot {
        self.state.lock().unwrap().case.clone().unwrap()
    }

    pub fn version(&self) -> i64 {
        self.state.lock().unwrap().version
    }

    /// Successful writes.
    pub fn writes(&self) -> u32 {
        self.state.lock().unwrap().writes
    }

    pub fn events(&self) -> Vec<AuditEvent> {
        self.state.lock().unwrap().events.clone()
    }
}

impl CaseStore for FakeCaseStore {
    fn read(&self, case_id: &str) -> Result<VersionedCase, CaseStoreError> {
        let state = self.state.lock().unwrap();
        match &state.case {
            Some(case) if case.case_id == case_id => Ok(VersionedCase {
                snapshot: case.clone(),
                version: state.version,
            }),
            _ => Err(CaseStoreError::NotFound {
                case_id: String::from(case_id),
            }),
        }
    }

    fn write(
        &self,
        case_id: &str,
        snapshot: &CaseSnapshot,
        expected_version: i64,
        event: &AuditEvent,
    ) -> Result<i64, CaseStoreError> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = &state.backend_error {
            return Err(CaseStoreError::Backend(message.clone()));
        }
        if state.scripted_conflicts > 0 || state.version != expected_version {
            state.scripted_conflicts = state.scripted_conflicts.saturating_sub(1);
            return Err(CaseStoreError::Conflict {
                case_id: String::from(case_id),
                expected_version,
            });
        }
        state.case = Some(snapshot.clone());
        state.version += 1;
        state.writes += 1;
        state.events.push(event.clone());
        Ok(state.version)
    }
}

pub type TestEngine = Engine<FakeHearingService, FakeCaseStore, StaticReferenceData>;

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("CREATE_HEARING"))
}

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("caseworker-7"), String::from("caseworker"))
}

/// Engine config with no backoff between attempts.
pub fn create_test_config() -> EngineConfig {
    EngineConfig {
        retry: RetryPolicy::new(3, Duration::ZERO),
        actor: create_test_actor(),
        ..EngineConfig::default()
    }
}

/// Reference data with venue 1001 in Leeds and 60-minute face-to-face hearings.
pub fn create_test_reference() -> StaticReferenceData {
    StaticReferenceData {
        venues: vec![VenueEntry {
            venue_id: String::from("1001"),
            location_id: String::from("L100"),
            region: String::from("Leeds"),
            active: true,
        }],
        durations: vec![DurationEntry {
            benefit_code: String::from("002"),
            issue_code: String::from("DD"),
            durations: DurationTuple {
                paper: Some(30),
                face_to_face: Some(60),
                interpreter: Some(75),
            },
        }],
        session_categories: vec![SessionCategoryEntry {
            benefit_code: String::from("002"),
            issue_code: String::from("DD"),
            interpreter_required: None,
            urgent: None,
            category: SessionCategory {
                code: String::from("2"),
                panel_members: vec![
                    PanelMemberType::TribunalJudge,
                    PanelMemberType::TribunalMemberMedical,
                ],
            },
        }],
        ..StaticReferenceData::default()
    }
}

/// A face-to-face case at venue 1001 with no hearing history.
pub fn create_test_case() -> CaseSnapshot {
    let mut case: CaseSnapshot = CaseSnapshot::new("1234", "002", "DD");
    case.regional_processing_centre = Some(String::from("Leeds"));
    case.processing_venue = Some(String::from("1001"));
    case.appellant.name = Name {
        title: None,
        first_name: String::from("Jane"),
        last_name: String::from("Doe"),
    };
    case.appellant.hearing_options = HearingOptions {
        wants_to_attend: Some(YesNo::Yes),
        wants_hearing_type_face_to_face: Some(YesNo::Yes),
        ..HearingOptions::default()
    };
    case
}

/// The test case with an outstanding hearing H100 at version 2.
pub fn create_test_case_with_hearing() -> CaseSnapshot {
    let mut case: CaseSnapshot = create_test_case();
    case.appellant.id = Some(String::from("1"));
    case.hearings.push(HearingRecord {
        hearing_id: String::from("H100"),
        version: 2,
        status: HearingStatus::AwaitingListing,
    });
    case
}

pub fn create_existing(hearing_id: &str, version: Option<i64>) -> ExistingHearingRecord {
    ExistingHearingRecord {
        hearing_id: String::from(hearing_id),
        request_version: version,
        status: HearingStatus::AwaitingListing,
    }
}

pub fn create_test_engine(hearings: FakeHearingService, store: FakeCaseStore) -> TestEngine {
    Engine::new(hearings, store, create_test_reference(), create_test_config())
}

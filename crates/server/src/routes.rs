// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP surface over the engine and the case store.
//!
//! Engine calls block on the hearing service and on `SQLite`, so every
//! handler hands its work to `spawn_blocking`.

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use hearing_sync::{
    CaseStoreError, CoreError, Engine, HearingService, HearingServiceError, LifecycleTrigger,
    SyncResult,
};
use hearing_sync_audit::{AuditEvent, Cause};
use hearing_sync_domain::{CaseSnapshot, ErrorKind, HearingRecord, StaticReferenceData};
use hearing_sync_persistence::{PersistenceError, SqliteCaseStore, StoredAuditEvent};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::{error, info};

/// The engine as wired by the server.
pub type ServerEngine =
    Engine<Box<dyn HearingService + Send + Sync>, SqliteCaseStore, StaticReferenceData>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ServerEngine>,
}

/// Errors surfaced to HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request was malformed.
    #[error("{0}")]
    BadRequest(String),
    /// The case does not exist.
    #[error("Case {0} not found")]
    CaseNotFound(String),
    /// The engine failed.
    #[error(transparent)]
    Engine(#[from] CoreError),
    /// The case store failed outside the engine.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    /// A blocking task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(String),
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable failure class.
    pub kind: String,
}

/// HTTP error with status code and body.
#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: self.message,
            kind: String::from(self.kind),
        });
        (self.status, body).into_response()
    }
}

const fn service_status(err: &HearingServiceError) -> StatusCode {
    match err {
        HearingServiceError::ServerError { .. } | HearingServiceError::Transport(_) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        HearingServiceError::ClientError { .. } | HearingServiceError::InvalidResponse(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let (status, kind): (StatusCode, &'static str) = match &err {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "badRequest"),
            ApiError::CaseNotFound(_) | ApiError::Persistence(PersistenceError::CaseNotFound(_)) => {
                (StatusCode::NOT_FOUND, "notFound")
            }
            ApiError::Engine(core) => match core {
                CoreError::Derivation { .. } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    core.domain_kind().as_ref().map_or("mapping", ErrorKind::as_str),
                ),
                CoreError::NoOutstandingHearing { .. }
                | CoreError::CaseStore {
                    source: CaseStoreError::NotFound { .. },
                    ..
                } => (StatusCode::NOT_FOUND, "notFound"),
                CoreError::SyncExhausted { .. } => (StatusCode::CONFLICT, "conflict"),
                CoreError::HearingService { source, .. } => {
                    (service_status(source), "hearingService")
                }
                CoreError::HearingVersionUnknown { .. } => {
                    (StatusCode::BAD_GATEWAY, "hearingService")
                }
                CoreError::CaseStore { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "caseStore"),
            },
            ApiError::Persistence(_) | ApiError::Task(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
        };
        if status.is_server_error() {
            error!(error = %err, "Request failed");
        }
        Self {
            status,
            kind,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        HttpError::from(self).into_response()
    }
}

/// A lifecycle trigger delivered for a case.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerRequest {
    pub trigger: LifecycleTrigger,
    /// Correlates the audit event with the caller's request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause_id: Option<String>,
}

/// Outcome of a trigger.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerResponse {
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hearing_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_version: Option<i64>,
}

impl From<SyncResult> for TriggerResponse {
    fn from(result: SyncResult) -> Self {
        match result {
            SyncResult::Applied {
                action,
                hearing,
                case_version,
            } => {
                let HearingRecord {
                    hearing_id,
                    version,
                    status,
                } = hearing;
                Self {
                    applied: true,
                    action: Some(action.to_string()),
                    hearing_id: Some(hearing_id),
                    version: Some(version),
                    status: Some(status.to_string()),
                    case_version: Some(case_version),
                }
            }
            SyncResult::Ignored => Self {
                applied: false,
                action: None,
                hearing_id: None,
                version: None,
                status: None,
                case_version: None,
            },
        }
    }
}

/// A stored case and its version.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseResponse {
    pub version: i64,
    pub case: CaseSnapshot,
}

/// Body of a parties-notified request.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartiesNotifiedRequest {
    /// Defaults to the time the request is handled.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub received_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartiesNotifiedResponse {
    pub hearing_id: String,
    pub version: i64,
}

/// One audit event with its position in the case's history.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEventResponse {
    pub event_id: i64,
    pub case_version: i64,
    pub event: AuditEvent,
}

impl From<StoredAuditEvent> for AuditEventResponse {
    fn from(stored: StoredAuditEvent) -> Self {
        Self {
            event_id: stored.event_id,
            case_version: stored.case_version,
            event: stored.event,
        }
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Task(e.to_string()))?
}

/// Handler for PUT `/cases/{case_id}`.
///
/// Stores the case as given, bypassing the engine.
async fn handle_put_case(
    AxumState(app_state): AxumState<AppState>,
    Path(case_id): Path<String>,
    Json(case): Json<CaseSnapshot>,
) -> Result<Json<CaseResponse>, ApiError> {
    if case.case_id != case_id {
        return Err(ApiError::BadRequest(format!(
            "Case id {} in body does not match path {case_id}",
            case.case_id
        )));
    }

    let engine: Arc<ServerEngine> = Arc::clone(&app_state.engine);
    run_blocking(move || {
        let version: i64 = engine.store().put_case(&case)?;
        info!(case_id = %case.case_id, version, "Stored case");
        Ok(Json(CaseResponse { version, case }))
    })
    .await
}

/// Handler for GET `/cases/{case_id}`.
async fn handle_get_case(
    AxumState(app_state): AxumState<AppState>,
    Path(case_id): Path<String>,
) -> Result<Json<CaseResponse>, ApiError> {
    let engine: Arc<ServerEngine> = Arc::clone(&app_state.engine);
    run_blocking(move || match engine.store().get_case(&case_id) {
        Ok(versioned) => Ok(Json(CaseResponse {
            version: versioned.version,
            case: versioned.snapshot,
        })),
        Err(PersistenceError::CaseNotFound(_)) => Err(ApiError::CaseNotFound(case_id)),
        Err(e) => Err(e.into()),
    })
    .await
}

/// Handler for POST `/cases/{case_id}/triggers`.
async fn handle_trigger(
    AxumState(app_state): AxumState<AppState>,
    Path(case_id): Path<String>,
    Json(request): Json<TriggerRequest>,
) -> Result<Json<TriggerResponse>, ApiError> {
    let engine: Arc<ServerEngine> = Arc::clone(&app_state.engine);
    run_blocking(move || {
        let cause: Cause = Cause::new(
            request
                .cause_id
                .unwrap_or_else(|| format!("{}-{case_id}", request.trigger.name())),
            format!("{} trigger", request.trigger),
        );
        let result: SyncResult = engine.handle(&case_id, &request.trigger, &cause)?;
        Ok(Json(TriggerResponse::from(result)))
    })
    .await
}

/// Handler for POST `/cases/{case_id}/hearings/{hearing_id}/parties-notified`.
async fn handle_parties_notified(
    AxumState(app_state): AxumState<AppState>,
    Path((case_id, hearing_id)): Path<(String, String)>,
    body: Option<Json<PartiesNotifiedRequest>>,
) -> Result<Json<PartiesNotifiedResponse>, ApiError> {
    let received_at: OffsetDateTime = body
        .and_then(|Json(request)| request.received_at)
        .unwrap_or_else(OffsetDateTime::now_utc);

    let engine: Arc<ServerEngine> = Arc::clone(&app_state.engine);
    run_blocking(move || {
        let version: i64 = engine.notify_parties(&case_id, &hearing_id, received_at)?;
        Ok(Json(PartiesNotifiedResponse {
            hearing_id,
            version,
        }))
    })
    .await
}

/// Handler for GET `/cases/{case_id}/audit`.
async fn handle_audit(
    AxumState(app_state): AxumState<AppState>,
    Path(case_id): Path<String>,
) -> Result<Json<Vec<AuditEventResponse>>, ApiError> {
    let engine: Arc<ServerEngine> = Arc::clone(&app_state.engine);
    run_blocking(move || {
        let events: Vec<StoredAuditEvent> = engine.store().audit_events(&case_id)?;
        Ok(Json(
            events.into_iter().map(AuditEventResponse::from).collect(),
        ))
    })
    .await
}

/// Builds the application router.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/cases/{case_id}", get(handle_get_case).put(handle_put_case))
        .route("/cases/{case_id}/triggers", post(handle_trigger))
        .route(
            "/cases/{case_id}/hearings/{hearing_id}/parties-notified",
            post(handle_parties_notified),
        )
        .route("/cases/{case_id}/audit", get(handle_audit))
        .with_state(app_state)
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Blocking JSON client for the external hearing service.

use std::time::Duration;

use hearing_sync::{HearingResponse, HearingService, HearingServiceError};
use hearing_sync_domain::{
    CancelRequest, ExistingHearingRecord, HearingRequestPayload, PartiesNotified,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;

/// Reply body of `GET /hearings/{caseId}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaseHearingsResponse {
    #[serde(default)]
    case_hearings: Vec<ExistingHearingRecord>,
}

/// Hearing service client over HTTP.
#[derive(Debug, Clone)]
pub struct HttpHearingService {
    agent: ureq::Agent,
    base_url: String,
    token: Option<String>,
}

impl HttpHearingService {
    /// Creates a client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Service root, without a trailing slash
    /// * `token` - Sent as a bearer token on every request
    /// * `timeout` - Applied to connect, read, and write
    #[must_use]
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .timeout_write(timeout)
            .build();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn request(&self, method: &str, path: &str) -> ureq::Request {
        let url: String = format!("{}{path}", self.base_url);
        debug!(method, url = %url, "Hearing service request");
        let request: ureq::Request = self
            .agent
            .request(method, &url)
            .set("accept", "application/json");
        match &self.token {
            Some(token) => request.set("authorization", &format!("Bearer {token}")),
            None => request,
        }
    }
}

/// Maps a ureq failure onto the service error taxonomy.
#[must_use]
pub fn map_error(err: ureq::Error) -> HearingServiceError {
    match err {
        ureq::Error::Status(status, response) => {
            let message: String = response.into_string().unwrap_or_default();
            classify_status(status, message)
        }
        ureq::Error::Transport(transport) => HearingServiceError::Transport(transport.to_string()),
    }
}

/// 5xx is a server failure; anything else that is not a success is the
/// caller's fault.
#[must_use]
pub const fn classify_status(status: u16, message: String) -> HearingServiceError {
    if status >= 500 {
        HearingServiceError::ServerError { status, message }
    } else {
        HearingServiceError::ClientError { status, message }
    }
}

fn read_json<T: DeserializeOwned>(response: ureq::Response) -> Result<T, HearingServiceError> {
    response
        .into_json::<T>()
        .map_err(|e| HearingServiceError::InvalidResponse(e.to_string()))
}

impl HearingService for HttpHearingService {
    fn create(
        &self,
        payload: &HearingRequestPayload,
    ) -> Result<HearingResponse, HearingServiceError> {
        let response: ureq::Response = self
            .request("POST", "/hearing")
            .send_json(payload)
            .map_err(map_error)?;
        read_json(response)
    }

    fn update(
        &self,
        hearing_id: &str,
        payload: &HearingRequestPayload,
    ) -> Result<HearingResponse, HearingServiceError> {
        let response: ureq::Response = self
            .request("PUT", &format!("/hearing/{hearing_id}"))
            .send_json(payload)
            .map_err(map_error)?;
        read_json(response)
    }

    fn cancel(
        &self,
        hearing_id: &str,
        request: &CancelRequest,
    ) -> Result<HearingResponse, HearingServiceError> {
        let response: ureq::Response = self
            .request("DELETE", &format!("/hearing/{hearing_id}"))
            .send_json(request)
            .map_err(map_error)?;
        read_json(response)
    }

    fn get_by_id(&self, hearing_id: &str) -> Result<ExistingHearingRecord, HearingServiceError> {
        let response: ureq::Response = self
            .request("GET", &format!("/hearing/{hearing_id}"))
            .call()
            .map_err(map_error)?;
        read_json(response)
    }

    fn list_by_case(
        &self,
        case_id: &str,
    ) -> Result<Vec<ExistingHearingRecord>, HearingServiceError> {
        let response: ureq::Response = self
            .request("GET", &format!("/hearings/{case_id}"))
            .call()
            .map_err(map_error)?;
        read_json::<CaseHearingsResponse>(response).map(|r| r.case_hearings)
    }

    fn update_parties_notified(
        &self,
        hearing_id: &str,
        version: i64,
        received_at: OffsetDateTime,
        body: &PartiesNotified,
    ) -> Result<(), HearingServiceError> {
        let received: String = received_at
            .format(&Rfc3339)
            .map_err(|e| HearingServiceError::Transport(format!("unformattable timestamp: {e}")))?;
        self.request("PUT", "/partiesNotified")
            .query("hearing_id", hearing_id)
            .query("version", &version.to_string())
            .query("received", &received)
            .send_json(body)
            .map_err(map_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_statuses_are_transient() {
        let err: HearingServiceError = classify_status(503, String::from("down"));
        assert!(matches!(
            err,
            HearingServiceError::ServerError { status: 503, .. }
        ));
        assert!(err.is_transient());
    }

    #[test]
    fn test_client_statuses_are_not_transient() {
        let err: HearingServiceError = classify_status(400, String::from("bad payload"));
        assert!(matches!(
            err,
            HearingServiceError::ClientError { status: 400, .. }
        ));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client: HttpHearingService = HttpHearingService::new(
            "http://hmc.local/",
            None,
            Duration::from_secs(5),
        );
        assert_eq!(client.base_url, "http://hmc.local");
    }

    #[test]
    fn test_unreachable_service_is_transport_error() {
        // Port 9 (discard) is closed on test hosts
        let client: HttpHearingService = HttpHearingService::new(
            "http://127.0.0.1:9",
            Some(String::from("token")),
            Duration::from_millis(200),
        );

        let result: Result<ExistingHearingRecord, HearingServiceError> = client.get_by_id("H1");

        assert!(matches!(result, Err(HearingServiceError::Transport(_))));
    }

    #[test]
    fn test_case_hearings_body_parses() {
        let body: CaseHearingsResponse = serde_json::from_str(
            r#"{"caseHearings":[{"hearingId":"H1","requestVersion":2,"status":"LISTED"}]}"#,
        )
        .unwrap();
        assert_eq!(body.case_hearings.len(), 1);
        assert_eq!(body.case_hearings[0].request_version, Some(2));
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::panel::PanelRequirements;
use crate::party::PartyDetails;
use crate::types::HearingChannel;

/// Listing priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HearingPriority {
    Urgent,
    Standard,
}

/// Location kind understood by the hearing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Court,
}

/// One candidate hearing location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HearingLocation {
    pub location_id: String,
    pub location_type: LocationType,
}

/// Earliest date the hearing may be listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HearingWindow {
    pub date_range_start: Date,
}

/// Request metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDetails {
    /// Version of the hearing being updated. `None` on create.
    pub version_number: Option<i64>,
}

/// A case category sent with the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseCategory {
    pub category_type: String,
    pub category_value: String,
    pub category_parent: Option<String>,
}

/// Case metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDetails {
    pub hmcts_service_code: String,
    pub case_ref: String,
    pub external_case_reference: Option<String>,
    pub hmcts_internal_case_name: String,
    pub public_case_name: String,
    pub case_additional_security_flag: bool,
    pub case_interpreter_required_flag: bool,
    pub case_categories: Vec<CaseCategory>,
    pub case_management_location_code: Option<String>,
    pub case_restricted_flag: bool,
    pub case_sla_start_date: Option<Date>,
}

/// Hearing attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HearingDetails {
    pub auto_list_flag: bool,
    pub hearing_type: String,
    pub hearing_window: Option<HearingWindow>,
    /// Minutes.
    pub duration: u32,
    pub hearing_priority_type: HearingPriority,
    pub number_of_physical_attendees: u32,
    pub hearing_locations: Vec<HearingLocation>,
    pub private_hearing_required_flag: bool,
    pub hearing_is_linked_flag: bool,
    pub panel_requirements: PanelRequirements,
    pub hearing_channels: Vec<HearingChannel>,
}

/// The assembled hearing request.
///
/// Built fresh for every action and never modified once sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HearingRequestPayload {
    pub request_details: RequestDetails,
    pub hearing_details: HearingDetails,
    pub case_details: CaseDetails,
    pub party_details: Vec<PartyDetails>,
}

/// Body of a cancellation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelRequest {
    pub cancellation_reason_codes: Vec<String>,
}

/// Body of a parties-notified update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartiesNotified {
    pub service_data: PartiesNotifiedServiceData,
}

/// Service-specific data carried on a parties-notified update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartiesNotifiedServiceData {
    pub hearing_notice_generated: bool,
}

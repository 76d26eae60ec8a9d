// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payload assembly.
//!
//! Composes the resolver outputs into a single [`HearingRequestPayload`].
//! Every overridable attribute is read through the [`OverrideCascade`].

use time::Date;

use crate::case::{CaseEventType, CaseSnapshot};
use crate::channel::aggregate_case_channel;
use crate::duration::{MIN_OVERRIDE_DURATION, validate_duration};
use crate::error::DomainError;
use crate::location::map_venues_to_locations;
use crate::options::DerivationOptions;
use crate::overrides::OverrideCascade;
use crate::panel::{PanelRequirements, resolve_panel};
use crate::party::{PartyDetails, assign_party_ids, build_parties};
use crate::payload::{
    CaseCategory, CaseDetails, HearingDetails, HearingLocation, HearingPriority,
    HearingRequestPayload, HearingWindow, LocationType, RequestDetails,
};
use crate::reference::ReferenceData;
use crate::types::HearingChannel;

/// A payload together with the case it was derived from.
///
/// `case` is the input snapshot with party ids assigned. The synchronization
/// step copies those ids back onto the stored case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledRequest {
    pub payload: HearingRequestPayload,
    pub case: CaseSnapshot,
    /// Party ids handed out during assembly.
    pub assigned_party_ids: Vec<String>,
}

fn case_categories(case: &CaseSnapshot, service_code: &str) -> Vec<CaseCategory> {
    let case_type: String = format!("{service_code}-{}", case.benefit_code);
    vec![
        CaseCategory {
            category_type: String::from("caseType"),
            category_value: case_type.clone(),
            category_parent: None,
        },
        CaseCategory {
            category_type: String::from("caseSubType"),
            category_value: format!("{case_type}-{}", case.issue_code),
            category_parent: Some(case_type),
        },
    ]
}

fn physical_attendees(parties: &[PartyDetails]) -> u32 {
    let count: usize = parties
        .iter()
        .filter(|p| p.channel() == Some(HearingChannel::FaceToFace))
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Builds the hearing request for a case.
///
/// The snapshot is not modified; party ids are assigned on a copy returned
/// in the result.
///
/// # Arguments
///
/// * `case` - The case snapshot
/// * `reference` - Reference data lookups
/// * `options` - Derivation options
/// * `version` - Version of the hearing being updated, if any
///
/// # Errors
///
/// Returns the first mapping or listing error raised by a resolver.
pub fn build_hearing_request(
    case: &CaseSnapshot,
    reference: &dyn ReferenceData,
    options: &DerivationOptions,
    version: Option<i64>,
) -> Result<AssembledRequest, DomainError> {
    let mut working: CaseSnapshot = case.clone();
    let assigned_party_ids: Vec<String> = assign_party_ids(&mut working)?;

    let payload: HearingRequestPayload = {
        let cascade: OverrideCascade<'_> = OverrideCascade::for_case(&working, reference, options)?;

        let duration_source: &'static str = if cascade
            .overrides()
            .duration
            .is_some_and(|d| d >= MIN_OVERRIDE_DURATION)
        {
            "override"
        } else {
            "duration"
        };
        let duration: u32 = validate_duration(cascade.duration(), duration_source)?;

        let parties: Vec<PartyDetails> =
            build_parties(&working, reference, &cascade, options.channel_policy)?;
        let hearing_channels: Vec<HearingChannel> =
            aggregate_case_channel(parties.iter().filter_map(PartyDetails::channel));

        let hearing_locations: Vec<HearingLocation> =
            map_venues_to_locations(cascade.hearing_venue_ids(), reference)?
                .into_iter()
                .map(|location_id| HearingLocation {
                    location_id,
                    location_type: LocationType::Court,
                })
                .collect();

        let interpreter_required: bool = cascade.interpreter_required();
        let panel_requirements: PanelRequirements = resolve_panel(
            &working,
            reference,
            interpreter_required,
            cascade.reserved_judge(),
            options.adjournment_enabled,
        )?;

        let management_location: Option<String> = working
            .processing_venue
            .as_deref()
            .and_then(|venue| reference.location_for_venue(venue));
        let sla_start: Option<Date> = working.latest_event(CaseEventType::AppealReceived);
        let case_name: String = working.case_name();

        HearingRequestPayload {
            request_details: RequestDetails {
                version_number: version,
            },
            hearing_details: HearingDetails {
                auto_list_flag: cascade.auto_list(),
                hearing_type: format!("{}-SUB", options.service_code),
                hearing_window: cascade
                    .hearing_window_start()
                    .map(|date_range_start| HearingWindow { date_range_start }),
                duration,
                hearing_priority_type: if working.urgent {
                    HearingPriority::Urgent
                } else {
                    HearingPriority::Standard
                },
                number_of_physical_attendees: physical_attendees(&parties),
                hearing_locations,
                private_hearing_required_flag: working.confidential,
                hearing_is_linked_flag: !working.linked_cases.is_empty(),
                panel_requirements,
                hearing_channels,
            },
            case_details: CaseDetails {
                hmcts_service_code: options.service_code.clone(),
                case_ref: working.case_id.clone(),
                external_case_reference: working.case_reference.clone(),
                hmcts_internal_case_name: case_name.clone(),
                public_case_name: case_name,
                case_additional_security_flag: working.confidential
                    || working.has_unacceptable_behaviour(),
                case_interpreter_required_flag: interpreter_required,
                case_categories: case_categories(&working, &options.service_code),
                case_management_location_code: management_location,
                case_restricted_flag: working.confidential,
                case_sla_start_date: sla_start,
            },
            party_details: parties,
        }
    };

    Ok(AssembledRequest {
        payload,
        case: working,
        assigned_party_ids,
    })
}

/// Checks an assembled payload against listing rules.
///
/// # Errors
///
/// Returns `DurationNotMultipleOfFive` for a duration the service would reject.
pub fn validate_payload(payload: &HearingRequestPayload) -> Result<(), DomainError> {
    validate_duration(payload.hearing_details.duration, "duration").map(|_| ())
}

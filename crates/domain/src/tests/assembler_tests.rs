// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_case, create_test_reference};
use crate::{
    AssembledRequest, CaseSnapshot, DerivationOptions, DomainError, ErrorKind, HearingChannel,
    HearingPriority, HearingRequestPayload, OtherParty, PartyRole, StaticReferenceData,
    build_hearing_request, validate_payload,
};

fn assemble(case: &CaseSnapshot) -> Result<AssembledRequest, DomainError> {
    let reference: StaticReferenceData = create_test_reference();
    build_hearing_request(case, &reference, &DerivationOptions::default(), None)
}

#[test]
fn test_face_to_face_case_end_to_end() {
    let case: CaseSnapshot = create_test_case();

    let assembled: AssembledRequest = assemble(&case).unwrap();
    let payload: &HearingRequestPayload = &assembled.payload;

    assert_eq!(
        payload.hearing_details.hearing_channels,
        vec![HearingChannel::FaceToFace]
    );
    assert_eq!(payload.hearing_details.duration, 60);
    let appellant = &payload.party_details[0];
    assert_eq!(appellant.party_role, PartyRole::Appellant);
    assert_eq!(appellant.channel(), Some(HearingChannel::FaceToFace));
    assert_eq!(payload.hearing_details.number_of_physical_attendees, 1);
    assert_eq!(payload.hearing_details.hearing_locations.len(), 1);
    assert_eq!(
        payload.hearing_details.hearing_locations[0].location_id,
        "L100"
    );
    assert_eq!(
        payload.hearing_details.hearing_priority_type,
        HearingPriority::Standard
    );
    assert!(payload.hearing_details.auto_list_flag);
    assert_eq!(payload.case_details.case_ref, "1234");
    assert_eq!(payload.case_details.hmcts_internal_case_name, "Jane Doe");
    assert_eq!(payload.request_details.version_number, None);
}

#[test]
fn test_payload_serializes_with_wire_names() {
    let case: CaseSnapshot = create_test_case();

    let assembled: AssembledRequest = assemble(&case).unwrap();
    let json: serde_json::Value = serde_json::to_value(&assembled.payload).unwrap();

    assert_eq!(json["hearingDetails"]["hearingChannels"][0], "INTER");
    assert_eq!(json["hearingDetails"]["duration"], 60);
    assert_eq!(json["hearingDetails"]["hearingPriorityType"], "Standard");
    assert_eq!(json["hearingDetails"]["hearingLocations"][0]["locationType"], "court");
    assert_eq!(json["partyDetails"][0]["partyRole"], "APEL");
    assert_eq!(json["partyDetails"][0]["partyType"], "INDIVIDUAL");
    assert_eq!(json["caseDetails"]["hmctsServiceCode"], "BBA3");
}

#[test]
fn test_override_of_31_minutes_fails_before_anything_is_sent() {
    let mut case: CaseSnapshot = create_test_case();
    case.overrides.duration = Some(31);

    let result: Result<AssembledRequest, DomainError> = assemble(&case);

    assert!(matches!(
        result,
        Err(DomainError::DurationNotMultipleOfFive {
            duration: 31,
            source_field: "override"
        })
    ));
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Listing);
}

#[test]
fn test_assembly_leaves_input_untouched() {
    let mut case: CaseSnapshot = create_test_case();
    case.other_parties = vec![OtherParty::default()];
    let before: CaseSnapshot = case.clone();

    let assembled: AssembledRequest = assemble(&case).unwrap();

    assert_eq!(case, before);
    assert_eq!(assembled.assigned_party_ids, vec![String::from("2")]);
    assert_eq!(assembled.case.other_parties[0].id.as_deref(), Some("2"));
}

#[test]
fn test_paper_case_lists_regional_venues() {
    let mut case: CaseSnapshot = create_test_case();
    case.appellant.hearing_options = crate::HearingOptions::default();

    let assembled: AssembledRequest = assemble(&case).unwrap();
    let details = &assembled.payload.hearing_details;

    assert_eq!(details.hearing_channels, vec![HearingChannel::Paper]);
    assert_eq!(details.duration, 30);
    assert_eq!(details.hearing_locations.len(), 3);
    assert_eq!(details.number_of_physical_attendees, 0);
}

#[test]
fn test_urgent_confidential_linked_case_flags() {
    let mut case: CaseSnapshot = create_test_case();
    case.urgent = true;
    case.confidential = true;
    case.linked_cases = vec![String::from("5678")];

    let assembled: AssembledRequest = assemble(&case).unwrap();
    let payload: &HearingRequestPayload = &assembled.payload;

    assert_eq!(
        payload.hearing_details.hearing_priority_type,
        HearingPriority::Urgent
    );
    assert!(payload.hearing_details.private_hearing_required_flag);
    assert!(payload.hearing_details.hearing_is_linked_flag);
    assert!(!payload.hearing_details.auto_list_flag);
    assert!(payload.case_details.case_restricted_flag);
}

#[test]
fn test_validate_payload_rejects_bad_duration() {
    let case: CaseSnapshot = create_test_case();
    let mut payload: HearingRequestPayload = assemble(&case).unwrap().payload;
    assert!(validate_payload(&payload).is_ok());

    payload.hearing_details.duration = 62;

    assert!(matches!(
        validate_payload(&payload),
        Err(DomainError::DurationNotMultipleOfFive { duration: 62, .. })
    ));
}

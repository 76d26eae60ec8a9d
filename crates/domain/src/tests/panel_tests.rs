// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_case, create_test_reference};
use crate::{
    AdjournmentPanelMember, CaseSnapshot, DomainError, ErrorKind, PanelExclusion, PanelMemberType,
    PanelPreference, PanelRequirements, RequirementType, SessionCategory, SessionCategoryEntry,
    StaticReferenceData, decode_member_token, panel_preferences, resolve_panel,
};

fn create_three_member_reference() -> StaticReferenceData {
    let mut reference: StaticReferenceData = create_test_reference();
    reference.session_categories.insert(
        0,
        SessionCategoryEntry {
            benefit_code: String::from("002"),
            issue_code: String::from("DD"),
            interpreter_required: None,
            urgent: Some(true),
            category: SessionCategory {
                code: String::from("7"),
                panel_members: vec![
                    PanelMemberType::TribunalJudge,
                    PanelMemberType::TribunalMemberMedical,
                    PanelMemberType::RegionalMedicalMember,
                    PanelMemberType::TribunalMemberDisability,
                ],
            },
        },
    );
    reference
}

fn adjournment_member(token: &str, member_type: PanelMemberType) -> AdjournmentPanelMember {
    AdjournmentPanelMember {
        member: String::from(token),
        member_type,
    }
}

fn create_adjourned_case(exclusion: PanelExclusion) -> CaseSnapshot {
    let mut case: CaseSnapshot = create_test_case();
    case.adjournment.in_progress = true;
    case.adjournment.panel_members_excluded = Some(exclusion);
    case.adjournment.panel_members = vec![
        adjournment_member("J100|84", PanelMemberType::TribunalJudge),
        adjournment_member("M200|58", PanelMemberType::TribunalMemberMedical),
        adjournment_member("F300|50", PanelMemberType::TribunalMemberFinanciallyQualified),
        adjournment_member("J100|84", PanelMemberType::TribunalJudge),
    ];
    case
}

#[test]
fn test_resolve_panel_maps_category() {
    let reference: StaticReferenceData = create_test_reference();
    let mut case: CaseSnapshot = create_test_case();
    case.panel_doctor_specialism = Some(String::from("cardiologist"));

    let panel: PanelRequirements = resolve_panel(&case, &reference, false, None, false).unwrap();

    assert_eq!(panel.role_types, vec![String::from("84"), String::from("58")]);
    assert_eq!(panel.authorisation_sub_types, vec![String::from("2")]);
    assert_eq!(
        panel.panel_specialisms,
        vec![String::from("BBA3-J"), String::from("BBA3-MQPM1-001")]
    );
    assert!(panel.panel_preferences.is_empty());
}

#[test]
fn test_medical_slots_take_doctor_specialisms_in_order() {
    let reference: StaticReferenceData = create_three_member_reference();
    let mut case: CaseSnapshot = create_test_case();
    case.urgent = true;
    case.panel_doctor_specialism = Some(String::from("psychiatrist"));
    case.second_panel_doctor_specialism = Some(String::from("eyeSurgeon"));

    let panel: PanelRequirements = resolve_panel(&case, &reference, false, None, false).unwrap();

    assert_eq!(panel.authorisation_sub_types, vec![String::from("7")]);
    assert_eq!(
        panel.panel_specialisms,
        vec![
            String::from("BBA3-J"),
            String::from("BBA3-MQPM1-006"),
            String::from("BBA3-MQPM1-003"),
            String::from("BBA3-DQPM"),
        ]
    );
}

#[test]
fn test_unknown_doctor_specialism_is_dropped() {
    let reference: StaticReferenceData = create_three_member_reference();
    let mut case: CaseSnapshot = create_test_case();
    case.urgent = true;
    case.panel_doctor_specialism = Some(String::from("astrologer"));

    let panel: PanelRequirements = resolve_panel(&case, &reference, false, None, false).unwrap();

    assert_eq!(
        panel.panel_specialisms,
        vec![String::from("BBA3-J"), String::from("BBA3-DQPM")]
    );
}

#[test]
fn test_missing_session_category_is_a_mapping_error() {
    let reference: StaticReferenceData = create_test_reference();
    let mut case: CaseSnapshot = create_test_case();
    case.issue_code = String::from("XX");

    let result: Result<PanelRequirements, DomainError> =
        resolve_panel(&case, &reference, true, None, false);

    assert!(matches!(
        result,
        Err(DomainError::SessionCategoryNotFound {
            interpreter_required: true,
            ..
        })
    ));
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Mapping);
}

#[test]
fn test_reserved_judge_is_must_include() {
    let case: CaseSnapshot = create_test_case();

    let preferences: Vec<PanelPreference> =
        panel_preferences(&case, Some("J999|84"), false).unwrap();

    assert_eq!(
        preferences,
        vec![PanelPreference {
            member_id: String::from("J999"),
            member_type: String::from("84"),
            requirement_type: RequirementType::MustInclude,
        }]
    );
}

#[test]
fn test_malformed_reserved_judge_token_fails() {
    let case: CaseSnapshot = create_test_case();

    let result: Result<Vec<PanelPreference>, DomainError> =
        panel_preferences(&case, Some("J999"), false);

    assert!(matches!(
        result,
        Err(DomainError::InvalidPanelMemberToken { .. })
    ));
    assert!(decode_member_token("|84").is_err());
}

#[test]
fn test_adjournment_exclusions_keep_judge_and_medical_members() {
    let case: CaseSnapshot = create_adjourned_case(PanelExclusion::Yes);

    let preferences: Vec<PanelPreference> = panel_preferences(&case, None, true).unwrap();

    assert_eq!(preferences.len(), 2);
    assert_eq!(preferences[0].member_id, "J100");
    assert_eq!(preferences[0].member_type, "84");
    assert_eq!(preferences[1].member_id, "M200");
    assert!(
        preferences
            .iter()
            .all(|p| p.requirement_type == RequirementType::Exclude)
    );
}

#[test]
fn test_adjournment_reserved_members_are_must_include() {
    let case: CaseSnapshot = create_adjourned_case(PanelExclusion::Reserved);

    let preferences: Vec<PanelPreference> = panel_preferences(&case, None, true).unwrap();

    assert!(
        preferences
            .iter()
            .all(|p| p.requirement_type == RequirementType::MustInclude)
    );
}

#[test]
fn test_adjournment_members_ignored_when_flag_off() {
    let case: CaseSnapshot = create_adjourned_case(PanelExclusion::Yes);

    let preferences: Vec<PanelPreference> = panel_preferences(&case, None, false).unwrap();

    assert!(preferences.is_empty());
}

#[test]
fn test_reserved_judge_takes_precedence_over_adjournment() {
    let case: CaseSnapshot = create_adjourned_case(PanelExclusion::Yes);

    let preferences: Vec<PanelPreference> =
        panel_preferences(&case, Some("J999|84"), true).unwrap();

    assert_eq!(preferences.len(), 1);
    assert_eq!(preferences[0].member_id, "J999");
}

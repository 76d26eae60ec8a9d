// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Panel composition and member preferences.

use serde::{Deserialize, Serialize};

use crate::case::CaseSnapshot;
use crate::error::DomainError;
use crate::reference::{ReferenceData, SessionCategory};
use crate::types::{DoctorSpecialism, PanelExclusion, PanelMemberType};

/// How a named panel member constrains listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequirementType {
    #[serde(rename = "MUSTINC")]
    MustInclude,
    #[serde(rename = "EXCLUDE")]
    Exclude,
}

/// A named panel member preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelPreference {
    pub member_id: String,
    pub member_type: String,
    pub requirement_type: RequirementType,
}

/// The panel the hearing requires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelRequirements {
    pub role_types: Vec<String>,
    pub authorisation_sub_types: Vec<String>,
    pub panel_specialisms: Vec<String>,
    pub panel_preferences: Vec<PanelPreference>,
}

/// Splits a `memberId|roleType` token.
///
/// # Errors
///
/// Returns `InvalidPanelMemberToken` unless both parts are present and non-empty.
pub fn decode_member_token(token: &str) -> Result<(String, String), DomainError> {
    match token.split_once('|') {
        Some((member_id, role_type))
            if !member_id.trim().is_empty() && !role_type.trim().is_empty() =>
        {
            Ok((member_id.trim().to_string(), role_type.trim().to_string()))
        }
        _ => Err(DomainError::InvalidPanelMemberToken {
            token: token.to_string(),
        }),
    }
}

/// Maps the category's slots to specialism references.
///
/// The first and second medically qualified slots take the case's first and
/// second doctor specialism. Slots whose specialism is missing or unknown
/// are dropped.
fn panel_specialisms(case: &CaseSnapshot, category: &SessionCategory) -> Vec<String> {
    let doctor_codes: [Option<&String>; 2] = [
        case.panel_doctor_specialism.as_ref(),
        case.second_panel_doctor_specialism.as_ref(),
    ];
    let mut medical_slot: usize = 0;
    let mut specialisms: Vec<String> = Vec::new();

    for member_type in &category.panel_members {
        if member_type.is_medically_qualified() {
            let code: Option<&String> = doctor_codes.get(medical_slot).copied().flatten();
            medical_slot += 1;
            if let Some(specialism) = code.and_then(|c| DoctorSpecialism::from_case_code(c)) {
                specialisms.push(specialism.reference().to_string());
            }
        } else {
            specialisms.push(member_type.specialism_reference().to_string());
        }
    }

    specialisms
}

fn role_types(category: &SessionCategory) -> Vec<String> {
    let mut roles: Vec<String> = Vec::new();
    for member_type in &category.panel_members {
        let reference: String = member_type.reference().to_string();
        if !roles.contains(&reference) {
            roles.push(reference);
        }
    }
    roles
}

fn adjournment_preferences(case: &CaseSnapshot) -> Result<Vec<PanelPreference>, DomainError> {
    let requirement_type: RequirementType = match case.adjournment.panel_members_excluded {
        Some(PanelExclusion::Yes) => RequirementType::Exclude,
        Some(PanelExclusion::Reserved) => RequirementType::MustInclude,
        Some(PanelExclusion::No) | None => return Ok(Vec::new()),
    };

    case.adjournment
        .panel_members
        .iter()
        .filter(|m| {
            matches!(
                m.member_type,
                PanelMemberType::TribunalJudge
                    | PanelMemberType::TribunalMemberMedical
                    | PanelMemberType::TribunalMemberDisability
            )
        })
        .map(|m| {
            let (member_id, _) = decode_member_token(&m.member)?;
            Ok(PanelPreference {
                member_id,
                member_type: m.member_type.reference().to_string(),
                requirement_type,
            })
        })
        .collect()
}

/// Builds the named-member preferences.
///
/// A reserved judge takes precedence; otherwise, with adjournment handling
/// enabled and an adjournment in progress, members named on the adjournment
/// are excluded or reserved. Repeated member ids keep their first entry.
///
/// # Errors
///
/// Returns `InvalidPanelMemberToken` for a malformed member token.
pub fn panel_preferences(
    case: &CaseSnapshot,
    reserved_judge: Option<&str>,
    adjournment_enabled: bool,
) -> Result<Vec<PanelPreference>, DomainError> {
    let candidates: Vec<PanelPreference> = match reserved_judge.filter(|t| !t.trim().is_empty()) {
        Some(token) => {
            let (member_id, role_type) = decode_member_token(token)?;
            vec![PanelPreference {
                member_id,
                member_type: role_type,
                requirement_type: RequirementType::MustInclude,
            }]
        }
        None if adjournment_enabled && case.adjournment.in_progress => {
            adjournment_preferences(case)?
        }
        None => Vec::new(),
    };

    let mut preferences: Vec<PanelPreference> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !preferences.iter().any(|p| p.member_id == candidate.member_id) {
            preferences.push(candidate);
        }
    }
    Ok(preferences)
}

/// Resolves the panel requirements for a case.
///
/// # Arguments
///
/// * `case` - The case snapshot
/// * `reference` - Reference data lookups
/// * `interpreter_required` - Whether an interpreter is needed
/// * `reserved_judge` - A `memberId|roleType` token for a reserved judge
/// * `adjournment_enabled` - Whether adjournment directions are honoured
///
/// # Errors
///
/// Returns `SessionCategoryNotFound` when no category matches, or
/// `InvalidPanelMemberToken` for a malformed member token.
pub fn resolve_panel(
    case: &CaseSnapshot,
    reference: &dyn ReferenceData,
    interpreter_required: bool,
    reserved_judge: Option<&str>,
    adjournment_enabled: bool,
) -> Result<PanelRequirements, DomainError> {
    let category: SessionCategory = reference
        .session_category(
            &case.benefit_code,
            &case.issue_code,
            interpreter_required,
            case.urgent,
        )
        .ok_or_else(|| DomainError::SessionCategoryNotFound {
            benefit_code: case.benefit_code.clone(),
            issue_code: case.issue_code.clone(),
            interpreter_required,
            urgent: case.urgent,
        })?;

    Ok(PanelRequirements {
        role_types: role_types(&category),
        authorisation_sub_types: vec![category.code.clone()],
        panel_specialisms: panel_specialisms(case, &category),
        panel_preferences: panel_preferences(case, reserved_judge, adjournment_enabled)?,
    })
}

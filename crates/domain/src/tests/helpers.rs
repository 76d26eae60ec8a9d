// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    CaseSnapshot, DurationEntry, DurationTuple, ExtraTimeEntry, HearingOptions, LanguageEntry,
    Name, PanelMemberType, SessionCategory, SessionCategoryEntry, StaticReferenceData, VenueEntry,
    YesNo,
};

fn venue(venue_id: &str, location_id: &str, region: &str, active: bool) -> VenueEntry {
    VenueEntry {
        venue_id: String::from(venue_id),
        location_id: String::from(location_id),
        region: String::from(region),
        active,
    }
}

fn language(name: &str, dialect: Option<&str>, reference: &str) -> LanguageEntry {
    LanguageEntry {
        name: String::from(name),
        dialect: dialect.map(String::from),
        reference: String::from(reference),
    }
}

/// Reference tables shared by the domain tests.
///
/// Leeds holds venues 1001, 1002, 3001 (active) and 1003 (inactive).
/// Venues 1002 and 3001 are listed together.
pub fn create_test_reference() -> StaticReferenceData {
    StaticReferenceData {
        venues: vec![
            venue("1001", "L100", "Leeds", true),
            venue("1002", "L200", "Leeds", true),
            venue("1003", "L300", "Leeds", false),
            venue("2001", "L400", "Cardiff", true),
            venue("3001", "L500", "Leeds", true),
        ],
        venue_groups: vec![vec![String::from("1002"), String::from("3001")]],
        languages: vec![
            language("Spanish", None, "spa"),
            language("Punjabi", Some("Pothwari"), "pan-pot"),
            language("British Sign Language (BSL)", None, "sign-bfi"),
        ],
        durations: vec![DurationEntry {
            benefit_code: String::from("002"),
            issue_code: String::from("DD"),
            durations: DurationTuple {
                paper: Some(30),
                face_to_face: Some(60),
                interpreter: Some(75),
            },
        }],
        extra_time: vec![ExtraTimeEntry {
            issue_code: String::from("AC"),
            minutes: 15,
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
    }
}

pub fn create_face_to_face_options() -> HearingOptions {
    HearingOptions {
        wants_to_attend: Some(YesNo::Yes),
        wants_hearing_type_face_to_face: Some(YesNo::Yes),
        ..HearingOptions::default()
    }
}

pub fn create_test_name(first: &str, last: &str) -> Name {
    Name {
        title: None,
        first_name: String::from(first),
        last_name: String::from(last),
    }
}

/// A face-to-face case at venue 1001 in Leeds.
pub fn create_test_case() -> CaseSnapshot {
    let mut case: CaseSnapshot = CaseSnapshot::new("1234", "002", "DD");
    case.regional_processing_centre = Some(String::from("Leeds"));
    case.processing_venue = Some(String::from("1001"));
    case.appellant.id = Some(String::from("1"));
    case.appellant.name = create_test_name("Jane", "Doe");
    case.appellant.hearing_options = create_face_to_face_options();
    case
}

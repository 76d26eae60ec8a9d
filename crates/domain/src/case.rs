// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The case snapshot: an immutable view of one case at evaluation time.
//!
//! The snapshot mirrors the case store's document shape (camelCase JSON).
//! Derivation code only ever borrows it; the few fields the engine writes
//! back (party ids, hearing history, the adjournment flag) are changed on a
//! fresh copy by the synchronization step.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::hearing::HearingRecord;
use crate::overrides::OverrideFields;
use crate::types::{
    DurationUnits, NextHearingType, NextHearingVenue, PanelExclusion, PanelMemberType, YesNo,
};

/// A person's name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Name {
    pub title: Option<String>,
    pub first_name: String,
    pub last_name: String,
}

impl Name {
    /// Returns `"First Last"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Returns whether both name parts are blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.first_name.trim().is_empty() && self.last_name.trim().is_empty()
    }
}

/// Contact details held for a party.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub phone: Option<String>,
}

/// A date range during which a party cannot attend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcludedDate {
    pub start: Date,
    /// Open ranges cover the start date only.
    pub end: Option<Date>,
}

/// A party's answers about how they want to take part in the hearing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HearingOptions {
    pub wants_to_attend: Option<YesNo>,
    pub wants_hearing_type_face_to_face: Option<YesNo>,
    pub wants_hearing_type_video: Option<YesNo>,
    pub hearing_video_email: Option<String>,
    pub wants_hearing_type_telephone: Option<YesNo>,
    pub hearing_telephone_number: Option<String>,
    pub language_interpreter: Option<YesNo>,
    pub languages: Option<String>,
    pub dialect: Option<String>,
    pub sign_language_type: Option<String>,
    #[serde(default)]
    pub excluded_dates: Vec<ExcludedDate>,
    /// Free-text reasonable adjustments.
    pub other: Option<String>,
}

impl HearingOptions {
    /// Returns whether none of the channel sub-preferences were answered.
    #[must_use]
    pub const fn has_no_channel_preferences(&self) -> bool {
        self.wants_hearing_type_face_to_face.is_none()
            && self.wants_hearing_type_video.is_none()
            && self.wants_hearing_type_telephone.is_none()
    }

    /// Returns whether an interpreter (spoken or sign) has been asked for.
    #[must_use]
    pub const fn wants_interpreter(&self) -> bool {
        YesNo::answered_yes(self.language_interpreter)
    }
}

/// Flags raised against a party.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyFlags {
    #[serde(default)]
    pub unacceptable_behaviour: bool,
    #[serde(default)]
    pub disability_needs: bool,
    #[serde(default)]
    pub medical_needs: bool,
    pub vulnerability_details: Option<String>,
}

impl PartyFlags {
    /// Returns whether the party should be marked vulnerable.
    #[must_use]
    pub const fn is_vulnerable(&self) -> bool {
        self.disability_needs || self.medical_needs
    }
}

/// An individual acting on the case: appointee or joint party.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: Option<String>,
    #[serde(default)]
    pub name: Name,
    #[serde(default)]
    pub contact: Contact,
    pub hearing_options: Option<HearingOptions>,
    #[serde(default)]
    pub flags: PartyFlags,
}

/// A representative, either a named individual or an organisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Representative {
    pub has_representative: Option<YesNo>,
    pub id: Option<String>,
    pub name: Option<Name>,
    pub organisation: Option<String>,
    #[serde(default)]
    pub contact: Contact,
    pub hearing_options: Option<HearingOptions>,
}

impl Representative {
    /// Returns whether the representative is flagged as present.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        YesNo::answered_yes(self.has_representative)
    }
}

/// The appellant and anyone acting for them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appellant {
    pub id: Option<String>,
    #[serde(default)]
    pub name: Name,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub hearing_options: HearingOptions,
    #[serde(default)]
    pub flags: PartyFlags,
    pub is_appointee: Option<YesNo>,
    pub appointee: Option<Person>,
}

impl Appellant {
    /// Returns the appointee when one is flagged as acting.
    #[must_use]
    pub fn acting_appointee(&self) -> Option<&Person> {
        if YesNo::answered_yes(self.is_appointee) {
            self.appointee.as_ref()
        } else {
            None
        }
    }
}

/// A joint party on the case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JointParty {
    pub has_joint_party: Option<YesNo>,
    #[serde(flatten)]
    pub person: Person,
}

/// Another party on the case, with its own appointee and representative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherParty {
    pub id: Option<String>,
    #[serde(default)]
    pub name: Name,
    #[serde(default)]
    pub contact: Contact,
    pub hearing_options: Option<HearingOptions>,
    #[serde(default)]
    pub flags: PartyFlags,
    pub is_appointee: Option<YesNo>,
    pub appointee: Option<Person>,
    pub rep: Option<Representative>,
}

impl OtherParty {
    /// Returns the appointee when one is flagged as acting.
    #[must_use]
    pub fn acting_appointee(&self) -> Option<&Person> {
        if YesNo::answered_yes(self.is_appointee) {
            self.appointee.as_ref()
        } else {
            None
        }
    }

    /// Returns the representative when one is flagged as present.
    #[must_use]
    pub fn present_rep(&self) -> Option<&Representative> {
        self.rep.as_ref().filter(|r| r.is_present())
    }
}

/// The organisation responding to the appeal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Respondent {
    pub party_id: String,
    pub name: String,
}

impl Default for Respondent {
    fn default() -> Self {
        Self {
            party_id: String::from("DWP"),
            name: String::from("Department for Work and Pensions"),
        }
    }
}

/// A panel member named on an adjournment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjournmentPanelMember {
    /// Combined `memberId|roleType` token.
    pub member: String,
    pub member_type: PanelMemberType,
}

/// Directions recorded when a hearing was adjourned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adjournment {
    #[serde(default)]
    pub in_progress: bool,
    pub next_hearing_type: Option<NextHearingType>,
    pub next_hearing_venue: Option<NextHearingVenue>,
    pub next_hearing_venue_selected: Option<String>,
    pub next_hearing_listing_duration: Option<u32>,
    pub next_hearing_listing_duration_units: Option<DurationUnits>,
    pub panel_members_excluded: Option<PanelExclusion>,
    #[serde(default)]
    pub panel_members: Vec<AdjournmentPanelMember>,
}

/// Kinds of case event the engine looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaseEventType {
    AppealReceived,
    ResponseReceived,
    ReadyToList,
    #[serde(other)]
    Other,
}

/// One entry of the case's event history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseEvent {
    pub event_type: CaseEventType,
    pub date: Date,
}

/// Immutable view of one case's data at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseSnapshot {
    pub case_id: String,
    pub case_reference: Option<String>,
    pub benefit_code: String,
    pub issue_code: String,
    #[serde(default)]
    pub disputed_issue_codes: Vec<String>,
    pub regional_processing_centre: Option<String>,
    /// Venue id of the venue currently processing the case.
    pub processing_venue: Option<String>,
    #[serde(default)]
    pub urgent: bool,
    #[serde(default)]
    pub confidential: bool,
    pub panel_doctor_specialism: Option<String>,
    pub second_panel_doctor_specialism: Option<String>,
    #[serde(default)]
    pub appellant: Appellant,
    pub representative: Option<Representative>,
    pub joint_party: Option<JointParty>,
    #[serde(default)]
    pub other_parties: Vec<OtherParty>,
    #[serde(default)]
    pub respondent: Respondent,
    #[serde(default)]
    pub adjournment: Adjournment,
    #[serde(default)]
    pub linked_cases: Vec<String>,
    #[serde(default)]
    pub events: Vec<CaseEvent>,
    /// Caseworker-set overrides. Authoritative; never written by derivation.
    #[serde(default)]
    pub overrides: OverrideFields,
    /// Hearings this engine has synchronized for the case.
    #[serde(default)]
    pub hearings: Vec<HearingRecord>,
}

impl CaseSnapshot {
    /// Creates a snapshot with only the identifying fields set.
    #[must_use]
    pub fn new(case_id: &str, benefit_code: &str, issue_code: &str) -> Self {
        Self {
            case_id: case_id.to_string(),
            case_reference: None,
            benefit_code: benefit_code.to_string(),
            issue_code: issue_code.to_string(),
            disputed_issue_codes: Vec::new(),
            regional_processing_centre: None,
            processing_venue: None,
            urgent: false,
            confidential: false,
            panel_doctor_specialism: None,
            second_panel_doctor_specialism: None,
            appellant: Appellant::default(),
            representative: None,
            joint_party: None,
            other_parties: Vec::new(),
            respondent: Respondent::default(),
            adjournment: Adjournment::default(),
            linked_cases: Vec::new(),
            events: Vec::new(),
            overrides: OverrideFields::default(),
            hearings: Vec::new(),
        }
    }

    /// Returns the representative when one is flagged as present.
    #[must_use]
    pub fn present_representative(&self) -> Option<&Representative> {
        self.representative.as_ref().filter(|r| r.is_present())
    }

    /// Returns the joint party when one is flagged as present.
    #[must_use]
    pub fn present_joint_party(&self) -> Option<&JointParty> {
        self.joint_party
            .as_ref()
            .filter(|j| YesNo::answered_yes(j.has_joint_party))
    }

    /// Returns whether any party on the case is flagged for unacceptable behaviour.
    #[must_use]
    pub fn has_unacceptable_behaviour(&self) -> bool {
        self.appellant.flags.unacceptable_behaviour
            || self
                .present_joint_party()
                .is_some_and(|j| j.person.flags.unacceptable_behaviour)
            || self
                .other_parties
                .iter()
                .any(|p| p.flags.unacceptable_behaviour)
    }

    /// Returns the date of the latest event of the given type.
    #[must_use]
    pub fn latest_event(&self, event_type: CaseEventType) -> Option<Date> {
        self.events
            .iter()
            .filter(|e| e.event_type == event_type)
            .map(|e| e.date)
            .max()
    }

    /// Returns the display name used for the case on the hearing request.
    #[must_use]
    pub fn case_name(&self) -> String {
        self.appellant.name.full_name()
    }
}

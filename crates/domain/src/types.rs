// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A case-data answer recorded as `"Yes"` or `"No"`.
///
/// Absence of an answer is modelled as `Option<YesNo>::None` at the use site,
/// since "not answered" and "answered No" drive different rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    /// Returns true for `Yes`.
    #[must_use]
    pub const fn is_yes(self) -> bool {
        matches!(self, Self::Yes)
    }

    /// Returns true when the optional answer is present and `Yes`.
    #[must_use]
    pub const fn answered_yes(value: Option<Self>) -> bool {
        matches!(value, Some(Self::Yes))
    }

    /// Returns true when the optional answer is present and `No`.
    #[must_use]
    pub const fn answered_no(value: Option<Self>) -> bool {
        matches!(value, Some(Self::No))
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }
}

/// The mode in which a party attends a hearing.
///
/// Serialized using the hearing service's channel codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HearingChannel {
    /// In person at a venue.
    #[serde(rename = "INTER")]
    FaceToFace,
    /// Video link.
    #[serde(rename = "VID")]
    Video,
    /// Telephone.
    #[serde(rename = "TEL")]
    Telephone,
    /// The party has said they will not attend.
    #[serde(rename = "NA")]
    NotAttending,
    /// Decided on the papers, nobody attends.
    #[serde(rename = "ONPPRS")]
    Paper,
}

impl HearingChannel {
    /// Returns the hearing service code for this channel.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FaceToFace => "INTER",
            Self::Video => "VID",
            Self::Telephone => "TEL",
            Self::NotAttending => "NA",
            Self::Paper => "ONPPRS",
        }
    }

    /// Aggregation rank used for the case-level channel.
    ///
    /// Higher wins: face-to-face > video > telephone > everything else.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::FaceToFace => 3,
            Self::Video => 2,
            Self::Telephone => 1,
            Self::NotAttending | Self::Paper => 0,
        }
    }

    /// Returns whether a party on this channel takes part in the hearing.
    #[must_use]
    pub const fn is_attending(&self) -> bool {
        self.rank() > 0
    }
}

impl FromStr for HearingChannel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INTER" => Ok(Self::FaceToFace),
            "VID" => Ok(Self::Video),
            "TEL" => Ok(Self::Telephone),
            "NA" => Ok(Self::NotAttending),
            "ONPPRS" => Ok(Self::Paper),
            _ => Err(DomainError::InvalidChannelCode(s.to_string())),
        }
    }
}

impl std::fmt::Display for HearingChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The role a party plays on the case.
///
/// Set once when the party record is built; role codes are looked up from
/// the variant rather than inferred from the shape of the source entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartyRole {
    #[serde(rename = "APEL")]
    Appellant,
    #[serde(rename = "APIN")]
    Appointee,
    #[serde(rename = "RPTT")]
    Representative,
    #[serde(rename = "JOPA")]
    JointParty,
    #[serde(rename = "OTPA")]
    OtherParty,
    #[serde(rename = "RESP")]
    Respondent,
}

impl PartyRole {
    /// Returns the hearing service role code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Appellant => "APEL",
            Self::Appointee => "APIN",
            Self::Representative => "RPTT",
            Self::JointParty => "JOPA",
            Self::OtherParty => "OTPA",
            Self::Respondent => "RESP",
        }
    }

    /// Returns the relationship code used when this role is linked to the
    /// party it acts for. Parties that act for nobody return `None`.
    #[must_use]
    pub const fn relationship_code(&self) -> Option<&'static str> {
        match self {
            Self::Appointee => Some("APPOINTEE"),
            Self::Representative => Some("REPRESENTATIVE"),
            Self::JointParty => Some("JOINT_PARTY"),
            Self::OtherParty => Some("OTHER_PARTY"),
            Self::Appellant | Self::Respondent => None,
        }
    }
}

/// Individual or organisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartyType {
    Individual,
    Organisation,
}

/// Unit used for an adjourned hearing's requested duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DurationUnits {
    Sessions,
    Hours,
    Minutes,
}

/// Requested type of the next hearing on an adjourned case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NextHearingType {
    FaceToFace,
    Video,
    Telephone,
    Paper,
}

impl NextHearingType {
    /// Maps the adjournment answer onto a hearing channel.
    #[must_use]
    pub const fn channel(&self) -> HearingChannel {
        match self {
            Self::FaceToFace => HearingChannel::FaceToFace,
            Self::Video => HearingChannel::Video,
            Self::Telephone => HearingChannel::Telephone,
            Self::Paper => HearingChannel::Paper,
        }
    }
}

/// Where an adjourned hearing should next be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NextHearingVenue {
    /// The case's current processing venue.
    SameVenue,
    /// A venue named explicitly on the adjournment.
    SomewhereElse,
}

/// Panel member categories used by session categories and adjournments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PanelMemberType {
    TribunalJudge,
    TribunalMemberMedical,
    TribunalMemberDisability,
    TribunalMemberFinanciallyQualified,
    RegionalMedicalMember,
}

impl PanelMemberType {
    /// Returns the role reference the hearing service uses for this member type.
    #[must_use]
    pub const fn reference(&self) -> &'static str {
        match self {
            Self::TribunalJudge => "84",
            Self::TribunalMemberMedical => "58",
            Self::TribunalMemberDisability => "44",
            Self::TribunalMemberFinanciallyQualified => "50",
            Self::RegionalMedicalMember => "69",
        }
    }

    /// Returns the specialism reference for a slot of this type.
    #[must_use]
    pub const fn specialism_reference(&self) -> &'static str {
        match self {
            Self::TribunalJudge => "BBA3-J",
            Self::TribunalMemberMedical => "BBA3-MQPM",
            Self::TribunalMemberDisability => "BBA3-DQPM",
            Self::TribunalMemberFinanciallyQualified => "BBA3-FQPM",
            Self::RegionalMedicalMember => "BBA3-RMM",
        }
    }

    /// Returns whether the slot is filled by a medically qualified member.
    #[must_use]
    pub const fn is_medically_qualified(&self) -> bool {
        matches!(self, Self::TribunalMemberMedical | Self::RegionalMedicalMember)
    }
}

/// How panel members named on an adjournment should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PanelExclusion {
    /// The named members must not sit on the next hearing.
    Yes,
    /// No constraint.
    No,
    /// The next hearing is reserved to the named members.
    Reserved,
}

/// Doctor specialisms recognised for medically qualified panel slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoctorSpecialism {
    Cardiologist,
    CarerOfChronicallyIllPerson,
    Eyes,
    GeneralPractitioner,
    Occupational,
    Psychiatrist,
    Rheumatologist,
    Respiratory,
}

impl DoctorSpecialism {
    /// Parses the specialism code stored on the case.
    ///
    /// Returns `None` for codes the hearing service has no reference for.
    #[must_use]
    pub fn from_case_code(code: &str) -> Option<Self> {
        match code {
            "cardiologist" => Some(Self::Cardiologist),
            "carerOfChronicallyIllPerson" => Some(Self::CarerOfChronicallyIllPerson),
            "eyeSurgeon" | "eyes" => Some(Self::Eyes),
            "generalPractitioner" => Some(Self::GeneralPractitioner),
            "occupationalHealth" => Some(Self::Occupational),
            "psychiatrist" => Some(Self::Psychiatrist),
            "rheumatologist" => Some(Self::Rheumatologist),
            "respiratoryMedicine" => Some(Self::Respiratory),
            _ => None,
        }
    }

    /// Returns the hearing service specialism reference.
    #[must_use]
    pub const fn reference(&self) -> &'static str {
        match self {
            Self::Cardiologist => "BBA3-MQPM1-001",
            Self::CarerOfChronicallyIllPerson => "BBA3-MQPM1-002",
            Self::Eyes => "BBA3-MQPM1-003",
            Self::GeneralPractitioner => "BBA3-MQPM1-004",
            Self::Occupational => "BBA3-MQPM1-005",
            Self::Psychiatrist => "BBA3-MQPM1-006",
            Self::Rheumatologist => "BBA3-MQPM1-007",
            Self::Respiratory => "BBA3-MQPM1-008",
        }
    }
}

/// Reason sent with a cancellation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CancellationReason {
    #[serde(rename = "withdraw")]
    Withdrawn,
    #[serde(rename = "struck")]
    StruckOut,
    #[serde(rename = "lapsed")]
    Lapsed,
    #[serde(rename = "notready")]
    NotReady,
    #[serde(rename = "other")]
    Other,
}

impl CancellationReason {
    /// Returns the hearing service cancellation code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Withdrawn => "withdraw",
            Self::StruckOut => "struck",
            Self::Lapsed => "lapsed",
            Self::NotReady => "notready",
            Self::Other => "other",
        }
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Broad classification of derivation failures.
///
/// Both kinds are fatal and are raised before any outbound call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Case data could not be mapped onto reference data.
    Mapping,
    /// The derived request would be rejected by listing rules.
    Listing,
}

impl ErrorKind {
    /// Returns a stable label for logs and API responses.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mapping => "mapping",
            Self::Listing => "listing",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors raised while deriving a hearing request from case data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A party's interpreter language has no reference code.
    #[error("No language reference for '{language}' requested by {party}")]
    UnknownLanguage {
        /// The party asking for the interpreter.
        party: String,
        /// The language (and dialect, when given) as written on the case.
        language: String,
    },
    /// A venue has no location mapping.
    #[error("Venue '{venue_id}' has no location mapping")]
    UnmappedVenue {
        /// The venue id that failed to map.
        venue_id: String,
    },
    /// An adjournment asked for a specific venue without naming one.
    #[error("Adjournment requests a different venue but no venue was selected")]
    AdjournedVenueMissing,
    /// The case has no processing venue to derive a location from.
    #[error("Case has no processing venue")]
    NoProcessingVenue,
    /// No active venue exists under the case's regional processing centre.
    #[error("No active venues for regional processing centre {region:?}")]
    NoVenuesForRegion {
        /// The regional processing centre on the case.
        region: Option<String>,
    },
    /// No session category exists for the case's benefit and issue.
    #[error(
        "No session category for benefit '{benefit_code}', issue '{issue_code}' (interpreter: {interpreter_required}, urgent: {urgent})"
    )]
    SessionCategoryNotFound {
        /// The benefit code.
        benefit_code: String,
        /// The issue code.
        issue_code: String,
        /// Whether an interpreter is required.
        interpreter_required: bool,
        /// Whether the case is urgent.
        urgent: bool,
    },
    /// A panel member token was not of the form `memberId|roleType`.
    #[error("Invalid panel member token '{token}'")]
    InvalidPanelMemberToken {
        /// The raw token.
        token: String,
    },
    /// A channel code was not recognised.
    #[error("Invalid hearing channel code '{0}'")]
    InvalidChannelCode(String),
    /// A duration is not an exact multiple of five minutes.
    #[error("Hearing duration {duration} from {source_field} is not a multiple of 5 minutes")]
    DurationNotMultipleOfFive {
        /// The offending duration in minutes.
        duration: u32,
        /// Where the value came from.
        source_field: &'static str,
    },
    /// Every numeric party id above the case's highest is taken.
    #[error("No party id available above {highest}")]
    PartyIdsExhausted {
        /// The highest id already on the case.
        highest: u64,
    },
    /// A party wants to attend but gave no channel preference at all.
    #[error("{party} wants to attend but has no hearing channel preferences")]
    ChannelPreferencesMissing {
        /// The party whose preferences are missing.
        party: String,
    },
}

impl DomainError {
    /// Returns whether this is a mapping or a listing failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownLanguage { .. }
            | Self::UnmappedVenue { .. }
            | Self::AdjournedVenueMissing
            | Self::NoProcessingVenue
            | Self::NoVenuesForRegion { .. }
            | Self::SessionCategoryNotFound { .. }
            | Self::InvalidPanelMemberToken { .. }
            | Self::InvalidChannelCode(_)
            | Self::PartyIdsExhausted { .. } => ErrorKind::Mapping,
            Self::DurationNotMultipleOfFive { .. } | Self::ChannelPreferencesMissing { .. } => {
                ErrorKind::Listing
            }
        }
    }

    /// Returns the request field whose derivation failed.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::UnknownLanguage { .. } => "interpreterLanguage",
            Self::UnmappedVenue { .. }
            | Self::AdjournedVenueMissing
            | Self::NoProcessingVenue
            | Self::NoVenuesForRegion { .. } => "hearingLocations",
            Self::SessionCategoryNotFound { .. } | Self::InvalidPanelMemberToken { .. } => {
                "panelRequirements"
            }
            Self::InvalidChannelCode(_) | Self::ChannelPreferencesMissing { .. } => {
                "hearingChannels"
            }
            Self::DurationNotMultipleOfFive { .. } => "duration",
            Self::PartyIdsExhausted { .. } => "partyId",
        }
    }
}

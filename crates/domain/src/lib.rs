// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hearing request derivation.
//!
//! Pure, synchronous rules that turn a [`CaseSnapshot`] and reference data
//! into a [`HearingRequestPayload`]. Nothing in this crate performs I/O.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod assembler;
mod case;
mod channel;
mod duration;
mod error;
mod hearing;
mod location;
mod options;
mod overrides;
mod panel;
mod party;
mod payload;
mod reference;
mod types;

#[cfg(test)]
mod tests;

pub use assembler::{AssembledRequest, build_hearing_request, validate_payload};
pub use case::{
    Adjournment, AdjournmentPanelMember, Appellant, CaseEvent, CaseEventType, CaseSnapshot,
    Contact, ExcludedDate, HearingOptions, JointParty, Name, OtherParty, PartyFlags, Person,
    Representative, Respondent,
};
pub use channel::{adjourned_channel, aggregate_case_channel, is_paper_case, resolve_party_channel};
pub use duration::{
    DEFAULT_DURATION, MIN_ADJOURNED_DURATION, MIN_OVERRIDE_DURATION, SESSION_MINUTES,
    adjourned_duration, convert_adjourned_duration, reference_duration, resolve_duration,
    validate_duration,
};
pub use error::{DomainError, ErrorKind};
pub use hearing::{
    ExistingHearingRecord, HearingRecord, HearingStatus, latest_outstanding, merge_hearing_record,
};
pub use location::{default_venues, map_venues_to_locations, resolve_locations};
pub use options::{ChannelFallbackPolicy, DerivationOptions};
pub use overrides::{
    HEARING_WINDOW_DAYS, InterpreterOverride, OverrideCascade, OverrideFields, compute_defaults,
    compute_defaults_masked, resolve_effective_duration,
};
pub use panel::{
    PanelPreference, PanelRequirements, RequirementType, decode_member_token, panel_preferences,
    resolve_panel,
};
pub use party::{
    IndividualDetails, OrganisationDetails, PartyDetails, RelatedParty, UnavailabilityRange,
    UnavailabilityType, assign_party_ids, assign_party_ids_above, build_parties, copy_party_ids,
    max_numeric_party_id, other_party_channels,
};
pub use payload::{
    CancelRequest, CaseCategory, CaseDetails, HearingDetails, HearingLocation, HearingPriority,
    HearingRequestPayload, HearingWindow, LocationType, PartiesNotified,
    PartiesNotifiedServiceData, RequestDetails,
};
pub use reference::{
    DurationEntry, DurationTuple, ExtraTimeEntry, LanguageEntry, ReferenceData, SessionCategory,
    SessionCategoryEntry, StaticReferenceData, VenueEntry,
};
pub use types::{
    CancellationReason, DoctorSpecialism, DurationUnits, HearingChannel, NextHearingType,
    NextHearingVenue, PanelExclusion, PanelMemberType, PartyRole, PartyType, YesNo,
};

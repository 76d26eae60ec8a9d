// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Party records and party id assignment.
//!
//! ## Party order
//!
//! Parties are visited in a fixed order: appellant, appellant's acting
//! appointee, representative, joint party, then each other party followed by
//! its own acting appointee and representative. The respondent comes last.
//! The same order drives id assignment.
//!
//! ## Id assignment
//!
//! A party without an id gets `max(numeric ids on the case) + n`, where `n`
//! counts up from one in party order. Ids are assigned on the whole case
//! before any party record is built, so every related-party link points at an
//! id that exists.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::case::{CaseSnapshot, Contact, HearingOptions, Name, PartyFlags};
use crate::channel::resolve_party_channel;
use crate::error::DomainError;
use crate::options::ChannelFallbackPolicy;
use crate::overrides::{InterpreterOverride, OverrideCascade};
use crate::reference::ReferenceData;
use crate::types::{HearingChannel, PartyRole, PartyType, YesNo};

/// How much of a day an unavailability range covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnavailabilityType {
    AllDay,
}

/// Dates a party cannot attend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnavailabilityRange {
    pub unavailable_from_date: Date,
    pub unavailable_to_date: Date,
    pub unavailability_type: UnavailabilityType,
}

/// A link from a party to the party it acts for or alongside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedParty {
    pub related_party_id: String,
    pub relationship_type: String,
}

/// Details carried for an individual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualDetails {
    pub title: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub preferred_hearing_channel: HearingChannel,
    pub interpreter_language: Option<String>,
    pub vulnerable_flag: bool,
    pub vulnerability_details: Option<String>,
    pub unacceptable_behaviour: bool,
    pub hearing_channel_email: Vec<String>,
    pub hearing_channel_phone: Vec<String>,
    pub related_parties: Vec<RelatedParty>,
    pub other_reasonable_adjustment_details: Option<String>,
}

/// Details carried for an organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationDetails {
    pub name: String,
    pub related_parties: Vec<RelatedParty>,
}

/// A normalized party on the hearing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyDetails {
    pub party_id: String,
    pub party_type: PartyType,
    pub party_role: PartyRole,
    pub individual_details: Option<IndividualDetails>,
    pub organisation_details: Option<OrganisationDetails>,
    pub unavailability_ranges: Vec<UnavailabilityRange>,
}

impl PartyDetails {
    /// Returns the party's channel. Organisations have none.
    #[must_use]
    pub fn channel(&self) -> Option<HearingChannel> {
        self.individual_details
            .as_ref()
            .map(|d| d.preferred_hearing_channel)
    }
}

/// One party as found on the case, before normalization.
struct PartySource<'a> {
    id: Option<&'a str>,
    role: PartyRole,
    name: Option<&'a Name>,
    organisation: Option<&'a str>,
    contact: &'a Contact,
    /// Own options, or those of the party acted for.
    options: Option<&'a HearingOptions>,
    flags: Option<&'a PartyFlags>,
    related_to: Option<&'a str>,
}

impl PartySource<'_> {
    fn party_type(&self) -> PartyType {
        let named: bool = self.name.is_some_and(|n| !n.is_blank());
        if !named && self.organisation.is_some_and(|o| !o.trim().is_empty()) {
            PartyType::Organisation
        } else {
            PartyType::Individual
        }
    }

    fn label(&self) -> String {
        format!("{} {}", self.role.code(), self.id.unwrap_or("?"))
    }
}

fn party_sources(case: &CaseSnapshot) -> Vec<PartySource<'_>> {
    let appellant = &case.appellant;
    let appellant_id: Option<&str> = appellant.id.as_deref();
    let mut sources: Vec<PartySource<'_>> = vec![PartySource {
        id: appellant_id,
        role: PartyRole::Appellant,
        name: Some(&appellant.name),
        organisation: None,
        contact: &appellant.contact,
        options: Some(&appellant.hearing_options),
        flags: Some(&appellant.flags),
        related_to: None,
    }];

    if let Some(appointee) = appellant.acting_appointee() {
        sources.push(PartySource {
            id: appointee.id.as_deref(),
            role: PartyRole::Appointee,
            name: Some(&appointee.name),
            organisation: None,
            contact: &appointee.contact,
            options: appointee
                .hearing_options
                .as_ref()
                .or(Some(&appellant.hearing_options)),
            flags: Some(&appointee.flags),
            related_to: appellant_id,
        });
    }

    if let Some(rep) = case.present_representative() {
        sources.push(PartySource {
            id: rep.id.as_deref(),
            role: PartyRole::Representative,
            name: rep.name.as_ref(),
            organisation: rep.organisation.as_deref(),
            contact: &rep.contact,
            options: rep
                .hearing_options
                .as_ref()
                .or(Some(&appellant.hearing_options)),
            flags: None,
            related_to: appellant_id,
        });
    }

    if let Some(joint) = case.present_joint_party() {
        let person = &joint.person;
        sources.push(PartySource {
            id: person.id.as_deref(),
            role: PartyRole::JointParty,
            name: Some(&person.name),
            organisation: None,
            contact: &person.contact,
            options: person
                .hearing_options
                .as_ref()
                .or(Some(&appellant.hearing_options)),
            flags: Some(&person.flags),
            related_to: appellant_id,
        });
    }

    for other in &case.other_parties {
        let other_id: Option<&str> = other.id.as_deref();
        sources.push(PartySource {
            id: other_id,
            role: PartyRole::OtherParty,
            name: Some(&other.name),
            organisation: None,
            contact: &other.contact,
            options: other.hearing_options.as_ref(),
            flags: Some(&other.flags),
            related_to: appellant_id,
        });
        if let Some(appointee) = other.acting_appointee() {
            sources.push(PartySource {
                id: appointee.id.as_deref(),
                role: PartyRole::Appointee,
                name: Some(&appointee.name),
                organisation: None,
                contact: &appointee.contact,
                options: appointee
                    .hearing_options
                    .as_ref()
                    .or(other.hearing_options.as_ref()),
                flags: Some(&appointee.flags),
                related_to: other_id,
            });
        }
        if let Some(rep) = other.present_rep() {
            sources.push(PartySource {
                id: rep.id.as_deref(),
                role: PartyRole::Representative,
                name: rep.name.as_ref(),
                organisation: rep.organisation.as_deref(),
                contact: &rep.contact,
                options: rep.hearing_options.as_ref().or(other.hearing_options.as_ref()),
                flags: None,
                related_to: other_id,
            });
        }
    }

    sources
}

/// Where a party sits on the case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PartySlot {
    Appellant,
    AppellantAppointee,
    Representative,
    JointParty,
    OtherParty(usize),
    OtherPartyAppointee(usize),
    OtherPartyRep(usize),
}

/// Collects the id slot of every party in party order.
fn id_slots(case: &mut CaseSnapshot) -> Vec<(PartySlot, &mut Option<String>)> {
    let mut slots: Vec<(PartySlot, &mut Option<String>)> = Vec::new();

    let appellant = &mut case.appellant;
    slots.push((PartySlot::Appellant, &mut appellant.id));
    if YesNo::answered_yes(appellant.is_appointee)
        && let Some(appointee) = appellant.appointee.as_mut()
    {
        slots.push((PartySlot::AppellantAppointee, &mut appointee.id));
    }

    if let Some(rep) = case.representative.as_mut().filter(|r| r.is_present()) {
        slots.push((PartySlot::Representative, &mut rep.id));
    }

    if let Some(joint) = case
        .joint_party
        .as_mut()
        .filter(|j| YesNo::answered_yes(j.has_joint_party))
    {
        slots.push((PartySlot::JointParty, &mut joint.person.id));
    }

    for (index, other) in case.other_parties.iter_mut().enumerate() {
        slots.push((PartySlot::OtherParty(index), &mut other.id));
        if YesNo::answered_yes(other.is_appointee)
            && let Some(appointee) = other.appointee.as_mut()
        {
            slots.push((PartySlot::OtherPartyAppointee(index), &mut appointee.id));
        }
        if let Some(rep) = other.rep.as_mut().filter(|r| r.is_present()) {
            slots.push((PartySlot::OtherPartyRep(index), &mut rep.id));
        }
    }

    slots
}

/// Whether the other party at `index` is the same person on both cases.
///
/// Other parties are matched by position, so a removal ahead of them shifts
/// every later index; the name guards against that.
fn same_other_party(source: &CaseSnapshot, target: &CaseSnapshot, slot: PartySlot) -> bool {
    match slot {
        PartySlot::OtherParty(index)
        | PartySlot::OtherPartyAppointee(index)
        | PartySlot::OtherPartyRep(index) => {
            match (source.other_parties.get(index), target.other_parties.get(index)) {
                (Some(from), Some(to)) => from.name == to.name,
                _ => false,
            }
        }
        _ => true,
    }
}

fn is_missing(id: Option<&String>) -> bool {
    id.is_none_or(|id| id.trim().is_empty())
}

fn numeric_id(id: Option<&String>) -> Option<u64> {
    id.and_then(|id| id.trim().parse::<u64>().ok())
}

/// Returns the highest numeric id held anywhere on the case.
///
/// Entities that are not currently parties (an appointee not flagged as
/// acting, say) still count, so an id is never handed out twice.
#[must_use]
pub fn max_numeric_party_id(case: &CaseSnapshot) -> u64 {
    held_ids(case)
        .iter()
        .filter_map(|id| numeric_id(Some(id)))
        .max()
        .unwrap_or(0)
}

/// Assigns ids to every party that lacks one.
///
/// Returns the ids handed out, in party order.
///
/// # Errors
///
/// Returns `PartyIdsExhausted` if no numeric id is left above the highest
/// one on the case. Nothing is assigned in that case.
pub fn assign_party_ids(case: &mut CaseSnapshot) -> Result<Vec<String>, DomainError> {
    assign_party_ids_above(case, 0)
}

/// Assigns ids to every party that lacks one, never handing out an id at or
/// below `floor`.
///
/// # Errors
///
/// Returns `PartyIdsExhausted` if no numeric id is left above the floor or
/// the highest id on the case. Nothing is assigned in that case.
pub fn assign_party_ids_above(
    case: &mut CaseSnapshot,
    floor: u64,
) -> Result<Vec<String>, DomainError> {
    let highest: u64 = max_numeric_party_id(case).max(floor);
    let missing: usize = id_slots(case)
        .iter()
        .filter(|(_, slot)| is_missing(slot.as_ref()))
        .count();

    let mut next: u64 = highest;
    let mut pending: Vec<String> = Vec::with_capacity(missing);
    for _ in 0..missing {
        next = next
            .checked_add(1)
            .ok_or(DomainError::PartyIdsExhausted { highest })?;
        pending.push(next.to_string());
    }

    let mut ids = pending.iter();
    for (_, slot) in id_slots(case) {
        if is_missing(slot.as_ref())
            && let Some(id) = ids.next()
        {
            *slot = Some(id.clone());
        }
    }
    Ok(pending)
}

/// Copies ids from `source` onto the same parties of `target` that lack one.
///
/// A party is the same when it holds the same place on both cases: the
/// appellant, the appellant's appointee, the representative, the joint party,
/// or an other party (or its appointee or representative) at the same index
/// and with the same name. An id already held anywhere on `target` is never
/// copied. Returns whether any id was copied.
pub fn copy_party_ids(source: &CaseSnapshot, target: &mut CaseSnapshot) -> bool {
    let mut source_copy: CaseSnapshot = source.clone();
    let ids: Vec<(PartySlot, String)> = id_slots(&mut source_copy)
        .into_iter()
        .filter_map(|(slot, id)| {
            id.clone()
                .filter(|id| !id.trim().is_empty())
                .map(|id| (slot, id))
        })
        .collect();

    let matching: Vec<PartySlot> = ids
        .iter()
        .map(|(slot, _)| *slot)
        .filter(|slot| same_other_party(source, target, *slot))
        .collect();
    let mut taken: Vec<String> = held_ids(target);

    let mut copied: bool = false;
    for (slot, id) in id_slots(target) {
        if !is_missing(id.as_ref()) || !matching.contains(&slot) {
            continue;
        }
        let Some((_, source_id)) = ids.iter().find(|(s, _)| *s == slot) else {
            continue;
        };
        if taken.contains(source_id) {
            continue;
        }
        *id = Some(source_id.clone());
        taken.push(source_id.clone());
        copied = true;
    }
    copied
}

fn held_ids(case: &CaseSnapshot) -> Vec<String> {
    let mut ids: Vec<Option<&String>> = vec![
        case.appellant.id.as_ref(),
        case.appellant.appointee.as_ref().and_then(|a| a.id.as_ref()),
        case.representative.as_ref().and_then(|r| r.id.as_ref()),
        case.joint_party.as_ref().and_then(|j| j.person.id.as_ref()),
    ];
    for other in &case.other_parties {
        ids.push(other.id.as_ref());
        ids.push(other.appointee.as_ref().and_then(|a| a.id.as_ref()));
        ids.push(other.rep.as_ref().and_then(|r| r.id.as_ref()));
    }
    ids.into_iter()
        .flatten()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect()
}

/// Resolves the channel of every party except the appellant, in party order.
///
/// # Errors
///
/// Returns a channel resolution error under the `RaiseResolutionError` policy.
pub fn other_party_channels(
    case: &CaseSnapshot,
    policy: ChannelFallbackPolicy,
) -> Result<Vec<HearingChannel>, DomainError> {
    let empty: HearingOptions = HearingOptions::default();
    party_sources(case)
        .iter()
        .filter(|s| s.role != PartyRole::Appellant && s.party_type() == PartyType::Individual)
        .map(|s| resolve_party_channel(s.options.unwrap_or(&empty), None, policy, &s.label()))
        .collect()
}

fn interpreter_language(
    reference: &dyn ReferenceData,
    language: Option<&str>,
    dialect: Option<&str>,
    party: &str,
) -> Result<Option<String>, DomainError> {
    let Some(language) = language.map(str::trim).filter(|l| !l.is_empty()) else {
        return Ok(None);
    };
    reference
        .language_reference(language, dialect)
        .map(Some)
        .ok_or_else(|| DomainError::UnknownLanguage {
            party: party.to_string(),
            language: dialect.map_or_else(
                || language.to_string(),
                |d| format!("{language} ({d})"),
            ),
        })
}

fn requested_language(options: &HearingOptions) -> Option<&str> {
    if !options.wants_interpreter() {
        return None;
    }
    options
        .sign_language_type
        .as_deref()
        .filter(|l| !l.trim().is_empty())
        .or(options.languages.as_deref())
}

fn push_unique(values: &mut Vec<String>, value: Option<&String>) {
    if let Some(value) = value.map(|v| v.trim()).filter(|v| !v.is_empty())
        && !values.iter().any(|v| v == value)
    {
        values.push(value.to_string());
    }
}

fn related_parties(source: &PartySource<'_>) -> Vec<RelatedParty> {
    match (source.related_to, source.role.relationship_code()) {
        (Some(id), Some(code)) => vec![RelatedParty {
            related_party_id: id.to_string(),
            relationship_type: code.to_string(),
        }],
        _ => Vec::new(),
    }
}

fn unavailability(options: Option<&HearingOptions>) -> Vec<UnavailabilityRange> {
    options
        .map(|o| o.excluded_dates.as_slice())
        .unwrap_or_default()
        .iter()
        .map(|range| UnavailabilityRange {
            unavailable_from_date: range.start,
            unavailable_to_date: range.end.unwrap_or(range.start),
            unavailability_type: UnavailabilityType::AllDay,
        })
        .collect()
}

fn build_party(
    source: &PartySource<'_>,
    channel: HearingChannel,
    language: Option<String>,
) -> PartyDetails {
    let party_id: String = source.id.unwrap_or_default().to_string();
    let unavailability_ranges: Vec<UnavailabilityRange> = unavailability(source.options);

    if source.party_type() == PartyType::Organisation {
        return PartyDetails {
            party_id,
            party_type: PartyType::Organisation,
            party_role: source.role,
            individual_details: None,
            organisation_details: Some(OrganisationDetails {
                name: source.organisation.unwrap_or_default().trim().to_string(),
                related_parties: related_parties(source),
            }),
            unavailability_ranges,
        };
    }

    let mut emails: Vec<String> = Vec::new();
    let mut phones: Vec<String> = Vec::new();
    if let Some(options) = source.options {
        push_unique(&mut emails, options.hearing_video_email.as_ref());
        push_unique(&mut phones, options.hearing_telephone_number.as_ref());
    }
    push_unique(&mut emails, source.contact.email.as_ref());
    push_unique(&mut phones, source.contact.mobile.as_ref());
    push_unique(&mut phones, source.contact.phone.as_ref());

    let name: Name = source.name.cloned().unwrap_or_default();
    let flags: PartyFlags = source.flags.cloned().unwrap_or_default();

    PartyDetails {
        party_id,
        party_type: PartyType::Individual,
        party_role: source.role,
        individual_details: Some(IndividualDetails {
            title: name.title,
            first_name: name.first_name,
            last_name: name.last_name,
            preferred_hearing_channel: channel,
            interpreter_language: language,
            vulnerable_flag: flags.is_vulnerable(),
            vulnerability_details: flags.vulnerability_details,
            unacceptable_behaviour: flags.unacceptable_behaviour,
            hearing_channel_email: emails,
            hearing_channel_phone: phones,
            related_parties: related_parties(source),
            other_reasonable_adjustment_details: source.options.and_then(|o| o.other.clone()),
        }),
        organisation_details: None,
        unavailability_ranges,
    }
}

fn respondent_party(case: &CaseSnapshot) -> PartyDetails {
    PartyDetails {
        party_id: case.respondent.party_id.clone(),
        party_type: PartyType::Organisation,
        party_role: PartyRole::Respondent,
        individual_details: None,
        organisation_details: Some(OrganisationDetails {
            name: case.respondent.name.clone(),
            related_parties: Vec::new(),
        }),
        unavailability_ranges: Vec::new(),
    }
}

/// Builds the party records for a case.
///
/// Party ids must already be assigned (see [`assign_party_ids`]). The
/// appellant's channel and interpreter come from the override cascade.
///
/// # Arguments
///
/// * `case` - The case snapshot, with party ids assigned
/// * `reference` - Reference data lookups
/// * `cascade` - Resolved override fields for the case
/// * `policy` - Channel fallback policy for the other parties
///
/// # Errors
///
/// Returns `UnknownLanguage` for an interpreter language with no reference
/// code, or a channel resolution error under `RaiseResolutionError`.
pub fn build_parties(
    case: &CaseSnapshot,
    reference: &dyn ReferenceData,
    cascade: &OverrideCascade<'_>,
    policy: ChannelFallbackPolicy,
) -> Result<Vec<PartyDetails>, DomainError> {
    let empty: HearingOptions = HearingOptions::default();
    let mut parties: Vec<PartyDetails> = Vec::new();

    for source in party_sources(case) {
        let label: String = source.label();
        let party: PartyDetails = if source.role == PartyRole::Appellant {
            let interpreter: Option<&InterpreterOverride> =
                cascade.appellant_interpreter().filter(|i| i.wanted);
            let language: Option<String> = match interpreter {
                Some(i) => interpreter_language(
                    reference,
                    i.language.as_deref(),
                    i.dialect.as_deref(),
                    &label,
                )?,
                None => None,
            };
            build_party(&source, cascade.appellant_channel(), language)
        } else if source.party_type() == PartyType::Organisation {
            build_party(&source, HearingChannel::NotAttending, None)
        } else {
            let options: &HearingOptions = source.options.unwrap_or(&empty);
            let channel: HearingChannel = resolve_party_channel(options, None, policy, &label)?;
            let language: Option<String> = interpreter_language(
                reference,
                requested_language(options),
                options.dialect.as_deref(),
                &label,
            )?;
            build_party(&source, channel, language)
        };
        parties.push(party);
    }

    parties.push(respondent_party(case));
    Ok(parties)
}

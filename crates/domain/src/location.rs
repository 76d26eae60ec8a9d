// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hearing location resolution.
//!
//! Every rule selects venues first; venues are mapped to location ids last.
//! A venue without a location mapping is a hard error on every path.

use crate::case::CaseSnapshot;
use crate::error::DomainError;
use crate::reference::ReferenceData;
use crate::types::NextHearingVenue;

/// Selects the venues for a case when no override is set.
///
/// # Arguments
///
/// * `case` - The case snapshot
/// * `reference` - Reference data lookups
/// * `paper_case` - Whether the case channel is paper
/// * `adjournment_enabled` - Whether adjournment directions are honoured
///
/// # Errors
///
/// Returns a mapping error when the required venue cannot be determined.
pub fn default_venues(
    case: &CaseSnapshot,
    reference: &dyn ReferenceData,
    paper_case: bool,
    adjournment_enabled: bool,
) -> Result<Vec<String>, DomainError> {
    if paper_case {
        let venues: Vec<String> = case
            .regional_processing_centre
            .as_deref()
            .map(|region| reference.active_venues_for_region(region))
            .unwrap_or_default();
        if venues.is_empty() {
            return Err(DomainError::NoVenuesForRegion {
                region: case.regional_processing_centre.clone(),
            });
        }
        return Ok(venues);
    }

    if adjournment_enabled
        && case.adjournment.in_progress
        && let Some(next_venue) = case.adjournment.next_hearing_venue
    {
        return adjourned_venue(case, next_venue).map(|venue| vec![venue]);
    }

    let processing_venue: &str = case
        .processing_venue
        .as_deref()
        .ok_or(DomainError::NoProcessingVenue)?;
    let location_id: String = location_for(reference, processing_venue)?;

    Ok(reference
        .sibling_venues(&location_id)
        .filter(|group| !group.is_empty())
        .unwrap_or_else(|| vec![processing_venue.to_string()]))
}

fn adjourned_venue(case: &CaseSnapshot, next_venue: NextHearingVenue) -> Result<String, DomainError> {
    match next_venue {
        NextHearingVenue::SameVenue => case
            .processing_venue
            .clone()
            .ok_or(DomainError::NoProcessingVenue),
        NextHearingVenue::SomewhereElse => case
            .adjournment
            .next_hearing_venue_selected
            .clone()
            .filter(|v| !v.trim().is_empty())
            .ok_or(DomainError::AdjournedVenueMissing),
    }
}

fn location_for(reference: &dyn ReferenceData, venue_id: &str) -> Result<String, DomainError> {
    reference
        .location_for_venue(venue_id)
        .ok_or_else(|| DomainError::UnmappedVenue {
            venue_id: venue_id.to_string(),
        })
}

/// Maps venues to location ids, keeping first-seen order and dropping repeats.
///
/// # Errors
///
/// Returns `UnmappedVenue` for the first venue without a location.
pub fn map_venues_to_locations(
    venues: &[String],
    reference: &dyn ReferenceData,
) -> Result<Vec<String>, DomainError> {
    let mut locations: Vec<String> = Vec::with_capacity(venues.len());
    for venue_id in venues {
        let location_id: String = location_for(reference, venue_id)?;
        if !locations.contains(&location_id) {
            locations.push(location_id);
        }
    }
    Ok(locations)
}

/// Resolves the ordered hearing location ids for a case.
///
/// Precedence: override venues, paper-case regional venues, adjournment
/// venue, processing venue (expanded to its sibling group).
///
/// # Errors
///
/// Returns a mapping error when a venue cannot be determined or mapped.
pub fn resolve_locations(
    case: &CaseSnapshot,
    reference: &dyn ReferenceData,
    override_venues: Option<&[String]>,
    paper_case: bool,
    adjournment_enabled: bool,
) -> Result<Vec<String>, DomainError> {
    let venues: Vec<String> = match override_venues.filter(|v| !v.is_empty()) {
        Some(venues) => venues.to_vec(),
        None => default_venues(case, reference, paper_case, adjournment_enabled)?,
    };
    map_venues_to_locations(&venues, reference)
}

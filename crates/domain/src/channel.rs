// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hearing channel resolution.
//!
//! ## Party precedence
//!
//! 1. Explicit override channel
//! 2. Attendance answered No: not attending
//! 3. Face-to-face preference
//! 4. Video preference with a video contact
//! 5. Telephone preference with a telephone number
//! 6. Attendance answered Yes: face-to-face (subject to the fallback policy
//!    when no sub-preference was answered at all)
//! 7. Otherwise: paper
//!
//! ## Case aggregation
//!
//! The case channel is the highest-ranked party channel
//! (face-to-face > video > telephone). If nobody attends, the case is paper.

use crate::case::{Adjournment, HearingOptions};
use crate::error::DomainError;
use crate::options::ChannelFallbackPolicy;
use crate::types::{HearingChannel, YesNo};

fn has_value(value: Option<&String>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Resolves the channel for one party.
///
/// # Arguments
///
/// * `options` - The party's hearing options
/// * `override_channel` - An explicit channel set by a caseworker
/// * `policy` - Behaviour when attendance is Yes but no preference was answered
/// * `party` - Label used in errors
///
/// # Errors
///
/// Returns `ChannelPreferencesMissing` when the party wants to attend, gave no
/// channel sub-preference, and the policy is `RaiseResolutionError`.
pub fn resolve_party_channel(
    options: &HearingOptions,
    override_channel: Option<HearingChannel>,
    policy: ChannelFallbackPolicy,
    party: &str,
) -> Result<HearingChannel, DomainError> {
    if let Some(channel) = override_channel {
        return Ok(channel);
    }

    if YesNo::answered_no(options.wants_to_attend) {
        return Ok(HearingChannel::NotAttending);
    }

    if YesNo::answered_yes(options.wants_hearing_type_face_to_face) {
        return Ok(HearingChannel::FaceToFace);
    }

    if YesNo::answered_yes(options.wants_hearing_type_video)
        && has_value(options.hearing_video_email.as_ref())
    {
        return Ok(HearingChannel::Video);
    }

    if YesNo::answered_yes(options.wants_hearing_type_telephone)
        && has_value(options.hearing_telephone_number.as_ref())
    {
        return Ok(HearingChannel::Telephone);
    }

    if YesNo::answered_yes(options.wants_to_attend) {
        if options.has_no_channel_preferences()
            && policy == ChannelFallbackPolicy::RaiseResolutionError
        {
            return Err(DomainError::ChannelPreferencesMissing {
                party: party.to_string(),
            });
        }
        return Ok(HearingChannel::FaceToFace);
    }

    Ok(HearingChannel::Paper)
}

/// Returns the channel requested for an adjourned case's next hearing.
///
/// Only applies when adjournment handling is enabled and an adjournment is
/// in progress.
#[must_use]
pub fn adjourned_channel(adjournment: &Adjournment, enabled: bool) -> Option<HearingChannel> {
    if !enabled || !adjournment.in_progress {
        return None;
    }
    adjournment.next_hearing_type.map(|t| t.channel())
}

/// Aggregates party channels into the case-level channel list.
///
/// Always returns exactly one channel.
#[must_use]
pub fn aggregate_case_channel<I>(channels: I) -> Vec<HearingChannel>
where
    I: IntoIterator<Item = HearingChannel>,
{
    let best: Option<HearingChannel> = channels
        .into_iter()
        .filter(HearingChannel::is_attending)
        .max_by_key(HearingChannel::rank);

    vec![best.unwrap_or(HearingChannel::Paper)]
}

/// Returns whether a case channel list means the case is decided on the papers.
#[must_use]
pub fn is_paper_case(channels: &[HearingChannel]) -> bool {
    channels.iter().all(|c| !c.is_attending())
}

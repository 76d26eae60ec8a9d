// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Override cascade.
//!
//! Two layers share one field set:
//!
//! - **Defaults** are derived from the case on every evaluation and thrown
//!   away afterwards.
//! - **Overrides** are set by caseworkers, persisted on the case, and always
//!   win for the field they set.
//!
//! Fields resolve independently. Derivation never writes into the override
//! layer; the merge happens in the [`OverrideCascade`] accessors.

use serde::{Deserialize, Serialize};
use time::{Date, Duration};

use crate::case::{CaseEventType, CaseSnapshot};
use crate::channel::{adjourned_channel, aggregate_case_channel, is_paper_case, resolve_party_channel};
use crate::duration::{DEFAULT_DURATION, MIN_OVERRIDE_DURATION, resolve_duration};
use crate::error::DomainError;
use crate::location::default_venues;
use crate::options::DerivationOptions;
use crate::party::other_party_channels;
use crate::reference::ReferenceData;
use crate::types::{HearingChannel, YesNo};

/// Days after the response is received before a hearing may be listed.
pub const HEARING_WINDOW_DAYS: i64 = 28;

/// Interpreter requirement for the appellant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpreterOverride {
    pub wanted: bool,
    pub language: Option<String>,
    pub dialect: Option<String>,
}

/// The overridable hearing fields.
///
/// Used for both the default layer and the explicit override layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideFields {
    pub duration: Option<u32>,
    pub appellant_channel: Option<HearingChannel>,
    pub appellant_interpreter: Option<InterpreterOverride>,
    pub hearing_venue_ids: Option<Vec<String>>,
    /// Combined `memberId|roleType` token.
    pub reserved_judge: Option<String>,
    pub auto_list: Option<bool>,
    pub hearing_window_start: Option<Date>,
}

fn default_interpreter(case: &CaseSnapshot) -> InterpreterOverride {
    let options = &case.appellant.hearing_options;
    if !options.wants_interpreter() {
        return InterpreterOverride::default();
    }
    let language: Option<String> = options
        .sign_language_type
        .clone()
        .filter(|l| !l.trim().is_empty())
        .or_else(|| options.languages.clone().filter(|l| !l.trim().is_empty()));
    InterpreterOverride {
        wanted: language.is_some(),
        language,
        dialect: options.dialect.clone(),
    }
}

fn default_appellant_channel(
    case: &CaseSnapshot,
    options: &DerivationOptions,
) -> Result<HearingChannel, DomainError> {
    if let Some(channel) = adjourned_channel(&case.adjournment, options.adjournment_enabled) {
        return Ok(channel);
    }
    resolve_party_channel(
        &case.appellant.hearing_options,
        None,
        options.channel_policy,
        "appellant",
    )
}

fn default_auto_list(case: &CaseSnapshot) -> bool {
    !(!case.linked_cases.is_empty() || case.confidential || case.has_unacceptable_behaviour())
}

fn default_hearing_window_start(case: &CaseSnapshot) -> Option<Date> {
    case.latest_event(CaseEventType::ResponseReceived)
        .and_then(|d| d.checked_add(Duration::days(HEARING_WINDOW_DAYS)))
}

/// Computes defaults for every field not set in `mask`.
///
/// Fields the mask overrides are left `None` in the result and their rules
/// are not evaluated, so a failing default never blocks an override. A
/// duration below the minimum or an empty venue list does not count as set.
///
/// # Errors
///
/// Returns the first derivation error among the evaluated fields.
pub fn compute_defaults_masked(
    case: &CaseSnapshot,
    reference: &dyn ReferenceData,
    options: &DerivationOptions,
    mask: &OverrideFields,
) -> Result<OverrideFields, DomainError> {
    let interpreter: InterpreterOverride = default_interpreter(case);
    let interpreter_required: bool = mask
        .appellant_interpreter
        .as_ref()
        .map_or(interpreter.wanted, |i| i.wanted);

    let default_channel: Option<HearingChannel> = match mask.appellant_channel {
        Some(_) => None,
        None => Some(default_appellant_channel(case, options)?),
    };
    // The paper decision for venues follows the effective appellant channel.
    let appellant_channel: HearingChannel = mask
        .appellant_channel
        .or(default_channel)
        .unwrap_or(HearingChannel::Paper);

    let duration: Option<u32> = match mask.duration.filter(|d| *d >= MIN_OVERRIDE_DURATION) {
        Some(_) => None,
        None => Some(resolve_duration(
            case,
            reference,
            None,
            YesNo::answered_yes(case.appellant.hearing_options.wants_to_attend),
            interpreter_required,
        )?),
    };

    let hearing_venue_ids: Option<Vec<String>> = match mask
        .hearing_venue_ids
        .as_ref()
        .filter(|v| !v.is_empty())
    {
        Some(_) => None,
        None => {
            let mut channels: Vec<HearingChannel> = vec![appellant_channel];
            channels.extend(other_party_channels(case, options.channel_policy)?);
            let case_channels: Vec<HearingChannel> = aggregate_case_channel(channels);
            Some(default_venues(
                case,
                reference,
                is_paper_case(&case_channels),
                options.adjournment_enabled,
            )?)
        }
    };

    Ok(OverrideFields {
        duration,
        appellant_channel: default_channel,
        appellant_interpreter: mask
            .appellant_interpreter
            .as_ref()
            .map_or(Some(interpreter), |_| None),
        hearing_venue_ids,
        reserved_judge: None,
        auto_list: mask.auto_list.map_or(Some(default_auto_list(case)), |_| None),
        hearing_window_start: match mask.hearing_window_start {
            Some(_) => None,
            None => default_hearing_window_start(case),
        },
    })
}

/// Computes the default layer for a case.
///
/// Pure: the snapshot and its overrides are not modified.
///
/// # Errors
///
/// Returns the first derivation error among the fields.
pub fn compute_defaults(
    case: &CaseSnapshot,
    reference: &dyn ReferenceData,
    options: &DerivationOptions,
) -> Result<OverrideFields, DomainError> {
    compute_defaults_masked(case, reference, options, &OverrideFields::default())
}

/// Resolves the effective hearing duration without deriving any other field.
///
/// Channel, venue, language, and panel rules are not evaluated, so their
/// mapping errors cannot surface here.
///
/// # Errors
///
/// Returns `DurationNotMultipleOfFive` if the effective duration breaks the
/// listing rule.
pub fn resolve_effective_duration(
    case: &CaseSnapshot,
    reference: &dyn ReferenceData,
) -> Result<u32, DomainError> {
    let interpreter_required: bool = case
        .overrides
        .appellant_interpreter
        .as_ref()
        .map_or_else(|| default_interpreter(case).wanted, |i| i.wanted);
    resolve_duration(
        case,
        reference,
        case.overrides.duration,
        YesNo::answered_yes(case.appellant.hearing_options.wants_to_attend),
        interpreter_required,
    )
}

/// Field-by-field merge of explicit overrides over freshly computed defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideCascade<'a> {
    defaults: OverrideFields,
    overrides: &'a OverrideFields,
}

impl<'a> OverrideCascade<'a> {
    /// Computes defaults for the case and layers its overrides on top.
    ///
    /// # Errors
    ///
    /// Returns a derivation error for a field that has no override.
    pub fn for_case(
        case: &'a CaseSnapshot,
        reference: &dyn ReferenceData,
        options: &DerivationOptions,
    ) -> Result<Self, DomainError> {
        let defaults: OverrideFields =
            compute_defaults_masked(case, reference, options, &case.overrides)?;
        Ok(Self::new(defaults, &case.overrides))
    }

    /// Builds a cascade from explicit layers.
    #[must_use]
    pub const fn new(defaults: OverrideFields, overrides: &'a OverrideFields) -> Self {
        Self {
            defaults,
            overrides,
        }
    }

    /// The default layer.
    #[must_use]
    pub const fn defaults(&self) -> &OverrideFields {
        &self.defaults
    }

    /// The explicit override layer.
    #[must_use]
    pub const fn overrides(&self) -> &OverrideFields {
        self.overrides
    }

    /// Hearing duration in minutes.
    ///
    /// An override shorter than the minimum is ignored. The value is not
    /// validated here; see `validate_duration`.
    #[must_use]
    pub fn duration(&self) -> u32 {
        self.overrides
            .duration
            .filter(|d| *d >= MIN_OVERRIDE_DURATION)
            .or(self.defaults.duration)
            .unwrap_or(DEFAULT_DURATION)
    }

    /// The appellant's channel.
    #[must_use]
    pub fn appellant_channel(&self) -> HearingChannel {
        self.overrides
            .appellant_channel
            .or(self.defaults.appellant_channel)
            .unwrap_or(HearingChannel::Paper)
    }

    /// The appellant's interpreter requirement.
    #[must_use]
    pub fn appellant_interpreter(&self) -> Option<&InterpreterOverride> {
        self.overrides
            .appellant_interpreter
            .as_ref()
            .or(self.defaults.appellant_interpreter.as_ref())
    }

    /// Whether an interpreter is required.
    #[must_use]
    pub fn interpreter_required(&self) -> bool {
        self.appellant_interpreter().is_some_and(|i| i.wanted)
    }

    /// Venue ids to list the hearing at.
    #[must_use]
    pub fn hearing_venue_ids(&self) -> &[String] {
        self.overrides
            .hearing_venue_ids
            .as_deref()
            .filter(|v| !v.is_empty())
            .or(self.defaults.hearing_venue_ids.as_deref())
            .unwrap_or_default()
    }

    /// The reserved judge token.
    #[must_use]
    pub fn reserved_judge(&self) -> Option<&str> {
        self.overrides
            .reserved_judge
            .as_deref()
            .or(self.defaults.reserved_judge.as_deref())
    }

    /// Whether the hearing may be listed automatically.
    ///
    /// Without an explicit value, a reserved judge turns auto-listing off.
    #[must_use]
    pub fn auto_list(&self) -> bool {
        self.overrides.auto_list.unwrap_or_else(|| {
            self.defaults.auto_list.unwrap_or(true) && self.reserved_judge().is_none()
        })
    }

    /// Earliest date the hearing may be listed.
    #[must_use]
    pub fn hearing_window_start(&self) -> Option<Date> {
        self.overrides
            .hearing_window_start
            .or(self.defaults.hearing_window_start)
    }
}

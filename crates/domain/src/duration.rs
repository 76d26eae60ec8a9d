// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hearing duration resolution.
//!
//! Durations are whole minutes and must be an exact multiple of five.
//! Values that are not are rejected, never rounded.

use crate::case::CaseSnapshot;
use crate::error::DomainError;
use crate::reference::{DurationTuple, ReferenceData};
use crate::types::DurationUnits;

/// Duration used when nothing else applies.
pub const DEFAULT_DURATION: u32 = 30;

/// Smallest override duration that is honoured.
pub const MIN_OVERRIDE_DURATION: u32 = 30;

/// Smallest adjournment-directed duration that is honoured.
pub const MIN_ADJOURNED_DURATION: u32 = 30;

/// Minutes in one listing session.
pub const SESSION_MINUTES: u32 = 165;

/// Converts an adjournment duration into minutes.
#[must_use]
pub const fn convert_adjourned_duration(value: u32, units: DurationUnits) -> u32 {
    match units {
        DurationUnits::Sessions => value.saturating_mul(SESSION_MINUTES),
        DurationUnits::Hours => value.saturating_mul(60),
        DurationUnits::Minutes => value,
    }
}

/// Checks the multiple-of-five listing rule.
///
/// # Arguments
///
/// * `duration` - The duration in minutes
/// * `source_field` - Where the value came from, for error reporting
///
/// # Errors
///
/// Returns `DurationNotMultipleOfFive` when `duration % 5 != 0`.
pub const fn validate_duration(duration: u32, source_field: &'static str) -> Result<u32, DomainError> {
    if duration % 5 != 0 {
        return Err(DomainError::DurationNotMultipleOfFive {
            duration,
            source_field,
        });
    }
    Ok(duration)
}

/// Returns the duration directed by an in-progress adjournment, in minutes.
#[must_use]
pub fn adjourned_duration(case: &CaseSnapshot) -> Option<u32> {
    let adjournment = &case.adjournment;
    if !adjournment.in_progress {
        return None;
    }
    let value: u32 = adjournment.next_hearing_listing_duration?;
    let units: DurationUnits = adjournment.next_hearing_listing_duration_units?;
    Some(convert_adjourned_duration(value, units)).filter(|d| *d >= MIN_ADJOURNED_DURATION)
}

fn select_variant(tuple: DurationTuple, attending: bool, interpreter_required: bool) -> Option<u32> {
    if !attending {
        tuple.paper
    } else if interpreter_required {
        tuple.interpreter
    } else {
        tuple.face_to_face
    }
}

/// Returns the reference-table duration plus extra time for disputed issues.
#[must_use]
pub fn reference_duration(
    case: &CaseSnapshot,
    reference: &dyn ReferenceData,
    attending: bool,
    interpreter_required: bool,
) -> Option<u32> {
    let tuple: DurationTuple = reference.durations(&case.benefit_code, &case.issue_code)?;
    let base: u32 = select_variant(tuple, attending, interpreter_required)?;

    let mut seen: Vec<&str> = Vec::new();
    let mut extra: u32 = 0;
    for code in &case.disputed_issue_codes {
        if seen.contains(&code.as_str()) {
            continue;
        }
        seen.push(code.as_str());
        extra = extra.saturating_add(reference.extra_time_minutes(code));
    }

    Some(base.saturating_add(extra))
}

/// Resolves the hearing duration in minutes.
///
/// Precedence: override (when at least [`MIN_OVERRIDE_DURATION`]), then the
/// adjournment direction, then the reference tables, then
/// [`DEFAULT_DURATION`].
///
/// # Arguments
///
/// * `case` - The case snapshot
/// * `reference` - Reference data lookups
/// * `override_duration` - A caseworker-set duration
/// * `attending` - Whether the appellant intends to attend
/// * `interpreter_required` - Whether an interpreter is needed
///
/// # Errors
///
/// Returns `DurationNotMultipleOfFive` if the selected value breaks the
/// listing rule.
pub fn resolve_duration(
    case: &CaseSnapshot,
    reference: &dyn ReferenceData,
    override_duration: Option<u32>,
    attending: bool,
    interpreter_required: bool,
) -> Result<u32, DomainError> {
    if let Some(duration) = override_duration.filter(|d| *d >= MIN_OVERRIDE_DURATION) {
        return validate_duration(duration, "override");
    }

    if let Some(duration) = adjourned_duration(case) {
        return validate_duration(duration, "adjournment");
    }

    if let Some(duration) = reference_duration(case, reference, attending, interpreter_required) {
        return validate_duration(duration, "reference");
    }

    Ok(DEFAULT_DURATION)
}

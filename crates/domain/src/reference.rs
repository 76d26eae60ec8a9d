// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference data lookups.
//!
//! Reference data is case-independent and read-only. Derivation consumes it
//! through the [`ReferenceData`] trait so that any catalogue source can be
//! plugged in; [`StaticReferenceData`] serves tables loaded from JSON.

use serde::{Deserialize, Serialize};

use crate::types::PanelMemberType;

/// Base hearing durations for a benefit/issue pair, in minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationTuple {
    /// Duration when the case is decided on the papers.
    pub paper: Option<u32>,
    /// Duration for an attended hearing.
    pub face_to_face: Option<u32>,
    /// Duration for an attended hearing that needs an interpreter.
    pub interpreter: Option<u32>,
}

/// A session category and the panel it requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCategory {
    /// The category code sent as the panel's authorisation sub-type.
    pub code: String,
    /// Panel member slots, in category order.
    pub panel_members: Vec<PanelMemberType>,
}

/// Read-only lookups over case-independent reference tables.
pub trait ReferenceData {
    /// Maps a venue id to its location id.
    fn location_for_venue(&self, venue_id: &str) -> Option<String>;

    /// Returns every active venue under a regional processing centre.
    fn active_venues_for_region(&self, region: &str) -> Vec<String>;

    /// Returns the sibling-venue group a location belongs to, if any.
    fn sibling_venues(&self, location_id: &str) -> Option<Vec<String>>;

    /// Returns the reference code for a language and optional dialect.
    fn language_reference(&self, language: &str, dialect: Option<&str>) -> Option<String>;

    /// Returns the base durations for a benefit/issue pair.
    fn durations(&self, benefit_code: &str, issue_code: &str) -> Option<DurationTuple>;

    /// Returns the extra minutes attributed to a disputed-element issue code.
    fn extra_time_minutes(&self, issue_code: &str) -> u32;

    /// Returns the session category for a benefit/issue pair and case flags.
    fn session_category(
        &self,
        benefit_code: &str,
        issue_code: &str,
        interpreter_required: bool,
        urgent: bool,
    ) -> Option<SessionCategory>;
}

/// A venue and where it sits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueEntry {
    pub venue_id: String,
    pub location_id: String,
    pub region: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

/// A language catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageEntry {
    pub name: String,
    pub dialect: Option<String>,
    pub reference: String,
}

/// Durations for one benefit/issue pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationEntry {
    pub benefit_code: String,
    pub issue_code: String,
    #[serde(flatten)]
    pub durations: DurationTuple,
}

/// Extra minutes for a disputed-element issue code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraTimeEntry {
    pub issue_code: String,
    pub minutes: u32,
}

/// A session category rule. Absent flags match either value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCategoryEntry {
    pub benefit_code: String,
    pub issue_code: String,
    pub interpreter_required: Option<bool>,
    pub urgent: Option<bool>,
    pub category: SessionCategory,
}

impl SessionCategoryEntry {
    fn matches(&self, benefit: &str, issue: &str, interpreter: bool, urgent: bool) -> bool {
        self.benefit_code == benefit
            && self.issue_code == issue
            && self.interpreter_required.is_none_or(|v| v == interpreter)
            && self.urgent.is_none_or(|v| v == urgent)
    }
}

/// Reference tables held in memory.
///
/// The first matching entry wins for every lookup, so more specific rules
/// must be listed before catch-alls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticReferenceData {
    #[serde(default)]
    pub venues: Vec<VenueEntry>,
    /// Groups of venue ids that are listed together.
    #[serde(default)]
    pub venue_groups: Vec<Vec<String>>,
    #[serde(default)]
    pub languages: Vec<LanguageEntry>,
    #[serde(default)]
    pub durations: Vec<DurationEntry>,
    #[serde(default)]
    pub extra_time: Vec<ExtraTimeEntry>,
    #[serde(default)]
    pub session_categories: Vec<SessionCategoryEntry>,
}

impl StaticReferenceData {
    /// Parses reference tables from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not match the table layout.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl ReferenceData for StaticReferenceData {
    fn location_for_venue(&self, venue_id: &str) -> Option<String> {
        self.venues
            .iter()
            .find(|v| v.venue_id == venue_id)
            .map(|v| v.location_id.clone())
    }

    fn active_venues_for_region(&self, region: &str) -> Vec<String> {
        self.venues
            .iter()
            .filter(|v| v.active && v.region == region)
            .map(|v| v.venue_id.clone())
            .collect()
    }

    fn sibling_venues(&self, location_id: &str) -> Option<Vec<String>> {
        self.venue_groups
            .iter()
            .find(|group| {
                group.iter().any(|venue_id| {
                    self.location_for_venue(venue_id).as_deref() == Some(location_id)
                })
            })
            .cloned()
    }

    fn language_reference(&self, language: &str, dialect: Option<&str>) -> Option<String> {
        let language: &str = language.trim();
        let dialect: Option<&str> = dialect.map(str::trim).filter(|d| !d.is_empty());
        self.languages
            .iter()
            .find(|entry| {
                entry.name.eq_ignore_ascii_case(language)
                    && match (entry.dialect.as_deref(), dialect) {
                        (Some(known), Some(wanted)) => known.eq_ignore_ascii_case(wanted),
                        (None, None) => true,
                        _ => false,
                    }
            })
            .map(|entry| entry.reference.clone())
    }

    fn durations(&self, benefit_code: &str, issue_code: &str) -> Option<DurationTuple> {
        self.durations
            .iter()
            .find(|d| d.benefit_code == benefit_code && d.issue_code == issue_code)
            .map(|d| d.durations)
    }

    fn extra_time_minutes(&self, issue_code: &str) -> u32 {
        self.extra_time
            .iter()
            .find(|e| e.issue_code == issue_code)
            .map_or(0, |e| e.minutes)
    }

    fn session_category(
        &self,
        benefit_code: &str,
        issue_code: &str,
        interpreter_required: bool,
        urgent: bool,
    ) -> Option<SessionCategory> {
        self.session_categories
            .iter()
            .find(|e| e.matches(benefit_code, issue_code, interpreter_required, urgent))
            .map(|e| e.category.clone())
    }
}

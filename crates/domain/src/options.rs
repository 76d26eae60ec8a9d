// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What to do when a party wants to attend but answered none of the
/// channel sub-preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChannelFallbackPolicy {
    /// List the party face-to-face.
    #[default]
    FallbackToFaceToFace,
    /// Refuse to derive a channel for the party.
    RaiseResolutionError,
}

impl FromStr for ChannelFallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fallback" | "fallback-to-face-to-face" => Ok(Self::FallbackToFaceToFace),
            "raise" | "raise-resolution-error" => Ok(Self::RaiseResolutionError),
            _ => Err(format!("unknown channel policy '{s}'")),
        }
    }
}

/// Capability flags and policies threaded through every resolver call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivationOptions {
    /// Policy for the attend-without-preferences edge case.
    pub channel_policy: ChannelFallbackPolicy,
    /// Enables the adjournment-aware channel, location and panel rules.
    pub adjournment_enabled: bool,
    /// The hearing service code for this jurisdiction.
    pub service_code: String,
}

impl Default for DerivationOptions {
    fn default() -> Self {
        Self {
            channel_policy: ChannelFallbackPolicy::default(),
            adjournment_enabled: false,
            service_code: String::from("BBA3"),
        }
    }
}

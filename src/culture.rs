// ABOUTME: Cultural context resolution mapping tenant identifiers to UI preference profiles
// ABOUTME: Substring-matches tenant ids against a fixed pattern table with a Swedish default
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Elevportal Project

//! # Cultural Context Resolver
//!
//! Municipal tenants get a cultural preference profile driving UI density,
//! interaction style, and feedback verbosity in the client. Resolution is a
//! pure, total function over tenant identifier strings: case-sensitive
//! substring matching against a fixed ordered pattern table, first match
//! wins, and anything unrecognized falls back to the Swedish mobile-first
//! profile the platform shipped with.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cultural context tag attached to every tenant session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CulturalTag {
    /// German municipalities: structured flows, comprehensive feedback
    GermanSystematic,
    /// French municipalities: collaborative, discussion-oriented flows
    FrenchCollaborative,
    /// Dutch municipalities: progressive, experiment-friendly flows
    DutchProgressive,
    /// Default profile: Swedish mobile-first
    SwedishMobile,
}

impl CulturalTag {
    /// Stable string form used in session payloads and logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GermanSystematic => "german_systematic",
            Self::FrenchCollaborative => "french_collaborative",
            Self::DutchProgressive => "dutch_progressive",
            Self::SwedishMobile => "swedish_mobile",
        }
    }

    /// Fixed preference profile for this tag
    #[must_use]
    pub fn preferences(self) -> CulturalPreferences {
        match self {
            Self::GermanSystematic => CulturalPreferences {
                language: "de-DE".into(),
                ui_density: "detailed".into(),
                interaction_style: "structured".into(),
                feedback_level: "comprehensive".into(),
            },
            Self::FrenchCollaborative => CulturalPreferences {
                language: "fr-FR".into(),
                ui_density: "balanced".into(),
                interaction_style: "collaborative".into(),
                feedback_level: "moderate".into(),
            },
            Self::DutchProgressive => CulturalPreferences {
                language: "nl-NL".into(),
                ui_density: "compact".into(),
                interaction_style: "direct".into(),
                feedback_level: "light".into(),
            },
            Self::SwedishMobile => CulturalPreferences {
                language: "sv-SE".into(),
                ui_density: "compact".into(),
                interaction_style: "mobile_first".into(),
                feedback_level: "minimal".into(),
            },
        }
    }
}

impl fmt::Display for CulturalTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UI/interaction preference bundle for a cultural context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CulturalPreferences {
    /// BCP 47 language tag for the client locale
    pub language: String,
    /// Information density the UI renders at
    pub ui_density: String,
    /// Primary interaction style for game flows
    pub interaction_style: String,
    /// Verbosity of in-game feedback
    pub feedback_level: String,
}

/// Ordered pattern table; earlier entries shadow later ones.
/// Matching is case-sensitive on purpose: tenant ids are normalized
/// lowercase upstream, and an unnormalized id should fall through to the
/// default rather than half-match.
const PATTERNS: &[(&str, CulturalTag)] = &[
    ("german", CulturalTag::GermanSystematic),
    ("berlin", CulturalTag::GermanSystematic),
    ("munich", CulturalTag::GermanSystematic),
    ("french", CulturalTag::FrenchCollaborative),
    ("paris", CulturalTag::FrenchCollaborative),
    ("lyon", CulturalTag::FrenchCollaborative),
    ("dutch", CulturalTag::DutchProgressive),
    ("amsterdam", CulturalTag::DutchProgressive),
    ("rotterdam", CulturalTag::DutchProgressive),
];

/// Resolve the cultural context for a tenant identifier.
///
/// Total over all strings, including the empty string. Never fails.
#[must_use]
pub fn resolve(tenant_id: &str) -> CulturalTag {
    PATTERNS
        .iter()
        .find(|(pattern, _)| tenant_id.contains(pattern))
        .map_or(CulturalTag::SwedishMobile, |&(_, tag)| tag)
}

//! Two-tier crisis keyword detection and the verdict surfaced to callers.

use serde::Serialize;
use tracing::info;

use super::keywords::{normalize_for_matching, MODERATE_KEYWORDS, SEVERE_KEYWORDS};
use super::specialist::Specialist;

/// Distinct moderate matches needed to raise an emergency.
pub const MODERATE_MATCHES_FOR_EMERGENCY: usize = 2;

/// Highest tier reached by a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    /// No severe keyword and fewer than two distinct moderate keywords.
    None,
    /// At least two distinct moderate keywords.
    Moderate,
    /// At least one severe keyword.
    Severe,
}

/// Keywords found in one piece of text, before the verdict is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub tier: SeverityTier,
    pub severe_matches: Vec<&'static str>,
    pub moderate_matches: Vec<&'static str>,
}

impl Detection {
    pub fn is_emergency(&self) -> bool {
        self.tier != SeverityTier::None
    }
}

/// Classifies text against the severe and moderate keyword tiers.
#[derive(Debug, Clone)]
pub struct EmergencyDetector {
    severe: Vec<&'static str>,
    moderate: Vec<&'static str>,
}

impl Default for EmergencyDetector {
    fn default() -> Self {
        Self {
            severe: SEVERE_KEYWORDS.to_vec(),
            moderate: MODERATE_KEYWORDS.to_vec(),
        }
    }
}

impl EmergencyDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies the model reply and the user message together.
    pub fn detect(&self, model_text: &str, user_text: &str) -> Detection {
        let combined = normalize_for_matching(&format!("{}\n{}", model_text, user_text));
        self.detect_normalized(&combined)
    }

    /// Classifies text that has already gone through `normalize_for_matching`.
    pub fn detect_normalized(&self, text: &str) -> Detection {
        let severe_matches = matches_in(&self.severe, text);
        let moderate_matches = matches_in(&self.moderate, text);

        let tier = if !severe_matches.is_empty() {
            SeverityTier::Severe
        } else if moderate_matches.len() >= MODERATE_MATCHES_FOR_EMERGENCY {
            SeverityTier::Moderate
        } else {
            SeverityTier::None
        };

        Detection {
            tier,
            severe_matches,
            moderate_matches,
        }
    }
}

fn matches_in(keywords: &[&'static str], text: &str) -> Vec<&'static str> {
    let mut found: Vec<&'static str> = keywords
        .iter()
        .copied()
        .filter(|keyword| text.contains(keyword))
        .collect();
    found.dedup();
    found
}

/// A fixed crisis contact shown with every emergency verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CrisisResource {
    pub label: &'static str,
    pub contact: &'static str,
}

pub const CRISIS_RESOURCES: [CrisisResource; 3] = [
    CrisisResource {
        label: "988 Suicide & Crisis Lifeline",
        contact: "Call or text 988",
    },
    CrisisResource {
        label: "Crisis Text Line",
        contact: "Text HOME to 741741",
    },
    CrisisResource {
        label: "Emergency services",
        contact: "Call 911",
    },
];

/// Outcome of crisis screening for one turn.
///
/// A positive verdict can only be built through [`EmergencyVerdict::emergency`],
/// which always attaches [`CRISIS_RESOURCES`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyVerdict {
    is_emergency: bool,
    tier: SeverityTier,
    matched_keywords: Vec<&'static str>,
    specialists: Vec<Specialist>,
    crisis_resources: Vec<CrisisResource>,
}

impl EmergencyVerdict {
    /// Verdict for a detection that did not reach emergency level.
    pub fn clear(detection: Detection) -> Self {
        Self {
            is_emergency: false,
            tier: SeverityTier::None,
            matched_keywords: detection.moderate_matches,
            specialists: Vec::new(),
            crisis_resources: Vec::new(),
        }
    }

    /// Verdict for an emergency, carrying matched specialists and resources.
    pub fn emergency(detection: Detection, specialists: Vec<Specialist>) -> Self {
        info!(
            tier = ?detection.tier,
            severe = ?detection.severe_matches,
            moderate = ?detection.moderate_matches,
            specialists = specialists.len(),
            "Emergency verdict raised"
        );
        let mut matched_keywords = detection.severe_matches;
        matched_keywords.extend(detection.moderate_matches);
        Self {
            is_emergency: true,
            tier: detection.tier,
            matched_keywords,
            specialists,
            crisis_resources: CRISIS_RESOURCES.to_vec(),
        }
    }

    pub fn is_emergency(&self) -> bool {
        self.is_emergency
    }

    pub fn tier(&self) -> SeverityTier {
        self.tier
    }

    pub fn matched_keywords(&self) -> &[&'static str] {
        &self.matched_keywords
    }

    pub fn specialists(&self) -> &[Specialist] {
        &self.specialists
    }

    /// Empty unless `is_emergency()`.
    pub fn crisis_resources(&self) -> &[CrisisResource] {
        &self.crisis_resources
    }
}

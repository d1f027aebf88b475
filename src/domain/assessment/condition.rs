//! A named concern with the confidence last reported for it.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Confidence, Timestamp};

/// Condition names the tracker recognizes in model text.
pub const KNOWN_CONDITIONS: [&str; 5] = ["anxiety", "depression", "stress", "trauma", "ptsd"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    name: String,
    confidence: Confidence,
    last_updated: Timestamp,
}

impl Condition {
    /// Creates a condition; the name is stored lowercased.
    pub fn new(name: &str, confidence: Confidence, last_updated: Timestamp) -> Self {
        Self {
            name: name.to_lowercase(),
            confidence,
            last_updated,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    pub fn last_updated(&self) -> Timestamp {
        self.last_updated
    }
}

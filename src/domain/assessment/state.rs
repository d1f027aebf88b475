//! Cross-turn assessment state.
//!
//! Created empty at session start and merged into after every parsed reply.
//! Conditions are never pruned; the same name is overwritten (last write wins).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::condition::Condition;
use crate::domain::foundation::{Confidence, Timestamp};

/// Default confidence above which a condition is considered established.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentState {
    conditions: BTreeMap<String, Condition>,
    /// Reserved: carried and exported but not used to gate anything.
    confidence_threshold: f64,
    current_focus: Option<String>,
}

impl Default for AssessmentState {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_THRESHOLD)
    }
}

impl AssessmentState {
    pub fn new(confidence_threshold: f64) -> Self {
        Self {
            conditions: BTreeMap::new(),
            confidence_threshold,
            current_focus: None,
        }
    }

    /// All conditions, keyed by lowercased name.
    pub fn conditions(&self) -> &BTreeMap<String, Condition> {
        &self.conditions
    }

    pub fn condition(&self, name: &str) -> Option<&Condition> {
        self.conditions.get(&name.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }

    /// The condition with the highest confidence; ties go to the most
    /// recently updated one.
    pub fn current_focus(&self) -> Option<&str> {
        self.current_focus.as_deref()
    }

    /// Inserts or overwrites a condition.
    pub fn upsert(&mut self, name: &str, confidence: Confidence, at: Timestamp) {
        let condition = Condition::new(name, confidence, at);
        self.conditions
            .insert(condition.name().to_string(), condition);
        self.refresh_focus();
    }

    fn refresh_focus(&mut self) {
        self.current_focus = self
            .conditions
            .values()
            .max_by(|a, b| {
                a.confidence()
                    .cmp(&b.confidence())
                    .then_with(|| a.last_updated().cmp(&b.last_updated()))
            })
            .map(|c| c.name().to_string());
    }
}

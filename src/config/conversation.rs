//! Conversation behaviour configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::assessment::DEFAULT_CONFIDENCE_THRESHOLD;
use crate::domain::conversation::DEFAULT_PHASE_THRESHOLD;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ConversationConfig {
    /// Turns in history after which replies move to solution-giving
    #[serde(default = "default_phase_threshold")]
    pub phase_threshold: usize,

    /// Carried on the assessment; nothing gates on it yet
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
}

impl ConversationConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.phase_threshold == 0 {
            return Err(ValidationError::InvalidPhaseThreshold);
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(ValidationError::InvalidConfidenceThreshold(
                self.confidence_threshold,
            ));
        }
        Ok(())
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            phase_threshold: default_phase_threshold(),
            confidence_threshold: default_confidence_threshold(),
        }
    }
}

fn default_phase_threshold() -> usize {
    DEFAULT_PHASE_THRESHOLD
}

fn default_confidence_threshold() -> f64 {
    DEFAULT_CONFIDENCE_THRESHOLD
}

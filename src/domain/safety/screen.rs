//! Per-turn crisis screening: detection first, then specialist matching on an emergency.

use std::sync::Arc;

use super::emergency::{EmergencyDetector, EmergencyVerdict};
use super::keywords::normalize_for_matching;
use super::specialist::SpecialistMatcher;
use crate::ports::SpecialistDirectory;

/// Runs detection and, on an emergency, specialist matching for one turn.
#[derive(Clone)]
pub struct CrisisScreen {
    detector: EmergencyDetector,
    matcher: SpecialistMatcher,
    directory: Arc<dyn SpecialistDirectory>,
}

impl CrisisScreen {
    pub fn new(directory: Arc<dyn SpecialistDirectory>) -> Self {
        Self {
            detector: EmergencyDetector::new(),
            matcher: SpecialistMatcher::new(),
            directory,
        }
    }

    /// Screens the model reply together with the user message.
    ///
    /// Pass an empty `model_text` when no reply was generated.
    pub fn screen(&self, model_text: &str, user_text: &str) -> EmergencyVerdict {
        let combined = normalize_for_matching(&format!("{}\n{}", model_text, user_text));
        let detection = self.detector.detect_normalized(&combined);
        if !detection.is_emergency() {
            return EmergencyVerdict::clear(detection);
        }
        let specialists = self
            .matcher
            .match_specialists(self.directory.as_ref(), &combined);
        EmergencyVerdict::emergency(detection, specialists)
    }
}

impl std::fmt::Debug for CrisisScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrisisScreen")
            .field("detector", &self.detector)
            .finish_non_exhaustive()
    }
}

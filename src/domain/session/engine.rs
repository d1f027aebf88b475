//! Components the session reducer runs after each generation call.

use std::sync::Arc;

use crate::domain::assessment::AssessmentTracker;
use crate::domain::conversation::{PhaseManager, PromptComposer, ResponseParser};
use crate::domain::safety::CrisisScreen;
use crate::ports::SpecialistDirectory;

/// Bundle of the pure turn-processing components.
///
/// The same `PhaseManager` derives the phase for prompt composition and for
/// the reported turn outcome, so prompt and parser expectations never diverge.
#[derive(Debug, Clone)]
pub struct TurnEngine {
    pub phase_manager: PhaseManager,
    pub composer: PromptComposer,
    pub parser: ResponseParser,
    pub tracker: AssessmentTracker,
    pub screen: CrisisScreen,
}

impl TurnEngine {
    pub fn new(directory: Arc<dyn SpecialistDirectory>) -> Self {
        Self {
            phase_manager: PhaseManager::default(),
            composer: PromptComposer::new(),
            parser: ResponseParser::new(),
            tracker: AssessmentTracker::new(),
            screen: CrisisScreen::new(directory),
        }
    }

    pub fn with_phase_manager(mut self, phase_manager: PhaseManager) -> Self {
        self.phase_manager = phase_manager;
        self
    }
}

//! Session state and the deterministic turn reducer.
//!
//! `SessionState::apply_turn` takes the state by value together with the
//! outcome of one generation call and returns the next state. Nothing is
//! mutated before the generation result exists, so a turn whose call never
//! resolves leaves the previous state untouched.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::engine::TurnEngine;
use crate::domain::assessment::AssessmentState;
use crate::domain::conversation::{
    ConversationHistory, ConversationPhase, ParsedResponse, TurnRole,
};
use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::safety::EmergencyVerdict;

/// Assistant text recorded when the generation call fails.
pub const GENERATION_FALLBACK_MESSAGE: &str =
    "I apologize, but I'm having trouble processing your message. Please try again.";

/// One analysed turn, kept for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisHistoryEntry {
    pub timestamp: Timestamp,
    pub user_message: String,
    pub response: ParsedResponse,
}

/// Result of the external generation call for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Completed(String),
    /// The call failed or timed out. The reason is logged only.
    Failed(String),
}

impl<E: std::fmt::Display> From<Result<String, E>> for GenerationOutcome {
    fn from(result: Result<String, E>) -> Self {
        match result {
            Ok(text) => GenerationOutcome::Completed(text),
            Err(err) => GenerationOutcome::Failed(err.to_string()),
        }
    }
}

/// What the caller renders for the assistant side of a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "body", rename_all = "snake_case")]
pub enum AssistantReply {
    Formatted(ParsedResponse),
    Unformatted(String),
}

impl AssistantReply {
    pub fn is_formatted(&self) -> bool {
        matches!(self, AssistantReply::Formatted(_))
    }

    pub fn parsed(&self) -> Option<&ParsedResponse> {
        match self {
            AssistantReply::Formatted(parsed) => Some(parsed),
            AssistantReply::Unformatted(_) => None,
        }
    }
}

/// Everything the caller needs to render one completed turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnOutcome {
    /// Phase the turn was composed and parsed under.
    pub phase: ConversationPhase,
    pub reply: AssistantReply,
    pub verdict: EmergencyVerdict,
}

/// All state for the single in-process session.
///
/// `history`, `assessment.conditions` and `analysis_history` only ever grow
/// or merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    session_id: SessionId,
    history: ConversationHistory,
    assessment: AssessmentState,
    analysis_history: Vec<AnalysisHistoryEntry>,
}

impl SessionState {
    pub fn new(confidence_threshold: f64) -> Self {
        Self {
            session_id: SessionId::new(),
            history: ConversationHistory::new(),
            assessment: AssessmentState::new(confidence_threshold),
            analysis_history: Vec::new(),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn assessment(&self) -> &AssessmentState {
        &self.assessment
    }

    pub fn analysis_history(&self) -> &[AnalysisHistoryEntry] {
        &self.analysis_history
    }

    /// Phase the next turn will run under.
    pub fn current_phase(&self, engine: &TurnEngine) -> ConversationPhase {
        engine.phase_manager.phase_for(&self.history)
    }

    /// Builds the prompt for `user_message` without changing state.
    pub fn compose_prompt(&self, engine: &TurnEngine, user_message: &str) -> String {
        let phase = self.current_phase(engine);
        let assessment = (!self.assessment.is_empty()).then_some(&self.assessment);
        engine
            .composer
            .compose(&self.history, user_message, phase, assessment)
    }

    /// Applies one turn using the current time.
    pub fn apply_turn(
        self,
        engine: &TurnEngine,
        user_message: &str,
        generation: GenerationOutcome,
    ) -> (Self, TurnOutcome) {
        self.apply_turn_at(engine, user_message, generation, Timestamp::now())
    }

    /// Applies one turn with an explicit timestamp.
    pub fn apply_turn_at(
        mut self,
        engine: &TurnEngine,
        user_message: &str,
        generation: GenerationOutcome,
        at: Timestamp,
    ) -> (Self, TurnOutcome) {
        let phase = self.current_phase(engine);

        let (reply, verdict) = match generation {
            GenerationOutcome::Completed(raw) => {
                let mut parsed = engine.parser.parse(&raw);
                let verdict = engine.screen.screen(&raw, user_message);
                parsed.is_emergency = verdict.is_emergency();

                let updated = engine.tracker.update_at(&mut self.assessment, &raw, at);
                debug!(
                    session_id = %self.session_id,
                    phase = phase.label(),
                    conditions_updated = updated,
                    degraded = parsed.degraded,
                    "Turn parsed"
                );

                self.history
                    .push_turn(TurnRole::User, user_message, false, at);
                self.history.push_turn(TurnRole::Assistant, raw, true, at);
                self.analysis_history.push(AnalysisHistoryEntry {
                    timestamp: at,
                    user_message: user_message.to_string(),
                    response: parsed.clone(),
                });
                (AssistantReply::Formatted(parsed), verdict)
            }
            GenerationOutcome::Failed(reason) => {
                warn!(
                    session_id = %self.session_id,
                    reason = %reason,
                    "Generation failed, recording fallback reply"
                );
                let verdict = engine.screen.screen("", user_message);
                self.history
                    .push_turn(TurnRole::User, user_message, false, at);
                self.history.push_turn(
                    TurnRole::Assistant,
                    GENERATION_FALLBACK_MESSAGE,
                    false,
                    at,
                );
                (
                    AssistantReply::Unformatted(GENERATION_FALLBACK_MESSAGE.to_string()),
                    verdict,
                )
            }
        };

        (
            self,
            TurnOutcome {
                phase,
                reply,
                verdict,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::PhaseManager;
    use crate::domain::safety::{ConcernCategory, Specialist};
    use crate::ports::SpecialistDirectory;
    use std::sync::Arc;

    struct EmptyDirectory;

    impl SpecialistDirectory for EmptyDirectory {
        fn roster(&self, _category: ConcernCategory) -> Vec<Specialist> {
            Vec::new()
        }
    }

    fn engine() -> TurnEngine {
        TurnEngine::new(Arc::new(EmptyDirectory))
    }

    const SCENARIO_REPLY: &str = "Mental Health Concerns:\nanxiety (confidence: 80%)\nSevere depression noted.\nFollow-up Question:\nHow long have you felt this way?";

    mod completed_turns {
        use super::*;

        #[test]
        fn crisis_scenario_produces_emergency_and_assessment() {
            let (state, outcome) = SessionState::default().apply_turn(
                &engine(),
                "I can't take it anymore",
                GenerationOutcome::Completed(SCENARIO_REPLY.to_string()),
            );

            assert!(outcome.verdict.is_emergency());
            let parsed = outcome.reply.parsed().expect("formatted reply");
            assert!(parsed.is_emergency);
            assert_eq!(parsed.follow_up_question, "How long have you felt this way?");
            assert_eq!(
                parsed.mental_health_concerns,
                vec!["anxiety (confidence: 80%)", "Severe depression noted."]
            );

            let anxiety = state.assessment().condition("anxiety").expect("anxiety");
            assert_eq!(anxiety.confidence().as_fraction(), 0.8);
        }

        #[test]
        fn turn_appends_history_and_analysis() {
            let (state, _) = SessionState::default().apply_turn(
                &engine(),
                "hello",
                GenerationOutcome::Completed("Therapeutic Response:\nHi.".to_string()),
            );

            assert_eq!(state.history().len(), 2);
            assert_eq!(state.history().turns()[0].role(), TurnRole::User);
            assert_eq!(state.history().turns()[1].content(), "Therapeutic Response:\nHi.");
            assert_eq!(state.analysis_history().len(), 1);
            assert_eq!(state.analysis_history()[0].user_message, "hello");
            assert_eq!(state.analysis_history()[0].response.therapeutic_response, "Hi.");
        }

        #[test]
        fn phase_is_derived_before_appending() {
            let engine = engine().with_phase_manager(PhaseManager::new(1));
            let mut state = SessionState::default();
            let mut phases = Vec::new();
            for _ in 0..3 {
                let (next, outcome) = state.apply_turn(
                    &engine,
                    "tell me more",
                    GenerationOutcome::Completed("Follow-up Question:\nAnd then?".to_string()),
                );
                phases.push(outcome.phase);
                state = next;
            }
            assert_eq!(
                phases,
                vec![
                    ConversationPhase::Initial,
                    ConversationPhase::Solution,
                    ConversationPhase::Solution
                ]
            );
        }

        #[test]
        fn replay_with_same_inputs_is_deterministic() {
            let at = Timestamp::from_unix_secs(1_700_000_000);
            let start = SessionState::default();
            let run = |state: SessionState| {
                state.apply_turn_at(
                    &engine(),
                    "I feel stressed",
                    GenerationOutcome::Completed("stress (confidence: 55%)".to_string()),
                    at,
                )
            };
            let (a, outcome_a) = run(start.clone());
            let (b, outcome_b) = run(start);
            assert_eq!(a, b);
            assert_eq!(outcome_a, outcome_b);
        }
    }

    mod failed_generation {
        use super::*;

        #[test]
        fn failure_records_unformatted_fallback() {
            let (state, outcome) = SessionState::default().apply_turn(
                &engine(),
                "hi there",
                GenerationOutcome::Failed("timeout".to_string()),
            );

            assert_eq!(
                outcome.reply,
                AssistantReply::Unformatted(GENERATION_FALLBACK_MESSAGE.to_string())
            );
            assert_eq!(state.history().len(), 2);
            assert!(!state.history().turns()[1].is_formatted());
            assert!(state.analysis_history().is_empty());
            assert!(state.assessment().is_empty());
        }

        #[test]
        fn failure_still_screens_user_text() {
            let (_, outcome) = SessionState::default().apply_turn(
                &engine(),
                "I want to kill myself",
                GenerationOutcome::Failed("service unavailable".to_string()),
            );
            assert!(outcome.verdict.is_emergency());
            assert!(!outcome.verdict.crisis_resources().is_empty());
        }

        #[test]
        fn result_conversion_maps_errors_to_failure() {
            let outcome: GenerationOutcome = Err::<String, _>("boom").into();
            assert_eq!(outcome, GenerationOutcome::Failed("boom".to_string()));
        }
    }

    mod prompting {
        use super::*;

        #[test]
        fn first_prompt_asks_questions() {
            let prompt =
                SessionState::default().compose_prompt(&engine(), "I feel anxious all the time");
            assert!(prompt.contains("Do NOT offer solutions"));
            assert!(prompt.contains("User: I feel anxious all the time"));
            assert!(!prompt.contains("Working assessment"));
        }

        #[test]
        fn prompt_carries_assessment_once_known() {
            let (state, _) = SessionState::default().apply_turn(
                &engine(),
                "work is a lot",
                GenerationOutcome::Completed("stress (confidence: 60%)".to_string()),
            );
            let prompt = state.compose_prompt(&engine(), "still stressed");
            assert!(prompt.contains("stress (60%)"));
        }
    }
}

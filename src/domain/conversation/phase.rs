//! Conversation phases.
//!
//! The phase is never stored. It is recomputed from the history length on
//! every turn so that the prompt body and the parser expectations cannot
//! drift apart.

use serde::{Deserialize, Serialize};

use super::history::ConversationHistory;

/// Default number of turns that stay in question-asking mode.
pub const DEFAULT_PHASE_THRESHOLD: usize = 3;

/// The stage of the conversation governing prompt behavior.
///
/// - `Initial`: no turns yet; open the conversation and ask questions
/// - `Understanding`: up to the threshold; keep asking clarifying questions
/// - `Solution`: past the threshold; offer concrete techniques
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationPhase {
    #[default]
    Initial,
    Understanding,
    Solution,
}

impl ConversationPhase {
    /// Returns the instruction block injected into the prompt for this phase.
    pub fn directive(&self) -> &'static str {
        match self {
            Self::Initial => {
                "This is the start of the conversation. Do NOT offer solutions, techniques or \
                 activities yet. Acknowledge what the person shared and ask clarifying questions \
                 to understand their situation, how long it has been going on and how it affects \
                 their daily life."
            }
            Self::Understanding => {
                "You are still getting to know this person. Do NOT offer solutions yet. Reflect \
                 back what you have understood so far and ask clarifying questions that fill in \
                 what is still missing."
            }
            Self::Solution => {
                "You now understand the situation well enough. Offer concrete, practical \
                 techniques and evidence-based approaches tailored to what the person has \
                 shared, and explain briefly why each may help."
            }
        }
    }

    /// Returns a short label suitable for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Initial => "Getting started",
            Self::Understanding => "Understanding",
            Self::Solution => "Finding solutions",
        }
    }

    /// Returns true if the assistant should be asking rather than advising.
    pub fn is_question_asking(&self) -> bool {
        matches!(self, Self::Initial | Self::Understanding)
    }

    /// Returns true if the assistant should offer concrete techniques.
    pub fn is_solution_giving(&self) -> bool {
        matches!(self, Self::Solution)
    }
}

/// Derives the phase from the number of turns already in the history.
///
/// A single instance is shared by prompt composition and turn reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseManager {
    threshold: usize,
}

impl PhaseManager {
    /// Creates a manager; turns `<= threshold` stay in question-asking mode.
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    /// Returns the configured threshold.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Returns the phase for the given history.
    pub fn phase_for(&self, history: &ConversationHistory) -> ConversationPhase {
        self.phase_for_turn_count(history.len())
    }

    /// Returns the phase for a raw turn count.
    pub fn phase_for_turn_count(&self, turns: usize) -> ConversationPhase {
        match turns {
            0 => ConversationPhase::Initial,
            n if n <= self.threshold => ConversationPhase::Understanding,
            _ => ConversationPhase::Solution,
        }
    }
}

impl Default for PhaseManager {
    fn default() -> Self {
        Self::new(DEFAULT_PHASE_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod phase_basics {
        use super::*;

        #[test]
        fn default_phase_is_initial() {
            assert_eq!(ConversationPhase::default(), ConversationPhase::Initial);
        }

        #[test]
        fn serializes_to_snake_case() {
            let json = serde_json::to_string(&ConversationPhase::Understanding).unwrap();
            assert_eq!(json, "\"understanding\"");
        }

        #[test]
        fn early_phases_ask_questions() {
            assert!(ConversationPhase::Initial.is_question_asking());
            assert!(ConversationPhase::Understanding.is_question_asking());
            assert!(!ConversationPhase::Solution.is_question_asking());
            assert!(ConversationPhase::Solution.is_solution_giving());
        }

        #[test]
        fn early_directives_forbid_solutions() {
            for phase in [ConversationPhase::Initial, ConversationPhase::Understanding] {
                let directive = phase.directive();
                assert!(directive.contains("Do NOT offer solutions"));
                assert!(directive.contains("clarifying questions"));
            }
        }

        #[test]
        fn solution_directive_offers_techniques() {
            assert!(ConversationPhase::Solution.directive().contains("techniques"));
        }
    }

    mod manager {
        use super::*;

        #[test]
        fn empty_history_is_initial() {
            let manager = PhaseManager::default();
            assert_eq!(
                manager.phase_for(&ConversationHistory::new()),
                ConversationPhase::Initial
            );
        }

        #[test]
        fn turns_up_to_threshold_are_understanding() {
            let manager = PhaseManager::new(3);
            for turns in 1..=3 {
                assert_eq!(
                    manager.phase_for_turn_count(turns),
                    ConversationPhase::Understanding
                );
            }
        }

        #[test]
        fn turns_past_threshold_are_solution() {
            let manager = PhaseManager::new(3);
            assert_eq!(manager.phase_for_turn_count(4), ConversationPhase::Solution);
            assert_eq!(manager.phase_for_turn_count(40), ConversationPhase::Solution);
        }

        #[test]
        fn threshold_is_configurable() {
            let manager = PhaseManager::new(1);
            assert_eq!(manager.phase_for_turn_count(1), ConversationPhase::Understanding);
            assert_eq!(manager.phase_for_turn_count(2), ConversationPhase::Solution);
        }

        #[test]
        fn phase_follows_history_growth() {
            let manager = PhaseManager::default();
            let mut history = ConversationHistory::new();
            history.push_user("one");
            history.push_assistant("two");
            assert_eq!(manager.phase_for(&history), ConversationPhase::Understanding);
            history.push_user("three");
            history.push_assistant("four");
            assert_eq!(manager.phase_for(&history), ConversationPhase::Solution);
        }
    }
}

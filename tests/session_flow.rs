//! Integration tests for whole conversations.
//!
//! These tests drive sessions end to end through `SendMessageHandler` with
//! the mock provider and the embedded specialist roster:
//! 1. Phase derivation shapes the prompt on each turn
//! 2. Replies are parsed into sections
//! 3. Crisis language raises a verdict with resources and specialists
//! 4. Condition confidence accumulates across turns

use std::sync::Arc;

use mindbridge::adapters::{MockAIProvider, MockError, StaticSpecialistDirectory};
use mindbridge::application::{SendMessageCommand, SendMessageHandler};
use mindbridge::domain::conversation::{
    ConversationPhase, PhaseManager, TurnRole, MAX_RESPONSE_LENGTH,
};
use mindbridge::domain::safety::SeverityTier;
use mindbridge::domain::session::{
    AssistantReply, SessionState, TurnEngine, GENERATION_FALLBACK_MESSAGE,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn handler(provider: &MockAIProvider, threshold: usize) -> SendMessageHandler {
    let directory = StaticSpecialistDirectory::embedded().unwrap();
    let engine = TurnEngine::new(Arc::new(directory))
        .with_phase_manager(PhaseManager::new(threshold));
    SendMessageHandler::new(Arc::new(provider.clone()), engine)
}

async fn send(
    handler: &SendMessageHandler,
    state: SessionState,
    message: &str,
) -> (SessionState, mindbridge::domain::session::TurnOutcome) {
    let result = handler
        .handle(&state, SendMessageCommand::new(message))
        .await
        .unwrap();
    (result.state, result.outcome)
}

const QUESTION_REPLY: &str = "Initial Thoughts:
Work pressure seems to be building.
Mental Health Concerns:
stress (confidence: 60%)
anxiety (confidence: 35%)
Therapeutic Response:
That sounds like a heavy load to carry.
Follow-up Question:
When did this start to feel unmanageable?";

const SOLUTION_REPLY: &str = "Initial Thoughts:
You've described this clearly.
Mental Health Concerns:
stress (confidence: 75%)
Suggested Activities:
- Box breathing for four minutes before meetings
- A ten-minute walk after lunch
Research-Based Solutions:
- Cognitive restructuring of catastrophic predictions
Therapeutic Response:
You're already noticing the pattern, which matters.
Follow-up Question:
Which of these could you try tomorrow?";

// =============================================================================
// Phases
// =============================================================================

#[tokio::test]
async fn conversation_moves_from_questions_to_solutions() {
    let provider = MockAIProvider::new()
        .with_response(QUESTION_REPLY)
        .with_response(QUESTION_REPLY)
        .with_response(SOLUTION_REPLY);
    let handler = handler(&provider, 3);

    let state = SessionState::default();
    let (state, first) = send(&handler, state, "I feel anxious all the time").await;
    let first_prompt = provider.last_prompt().unwrap();

    let (state, second) = send(&handler, state, "Mostly about work deadlines").await;
    let (state, third) = send(&handler, state, "It's been about two months").await;
    let third_prompt = provider.last_prompt().unwrap();

    assert_eq!(first.phase, ConversationPhase::Initial);
    assert_eq!(second.phase, ConversationPhase::Understanding);
    assert_eq!(third.phase, ConversationPhase::Solution);

    assert!(first_prompt.contains("Do NOT offer solutions"));
    assert!(!first_prompt.contains("Suggested Activities:"));
    assert!(third_prompt.contains("Suggested Activities:"));
    assert!(third_prompt.contains("Research-Based Solutions:"));
    assert!(third_prompt.contains("Assistant: Initial Thoughts:"));

    let parsed = third.reply.parsed().unwrap();
    assert_eq!(parsed.suggested_activities.len(), 2);
    assert_eq!(
        parsed.research_based_solutions,
        vec!["- Cognitive restructuring of catastrophic predictions"]
    );

    assert_eq!(state.history().len(), 6);
    assert_eq!(state.analysis_history().len(), 3);
}

#[tokio::test]
async fn history_alternates_roles_with_ordinals() {
    let provider = MockAIProvider::new();
    let handler = handler(&provider, 3);

    let (state, _) = send(&handler, SessionState::default(), "hello").await;
    let (state, _) = send(&handler, state, "still here").await;

    let roles: Vec<_> = state.history().iter().map(|t| t.role()).collect();
    assert_eq!(
        roles,
        vec![TurnRole::User, TurnRole::Assistant, TurnRole::User, TurnRole::Assistant]
    );
    let ordinals: Vec<_> = state.history().iter().map(|t| t.ordinal()).collect();
    assert_eq!(ordinals, vec![0, 1, 2, 3]);
}

// =============================================================================
// Assessment
// =============================================================================

#[tokio::test]
async fn assessment_accumulates_with_last_write_wins() {
    let provider = MockAIProvider::new()
        .with_response(QUESTION_REPLY)
        .with_response(SOLUTION_REPLY);
    let handler = handler(&provider, 1);

    let (state, _) = send(&handler, SessionState::default(), "work is too much").await;
    let (state, _) = send(&handler, state, "I can't switch off at night").await;

    let assessment = state.assessment();
    assert_eq!(
        assessment.condition("stress").unwrap().confidence().as_fraction(),
        0.75
    );
    assert_eq!(
        assessment.condition("anxiety").unwrap().confidence().as_fraction(),
        0.35
    );
    assert_eq!(assessment.current_focus(), Some("stress"));

    let prompt = provider.last_prompt().unwrap();
    assert!(prompt.contains("- stress (60%)"));
}

// =============================================================================
// Crisis screening
// =============================================================================

#[tokio::test]
async fn severe_user_text_triggers_emergency_with_resources() {
    let provider = MockAIProvider::new().with_response(
        "Mental Health Concerns:\nanxiety (confidence: 80%)\nSevere depression noted.\nFollow-up Question:\nHow long have you felt this way?",
    );
    let handler = handler(&provider, 3);

    let (state, outcome) = send(&handler, SessionState::default(), "I can't take it anymore").await;

    assert!(outcome.verdict.is_emergency());
    assert_eq!(outcome.verdict.tier(), SeverityTier::Severe);
    assert!(outcome
        .verdict
        .crisis_resources()
        .iter()
        .any(|r| r.contact.contains("741741")));

    let parsed = outcome.reply.parsed().unwrap();
    assert!(parsed.is_emergency);
    assert_eq!(parsed.follow_up_question, "How long have you felt this way?");
    assert_eq!(
        state.assessment().condition("anxiety").unwrap().confidence().as_fraction(),
        0.8
    );
    assert!(state.analysis_history()[0].response.is_emergency);
}

#[tokio::test]
async fn suicide_and_trauma_pull_both_rosters_once() {
    let provider = MockAIProvider::new().with_response(
        "Mental Health Concerns:\ntrauma (confidence: 70%)\nTherapeutic Response:\nThank you for trusting me with this.",
    );
    let handler = handler(&provider, 3);

    let (_, outcome) = send(
        &handler,
        SessionState::default(),
        "Since the accident I've had suicidal thoughts",
    )
    .await;

    let specialists = outcome.verdict.specialists();
    assert!(!specialists.is_empty());
    let mut identities: Vec<_> = specialists.iter().map(|s| s.identity()).collect();
    let total = identities.len();
    identities.sort();
    identities.dedup();
    assert_eq!(identities.len(), total);
    assert!(specialists.iter().any(|s| s.specialty.contains("EMDR")));
    assert!(specialists.iter().any(|s| s.specialty.contains("suicide")));
}

#[tokio::test]
async fn single_moderate_keyword_is_not_an_emergency() {
    let provider = MockAIProvider::new()
        .with_response("Therapeutic Response:\nIt makes sense that this feels like a crisis.");
    let handler = handler(&provider, 3);

    let (_, outcome) = send(&handler, SessionState::default(), "Work has been rough").await;

    assert!(!outcome.verdict.is_emergency());
    assert!(outcome.verdict.crisis_resources().is_empty());
    assert!(!outcome.reply.parsed().unwrap().is_emergency);
}

// =============================================================================
// Degraded paths
// =============================================================================

#[tokio::test]
async fn provider_outage_keeps_session_alive() {
    let provider = MockAIProvider::new()
        .with_error(MockError::Network {
            message: "connection reset".to_string(),
        })
        .with_response(QUESTION_REPLY);
    let handler = handler(&provider, 3);

    let (state, failed) = send(&handler, SessionState::default(), "I want to die").await;
    assert_eq!(
        failed.reply,
        AssistantReply::Unformatted(GENERATION_FALLBACK_MESSAGE.to_string())
    );
    assert!(failed.verdict.is_emergency());
    assert!(state.analysis_history().is_empty());
    assert!(state.assessment().is_empty());

    let (state, recovered) = send(&handler, state, "Sorry, trying again").await;
    assert!(recovered.reply.is_formatted());
    assert_eq!(recovered.phase, ConversationPhase::Understanding);
    assert_eq!(state.history().len(), 4);
    assert_eq!(state.analysis_history().len(), 1);

    let prompt = provider.last_prompt().unwrap();
    assert!(prompt.contains(&format!("Assistant: {}", GENERATION_FALLBACK_MESSAGE)));
}

#[tokio::test]
async fn headerless_reply_is_empty_not_degraded() {
    let provider = MockAIProvider::new().with_response("I'm not sure \u{FFFD} what to say.");
    let handler = handler(&provider, 3);

    let (state, outcome) = send(&handler, SessionState::default(), "hi").await;

    let parsed = outcome.reply.parsed().unwrap();
    assert!(parsed.is_empty());
    assert!(!parsed.degraded);
    assert_eq!(state.analysis_history().len(), 1);
}

#[tokio::test]
async fn unscannable_reply_degrades_to_safe_fallback() {
    let oversized = format!("Therapeutic Response:\n{}", "a".repeat(MAX_RESPONSE_LENGTH));
    let provider = MockAIProvider::new().with_response(oversized);
    let handler = handler(&provider, 3);

    let (_, outcome) = send(&handler, SessionState::default(), "hi").await;

    let parsed = outcome.reply.parsed().unwrap();
    assert!(parsed.degraded);
    assert!(parsed.therapeutic_response.contains("988"));
    assert!(parsed.initial_thoughts.is_empty());
}

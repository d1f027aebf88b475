//! Conversation domain module.
//!
//! Owns the turn history, derives the conversation phase, composes
//! prompts and parses sectioned replies from the generation service.

mod history;
mod parser;
mod phase;
mod prompt;
mod sanitizer;
mod sections;

pub use history::{ConversationHistory, Turn, TurnRole};
pub use parser::{ParseError, ResponseParser};
pub use phase::{ConversationPhase, PhaseManager, DEFAULT_PHASE_THRESHOLD};
pub use prompt::PromptComposer;
pub use sanitizer::{ResponseSanitizer, SanitizationError, MAX_RESPONSE_LENGTH};
pub use sections::{ParsedResponse, SectionHeader, SectionKind, PARSE_FALLBACK_MESSAGE};

//! Conversation history.
//!
//! Turns are immutable records of user/assistant exchanges. The history is
//! append-only for the lifetime of a session and is the single source of
//! truth for the conversation phase and for prompt context.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// The person seeking support.
    User,
    /// The generation service (or a fallback standing in for it).
    Assistant,
}

impl TurnRole {
    /// Speaker label used when serializing turns into a prompt.
    pub fn speaker(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }
}

/// An immutable turn within a conversation.
///
/// # Invariants
///
/// - `ordinal` equals the turn's index in its history
/// - fields never change after the turn is appended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: TurnRole,
    content: String,
    ordinal: usize,
    /// False when the assistant turn is a fallback message rather than
    /// sectioned model output.
    formatted: bool,
    created_at: Timestamp,
}

impl Turn {
    /// Returns the role of the speaker.
    pub fn role(&self) -> TurnRole {
        self.role
    }

    /// Returns the raw text of the turn.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the zero-based position of the turn in its history.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Returns true if this turn carries sectioned model output.
    pub fn is_formatted(&self) -> bool {
        self.formatted
    }

    /// Returns when the turn was appended.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

/// Ordered, append-only sequence of turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationHistory {
    turns: Vec<Turn>,
}

impl ConversationHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user turn.
    pub fn push_user(&mut self, content: impl Into<String>) -> &Turn {
        self.push_turn(TurnRole::User, content.into(), false, Timestamp::now())
    }

    /// Appends an assistant turn holding sectioned model output.
    pub fn push_assistant(&mut self, content: impl Into<String>) -> &Turn {
        self.push_turn(TurnRole::Assistant, content.into(), true, Timestamp::now())
    }

    /// Appends an assistant turn holding a plain fallback message.
    pub fn push_assistant_unformatted(&mut self, content: impl Into<String>) -> &Turn {
        self.push_turn(TurnRole::Assistant, content.into(), false, Timestamp::now())
    }

    /// Appends a turn stamped with `at`.
    pub fn push_turn(
        &mut self,
        role: TurnRole,
        content: impl Into<String>,
        formatted: bool,
        at: Timestamp,
    ) -> &Turn {
        let ordinal = self.turns.len();
        self.turns.push(Turn {
            role,
            content: content.into(),
            ordinal,
            formatted,
            created_at: at,
        });
        &self.turns[ordinal]
    }

    /// Number of turns, both roles counted.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns true if no turn has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// All turns in original order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Iterates over turns in original order.
    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    /// The most recent turn, if any.
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }
}

//! SendMessageHandler - runs one user turn end to end.
//!
//! Validates the message, composes the phase-aware prompt, awaits the
//! generation provider under a timeout, then hands the result to the session
//! reducer. The handler borrows the current state and returns the next one;
//! if the returned future is dropped mid-call the caller still holds the
//! untouched previous state.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::session::{GenerationOutcome, SessionState, TurnEngine, TurnOutcome};
use crate::ports::{AIError, AIProvider, CompletionRequest, RequestMetadata};

/// Longest accepted user message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 8_000;

/// Command carrying one user message.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub content: String,
}

impl SendMessageCommand {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Rejections before any generation call is made. Generation failures are
/// never errors here; they become the fallback reply.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SendMessageError {
    #[error("Validation error: message content cannot be empty")]
    EmptyContent,

    #[error("Validation error: message is {actual} characters, limit is {max}")]
    TooLong { max: usize, actual: usize },
}

/// Result of a completed turn.
#[derive(Debug, Clone)]
pub struct SendMessageResult {
    pub state: SessionState,
    pub outcome: TurnOutcome,
}

/// Per-call generation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SendMessageConfig {
    /// Upper bound on the whole provider call, retries included.
    pub timeout: Duration,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl Default for SendMessageConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            temperature: None,
            max_tokens: None,
        }
    }
}

/// Handler for user turns.
pub struct SendMessageHandler {
    ai_provider: Arc<dyn AIProvider>,
    engine: TurnEngine,
    config: SendMessageConfig,
}

impl SendMessageHandler {
    pub fn new(ai_provider: Arc<dyn AIProvider>, engine: TurnEngine) -> Self {
        Self {
            ai_provider,
            engine,
            config: SendMessageConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SendMessageConfig) -> Self {
        self.config = config;
        self
    }

    pub fn engine(&self) -> &TurnEngine {
        &self.engine
    }

    pub async fn handle(
        &self,
        state: &SessionState,
        cmd: SendMessageCommand,
    ) -> Result<SendMessageResult, SendMessageError> {
        let content = cmd.content.trim();
        if content.is_empty() {
            return Err(SendMessageError::EmptyContent);
        }
        let chars = content.chars().count();
        if chars > MAX_MESSAGE_CHARS {
            return Err(SendMessageError::TooLong {
                max: MAX_MESSAGE_CHARS,
                actual: chars,
            });
        }

        let prompt = state.compose_prompt(&self.engine, content);
        let trace_id = format!("turn-{}", Uuid::new_v4());
        debug!(
            session_id = %state.session_id(),
            trace_id = %trace_id,
            phase = state.current_phase(&self.engine).label(),
            prompt_chars = prompt.len(),
            "Sending turn to provider"
        );

        let mut request =
            CompletionRequest::new(prompt, RequestMetadata::new(state.session_id(), trace_id));
        if let Some(temperature) = self.config.temperature {
            request = request.with_temperature(temperature);
        }
        if let Some(max_tokens) = self.config.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }

        let generation = self.generate(request).await;
        let (state, outcome) = state.clone().apply_turn(&self.engine, content, generation);

        Ok(SendMessageResult { state, outcome })
    }

    async fn generate(&self, request: CompletionRequest) -> GenerationOutcome {
        let result = match timeout(self.config.timeout, self.ai_provider.complete(request)).await {
            Ok(result) => result,
            Err(_) => Err(AIError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }),
        };

        match result {
            Ok(response) => GenerationOutcome::Completed(response.content),
            Err(err) => {
                warn!(error = %err, retryable = err.is_retryable(), "Generation call failed");
                GenerationOutcome::Failed(err.to_string())
            }
        }
    }
}

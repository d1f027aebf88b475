//! Generation port.
//!
//! The core sends one prompt string and receives one completion string. It
//! does not care about transport, auth, or model selection; adapters own
//! those concerns.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::SessionId;

/// Port for the external text-generation service.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Generate one complete reply for a prompt. Streaming is not supported.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError>;

    /// Name and model of the backing service.
    fn provider_info(&self) -> ProviderInfo;
}

/// One generation request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// The fully composed prompt, preamble and history included.
    pub prompt: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub metadata: RequestMetadata,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, metadata: RequestMetadata) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: None,
            temperature: None,
            metadata,
        }
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// Tracing context carried with a request.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    pub session_id: SessionId,
    pub trace_id: String,
}

impl RequestMetadata {
    pub fn new(session_id: SessionId, trace_id: impl Into<String>) -> Self {
        Self {
            session_id,
            trace_id: trace_id.into(),
        }
    }
}

/// Reply from the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
    pub finish_reason: FinishReason,
}

impl CompletionResponse {
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
            finish_reason: FinishReason::Stop,
        }
    }
}

/// Why the service stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    /// Hit the output token limit; the reply may be cut mid-section.
    Length,
    ContentFilter,
    Other,
}

/// Provider name and model, for logs and the CLI banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub name: String,
    pub model: String,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Generation failures. The turn handler turns every variant into the
/// fallback reply; none of them ends the session.
#[derive(Debug, thiserror::Error)]
pub enum AIError {
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    #[error("content filtered: {reason}")]
    ContentFiltered { reason: String },

    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The provider answered but produced no text.
    #[error("empty completion")]
    EmptyCompletion,

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl AIError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            reason: reason.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if the same request may succeed on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AIError::RateLimited { .. }
                | AIError::Unavailable { .. }
                | AIError::Network(_)
                | AIError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> RequestMetadata {
        RequestMetadata::new(SessionId::new(), "trace-123")
    }

    #[test]
    fn completion_request_builder_sets_options() {
        let request = CompletionRequest::new("Hello", metadata())
            .with_max_tokens(256)
            .with_temperature(0.7);

        assert_eq!(request.prompt, "Hello");
        assert_eq!(request.max_tokens, Some(256));
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.metadata.trace_id, "trace-123");
    }

    #[test]
    fn completion_response_defaults_to_stop() {
        let response = CompletionResponse::new("Hi", "gemini-pro");
        assert_eq!(response.finish_reason, FinishReason::Stop);
    }

    #[test]
    fn retryable_classification() {
        assert!(AIError::rate_limited(30).is_retryable());
        assert!(AIError::unavailable("down").is_retryable());
        assert!(AIError::network("reset").is_retryable());
        assert!(AIError::Timeout { timeout_secs: 60 }.is_retryable());

        assert!(!AIError::AuthenticationFailed.is_retryable());
        assert!(!AIError::content_filtered("blocked").is_retryable());
        assert!(!AIError::EmptyCompletion.is_retryable());
        assert!(!AIError::InvalidRequest("bad".into()).is_retryable());
    }

    #[test]
    fn errors_display_readably() {
        assert_eq!(
            AIError::rate_limited(30).to_string(),
            "rate limited: retry after 30s"
        );
        assert_eq!(
            AIError::Timeout { timeout_secs: 60 }.to_string(),
            "request timed out after 60s"
        );
    }

    #[test]
    fn finish_reason_serializes_snake_case() {
        let json = serde_json::to_string(&FinishReason::ContentFilter).unwrap();
        assert_eq!(json, "\"content_filter\"");
    }
}

//! Mock generation provider for tests and offline runs.
//!
//! Responses are consumed from a queue in order. Once the queue is empty the
//! provider answers with a canned sectioned reply, so the CLI stays usable
//! without network access.
//!
//! # Example
//!
//! ```ignore
//! let outage = MockAIProvider::new()
//!     .with_error(MockError::Unavailable { message: "overloaded".into() })
//!     .with_response("Therapeutic Response:\nThat sounds hard.");
//!
//! // First turn records the fallback reply, the second is parsed.
//! let handler = SendMessageHandler::new(Arc::new(outage.clone()), engine);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
};

/// Reply used once the queue is exhausted.
pub const DEFAULT_MOCK_REPLY: &str = "Initial Thoughts:
Thank you for sharing this with me.
Mental Health Concerns:
stress (confidence: 40%)
Therapeutic Response:
It sounds like a lot has been on your plate lately, and it makes sense to feel stretched.
Follow-up Question:
What part of your day feels heaviest right now?";

/// Configurable fake provider with call recording.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    info: ProviderInfo,
    delay: Duration,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

#[derive(Debug, Clone)]
pub enum MockResponse {
    Success {
        content: String,
        finish_reason: FinishReason,
    },
    Error(MockError),
}

/// Failures the mock can inject.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    ContentFiltered { reason: String },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    EmptyCompletion,
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::ContentFiltered { reason } => AIError::content_filtered(reason),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::EmptyCompletion => AIError::EmptyCompletion,
        }
    }
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1"),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful reply.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.with_response_full(content, FinishReason::Stop)
    }

    pub fn with_response_full(self, content: impl Into<String>, finish_reason: FinishReason) -> Self {
        locked(&self.responses).push_back(MockResponse::Success {
            content: content.into(),
            finish_reason,
        });
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: MockError) -> Self {
        locked(&self.responses).push_back(MockResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        locked(&self.calls).len()
    }

    /// Returns every recorded request, oldest first.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        locked(&self.calls).clone()
    }

    /// Prompt of the most recent request.
    pub fn last_prompt(&self) -> Option<String> {
        locked(&self.calls).last().map(|call| call.prompt.clone())
    }

    pub fn clear_calls(&self) {
        locked(&self.calls).clear();
    }

    fn next_response(&self) -> MockResponse {
        locked(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success {
                content: DEFAULT_MOCK_REPLY.to_string(),
                finish_reason: FinishReason::Stop,
            })
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        locked(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success {
                content,
                finish_reason,
            } => Ok(CompletionResponse {
                content,
                model: self.info.model.clone(),
                finish_reason,
            }),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

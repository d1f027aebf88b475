//! Generation provider adapters.
//!
//! - `GeminiProvider` - Google Gemini over the Generative Language REST API
//! - `MockAIProvider` - Queued replies and injected failures for tests and offline runs

mod gemini_provider;
mod mock_provider;

pub use gemini_provider::{
    backoff_delay, total_backoff, GeminiConfig, GeminiProvider, DEFAULT_GEMINI_BASE_URL,
    DEFAULT_GEMINI_MODEL,
};
pub use mock_provider::{MockAIProvider, MockError, MockResponse, DEFAULT_MOCK_REPLY};

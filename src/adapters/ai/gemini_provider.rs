//! Gemini provider - `AIProvider` over Google's Generative Language API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-pro")
//!     .with_timeout(Duration::from_secs(60));
//!
//! let provider = GeminiProvider::new(config)?;
//! ```
//!
//! The whole prompt goes out as a single user part of `generateContent`.
//! Retryable failures are retried with exponential backoff (1s, 2s, 4s, ...).

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";

/// Sleep before zero-based retry number `retry`: 1s, 2s, 4s, ...
pub fn backoff_delay(retry: u32) -> Duration {
    Duration::from_secs(1u64.checked_shl(retry).unwrap_or(u64::MAX))
}

/// Total time spent sleeping between attempts when every retry is used.
pub fn total_backoff(max_retries: u32) -> Duration {
    (0..max_retries)
        .map(backoff_delay)
        .fold(Duration::ZERO, Duration::saturating_add)
}

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    /// Per-attempt HTTP timeout.
    pub timeout: Duration,
    /// Retries after the first attempt, for retryable errors only.
    pub max_retries: u32,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 2,
            temperature: None,
            max_output_tokens: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Builds the HTTP client. Fails only if the TLS backend cannot start.
    pub fn new(config: GeminiConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Request options override the configured defaults.
    fn to_gemini_request(&self, request: &CompletionRequest) -> GeminiRequest {
        let temperature = request.temperature.or(self.config.temperature);
        let max_output_tokens = request.max_tokens.or(self.config.max_output_tokens);
        let generation_config = (temperature.is_some() || max_output_tokens.is_some()).then_some(
            GenerationConfig {
                temperature,
                max_output_tokens,
            },
        );

        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config,
        }
    }

    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&self.to_gemini_request(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs_f64().ceil() as u64,
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), body));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        extract_completion(gemini_response, &self.config.model)
    }

    async fn attempt(&self, request: &CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self.send_request(request).await?;
        self.parse_response(response).await
    }
}

/// Maps a non-success HTTP status to the port's error taxonomy.
fn status_error(status: u16, body: String) -> AIError {
    match status {
        401 | 403 => AIError::AuthenticationFailed,
        429 => AIError::rate_limited(parse_retry_after(&body)),
        400 => AIError::InvalidRequest(body),
        500..=599 => AIError::unavailable(format!("Server error {}: {}", status, body)),
        _ => AIError::network(format!("Unexpected status {}: {}", status, body)),
    }
}

/// Reads `RetryInfo.retryDelay` ("30s") from a Google error body.
fn parse_retry_after(body: &str) -> u32 {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")?
                .get("details")?
                .as_array()?
                .iter()
                .find_map(|detail| detail.get("retryDelay")?.as_str().map(str::to_string))
        })
        .and_then(|delay| delay.trim_end_matches('s').parse::<f64>().ok())
        .map(|secs| secs.ceil() as u32)
        .unwrap_or(30)
}

fn extract_completion(response: GeminiResponse, model: &str) -> Result<CompletionResponse, AIError> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(AIError::content_filtered(format!("prompt blocked: {}", reason)));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| AIError::parse("No candidates in response"))?;

    let finish_reason = match candidate.finish_reason.as_deref() {
        Some("STOP") | None => FinishReason::Stop,
        Some("MAX_TOKENS") => FinishReason::Length,
        Some("SAFETY") | Some("RECITATION") | Some("BLOCKLIST") | Some("PROHIBITED_CONTENT") => {
            FinishReason::ContentFilter
        }
        Some(_) => FinishReason::Other,
    };

    let content: String = candidate
        .content
        .map(|c| c.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();

    if content.trim().is_empty() {
        if finish_reason == FinishReason::ContentFilter {
            return Err(AIError::content_filtered(
                candidate.finish_reason.unwrap_or_default(),
            ));
        }
        return Err(AIError::EmptyCompletion);
    }

    Ok(CompletionResponse {
        content,
        model: response.model_version.unwrap_or_else(|| model.to_string()),
        finish_reason,
    })
}

#[async_trait]
impl AIProvider for GeminiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let mut retry_count = 0;

        loop {
            match self.attempt(&request).await {
                Ok(completion) => {
                    debug!(
                        trace_id = %request.metadata.trace_id,
                        finish_reason = ?completion.finish_reason,
                        "Gemini completion received"
                    );
                    return Ok(completion);
                }
                Err(err) if err.is_retryable() && retry_count < self.config.max_retries => {
                    warn!(
                        trace_id = %request.metadata.trace_id,
                        attempt = retry_count + 1,
                        error = %err,
                        "Retrying Gemini request"
                    );
                    sleep(backoff_delay(retry_count)).await;
                    retry_count += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("gemini", &self.config.model)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Gemini API types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<PromptFeedback>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

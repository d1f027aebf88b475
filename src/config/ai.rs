//! Generation provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::{
    total_backoff, GeminiConfig, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL,
};

/// Headroom kept between the last attempt and the turn deadline.
const TURN_DEADLINE_SLACK: Duration = Duration::from_millis(500);

/// Shortest per-attempt HTTP timeout worth making a request with.
const MIN_ATTEMPT_TIMEOUT: Duration = Duration::from_millis(500);

/// Generation provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Which provider answers turns
    #[serde(default)]
    pub provider: AiProvider,

    /// Google AI Studio API key
    pub gemini_api_key: Option<Secret<String>>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound on one turn's generation call, retries and backoff included
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries after the first attempt, retryable errors only
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    pub temperature: Option<f32>,

    pub max_output_tokens: Option<u32>,
}

/// Generation provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Gemini,
    /// Canned replies, no network
    Mock,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Per-attempt HTTP timeout.
    ///
    /// Every attempt plus every backoff sleep fits inside [`timeout`](Self::timeout),
    /// so retries run before the turn deadline fires.
    pub fn attempt_timeout(&self) -> Duration {
        self.attempt_budget().unwrap_or(MIN_ATTEMPT_TIMEOUT)
    }

    fn attempt_budget(&self) -> Option<Duration> {
        let attempts = self.max_retries.checked_add(1)?;
        let budget = self
            .timeout()
            .checked_sub(total_backoff(self.max_retries))?
            .checked_sub(TURN_DEADLINE_SLACK)?
            / attempts;
        (budget >= MIN_ATTEMPT_TIMEOUT).then_some(budget)
    }

    /// Check if a Gemini key is configured
    pub fn has_gemini(&self) -> bool {
        self.gemini_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Builds the Gemini adapter configuration, if a key is present
    pub fn gemini_config(&self) -> Option<GeminiConfig> {
        let key = self.gemini_api_key.as_ref()?.expose_secret();
        if key.trim().is_empty() {
            return None;
        }

        let mut config = GeminiConfig::new(key.as_str())
            .with_model(&self.model)
            .with_base_url(&self.base_url)
            .with_timeout(self.attempt_timeout())
            .with_max_retries(self.max_retries);
        if let Some(temperature) = self.temperature {
            config = config.with_temperature(temperature);
        }
        if let Some(max) = self.max_output_tokens {
            config = config.with_max_output_tokens(max);
        }
        Some(config)
    }

    /// Validate generation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.provider == AiProvider::Gemini && !self.has_gemini() {
            return Err(ValidationError::MissingRequired("GEMINI_API_KEY"));
        }

        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        if self.provider == AiProvider::Gemini && self.attempt_budget().is_none() {
            return Err(ValidationError::RetryBudgetExceeded {
                timeout_secs: self.timeout_secs,
                max_retries: self.max_retries,
            });
        }

        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(ValidationError::InvalidTemperature(temperature));
            }
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::default(),
            gemini_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            temperature: None,
            max_output_tokens: None,
        }
    }
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    2
}

//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `MINDBRIDGE` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use mindbridge::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod conversation;
mod error;
mod export;
mod logging;

pub use ai::{AiConfig, AiProvider};
pub use conversation::ConversationConfig;
pub use error::{ConfigError, ValidationError};
pub use export::ExportConfig;
pub use logging::LoggingConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment loads. Whether the
/// result is usable is decided by [`AppConfig::validate()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Generation provider (Gemini or mock)
    #[serde(default)]
    pub ai: AiConfig,

    /// Phase threshold and assessment settings
    #[serde(default)]
    pub conversation: ConversationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MINDBRIDGE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `MINDBRIDGE__AI__GEMINI_API_KEY=...` -> `ai.gemini_api_key = ...`
    /// - `MINDBRIDGE__CONVERSATION__PHASE_THRESHOLD=4` -> `conversation.phase_threshold = 4`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MINDBRIDGE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.conversation.validate()?;
        self.logging.validate()?;
        self.export.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "MINDBRIDGE__AI__PROVIDER",
        "MINDBRIDGE__AI__GEMINI_API_KEY",
        "MINDBRIDGE__AI__TIMEOUT_SECS",
        "MINDBRIDGE__CONVERSATION__PHASE_THRESHOLD",
        "MINDBRIDGE__LOGGING__JSON",
        "MINDBRIDGE__EXPORT__DIRECTORY",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        let config = result.unwrap();
        assert_eq!(config.ai.provider, AiProvider::Gemini);
        assert_eq!(config.conversation.phase_threshold, 3);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.export.directory, std::path::PathBuf::from("./exports"));
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MINDBRIDGE__AI__GEMINI_API_KEY", "AIza-test");
        env::set_var("MINDBRIDGE__AI__TIMEOUT_SECS", "30");
        env::set_var("MINDBRIDGE__CONVERSATION__PHASE_THRESHOLD", "5");
        env::set_var("MINDBRIDGE__LOGGING__JSON", "true");
        env::set_var("MINDBRIDGE__EXPORT__DIRECTORY", "/tmp/mindbridge");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.ai.has_gemini());
        assert_eq!(config.ai.timeout_secs, 30);
        assert_eq!(config.conversation.phase_threshold, 5);
        assert!(config.logging.json);
        assert_eq!(config.export.directory, std::path::PathBuf::from("/tmp/mindbridge"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mock_provider_validates_without_key() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MINDBRIDGE__AI__PROVIDER", "mock");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.provider, AiProvider::Mock);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_gemini_without_key_fails_validation() {
        let config = AppConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("GEMINI_API_KEY"))
        ));
    }
}

//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("{max_retries} retries and their backoff do not fit in a {timeout_secs}s turn timeout")]
    RetryBudgetExceeded { timeout_secs: u64, max_retries: u32 },

    #[error("Phase threshold must be at least 1")]
    InvalidPhaseThreshold,

    #[error("Confidence threshold must be between 0.0 and 1.0, got {0}")]
    InvalidConfidenceThreshold(f64),

    #[error("Temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f32),

    #[error("Unknown log level: {0}")]
    InvalidLogLevel(String),

    #[error("Export directory must not be empty")]
    EmptyExportDirectory,
}

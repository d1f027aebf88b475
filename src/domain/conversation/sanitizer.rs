//! Sanitization of raw model replies before section scanning.

use thiserror::Error;

/// Maximum accepted reply length (100KB).
pub const MAX_RESPONSE_LENGTH: usize = 100_000;

/// Errors that can occur during sanitization.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SanitizationError {
    #[error("Response too long: {actual} bytes exceeds maximum of {max} bytes")]
    TooLong { max: usize, actual: usize },
}

/// Chat-template markers a model may echo back; never shown to the user.
const INJECTION_MARKERS: [&str; 11] = [
    "```system",
    "```assistant",
    "[INST]",
    "[/INST]",
    "<|system|>",
    "<|assistant|>",
    "<|user|>",
    "<|im_start|>",
    "<|im_end|>",
    "<<SYS>>",
    "<</SYS>>",
];

/// Cleans untrusted model text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseSanitizer;

impl ResponseSanitizer {
    pub fn new() -> Self {
        Self
    }

    /// Validates and cleans a reply.
    ///
    /// # Steps
    /// 1. Reject oversized text
    /// 2. Drop U+FFFD left behind by lossy decoding upstream
    /// 3. Remove control characters except newlines, carriage returns and tabs
    /// 4. Strip chat-template markers
    pub fn sanitize(&self, response: &str) -> Result<String, SanitizationError> {
        if response.len() > MAX_RESPONSE_LENGTH {
            return Err(SanitizationError::TooLong {
                max: MAX_RESPONSE_LENGTH,
                actual: response.len(),
            });
        }

        let mut cleaned: String = response
            .chars()
            .filter(|&c| c != char::REPLACEMENT_CHARACTER)
            .filter(|c| !c.is_control() || matches!(c, '\n' | '\t' | '\r'))
            .collect();

        for pattern in INJECTION_MARKERS {
            cleaned = cleaned.replace(pattern, "");
        }

        Ok(cleaned)
    }
}

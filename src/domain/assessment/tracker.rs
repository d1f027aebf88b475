//! Extraction of condition/confidence pairs from model text.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::condition::KNOWN_CONDITIONS;
use super::state::AssessmentState;
use crate::domain::foundation::{Confidence, Timestamp};

/// A known condition name followed on the same line by a percentage.
///
/// Matches `anxiety (confidence: 80%)`, `Stress: 65%`, `ptsd 40%`. The digit
/// group is optional so that `anxiety (confidence: %)` is seen and skipped
/// rather than silently swallowed by the next match.
static CONDITION_CONFIDENCE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"(?i)\b({})\b[ \t]*[:\-]?[ \t]*\(?[ \t]*(?:confidence(?:[ \t]+level)?[ \t]*[:=]?[ \t]*)?(\d+)?[ \t]*%",
        KNOWN_CONDITIONS.join("|")
    );
    Regex::new(&pattern).expect("condition pattern is valid")
});

/// Merges confidence-annotated conditions from a reply into [`AssessmentState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AssessmentTracker;

impl AssessmentTracker {
    pub fn new() -> Self {
        Self
    }

    /// Scans `raw` and upserts every well-formed match, stamped now.
    ///
    /// Returns the number of conditions written.
    pub fn update(&self, state: &mut AssessmentState, raw: &str) -> usize {
        self.update_at(state, raw, Timestamp::now())
    }

    /// Same as [`update`](Self::update) with an explicit timestamp.
    pub fn update_at(&self, state: &mut AssessmentState, raw: &str, at: Timestamp) -> usize {
        let mut written = 0;
        for captures in CONDITION_CONFIDENCE.captures_iter(raw) {
            let name = captures[1].to_lowercase();
            let Some(digits) = captures.get(2) else {
                warn!(condition = %name, "Skipping confidence token without digits");
                continue;
            };
            let confidence = digits
                .as_str()
                .parse::<u32>()
                .map_err(|e| e.to_string())
                .and_then(|value| Confidence::from_percent(value).map_err(|e| e.to_string()));
            match confidence {
                Ok(confidence) => {
                    debug!(condition = %name, %confidence, "Updating assessment");
                    state.upsert(&name, confidence, at);
                    written += 1;
                }
                Err(reason) => {
                    warn!(condition = %name, %reason, "Skipping malformed confidence token");
                }
            }
        }
        written
    }
}

//! Header-driven parsing of model replies into typed sections.
//!
//! Model output is untrusted free text. Parsing is best-effort: missing
//! headers yield empty fields, and text that cannot be scanned at all
//! degrades to [`ParsedResponse::fallback`] instead of failing the turn.

use thiserror::Error;
use tracing::{debug, warn};

use super::sanitizer::{ResponseSanitizer, SanitizationError};
use super::sections::{ParsedResponse, SectionHeader, SectionKind};

/// Reasons a reply could not be scanned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Sanitization failed: {0}")]
    Sanitization(#[from] SanitizationError),

    #[error("Section body for '{header}' has an invalid boundary {start}..{end}")]
    InvalidBoundary {
        header: &'static str,
        start: usize,
        end: usize,
    },
}

/// Splits raw model text into the sections of [`SectionHeader`].
#[derive(Debug, Clone, Default)]
pub struct ResponseParser {
    sanitizer: ResponseSanitizer,
}

impl ResponseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a reply, never failing.
    ///
    /// A reply without any recognized header is not malformed: it yields an
    /// empty, non-degraded response.
    pub fn parse(&self, raw: &str) -> ParsedResponse {
        match self.try_parse(raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(error = %err, "Falling back to safe default response");
                ParsedResponse::fallback()
            }
        }
    }

    /// Parses a reply, reporting why scanning failed.
    pub fn try_parse(&self, raw: &str) -> Result<ParsedResponse, ParseError> {
        let text = self.sanitizer.sanitize(raw)?;
        let marks = locate_headers(&text);
        debug!(headers = marks.len(), "Scanned reply for section headers");

        let mut parsed = ParsedResponse::default();
        for (idx, &(start, header)) in marks.iter().enumerate() {
            let body_start = start + header.label().len();
            let body_end = marks.get(idx + 1).map_or(text.len(), |&(next, _)| next);
            let body = text
                .get(body_start..body_end)
                .ok_or(ParseError::InvalidBoundary {
                    header: header.label(),
                    start: body_start,
                    end: body_end,
                })?;
            append_body(&mut parsed, header, body);
        }

        Ok(parsed)
    }
}

/// Every occurrence of every label, ordered by byte offset.
fn locate_headers(text: &str) -> Vec<(usize, SectionHeader)> {
    let mut marks: Vec<(usize, SectionHeader)> = SectionHeader::ALL
        .iter()
        .flat_map(|&header| {
            text.match_indices(header.label())
                .map(move |(offset, _)| (offset, header))
        })
        .collect();
    marks.sort_by_key(|&(offset, _)| offset);
    marks
}

fn append_body(parsed: &mut ParsedResponse, header: SectionHeader, body: &str) {
    match header.kind() {
        SectionKind::List => {
            if let Some(items) = parsed.list_mut(header) {
                items.extend(
                    body.lines()
                        .map(str::trim)
                        .filter(|line| !line.is_empty())
                        .map(str::to_string),
                );
            }
        }
        SectionKind::Prose => {
            let text = body.trim();
            if text.is_empty() {
                return;
            }
            if let Some(prose) = parsed.prose_mut(header) {
                // Repeated prose headers read as consecutive paragraphs.
                if !prose.is_empty() {
                    prose.push_str("\n\n");
                }
                prose.push_str(text);
            }
        }
    }
}

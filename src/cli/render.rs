//! Plain-text rendering of turn outcomes.

use std::fmt::Write;

use mindbridge::domain::conversation::{ParsedResponse, SectionHeader, SectionKind};
use mindbridge::domain::safety::EmergencyVerdict;
use mindbridge::domain::session::{AssistantReply, TurnOutcome};

pub fn render_outcome(outcome: &TurnOutcome) -> String {
    let mut out = String::new();

    if outcome.verdict.is_emergency() {
        out.push_str(&render_crisis(&outcome.verdict));
        out.push('\n');
    }

    match &outcome.reply {
        AssistantReply::Formatted(parsed) => out.push_str(&render_sections(parsed)),
        AssistantReply::Unformatted(text) => {
            out.push_str(text);
            out.push('\n');
        }
    }

    out
}

/// Renders non-empty sections in header order. Empty sections are skipped.
pub fn render_sections(parsed: &ParsedResponse) -> String {
    let mut out = String::new();

    for header in SectionHeader::ALL {
        match header.kind() {
            SectionKind::List => {
                let items = parsed.list(header).unwrap_or_default();
                if items.is_empty() {
                    continue;
                }
                let _ = writeln!(out, "{}", header.label());
                for item in items {
                    let _ = writeln!(out, "  • {}", item);
                }
            }
            SectionKind::Prose => {
                let text = parsed.prose(header).unwrap_or_default();
                if text.is_empty() {
                    continue;
                }
                let _ = writeln!(out, "{}", header.label());
                for line in text.lines() {
                    let _ = writeln!(out, "  {}", line);
                }
            }
        }
        out.push('\n');
    }

    out
}

pub fn render_crisis(verdict: &EmergencyVerdict) -> String {
    let mut out = String::new();
    out.push_str("!! It sounds like you may be going through something serious.\n");
    out.push_str("!! You don't have to face this alone. Please reach out now:\n");
    for resource in verdict.crisis_resources() {
        let _ = writeln!(out, "   - {}: {}", resource.label, resource.contact);
    }

    if !verdict.specialists().is_empty() {
        out.push_str("\nSpecialists who can help:\n");
        for specialist in verdict.specialists() {
            let _ = writeln!(
                out,
                "   - {} ({}, {})\n     {} | {} | {}",
                specialist.name,
                specialist.specialty,
                specialist.experience,
                specialist.contact,
                specialist.availability,
                specialist.location
            );
        }
    }

    out
}

//! Phase-aware prompt composition.
//!
//! Pure string building: no network access happens here. The header
//! contract at the end of every prompt is what makes the reply parseable.

use std::fmt::Write;

use super::history::ConversationHistory;
use super::phase::ConversationPhase;
use super::sections::SectionHeader;
use crate::domain::assessment::AssessmentState;

const PREAMBLE: &str = "You are a compassionate mental health support assistant. You are not a \
replacement for a licensed professional and you never diagnose. Listen carefully, respond with \
warmth and without judgement, and keep your language simple and human. If the person mentions \
thoughts of suicide, self-harm, harming others, or being unable to go on, acknowledge it directly \
and encourage them to contact the 988 Suicide & Crisis Lifeline (call or text 988) or emergency \
services right away.";

/// Builds the single prompt string sent to the generation service.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptComposer;

impl PromptComposer {
    pub fn new() -> Self {
        Self
    }

    /// Composes the prompt for the next turn.
    ///
    /// `history` holds the turns before `latest_message`. When `assessment`
    /// carries conditions from earlier turns they are serialized so the model
    /// can confirm or revise them.
    pub fn compose(
        &self,
        history: &ConversationHistory,
        latest_message: &str,
        phase: ConversationPhase,
        assessment: Option<&AssessmentState>,
    ) -> String {
        let mut prompt = String::with_capacity(2_048);
        prompt.push_str(PREAMBLE);
        prompt.push_str("\n\n");

        prompt.push_str("Conversation so far:\n");
        if history.is_empty() {
            prompt.push_str("(This is the first message of the conversation.)\n");
        }
        for turn in history.iter() {
            let _ = writeln!(prompt, "{}: {}", turn.role().speaker(), turn.content().trim());
        }

        let _ = write!(
            prompt,
            "\nLatest message:\nUser: {}\n\n",
            latest_message.trim()
        );

        let _ = write!(
            prompt,
            "Conversation stage: {}\n{}\n\n",
            phase.label(),
            phase.directive()
        );

        if let Some(state) = assessment.filter(|state| !state.is_empty()) {
            prompt.push_str(
                "Working assessment from earlier turns (update the confidence values if what \
                 the person just said changes them):\n",
            );
            for condition in state.conditions().values() {
                let _ = writeln!(prompt, "- {} ({})", condition.name(), condition.confidence());
            }
            prompt.push('\n');
        }

        prompt.push_str(&header_contract(phase));
        prompt
    }
}

/// Instructions naming the exact headers the parser will look for.
fn header_contract(phase: ConversationPhase) -> String {
    let headers = SectionHeader::for_phase(phase);
    let mut contract = String::from(
        "Format your reply using EXACTLY the following section headers, each on its own line, \
         written verbatim (same spelling, capitalization and trailing colon), in this order. Do \
         not add markdown, numbering or any other headers.\n\n",
    );
    for header in headers {
        let _ = writeln!(contract, "{}\n<{}>\n", header.label(), header.instruction());
    }
    contract
}

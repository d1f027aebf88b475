//! Header contract and the typed sections parsed out of model replies.
//!
//! The generation service is told to emit these labels verbatim; the
//! parser recognizes nothing else. Any drift in a label silently drops
//! that section.

use serde::{Deserialize, Serialize};

use super::phase::ConversationPhase;

/// Shape of a section body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// One entry per non-empty line, in source order.
    List,
    /// A single trimmed string; embedded line breaks are kept.
    Prose,
}

/// The closed set of recognized section headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionHeader {
    InitialThoughts,
    MentalHealthConcerns,
    SuggestedActivities,
    ResearchBasedSolutions,
    TherapeuticResponse,
    FollowUpQuestion,
}

impl SectionHeader {
    /// Every header, in the order they are requested from the model.
    pub const ALL: [SectionHeader; 6] = [
        SectionHeader::InitialThoughts,
        SectionHeader::MentalHealthConcerns,
        SectionHeader::SuggestedActivities,
        SectionHeader::ResearchBasedSolutions,
        SectionHeader::TherapeuticResponse,
        SectionHeader::FollowUpQuestion,
    ];

    /// The exact, case-sensitive label emitted by the model.
    pub fn label(&self) -> &'static str {
        match self {
            Self::InitialThoughts => "Initial Thoughts:",
            Self::MentalHealthConcerns => "Mental Health Concerns:",
            Self::SuggestedActivities => "Suggested Activities:",
            Self::ResearchBasedSolutions => "Research-Based Solutions:",
            Self::TherapeuticResponse => "Therapeutic Response:",
            Self::FollowUpQuestion => "Follow-up Question:",
        }
    }

    pub fn kind(&self) -> SectionKind {
        match self {
            Self::InitialThoughts
            | Self::MentalHealthConcerns
            | Self::SuggestedActivities
            | Self::ResearchBasedSolutions => SectionKind::List,
            Self::TherapeuticResponse | Self::FollowUpQuestion => SectionKind::Prose,
        }
    }

    /// What the model should put under this header.
    pub fn instruction(&self) -> &'static str {
        match self {
            Self::InitialThoughts => "a brief, empathetic reflection of what the person shared, one point per line",
            Self::MentalHealthConcerns => {
                "possible underlying concerns, one per line, each written as \
                 `<condition> (confidence: NN%)` using the condition names anxiety, depression, \
                 stress, trauma or ptsd where they apply"
            }
            Self::SuggestedActivities => "practical, actionable steps, one per line",
            Self::ResearchBasedSolutions => "evidence-based techniques or interventions, one per line",
            Self::TherapeuticResponse => "a warm, supportive paragraph addressed directly to the person",
            Self::FollowUpQuestion => "exactly one open question that moves the conversation forward",
        }
    }

    /// Headers requested from the model in a given phase.
    pub fn for_phase(phase: ConversationPhase) -> &'static [SectionHeader] {
        const EARLY: [SectionHeader; 4] = [
            SectionHeader::InitialThoughts,
            SectionHeader::MentalHealthConcerns,
            SectionHeader::TherapeuticResponse,
            SectionHeader::FollowUpQuestion,
        ];
        if phase.is_solution_giving() {
            &SectionHeader::ALL
        } else {
            &EARLY
        }
    }
}

/// Sections extracted from one model reply.
///
/// Every field has an explicit empty default; consumers never branch on
/// presence. Field names are part of the export contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParsedResponse {
    pub initial_thoughts: Vec<String>,
    pub mental_health_concerns: Vec<String>,
    pub suggested_activities: Vec<String>,
    pub research_based_solutions: Vec<String>,
    pub therapeutic_response: String,
    pub follow_up_question: String,
    pub is_emergency: bool,
    /// Set only on the safe fallback produced when the reply could not be
    /// scanned at all.
    pub degraded: bool,
}

/// Shown in place of sections when a reply cannot be scanned.
pub const PARSE_FALLBACK_MESSAGE: &str = "I want to make sure I respond to you properly, but I \
had trouble putting my reply together just now. If you are in crisis or thinking about harming \
yourself, please call or text 988 (Suicide & Crisis Lifeline) or text HOME to 741741 right away. \
I'm still here, and I'd like to keep talking. Could you tell me a little more about what's on \
your mind?";

impl ParsedResponse {
    /// The degraded single-field response used when scanning fails.
    pub fn fallback() -> Self {
        Self {
            therapeutic_response: PARSE_FALLBACK_MESSAGE.to_string(),
            degraded: true,
            ..Self::default()
        }
    }

    /// Returns the list body for a list header, `None` for prose headers.
    pub fn list(&self, header: SectionHeader) -> Option<&[String]> {
        match header {
            SectionHeader::InitialThoughts => Some(&self.initial_thoughts),
            SectionHeader::MentalHealthConcerns => Some(&self.mental_health_concerns),
            SectionHeader::SuggestedActivities => Some(&self.suggested_activities),
            SectionHeader::ResearchBasedSolutions => Some(&self.research_based_solutions),
            SectionHeader::TherapeuticResponse | SectionHeader::FollowUpQuestion => None,
        }
    }

    /// Returns the prose body for a prose header, `None` for list headers.
    pub fn prose(&self, header: SectionHeader) -> Option<&str> {
        match header {
            SectionHeader::TherapeuticResponse => Some(&self.therapeutic_response),
            SectionHeader::FollowUpQuestion => Some(&self.follow_up_question),
            _ => None,
        }
    }

    pub(crate) fn list_mut(&mut self, header: SectionHeader) -> Option<&mut Vec<String>> {
        match header {
            SectionHeader::InitialThoughts => Some(&mut self.initial_thoughts),
            SectionHeader::MentalHealthConcerns => Some(&mut self.mental_health_concerns),
            SectionHeader::SuggestedActivities => Some(&mut self.suggested_activities),
            SectionHeader::ResearchBasedSolutions => Some(&mut self.research_based_solutions),
            SectionHeader::TherapeuticResponse | SectionHeader::FollowUpQuestion => None,
        }
    }

    pub(crate) fn prose_mut(&mut self, header: SectionHeader) -> Option<&mut String> {
        match header {
            SectionHeader::TherapeuticResponse => Some(&mut self.therapeutic_response),
            SectionHeader::FollowUpQuestion => Some(&mut self.follow_up_question),
            _ => None,
        }
    }

    /// Returns true if no section carries any content.
    pub fn is_empty(&self) -> bool {
        SectionHeader::ALL.iter().all(|header| match header.kind() {
            SectionKind::List => self.list(*header).map_or(true, <[String]>::is_empty),
            SectionKind::Prose => self.prose(*header).map_or(true, str::is_empty),
        })
    }
}

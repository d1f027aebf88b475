//! Session state, the turn reducer and the export report.

mod engine;
mod report;
mod state;

pub use engine::TurnEngine;
pub use report::AnalysisReport;
pub use state::{
    AnalysisHistoryEntry, AssistantReply, GenerationOutcome, SessionState, TurnOutcome,
    GENERATION_FALLBACK_MESSAGE,
};

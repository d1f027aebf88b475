//! Ports - Interfaces for external collaborators.
//!
//! The core reaches the outside world only through these traits:
//!
//! - `AIProvider` - One prompt in, one completion out
//! - `SpecialistDirectory` - Referral roster lookup by concern category
//! - `AnalysisExporter` - Durable export of analysed turns

mod ai_provider;
mod analysis_exporter;
mod specialist_directory;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    RequestMetadata,
};
pub use analysis_exporter::{AnalysisExporter, ExportError, ExportReceipt};
pub use specialist_directory::SpecialistDirectory;

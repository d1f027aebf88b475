//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - Generation providers (Gemini, mock)
//! - `specialists` - Static YAML specialist roster
//! - `export` - JSON file export of analysis reports

pub mod ai;
pub mod export;
pub mod specialists;

pub use ai::{GeminiConfig, GeminiProvider, MockAIProvider, MockError};
pub use export::JsonFileExporter;
pub use specialists::{DirectoryError, StaticSpecialistDirectory};

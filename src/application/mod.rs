//! Application layer - command handlers.
//!
//! Handlers orchestrate the domain and the ports for one user action.

pub mod handlers;

pub use handlers::{
    ExportAnalysisHandler, SendMessageCommand, SendMessageConfig, SendMessageError,
    SendMessageHandler, SendMessageResult,
};

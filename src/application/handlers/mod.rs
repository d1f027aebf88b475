//! Application handlers.
//!
//! Command handlers that orchestrate domain operations across ports.

pub mod conversation;

pub use conversation::{
    ExportAnalysisHandler, SendMessageCommand, SendMessageConfig, SendMessageError,
    SendMessageHandler, SendMessageResult, MAX_MESSAGE_CHARS,
};

mod export_analysis;
mod send_message;

pub use export_analysis::ExportAnalysisHandler;
pub use send_message::{
    SendMessageCommand, SendMessageConfig, SendMessageError, SendMessageHandler,
    SendMessageResult, MAX_MESSAGE_CHARS,
};

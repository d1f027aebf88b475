//! Analysis export port.
//!
//! Consumers of the analysed-turn history (JSON files today, a PDF renderer
//! elsewhere) implement this trait. Rendering is not the core's concern.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::session::AnalysisReport;

/// Port for writing an analysis report somewhere durable.
///
/// Implementations must not leave a partial report behind on failure.
#[async_trait]
pub trait AnalysisExporter: Send + Sync {
    async fn export(&self, report: &AnalysisReport) -> Result<ExportReceipt, ExportError>;
}

/// Where a report ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub location: PathBuf,
    pub bytes_written: u64,
    pub entries: usize,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExportError {
    /// Nothing has been analysed yet.
    #[error("no analysed turns to export")]
    NothingToExport,

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("IO error: {message}")]
    Io { message: String },

    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ExportError {
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn permission_denied(path: impl Into<String>) -> Self {
        Self::PermissionDenied { path: path.into() }
    }
}

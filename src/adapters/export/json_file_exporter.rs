//! JSON file exporter - writes analysis reports to a local directory.
//!
//! Reports land at `{directory}/analysis_{session_id}_{timestamp}.json`.
//! Each write goes to a `.tmp` sibling first and is renamed into place, so
//! readers never see a half-written report.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::domain::session::AnalysisReport;
use crate::ports::{AnalysisExporter, ExportError, ExportReceipt};

#[derive(Debug, Clone)]
pub struct JsonFileExporter {
    directory: PathBuf,
}

impl JsonFileExporter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn report_path(&self, report: &AnalysisReport) -> PathBuf {
        self.directory.join(format!(
            "analysis_{}_{}.json",
            report.session_id,
            report.generated_at.compact()
        ))
    }

    async fn ensure_directory(&self) -> Result<(), ExportError> {
        fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| io_error(&self.directory, "create directory", e))
    }

    async fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
        let temp_path = path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| io_error(&temp_path, "create temp file", e))?;
        file.write_all(bytes)
            .await
            .map_err(|e| io_error(&temp_path, "write temp file", e))?;
        file.sync_all()
            .await
            .map_err(|e| io_error(&temp_path, "sync temp file", e))?;

        if let Err(e) = fs::rename(&temp_path, path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(io_error(path, "rename temp file", e));
        }
        Ok(())
    }
}

fn io_error(path: &Path, action: &str, err: std::io::Error) -> ExportError {
    match err.kind() {
        ErrorKind::PermissionDenied => ExportError::permission_denied(path.display().to_string()),
        _ => ExportError::io(format!("Failed to {} {}: {}", action, path.display(), err)),
    }
}

#[async_trait]
impl AnalysisExporter for JsonFileExporter {
    async fn export(&self, report: &AnalysisReport) -> Result<ExportReceipt, ExportError> {
        if report.is_empty() {
            return Err(ExportError::NothingToExport);
        }

        let bytes = serde_json::to_vec_pretty(report)
            .map_err(|e| ExportError::Serialization(e.to_string()))?;

        self.ensure_directory().await?;
        let path = self.report_path(report);
        self.write_atomic(&path, &bytes).await?;

        info!(
            session_id = %report.session_id,
            entries = report.entries.len(),
            path = %path.display(),
            "Analysis report exported"
        );

        Ok(ExportReceipt {
            location: path,
            bytes_written: bytes.len() as u64,
            entries: report.entries.len(),
        })
    }
}

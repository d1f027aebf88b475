//! ExportAnalysisHandler - writes the session's analysis report.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::session::{AnalysisReport, SessionState};
use crate::ports::{AnalysisExporter, ExportError, ExportReceipt};

pub struct ExportAnalysisHandler {
    exporter: Arc<dyn AnalysisExporter>,
}

impl ExportAnalysisHandler {
    pub fn new(exporter: Arc<dyn AnalysisExporter>) -> Self {
        Self { exporter }
    }

    /// Snapshots `state` and exports it. Empty sessions are rejected.
    pub async fn handle(&self, state: &SessionState) -> Result<ExportReceipt, ExportError> {
        let report = AnalysisReport::from_session(state, Timestamp::now());
        if report.is_empty() {
            return Err(ExportError::NothingToExport);
        }
        self.exporter.export(&report).await
    }
}

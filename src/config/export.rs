//! Analysis export configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ExportConfig {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
}

impl ExportConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.directory.as_os_str().is_empty() {
            return Err(ValidationError::EmptyExportDirectory);
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("./exports")
}

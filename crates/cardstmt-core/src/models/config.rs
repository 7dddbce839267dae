//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{CardStmtError, Result};

/// Main configuration for cardstmt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardStmtConfig {
    /// Bank identification configuration.
    pub identification: IdentificationConfig,

    /// Document text and table recovery configuration.
    pub pdf: PdfConfig,

    /// Batch processing configuration.
    pub batch: BatchConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Bank identification configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentificationConfig {
    /// Number of leading pages scanned for issuer signatures.
    pub scan_pages: usize,
}

impl Default for IdentificationConfig {
    fn default() -> Self {
        Self { scan_pages: 2 }
    }
}

/// Document text and table recovery configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum run of spaces that separates two table columns.
    pub column_gap: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { column_gap: 2 }
    }
}

/// Batch processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Number of documents processed concurrently.
    pub jobs: usize,

    /// Per-document timeout in seconds (0 = none).
    pub document_timeout_secs: u64,

    /// Keep going after a document fails.
    pub continue_on_error: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            jobs: 1,
            document_timeout_secs: 120,
            continue_on_error: true,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for CSV files and reports.
    pub dir: PathBuf,

    /// Write a transactions CSV per successful statement.
    pub write_csv: bool,

    /// Write the JSON processing report after a batch.
    pub write_report: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            write_csv: true,
            write_report: true,
        }
    }
}

impl CardStmtConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| CardStmtError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| CardStmtError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

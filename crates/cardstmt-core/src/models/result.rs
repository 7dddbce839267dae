//! Per-document result envelope and batch audit summary.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::statement::{Issuer, StatementRecord};

/// Outcome of extracting one document.
///
/// `data` is always present so that partial progress survives a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Whether extraction completed.
    pub success: bool,

    /// Detected issuer.
    pub issuer: Issuer,

    /// Source path, when the document came from disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Extracted statement data, possibly partial.
    pub data: StatementRecord,

    /// Failure description, present iff `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Non-fatal gaps (missing fields, failed transaction recovery).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    /// Processing time in milliseconds.
    #[serde(default)]
    pub processing_time_ms: u64,
}

impl ExtractionResult {
    /// Successful result.
    pub fn succeeded(data: StatementRecord, warnings: Vec<String>) -> Self {
        Self {
            success: true,
            issuer: data.issuer,
            file: None,
            data,
            error: None,
            warnings,
            processing_time_ms: 0,
        }
    }

    /// Failed result keeping whatever data was assembled.
    pub fn failed(data: StatementRecord, error: impl Into<String>) -> Self {
        Self {
            success: false,
            issuer: data.issuer,
            file: None,
            data,
            error: Some(error.into()),
            warnings: Vec::new(),
            processing_time_ms: 0,
        }
    }

    /// Attach the source path.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_processing_time(mut self, ms: u64) -> Self {
        self.processing_time_ms = ms;
        self
    }
}

/// Audit trail of a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Run timestamp (`YYYYMMDD_HHMMSS`).
    pub timestamp: String,

    /// Number of documents processed.
    pub total_processed: usize,

    /// Documents extracted successfully.
    pub successful: usize,

    /// Documents that failed.
    pub failed: usize,

    /// Per-document results in input order.
    pub details: Vec<ExtractionResult>,
}

impl BatchSummary {
    /// Summarize results stamped with the current local time.
    pub fn new(details: Vec<ExtractionResult>) -> Self {
        Self::at(Local::now(), details)
    }

    /// Summarize results with an explicit timestamp.
    pub fn at(time: DateTime<Local>, details: Vec<ExtractionResult>) -> Self {
        let successful = details.iter().filter(|r| r.success).count();
        Self {
            timestamp: time.format("%Y%m%d_%H%M%S").to_string(),
            total_processed: details.len(),
            successful,
            failed: details.len() - successful,
            details,
        }
    }

    /// File name for the persisted report.
    pub fn report_file_name(&self) -> String {
        format!("processing_report_{}.json", self.timestamp)
    }
}

//! Statement extraction pipeline: identify, extract fields, recover rows.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::identify::{BankIdentifier, DEFAULT_SCAN_PAGES};
use super::IssuerRegistry;
use crate::document::{self, DocumentSource};
use crate::error::ExtractionError;
use crate::models::config::{CardStmtConfig, PdfConfig};
use crate::models::result::ExtractionResult;
use crate::models::statement::{Issuer, StatementRecord};

/// Runs one document through identification and extraction.
///
/// Every outcome, including failure, comes back as an [`ExtractionResult`];
/// nothing is raised past this boundary.
#[derive(Debug)]
pub struct StatementExtractor {
    registry: IssuerRegistry,
    scan_pages: usize,
    pdf: PdfConfig,
}

impl StatementExtractor {
    /// Create an extractor over `registry`.
    pub fn new(registry: IssuerRegistry) -> Self {
        Self {
            registry,
            scan_pages: DEFAULT_SCAN_PAGES,
            pdf: PdfConfig::default(),
        }
    }

    /// Built-in issuers with settings taken from `config`.
    pub fn from_config(config: &CardStmtConfig) -> Self {
        Self::new(IssuerRegistry::builtin())
            .with_scan_pages(config.identification.scan_pages)
            .with_pdf_config(config.pdf.clone())
    }

    /// Leading pages scanned during identification.
    pub fn with_scan_pages(mut self, pages: usize) -> Self {
        self.scan_pages = pages;
        self
    }

    /// Settings used when opening files.
    pub fn with_pdf_config(mut self, pdf: PdfConfig) -> Self {
        self.pdf = pdf;
        self
    }

    pub fn registry(&self) -> &IssuerRegistry {
        &self.registry
    }

    /// Open and extract a statement file.
    pub fn extract_path(&self, path: &Path) -> ExtractionResult {
        let start = Instant::now();
        let file = path.display().to_string();
        info!("Processing statement: {}", file);

        let result = match document::open(path, &self.pdf) {
            Ok(doc) => self.extract(doc.as_ref()),
            Err(err) => {
                warn!("Could not open {}: {}", file, err);
                ExtractionResult::failed(
                    StatementRecord::default(),
                    ExtractionError::from(err).to_string(),
                )
            }
        };

        result
            .with_file(file)
            .with_processing_time(start.elapsed().as_millis() as u64)
    }

    /// Extract a statement from an open document.
    pub fn extract(&self, doc: &dyn DocumentSource) -> ExtractionResult {
        let start = Instant::now();

        let issuer = BankIdentifier::new(&self.registry)
            .with_scan_pages(self.scan_pages)
            .identify(doc);

        let Some(parser) = self.registry.get(issuer) else {
            warn!("No registered issuer matched the statement");
            return ExtractionResult::failed(
                StatementRecord::new(Issuer::Unknown),
                ExtractionError::UnsupportedIssuer.to_string(),
            )
            .with_processing_time(start.elapsed().as_millis() as u64);
        };
        info!("Detected issuer: {}", issuer.display_name());

        let mut record = StatementRecord::new(issuer);

        let text = match doc.text() {
            Ok(text) => text,
            Err(err) => {
                warn!("Text extraction failed: {}", err);
                return ExtractionResult::failed(record, ExtractionError::from(err).to_string())
                    .with_processing_time(start.elapsed().as_millis() as u64);
            }
        };
        debug!("Extracted {} characters of text", text.len());

        record.card_last_4 = parser.extract_card_number(&text);
        (record.billing_cycle_start, record.billing_cycle_end) = parser.extract_billing_cycle(&text);
        record.payment_due_date = parser.extract_due_date(&text);
        record.total_amount_due = parser.extract_amount_due(&text);
        record.transactions = parser.recover_transactions(doc);

        let mut warnings: Vec<String> = record
            .missing_fields()
            .into_iter()
            .map(|field| ExtractionError::FieldNotFound(field.to_string()).to_string())
            .collect();
        if record.transactions.is_empty() {
            warnings.push(
                ExtractionError::TransactionRecovery("no transactions recovered".to_string())
                    .to_string(),
            );
        }
        for warning in &warnings {
            debug!("{}", warning);
        }

        info!(
            "Extracted {} statement with {} transactions",
            issuer,
            record.transactions.len()
        );

        ExtractionResult::succeeded(record, warnings)
            .with_processing_time(start.elapsed().as_millis() as u64)
    }
}

impl Default for StatementExtractor {
    fn default() -> Self {
        Self::new(IssuerRegistry::builtin())
    }
}

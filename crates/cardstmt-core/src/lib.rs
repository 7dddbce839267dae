//! Core library for credit card statement extraction.
//!
//! This crate provides:
//! - Document sources for PDF and plain-text statements, with table recovery
//! - Issuer identification for Indian card issuers (HDFC, ICICI, SBI, Axis, Kotak)
//! - Per-issuer field extraction (card digits, billing cycle, due date, total due)
//! - Two-tier transaction recovery
//! - Date and amount normalization

pub mod document;
pub mod error;
pub mod models;
pub mod statement;

pub use document::{DocumentSource, InMemoryDocument, PdfDocument, Table, TextDocument};
pub use error::{CardStmtError, DocumentError, ExtractionError, Result};
pub use models::config::CardStmtConfig;
pub use models::result::{BatchSummary, ExtractionResult};
pub use models::statement::{Issuer, StatementRecord, StatementRow, TransactionRecord};
pub use statement::{BankIdentifier, IssuerRegistry, StatementExtractor, StatementParser};

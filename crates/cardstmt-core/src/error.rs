//! Error types for the cardstmt-core library.

use thiserror::Error;

/// Main error type for the cardstmt library.
#[derive(Error, Debug)]
pub enum CardStmtError {
    /// Document source error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Statement extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by a document source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Failed to open/parse the document.
    #[error("failed to parse document: {0}")]
    Parse(String),

    /// Failed to extract text from the document.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The document is empty or has no pages.
    #[error("document has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// The source cannot recover tabular grids.
    #[error("table recovery unavailable: {0}")]
    TablesUnavailable(String),

    /// File type the source layer does not handle.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Errors related to statement extraction.
///
/// Only `UnsupportedIssuer` and `TextExtraction` fail a document; the other
/// two are recorded as warnings on an otherwise successful result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// No issuer signature matched the document.
    #[error("could not detect bank from statement")]
    UnsupportedIssuer,

    /// The document text could not be obtained.
    #[error("failed to read statement text: {0}")]
    TextExtraction(String),

    /// A statement field was not found by any pattern.
    #[error("field not found: {0}")]
    FieldNotFound(String),

    /// Transaction recovery failed in every tier.
    #[error("transaction recovery failed: {0}")]
    TransactionRecovery(String),
}

impl ExtractionError {
    /// Whether this error fails the whole document.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::UnsupportedIssuer | Self::TextExtraction(_))
    }
}

impl From<DocumentError> for ExtractionError {
    fn from(err: DocumentError) -> Self {
        Self::TextExtraction(err.to_string())
    }
}

/// Result type for the cardstmt library.
pub type Result<T> = std::result::Result<T, CardStmtError>;

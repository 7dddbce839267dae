//! Document sources: page-ordered text plus recovered tabular grids.

pub mod grid;
mod layout;
mod pdf;
mod text;

pub use pdf::PdfDocument;
pub use text::TextDocument;

use std::path::Path;

use crate::error::DocumentError;
use crate::models::config::PdfConfig;

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// One row of a recovered table; `None` marks an empty cell.
pub type Row = Vec<Option<String>>;

/// A tabular grid recovered from a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Rows in top-to-bottom order.
    pub rows: Vec<Row>,
}

impl Table {
    /// Build a table from rows of plain strings; blank strings become `None`.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| {
                        let cell: String = cell.into();
                        if cell.trim().is_empty() { None } else { Some(cell) }
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Width of the widest row.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Trait for anything that can supply statement text and tables.
///
/// Pages are 1-indexed.
pub trait DocumentSource {
    /// Number of pages.
    fn page_count(&self) -> u32;

    /// Text of a single page.
    fn page_text(&self, page: u32) -> Result<String>;

    /// Text of the whole document, pages joined by newlines.
    fn text(&self) -> Result<String> {
        let mut full_text = String::new();
        for page in 1..=self.page_count() {
            full_text.push_str(&self.page_text(page)?);
            full_text.push('\n');
        }
        Ok(full_text)
    }

    /// Document-wide table recovery.
    fn tables(&self) -> Result<Vec<Table>> {
        Err(DocumentError::TablesUnavailable(
            "source has no table recovery".to_string(),
        ))
    }

    /// Per-page table recovery, used when `tables` is unavailable.
    fn page_tables(&self, page: u32) -> Result<Vec<Table>> {
        let _ = page;
        Err(DocumentError::TablesUnavailable(
            "source has no per-page table recovery".to_string(),
        ))
    }
}

/// Open a statement file, choosing the source by extension.
pub fn open(path: &Path, config: &PdfConfig) -> Result<Box<dyn DocumentSource>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => Ok(Box::new(
            PdfDocument::open(path)?.with_column_gap(config.column_gap),
        )),
        "txt" => Ok(Box::new(
            TextDocument::open(path)?.with_column_gap(config.column_gap),
        )),
        _ => Err(DocumentError::UnsupportedFormat(extension)),
    }
}

/// Document held entirely in memory, with tables supplied by the caller.
#[derive(Debug, Clone)]
pub struct InMemoryDocument {
    pages: Vec<String>,
    tables: Result<Vec<Table>>,
    page_tables: Vec<Vec<Table>>,
    text_error: Option<DocumentError>,
}

impl InMemoryDocument {
    /// Create a document from page texts. Table recovery starts unavailable.
    pub fn new<S: Into<String>>(pages: impl IntoIterator<Item = S>) -> Self {
        let pages: Vec<String> = pages.into_iter().map(Into::into).collect();
        let page_tables = vec![Vec::new(); pages.len()];
        Self {
            pages,
            tables: Err(DocumentError::TablesUnavailable(
                "no tables supplied".to_string(),
            )),
            page_tables,
            text_error: None,
        }
    }

    /// Set the document-wide tables.
    pub fn with_tables(mut self, tables: Vec<Table>) -> Self {
        self.tables = Ok(tables);
        self
    }

    /// Make document-wide table recovery fail.
    pub fn with_table_error(mut self, error: DocumentError) -> Self {
        self.tables = Err(error);
        self
    }

    /// Set the tables of one page (1-indexed).
    pub fn with_page_tables(mut self, page: u32, tables: Vec<Table>) -> Self {
        if let Some(slot) = (page as usize).checked_sub(1).and_then(|i| self.page_tables.get_mut(i)) {
            *slot = tables;
        }
        self
    }

    /// Make full-text extraction fail while page text stays readable.
    pub fn with_text_error(mut self, error: DocumentError) -> Self {
        self.text_error = Some(error);
        self
    }
}

impl DocumentSource for InMemoryDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_text(&self, page: u32) -> Result<String> {
        (page as usize)
            .checked_sub(1)
            .and_then(|i| self.pages.get(i))
            .cloned()
            .ok_or(DocumentError::InvalidPage(page))
    }

    fn text(&self) -> Result<String> {
        if let Some(err) = &self.text_error {
            return Err(err.clone());
        }
        Ok(self.pages.join("\n"))
    }

    fn tables(&self) -> Result<Vec<Table>> {
        self.tables.clone()
    }

    fn page_tables(&self, page: u32) -> Result<Vec<Table>> {
        (page as usize)
            .checked_sub(1)
            .and_then(|i| self.page_tables.get(i))
            .cloned()
            .ok_or(DocumentError::InvalidPage(page))
    }
}

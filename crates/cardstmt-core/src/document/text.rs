//! Pre-extracted plain-text statements (pages separated by form feeds).

use std::path::Path;

use super::{DocumentSource, Result, Table, grid};
use crate::error::DocumentError;

/// Statement text already pulled out of its PDF, e.g. by `pdftotext -layout`.
#[derive(Debug, Clone)]
pub struct TextDocument {
    pages: Vec<String>,
    column_gap: usize,
}

impl TextDocument {
    /// Split text into pages on form feed characters.
    pub fn from_text(text: &str) -> Self {
        let mut pages: Vec<String> = text.split('\u{0c}').map(str::to_string).collect();
        // pdftotext terminates the last page with a form feed
        if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
            pages.pop();
        }
        Self {
            pages,
            column_gap: 2,
        }
    }

    /// Read a text file.
    pub fn open(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| DocumentError::TextExtraction(format!("{}: {}", path.display(), e)))?;
        Ok(Self::from_text(&text))
    }

    /// Set the column gap used for table recovery.
    pub fn with_column_gap(mut self, gap: usize) -> Self {
        self.column_gap = gap;
        self
    }
}

impl DocumentSource for TextDocument {
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

    fn tables(&self) -> Result<Vec<Table>> {
        grid::document_tables(self, self.column_gap)
    }

    fn page_tables(&self, page: u32) -> Result<Vec<Table>> {
        grid::document_page_tables(self, page, self.column_gap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_form_feed_pages() {
        let doc = TextDocument::from_text("HDFC Bank\u{0c}page two\u{0c}");
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.page_text(2).unwrap(), "page two");
        assert_eq!(doc.text().unwrap(), "HDFC Bank\npage two\n");
    }

    #[test]
    fn test_single_page_without_form_feed() {
        let doc = TextDocument::from_text("only page");
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn test_tables_from_layout_text() {
        let doc = TextDocument::from_text(
            "Date         Details          Amount\n05/01/2024   Grocery Store    1,200.00\n",
        );
        let tables = doc.tables().unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows.len(), 2);
    }

    #[test]
    fn test_open_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "ICICI Bank statement").unwrap();

        let doc = TextDocument::open(file.path()).unwrap();
        assert_eq!(doc.page_text(1).unwrap(), "ICICI Bank statement");
    }
}

//! PDF statement source using lopdf and pdf-extract.

use std::cell::OnceCell;
use std::path::Path;

use lopdf::Document;
use tracing::{debug, trace};

use super::{DocumentSource, Result, Table, grid, layout};
use crate::error::DocumentError;

/// A loaded PDF statement.
pub struct PdfDocument {
    document: Document,
    raw_data: Vec<u8>,
    column_gap: usize,
    full_text: OnceCell<Result<String>>,
    layout_pages: OnceCell<Result<Vec<String>>>,
}

impl PdfDocument {
    /// Load a PDF from bytes, decrypting empty-password PDFs.
    pub fn load(data: &[u8]) -> Result<Self> {
        let mut doc = Document::load_mem(data).map_err(|e| DocumentError::Parse(e.to_string()))?;

        let raw_data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(DocumentError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| DocumentError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            decrypted_data
        } else {
            data.to_vec()
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(DocumentError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        Ok(Self {
            document: doc,
            raw_data,
            column_gap: 2,
            full_text: OnceCell::new(),
            layout_pages: OnceCell::new(),
        })
    }

    /// Read and load a PDF file.
    pub fn open(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .map_err(|e| DocumentError::Parse(format!("{}: {}", path.display(), e)))?;
        Self::load(&data)
    }

    /// Set the column gap used for table recovery.
    pub fn with_column_gap(mut self, gap: usize) -> Self {
        self.column_gap = gap;
        self
    }

    /// Column-preserving text of every page, computed once.
    fn layout_pages(&self) -> Result<&[String]> {
        self.layout_pages
            .get_or_init(|| {
                let data = &self.raw_data;
                match std::panic::catch_unwind(|| layout::page_texts(data)) {
                    Ok(pages) => pages,
                    Err(_) => Err(DocumentError::TextExtraction(
                        "layout extraction aborted on malformed content".to_string(),
                    )),
                }
            })
            .as_ref()
            .map(Vec::as_slice)
            .map_err(Clone::clone)
    }
}

impl DocumentSource for PdfDocument {
    fn page_count(&self) -> u32 {
        self.document.get_pages().len() as u32
    }

    fn page_text(&self, page: u32) -> Result<String> {
        if !self.document.get_pages().contains_key(&page) {
            return Err(DocumentError::InvalidPage(page));
        }

        let text = self
            .document
            .extract_text(&[page])
            .map_err(|e| DocumentError::TextExtraction(e.to_string()))?;
        trace!("Page {} yielded {} chars", page, text.len());
        Ok(text)
    }

    fn text(&self) -> Result<String> {
        self.full_text
            .get_or_init(|| {
                let data = &self.raw_data;
                // pdf-extract panics on some malformed font tables
                match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(data)) {
                    Ok(text) => text.map_err(|e| DocumentError::TextExtraction(e.to_string())),
                    Err(_) => Err(DocumentError::TextExtraction(
                        "text extraction aborted on malformed content".to_string(),
                    )),
                }
            })
            .clone()
    }

    fn tables(&self) -> Result<Vec<Table>> {
        let pages = self.layout_pages()?;
        let tables = grid::stream_tables(pages.iter().map(String::as_str), self.column_gap);
        debug!("Recovered {} stream tables", tables.len());
        Ok(tables)
    }

    fn page_tables(&self, page: u32) -> Result<Vec<Table>> {
        let pages = self.layout_pages()?;
        let text = page
            .checked_sub(1)
            .and_then(|index| pages.get(index as usize))
            .ok_or(DocumentError::InvalidPage(page))?;

        let table = grid::page_grid(text, self.column_gap);
        if table.is_empty() { Ok(Vec::new()) } else { Ok(vec![table]) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::statement::Issuer;
    use crate::statement::StatementExtractor;
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};
    use rust_decimal::Decimal;

    /// One-page PDF with each `(x, y, text)` drawn as its own text object.
    fn build_pdf(items: &[(i64, i64, &str)]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut operations = Vec::new();
        for &(x, y, text) in items {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 10.into()]));
            operations.push(Operation::new("Td", vec![x.into(), y.into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(text)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut data = Vec::new();
        doc.save_to(&mut data).unwrap();
        data
    }

    fn hdfc_pdf() -> Vec<u8> {
        build_pdf(&[
            (50, 780, "HDFC Bank Credit Card Statement"),
            (50, 760, "Card No: XXXXXXXXXXXX1234"),
            (50, 740, "Payment Due Date: 15/02/2024"),
            (50, 690, "Date"),
            (200, 690, "Description"),
            (400, 690, "Amount"),
            (50, 670, "05/01/2024"),
            (200, 670, "Grocery Store"),
            (400, 670, "1,200.00"),
        ])
    }

    #[test]
    fn test_tables_keep_positioned_columns() {
        let doc = PdfDocument::load(&hdfc_pdf()).unwrap();

        let tables = doc.tables().unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(
            tables[0].rows[1],
            vec![
                Some("05/01/2024".to_string()),
                Some("Grocery Store".to_string()),
                Some("1,200.00".to_string()),
            ]
        );
    }

    #[test]
    fn test_page_tables_from_layout() {
        let doc = PdfDocument::load(&hdfc_pdf()).unwrap();

        let tables = doc.page_tables(1).unwrap();
        assert_eq!(tables.len(), 1);
        assert!(tables[0].rows.iter().any(|row| row.len() == 3));
        assert!(matches!(
            doc.page_tables(2).unwrap_err(),
            DocumentError::InvalidPage(2)
        ));
    }

    #[test]
    fn test_pdf_statement_recovers_transactions() {
        let doc = PdfDocument::load(&hdfc_pdf()).unwrap();

        let result = StatementExtractor::default().extract(&doc);
        assert!(result.success);
        assert_eq!(result.issuer, Issuer::Hdfc);
        assert_eq!(result.data.transactions.len(), 1);
        assert_eq!(result.data.transactions[0].amount, Decimal::new(1200, 0));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let err = PdfDocument::load(b"definitely not a pdf").err().unwrap();
        assert!(matches!(err, DocumentError::Parse(_)));
    }

    #[test]
    fn test_open_missing_file() {
        let err = PdfDocument::open(Path::new("/nonexistent/statement.pdf"))
            .err()
            .unwrap();
        assert!(matches!(err, DocumentError::Parse(_)));
    }
}

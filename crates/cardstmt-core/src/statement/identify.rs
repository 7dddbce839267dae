//! Bank identification from leading page text.

use tracing::{debug, warn};

use super::IssuerRegistry;
use crate::document::DocumentSource;
use crate::models::statement::Issuer;

/// Default number of leading pages scanned for issuer signatures.
pub const DEFAULT_SCAN_PAGES: usize = 2;

/// Detects the issuer of a statement by signature substrings.
#[derive(Debug, Clone, Copy)]
pub struct BankIdentifier<'a> {
    registry: &'a IssuerRegistry,
    scan_pages: usize,
}

impl<'a> BankIdentifier<'a> {
    pub fn new(registry: &'a IssuerRegistry) -> Self {
        Self {
            registry,
            scan_pages: DEFAULT_SCAN_PAGES,
        }
    }

    /// Scan at most `pages` leading pages.
    pub fn with_scan_pages(mut self, pages: usize) -> Self {
        self.scan_pages = pages;
        self
    }

    /// Identify the issuer from the leading pages of `doc`.
    ///
    /// Unreadable text yields [`Issuer::Unknown`].
    pub fn identify(&self, doc: &dyn DocumentSource) -> Issuer {
        let pages = (doc.page_count() as usize).min(self.scan_pages) as u32;
        let mut text = String::new();

        for page in 1..=pages {
            match doc.page_text(page) {
                Ok(page_text) => {
                    text.push_str(&page_text);
                    text.push('\n');
                }
                Err(err) => {
                    warn!("Could not read page {} for identification: {}", page, err);
                    return Issuer::Unknown;
                }
            }
        }

        self.identify_text(&text)
    }

    /// Identify the issuer from already-extracted text.
    pub fn identify_text(&self, text: &str) -> Issuer {
        let text = text.to_lowercase();

        for parser in self.registry.parsers() {
            if let Some(signature) = parser
                .signatures()
                .iter()
                .find(|s| text.contains(&s.to_lowercase()))
            {
                debug!("Matched signature {:?} for {}", signature, parser.issuer());
                return parser.issuer();
            }
        }

        Issuer::Unknown
    }
}

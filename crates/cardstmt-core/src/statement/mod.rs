//! Credit card statement extraction.

mod extractor;
mod fields;
mod identify;
pub mod issuers;
mod registry;
pub mod rules;
mod transactions;

pub use extractor::StatementExtractor;
pub use fields::FieldPatterns;
pub use identify::BankIdentifier;
pub use registry::IssuerRegistry;
pub use transactions::{TransactionRecoverer, line_scan_transaction, row_transaction};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::document::DocumentSource;
use crate::models::statement::{Issuer, TransactionRecord};

/// Field extraction for one card issuer.
///
/// Implementors usually supply only the identity, signatures and patterns;
/// the extraction methods default to the pattern bundle and a plain
/// [`TransactionRecoverer`].
pub trait StatementParser: Send + Sync {
    /// Issuer this parser handles.
    fn issuer(&self) -> Issuer;

    /// Lowercase substrings that identify the issuer's statements.
    fn signatures(&self) -> &'static [&'static str];

    /// Ordered field patterns.
    fn patterns(&self) -> &FieldPatterns;

    fn recoverer(&self) -> TransactionRecoverer {
        TransactionRecoverer::new()
    }

    /// Last four digits of the card number.
    fn extract_card_number(&self, text: &str) -> Option<String> {
        self.patterns().card_number(text)
    }

    /// Start and end of the billing cycle.
    fn extract_billing_cycle(&self, text: &str) -> (Option<NaiveDate>, Option<NaiveDate>) {
        self.patterns().billing_cycle(text)
    }

    fn extract_due_date(&self, text: &str) -> Option<NaiveDate> {
        self.patterns().due_date(text)
    }

    fn extract_amount_due(&self, text: &str) -> Option<Decimal> {
        self.patterns().amount_due(text)
    }

    /// Transactions in document order; never fails, may be empty.
    fn recover_transactions(&self, doc: &dyn DocumentSource) -> Vec<TransactionRecord> {
        self.recoverer().recover(doc)
    }
}

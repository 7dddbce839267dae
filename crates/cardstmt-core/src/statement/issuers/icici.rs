//! ICICI Bank credit card statements.

use lazy_static::lazy_static;

use crate::models::statement::Issuer;
use crate::statement::{FieldPatterns, StatementParser};

lazy_static! {
    static ref PATTERNS: FieldPatterns = FieldPatterns::new(
        &[
            r"Card\s+Number\s*:?\s*(?:X+|\*+)?(\d{4})",
            r"(\d{4})\s*ICICI",
            r"ending\s+(?:with|in)\s+(\d{4})",
        ],
        &[
            r"Statement\s+Period\s*:?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})\s+to\s+(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})",
            r"From\s+(\d{1,2}[/-]\w+[/-]\d{2,4})\s+To\s+(\d{1,2}[/-]\w+[/-]\d{2,4})",
        ],
        &[
            r"Payment\s+Due\s+Date\s*:?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})",
            r"Due\s+Date\s*:?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})",
        ],
        &[
            r"Total\s+Amount\s+Due\s*:?\s*(?:Rs\.?|INR|₹)?\s*([\d,]+\.?\d*)",
            r"Amount\s+Payable\s*:?\s*(?:Rs\.?|INR|₹)?\s*([\d,]+\.?\d*)",
        ],
    )
    .unwrap();
}

/// ICICI Bank parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct IciciParser;

impl StatementParser for IciciParser {
    fn issuer(&self) -> Issuer {
        Issuer::Icici
    }

    fn signatures(&self) -> &'static [&'static str] {
        &["icici"]
    }

    fn patterns(&self) -> &FieldPatterns {
        &PATTERNS
    }
}

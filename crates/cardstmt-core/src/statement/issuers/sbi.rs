//! SBI Card statements.
//!
//! SBI prints dates both numerically and as `16 Jan 2024`, so the date
//! captures accept either shape.

use lazy_static::lazy_static;

use crate::models::statement::Issuer;
use crate::statement::{FieldPatterns, StatementParser};

lazy_static! {
    static ref PATTERNS: FieldPatterns = FieldPatterns::new(
        &[
            r"Card\s+(?:Number|No\.?)\s*:?\s*(?:[X*]{4}\s*){3}(\d{4})",
            r"Card\s+(?:Number|No\.?)\s*:?\s*(?:X+|\*+)?(\d{4})",
            r"ending\s+(?:with|in)\s+(\d{4})",
        ],
        &[
            r"Statement\s+Period\s*:?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\d{1,2}\s+[A-Za-z]{3,9}\s+\d{4})\s+to\s+(\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\d{1,2}\s+[A-Za-z]{3,9}\s+\d{4})",
            r"Billing\s+Cycle\s*:?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\d{1,2}\s+[A-Za-z]{3,9}\s+\d{4})\s+(?:to|-)\s+(\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\d{1,2}\s+[A-Za-z]{3,9}\s+\d{4})",
        ],
        &[
            r"Payment\s+Due\s+Date\s*:?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\d{1,2}\s+[A-Za-z]{3,9}\s+\d{4})",
            r"Due\s+Date\s*:?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\d{1,2}\s+[A-Za-z]{3,9}\s+\d{4})",
        ],
        &[
            r"Total\s+Amount\s+Due\s*:?\s*(?:Rs\.?|INR|₹)?\s*([\d,]+\.?\d*)",
            r"Total\s+Outstanding\s*:?\s*(?:Rs\.?|INR|₹)?\s*([\d,]+\.?\d*)",
            r"Amount\s+Payable\s*:?\s*(?:Rs\.?|INR|₹)?\s*([\d,]+\.?\d*)",
        ],
    )
    .unwrap();
}

/// SBI Card parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SbiParser;

impl StatementParser for SbiParser {
    fn issuer(&self) -> Issuer {
        Issuer::Sbi
    }

    fn signatures(&self) -> &'static [&'static str] {
        &["sbi card", "sbi credit"]
    }

    fn patterns(&self) -> &FieldPatterns {
        &PATTERNS
    }
}

//! Axis Bank credit card statements.

use lazy_static::lazy_static;

use crate::models::statement::Issuer;
use crate::statement::{FieldPatterns, StatementParser};

lazy_static! {
    static ref PATTERNS: FieldPatterns = FieldPatterns::new(
        &[
            r"Card\s+Number\s*:?\s*(?:X+|\*+)?(\d{4})",
            r"(\d{4})\s*Axis",
        ],
        &[
            r"Statement\s+Period\s*:?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})\s+to\s+(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})",
            r"From\s+(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})\s+To\s+(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})",
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

/// Axis Bank parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct AxisParser;

impl StatementParser for AxisParser {
    fn issuer(&self) -> Issuer {
        Issuer::Axis
    }

    fn signatures(&self) -> &'static [&'static str] {
        &["axis"]
    }

    fn patterns(&self) -> &FieldPatterns {
        &PATTERNS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[test]
    fn test_extract_fields() {
        let text = "Axis Bank Neo Credit Card\n\
            Card Number: ************4242\n\
            From 10/02/2024 To 09/03/2024\n\
            Due Date: 29/03/2024\n\
            Amount Payable: INR 7,890.10\n";

        assert_eq!(AxisParser.extract_card_number(text).as_deref(), Some("4242"));
        assert_eq!(
            AxisParser.extract_billing_cycle(text),
            (NaiveDate::from_ymd_opt(2024, 2, 10), NaiveDate::from_ymd_opt(2024, 3, 9))
        );
        assert_eq!(AxisParser.extract_due_date(text), NaiveDate::from_ymd_opt(2024, 3, 29));
        assert_eq!(AxisParser.extract_amount_due(text), Some(Decimal::new(789010, 2)));
    }

    #[test]
    fn test_digits_before_brand() {
        assert_eq!(AxisParser.extract_card_number("9090 AXIS MY ZONE").as_deref(), Some("9090"));
    }
}

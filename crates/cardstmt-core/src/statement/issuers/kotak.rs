//! Kotak Mahindra Bank credit card statements.

use lazy_static::lazy_static;

use crate::models::statement::Issuer;
use crate::statement::{FieldPatterns, StatementParser};

lazy_static! {
    static ref PATTERNS: FieldPatterns = FieldPatterns::new(
        &[
            r"Card\s+(?:Number|No\.?)\s*:?\s*(?:X+|\*+)?(\d{4})",
            r"Primary\s+Card\s*:?\s*(?:[X*]+\s*)+(\d{4})",
            r"(\d{4})\s*Kotak",
        ],
        &[
            r"Statement\s+Period\s*:?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})\s+to\s+(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})",
            r"Billing\s+Period\s*:?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})\s+(?:to|-)\s+(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})",
        ],
        &[
            r"Payment\s+Due\s+Date\s*:?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})",
            r"Remember\s+to\s+Pay\s+By\s*:?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})",
            r"Due\s+Date\s*:?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})",
        ],
        &[
            r"Total\s+Amount\s+Due\s*:?\s*(?:Rs\.?|INR|₹)?\s*([\d,]+\.?\d*)",
            r"Total\s+Due\s*:?\s*(?:Rs\.?|INR|₹)?\s*([\d,]+\.?\d*)",
            r"Amount\s+Payable\s*:?\s*(?:Rs\.?|INR|₹)?\s*([\d,]+\.?\d*)",
        ],
    )
    .unwrap();
}

/// Kotak Mahindra Bank parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct KotakParser;

impl StatementParser for KotakParser {
    fn issuer(&self) -> Issuer {
        Issuer::Kotak
    }

    fn signatures(&self) -> &'static [&'static str] {
        &["kotak"]
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
        let text = "Kotak Mahindra Bank\n\
            Primary Card: XXXX XXXX XXXX 8080\n\
            Billing Period: 01-05-2024 to 31-05-2024\n\
            Remember to Pay By: 20-06-2024\n\
            Total Due: Rs.4,500.25\n";

        assert_eq!(KotakParser.extract_card_number(text).as_deref(), Some("8080"));
        assert_eq!(
            KotakParser.extract_billing_cycle(text),
            (NaiveDate::from_ymd_opt(2024, 5, 1), NaiveDate::from_ymd_opt(2024, 5, 31))
        );
        assert_eq!(KotakParser.extract_due_date(text), NaiveDate::from_ymd_opt(2024, 6, 20));
        assert_eq!(KotakParser.extract_amount_due(text), Some(Decimal::new(450025, 2)));
    }

    #[test]
    fn test_payment_due_date_preferred() {
        let text = "Due Date: 01/07/2024\nPayment Due Date: 05/07/2024";
        assert_eq!(KotakParser.extract_due_date(text), NaiveDate::from_ymd_opt(2024, 7, 5));
    }
}

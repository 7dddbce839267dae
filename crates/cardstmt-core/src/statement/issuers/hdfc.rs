//! HDFC Bank credit card statements.

use lazy_static::lazy_static;

use crate::models::statement::Issuer;
use crate::statement::{FieldPatterns, StatementParser, TransactionRecoverer};

lazy_static! {
    static ref PATTERNS: FieldPatterns = FieldPatterns::new(
        &[
            r"Card\s+(?:Number|No\.?)\s*:?\s*(?:X+|\*+)?(\d{4})",
            r"(?:X{12}|\*{12})(\d{4})",
            r"Card\s+ending\s+(?:with|in)\s+(\d{4})",
            r"(\d{4})\s+HDFC",
        ],
        &[
            r"Statement\s+(?:Period|Date|from)\s*:?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})\s+(?:to|-|till)\s+(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})",
            r"Billing\s+Cycle\s*:?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})\s+(?:to|-|till)\s+(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})",
            r"From\s+(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})\s+to\s+(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})",
        ],
        &[
            r"Payment\s+Due\s+(?:Date|By)\s*:?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})",
            r"Due\s+Date\s*:?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})",
            r"Pay\s+By\s*:?\s*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})",
        ],
        &[
            r"Total\s+Amount\s+Due\s*:?\s*(?:Rs\.?|INR|₹)?\s*([\d,]+\.?\d*)",
            r"Amount\s+Due\s*:?\s*(?:Rs\.?|INR|₹)?\s*([\d,]+\.?\d*)",
            r"New\s+Balance\s*:?\s*(?:Rs\.?|INR|₹)?\s*([\d,]+\.?\d*)",
            r"Current\s+Outstanding\s*:?\s*(?:Rs\.?|INR|₹)?\s*([\d,]+\.?\d*)",
        ],
    )
    .unwrap();
}

/// HDFC Bank parser.
///
/// HDFC statements print summary boxes as narrow two-column tables, so only
/// tables with at least three columns are read for transactions.
#[derive(Debug, Clone, Copy, Default)]
pub struct HdfcParser;

impl StatementParser for HdfcParser {
    fn issuer(&self) -> Issuer {
        Issuer::Hdfc
    }

    fn signatures(&self) -> &'static [&'static str] {
        &["hdfc"]
    }

    fn patterns(&self) -> &FieldPatterns {
        &PATTERNS
    }

    fn recoverer(&self) -> TransactionRecoverer {
        TransactionRecoverer::new().with_min_table_columns(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    const STATEMENT: &str = "HDFC Bank Credit Card Statement\n\
        Card No: XXXXXXXXXXXX1234\n\
        Statement Period: 01/01/2024 to 31/01/2024\n\
        Payment Due Date: 15/02/2024\n\
        Total Amount Due: Rs. 12,345.67\n\
        Minimum Amount Due: Rs. 620.00\n";

    #[test]
    fn test_extract_fields() {
        let parser = HdfcParser;
        assert_eq!(parser.extract_card_number(STATEMENT).as_deref(), Some("1234"));
        assert_eq!(
            parser.extract_billing_cycle(STATEMENT),
            (NaiveDate::from_ymd_opt(2024, 1, 1), NaiveDate::from_ymd_opt(2024, 1, 31))
        );
        assert_eq!(parser.extract_due_date(STATEMENT), NaiveDate::from_ymd_opt(2024, 2, 15));
        assert_eq!(parser.extract_amount_due(STATEMENT), Some(Decimal::new(1234567, 2)));
    }

    #[test]
    fn test_masked_number_without_label() {
        assert_eq!(
            HdfcParser.extract_card_number("Primary ************9876 Regalia").as_deref(),
            Some("9876")
        );
        assert_eq!(
            HdfcParser.extract_card_number("Your card ending in 4455").as_deref(),
            Some("4455")
        );
    }

    #[test]
    fn test_alternate_labels() {
        let text = "Billing Cycle: 16-12-2023 till 15-01-2024\nPay By 05/02/24\nNew Balance: 8,000";
        assert_eq!(
            HdfcParser.extract_billing_cycle(text),
            (NaiveDate::from_ymd_opt(2023, 12, 16), NaiveDate::from_ymd_opt(2024, 1, 15))
        );
        assert_eq!(HdfcParser.extract_due_date(text), NaiveDate::from_ymd_opt(2024, 2, 5));
        assert_eq!(HdfcParser.extract_amount_due(text), Some(Decimal::new(8000, 0)));
    }

    #[test]
    fn test_total_amount_due_beats_minimum() {
        let text = "Minimum Amount Due: 500.00\nTotal Amount Due: 9,999.00";
        assert_eq!(HdfcParser.extract_amount_due(text), Some(Decimal::new(999900, 2)));
    }
}

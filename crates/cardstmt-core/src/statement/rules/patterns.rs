//! Row tokens shared by every issuer.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// First date-like token in a transaction row.
    pub static ref DATE_TOKEN: Regex = Regex::new(
        r"(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})"
    ).unwrap();

    /// First two-decimal amount in a transaction row; parentheses mark a credit.
    pub static ref AMOUNT_TOKEN: Regex = Regex::new(
        r"(\([\d,]+\.\d{2}\)|[\d,]+\.\d{2})"
    ).unwrap();
}

/// Collapse runs of whitespace into single spaces.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_token() {
        let caps = DATE_TOKEN.captures("Txn 05/01/2024 Grocery").unwrap();
        assert_eq!(&caps[1], "05/01/2024");
        assert!(DATE_TOKEN.captures("Grocery Store 1,200.00").is_none());
    }

    #[test]
    fn test_amount_token_prefers_first() {
        let caps = AMOUNT_TOKEN.captures("05/01/2024 Shop 1,200.00 3,400.00").unwrap();
        assert_eq!(&caps[1], "1,200.00");

        let caps = AMOUNT_TOKEN.captures("09/01/2024 Refund (150.00)").unwrap();
        assert_eq!(&caps[1], "(150.00)");

        assert!(AMOUNT_TOKEN.captures("05/01/2024 Shop 1200").is_none());
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \t b\n c "), "a b c");
    }
}

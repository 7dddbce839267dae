//! Amount normalization for Indian-format statements.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse an amount token such as `"₹ 1,23,456.78"` or `"(1,234.50)"`.
///
/// Parentheses follow the accounting convention for negative values.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let mut cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '₹' | '$' | '€' | '£' | ',') && !c.is_whitespace())
        .collect();

    if cleaned.contains('(') && cleaned.contains(')') {
        cleaned = format!("-{}", cleaned.replace(['(', ')'], ""));
    }

    // loose captures can stop right after the decimal point
    let cleaned = cleaned.strip_suffix('.').unwrap_or(&cleaned);
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    Decimal::from_str(cleaned).ok()
}

/// Format an amount with Indian digit grouping (`12,34,567.89`).
pub fn format_indian_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.abs());
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let digits: Vec<char> = integer_part.chars().collect();
    let mut groups: Vec<String> = Vec::new();
    let mut end = digits.len();

    // last three digits, then pairs
    let mut width = 3;
    while end > 0 {
        let start = end.saturating_sub(width);
        groups.push(digits[start..end].iter().collect());
        end = start;
        width = 2;
    }
    groups.reverse();

    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    format!("{}{}.{}", sign, groups.join(","), decimal_part)
}

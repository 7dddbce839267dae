//! Credit card statement data models.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Bank that issued a statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Issuer {
    /// HDFC Bank.
    Hdfc,
    /// ICICI Bank.
    Icici,
    /// SBI Card.
    Sbi,
    /// Axis Bank.
    Axis,
    /// Kotak Mahindra Bank.
    Kotak,
    /// No signature matched.
    #[default]
    Unknown,
}

impl Issuer {
    /// Short tag used in file names and reports.
    pub fn tag(&self) -> &'static str {
        match self {
            Issuer::Hdfc => "hdfc",
            Issuer::Icici => "icici",
            Issuer::Sbi => "sbi",
            Issuer::Axis => "axis",
            Issuer::Kotak => "kotak",
            Issuer::Unknown => "unknown",
        }
    }

    /// Human-readable bank name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Issuer::Hdfc => "HDFC Bank",
            Issuer::Icici => "ICICI Bank",
            Issuer::Sbi => "SBI Card",
            Issuer::Axis => "Axis Bank",
            Issuer::Kotak => "Kotak Mahindra Bank",
            Issuer::Unknown => "Unknown",
        }
    }

    /// Parse an issuer from its tag.
    pub fn from_tag(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "hdfc" => Some(Issuer::Hdfc),
            "icici" => Some(Issuer::Icici),
            "sbi" => Some(Issuer::Sbi),
            "axis" => Some(Issuer::Axis),
            "kotak" => Some(Issuer::Kotak),
            "unknown" => Some(Issuer::Unknown),
            _ => None,
        }
    }

    pub fn is_known(&self) -> bool {
        *self != Issuer::Unknown
    }
}

impl fmt::Display for Issuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Data extracted from one statement document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementRecord {
    /// Detected issuer.
    pub issuer: Issuer,

    /// Last four digits of the card number.
    pub card_last_4: Option<String>,

    /// First day of the billing cycle.
    pub billing_cycle_start: Option<NaiveDate>,

    /// Last day of the billing cycle.
    pub billing_cycle_end: Option<NaiveDate>,

    /// Payment due date.
    pub payment_due_date: Option<NaiveDate>,

    /// Total amount due (negative for a credit balance).
    pub total_amount_due: Option<Decimal>,

    /// Line items in document order.
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
}

impl StatementRecord {
    /// Create an empty record for an issuer.
    pub fn new(issuer: Issuer) -> Self {
        Self {
            issuer,
            ..Self::default()
        }
    }

    /// Billing cycle as `"<start> to <end>"`, blank for a missing side.
    pub fn billing_cycle_label(&self) -> String {
        format!(
            "{} to {}",
            format_date(self.billing_cycle_start),
            format_date(self.billing_cycle_end)
        )
    }

    /// Names of scalar fields left absent.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.card_last_4.is_none() {
            missing.push("card number");
        }
        if self.billing_cycle_start.is_none() || self.billing_cycle_end.is_none() {
            missing.push("billing cycle");
        }
        if self.payment_due_date.is_none() {
            missing.push("payment due date");
        }
        if self.total_amount_due.is_none() {
            missing.push("total amount due");
        }
        missing
    }

    /// Flatten into one CSV row per transaction, repeating statement metadata.
    pub fn to_rows(&self) -> Vec<StatementRow> {
        let billing_cycle = self.billing_cycle_label();
        let due_date = format_date(self.payment_due_date);
        let total_due = self
            .total_amount_due
            .map(|d| d.to_string())
            .unwrap_or_default();
        let card = self.card_last_4.clone().unwrap_or_default();

        self.transactions
            .iter()
            .map(|txn| StatementRow {
                date: format_date(txn.date),
                description: txn.description.clone(),
                amount: txn.amount.to_string(),
                card_last_4: card.clone(),
                billing_cycle: billing_cycle.clone(),
                payment_due_date: due_date.clone(),
                total_amount_due: total_due.clone(),
                bank: self.issuer.display_name().to_string(),
            })
            .collect()
    }
}

/// One transaction line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction date, absent when the date token did not parse.
    pub date: Option<NaiveDate>,

    /// Whitespace-normalized description.
    pub description: String,

    /// Signed amount; credits are negative.
    pub amount: Decimal,
}

/// Flat CSV row with statement metadata repeated on every transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Card_Last_4_Digits")]
    pub card_last_4: String,
    #[serde(rename = "Billing_Cycle")]
    pub billing_cycle: String,
    #[serde(rename = "Payment_Due_Date")]
    pub payment_due_date: String,
    #[serde(rename = "Total_Amount_Due")]
    pub total_amount_due: String,
    #[serde(rename = "Bank")]
    pub bank: String,
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn sample() -> StatementRecord {
        StatementRecord {
            issuer: Issuer::Hdfc,
            card_last_4: Some("4321".to_string()),
            billing_cycle_start: NaiveDate::from_ymd_opt(2024, 1, 1),
            billing_cycle_end: NaiveDate::from_ymd_opt(2024, 1, 31),
            payment_due_date: NaiveDate::from_ymd_opt(2024, 2, 15),
            total_amount_due: Some(Decimal::from_str("12345.67").unwrap()),
            transactions: vec![
                TransactionRecord {
                    date: NaiveDate::from_ymd_opt(2024, 1, 5),
                    description: "05/01/2024 Grocery Store 1,200.00".to_string(),
                    amount: Decimal::from_str("1200.00").unwrap(),
                },
                TransactionRecord {
                    date: NaiveDate::from_ymd_opt(2024, 1, 9),
                    description: "09/01/2024 Refund (150.00)".to_string(),
                    amount: Decimal::from_str("-150.00").unwrap(),
                },
            ],
        }
    }

    #[test]
    fn test_issuer_tags() {
        for issuer in [Issuer::Hdfc, Issuer::Icici, Issuer::Sbi, Issuer::Axis, Issuer::Kotak] {
            assert_eq!(Issuer::from_tag(issuer.tag()), Some(issuer));
            assert!(issuer.is_known());
        }
        assert_eq!(Issuer::from_tag("HDFC"), Some(Issuer::Hdfc));
        assert_eq!(Issuer::from_tag("citi"), None);
        assert!(!Issuer::Unknown.is_known());
    }

    #[test]
    fn test_rows_repeat_metadata() {
        let rows = sample().to_rows();

        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row.card_last_4, "4321");
            assert_eq!(row.billing_cycle, "2024-01-01 to 2024-01-31");
            assert_eq!(row.payment_due_date, "2024-02-15");
            assert_eq!(row.total_amount_due, "12345.67");
            assert_eq!(row.bank, "HDFC Bank");
        }
        assert_eq!(rows[0].date, "2024-01-05");
        assert_eq!(rows[1].amount, "-150.00");
    }

    #[test]
    fn test_billing_cycle_label_with_gaps() {
        let mut record = StatementRecord::new(Issuer::Axis);
        record.billing_cycle_end = NaiveDate::from_ymd_opt(2024, 3, 31);
        assert_eq!(record.billing_cycle_label(), " to 2024-03-31");
    }

    #[test]
    fn test_missing_fields() {
        let record = StatementRecord::new(Issuer::Icici);
        assert_eq!(
            record.missing_fields(),
            vec!["card number", "billing cycle", "payment due date", "total amount due"]
        );
        assert!(sample().missing_fields().is_empty());
    }

    #[test]
    fn test_dates_serialize_canonical() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["payment_due_date"], "2024-02-15");
        assert_eq!(json["issuer"], "hdfc");
        assert_eq!(json["transactions"][0]["date"], "2024-01-05");
    }
}

//! Per-issuer field pattern bundle.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use super::rules::{PatternSet, parse_amount, parse_date};

/// The four ordered pattern lists an issuer declares.
#[derive(Debug, Clone)]
pub struct FieldPatterns {
    /// Captures the last four card digits in group 1.
    pub card_number: PatternSet,
    /// Captures cycle start and end dates in groups 1 and 2.
    pub billing_cycle: PatternSet,
    /// Captures the due date in group 1.
    pub due_date: PatternSet,
    /// Captures the total due in group 1.
    pub amount_due: PatternSet,
}

impl FieldPatterns {
    /// Compile the pattern lists, each in priority order.
    pub fn new(
        card_number: &[&str],
        billing_cycle: &[&str],
        due_date: &[&str],
        amount_due: &[&str],
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            card_number: PatternSet::new(card_number)?,
            billing_cycle: PatternSet::new(billing_cycle)?,
            due_date: PatternSet::new(due_date)?,
            amount_due: PatternSet::new(amount_due)?,
        })
    }

    pub fn card_number(&self, text: &str) -> Option<String> {
        self.card_number.first_group(text).map(str::to_string)
    }

    pub fn billing_cycle(&self, text: &str) -> (Option<NaiveDate>, Option<NaiveDate>) {
        let Some(caps) = self.billing_cycle.captures(text) else {
            return (None, None);
        };
        let start = caps.get(1).and_then(|m| normalized_date("billing cycle start", m.as_str()));
        let end = caps.get(2).and_then(|m| normalized_date("billing cycle end", m.as_str()));
        (start, end)
    }

    pub fn due_date(&self, text: &str) -> Option<NaiveDate> {
        self.due_date
            .first_group(text)
            .and_then(|raw| normalized_date("payment due date", raw))
    }

    pub fn amount_due(&self, text: &str) -> Option<Decimal> {
        let raw = self.amount_due.first_group(text)?;
        let amount = parse_amount(raw);
        if amount.is_none() {
            debug!("Total due token {:?} is not numeric", raw);
        }
        amount
    }
}

fn normalized_date(field: &str, raw: &str) -> Option<NaiveDate> {
    let date = parse_date(raw);
    if date.is_none() {
        debug!("Matched {} token {:?} but no date format accepts it", field, raw);
    }
    date
}

//! Transaction recovery from tables, with a line-scan fallback.

use tracing::{debug, warn};

use super::rules::{AMOUNT_TOKEN, DATE_TOKEN, normalize_whitespace, parse_amount, parse_date};
use crate::document::{DocumentSource, Row, Table};
use crate::models::statement::TransactionRecord;

/// Two-tier transaction recovery.
///
/// 1. Every row of every document table is read as free text and searched
///    for a date token and a two-decimal amount token.
/// 2. Only when document tables are unavailable, per-page grids are scanned
///    positionally: date in the first cell, amount in the last.
///
/// Internal failures never escape; the worst case is an empty list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransactionRecoverer {
    min_table_columns: usize,
}

impl TransactionRecoverer {
    pub const fn new() -> Self {
        Self { min_table_columns: 0 }
    }

    /// Skip document tables narrower than `columns`.
    pub const fn with_min_table_columns(mut self, columns: usize) -> Self {
        self.min_table_columns = columns;
        self
    }

    /// Recover transactions in document order; empty on failure.
    pub fn recover(&self, doc: &dyn DocumentSource) -> Vec<TransactionRecord> {
        match doc.tables() {
            Ok(tables) => self.from_tables(&tables),
            Err(err) => {
                debug!("Table recovery failed ({}), falling back to line scan", err);
                self.line_scan(doc)
            }
        }
    }

    /// Structured tier over already-recovered tables.
    pub fn from_tables(&self, tables: &[Table]) -> Vec<TransactionRecord> {
        let transactions: Vec<TransactionRecord> = tables
            .iter()
            .filter(|t| !t.is_empty() && t.column_count() >= self.min_table_columns)
            .flat_map(|t| t.rows.iter())
            .filter_map(row_transaction)
            .collect();

        debug!(
            "Recovered {} transactions from {} tables",
            transactions.len(),
            tables.len()
        );
        transactions
    }

    /// Fallback tier: positional scan of per-page grids.
    ///
    /// A page that fails ends the scan; rows found so far are kept.
    pub fn line_scan(&self, doc: &dyn DocumentSource) -> Vec<TransactionRecord> {
        let mut transactions = Vec::new();

        for page in 1..=doc.page_count() {
            let tables = match doc.page_tables(page) {
                Ok(tables) => tables,
                Err(err) => {
                    warn!("Line scan stopped at page {}: {}", page, err);
                    break;
                }
            };

            for table in &tables {
                // first row is the column header
                transactions.extend(table.rows.iter().skip(1).filter_map(line_scan_transaction));
            }
        }

        debug!("Line scan recovered {} transactions", transactions.len());
        transactions
    }
}

/// Read a table row as free text; needs both a date and an amount token.
///
/// The whole joined row becomes the description since table column
/// boundaries are unreliable.
pub fn row_transaction(row: &Row) -> Option<TransactionRecord> {
    let line = normalize_whitespace(
        &row.iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" "),
    );

    let date = DATE_TOKEN.captures(&line)?;
    let amount = AMOUNT_TOKEN.captures(&line)?;
    let amount = parse_amount(&amount[1])?;
    let date = parse_date(&date[1]);

    Some(TransactionRecord {
        date,
        description: line,
        amount,
    })
}

/// Positional row: date from the first cell, amount from the last, the
/// cells between as description.
pub fn line_scan_transaction(row: &Row) -> Option<TransactionRecord> {
    if row.len() < 3 {
        return None;
    }

    let date = DATE_TOKEN.captures(row[0].as_deref().unwrap_or(""))?;
    let amount = parse_amount(row[row.len() - 1].as_deref()?)?;
    let description = normalize_whitespace(
        &row[1..row.len() - 1]
            .iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" "),
    );

    Some(TransactionRecord {
        date: parse_date(&date[0]),
        description,
        amount,
    })
}

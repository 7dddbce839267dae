//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;

use std::io;
use std::path::Path;

use tracing::debug;

use cardstmt_core::models::config::CardStmtConfig;
use cardstmt_core::StatementRow;

/// Column names of the statement CSV.
const CSV_HEADER: [&str; 8] = [
    "Date",
    "Description",
    "Amount",
    "Card_Last_4_Digits",
    "Billing_Cycle",
    "Payment_Due_Date",
    "Total_Amount_Due",
    "Bank",
];

/// Load the explicit config file, else the user config, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CardStmtConfig> {
    if let Some(path) = config_path {
        return Ok(CardStmtConfig::from_file(Path::new(path))?);
    }

    let user_config = config::default_config_path();
    if user_config.exists() {
        debug!("Using config from {}", user_config.display());
        return Ok(CardStmtConfig::from_file(&user_config)?);
    }

    Ok(CardStmtConfig::default())
}

/// Write statement rows as CSV; the header is written even with no rows.
pub fn write_rows<W: io::Write>(writer: W, rows: &[StatementRow]) -> anyhow::Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(CSV_HEADER)?;
    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}

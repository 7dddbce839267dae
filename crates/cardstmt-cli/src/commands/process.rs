//! Process command - extract data from a single statement.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use cardstmt_core::statement::rules::format_indian_amount;
use cardstmt_core::{ExtractionResult, StatementExtractor};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Statement file (PDF, or pre-extracted .txt)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Leading pages searched for the issuer name
    #[arg(long)]
    scan_pages: Option<usize>,

    /// Show extraction warnings and timing
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Full extraction result as JSON
    Json,
    /// One CSV row per transaction
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::load_config(config_path)?;
    if let Some(pages) = args.scan_pages {
        config.identification.scan_pages = pages;
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Extracting statement...");

    let extractor = StatementExtractor::from_config(&config);
    let result = extractor.extract_path(&args.input);

    pb.finish_and_clear();

    let output = format_result(&result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    if args.show_warnings {
        eprintln!();
        for warning in &result.warnings {
            eprintln!("{} {}", style("⚠").yellow(), warning);
        }
        eprintln!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            result.processing_time_ms
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    if let Some(error) = &result.error {
        anyhow::bail!("Extraction failed: {}", error);
    }

    Ok(())
}

fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(result)?)),
        OutputFormat::Csv => {
            let mut out = Vec::new();
            super::write_rows(&mut out, &result.data.to_rows())?;
            Ok(String::from_utf8(out)?)
        }
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_text(result: &ExtractionResult) -> String {
    let data = &result.data;
    let mut output = String::new();

    output.push_str(&format!("Bank: {}\n", data.issuer.display_name()));
    if let Some(error) = &result.error {
        output.push_str(&format!("Error: {}\n", error));
        return output;
    }

    output.push_str(&format!(
        "Card: XXXX-{}\n",
        data.card_last_4.as_deref().unwrap_or("????")
    ));
    output.push_str(&format!("Billing cycle: {}\n", data.billing_cycle_label()));
    if let Some(due) = data.payment_due_date {
        output.push_str(&format!("Payment due: {}\n", due));
    }
    if let Some(total) = data.total_amount_due {
        output.push_str(&format!("Total due: ₹{}\n", format_indian_amount(total)));
    }
    output.push('\n');

    output.push_str(&format!("Transactions ({}):\n", data.transactions.len()));
    for txn in &data.transactions {
        let date = txn.date.map(|d| d.to_string()).unwrap_or_default();
        output.push_str(&format!(
            "  {:<10}  {:<50}  {:>14}\n",
            date,
            txn.description,
            format_indian_amount(txn.amount)
        ));
    }

    output
}

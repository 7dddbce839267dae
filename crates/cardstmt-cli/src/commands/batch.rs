//! Batch processing command for multiple statement files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, error, warn};

use cardstmt_core::{BatchSummary, ExtractionResult, StatementExtractor, StatementRecord};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input directory or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory (default: output.dir from config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of parallel workers
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Per-document timeout in seconds (0 = none)
    #[arg(long)]
    timeout: Option<u64>,

    /// Stop at the first failed document
    #[arg(long)]
    fail_fast: bool,

    /// Skip per-document CSV files
    #[arg(long)]
    no_csv: bool,

    /// Skip the JSON processing report
    #[arg(long)]
    no_report: bool,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::load_config(config_path)?;
    if let Some(jobs) = args.jobs {
        config.batch.jobs = jobs;
    }
    if let Some(timeout) = args.timeout {
        config.batch.document_timeout_secs = timeout;
    }
    if args.fail_fast {
        config.batch.continue_on_error = false;
    }
    if let Some(dir) = &args.output_dir {
        config.output.dir = dir.clone();
    }
    config.output.write_csv &= !args.no_csv;
    config.output.write_report &= !args.no_report;

    let files = collect_inputs(&args.input)?;
    if files.is_empty() {
        anyhow::bail!("No statement files found for: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let output_dir = config.output.dir.clone();
    fs::create_dir_all(&output_dir)?;

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let extractor = Arc::new(StatementExtractor::from_config(&config));
    let semaphore = Arc::new(Semaphore::new(config.batch.jobs.max(1)));
    let timeout = match config.batch.document_timeout_secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };

    let handles: Vec<_> = files
        .iter()
        .cloned()
        .map(|path| {
            let extractor = Arc::clone(&extractor);
            let semaphore = Arc::clone(&semaphore);
            let pb = overall_pb.clone();
            tokio::spawn(async move {
                let result = process_document(extractor, path, semaphore, timeout).await;
                pb.inc(1);
                result
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    let mut handles = handles.into_iter();

    while let Some(handle) = handles.next() {
        let result = handle.await?;

        if result.success {
            if config.output.write_csv {
                write_statement_csv(&output_dir, &result)?;
            }
        } else {
            let file = result.file.as_deref().unwrap_or("");
            let error = result.error.as_deref().unwrap_or("unknown error");
            if config.batch.continue_on_error {
                warn!("Failed to process {}: {}", file, error);
            } else {
                error!("Failed to process {}: {}", file, error);
                for pending in handles.by_ref() {
                    pending.abort();
                }
                results.push(result);
                break;
            }
        }

        results.push(result);
    }

    overall_pb.finish_with_message("Complete");

    let summary = BatchSummary::new(results);

    if config.output.write_report {
        let report_path = output_dir.join(summary.report_file_name());
        fs::write(&report_path, serde_json::to_string_pretty(&summary)?)?;
        println!(
            "{} Report written to {}",
            style("✓").green(),
            report_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        summary.total_processed,
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(summary.successful).green(),
        style(summary.failed).red()
    );

    let failed: Vec<_> = summary.details.iter().filter(|r| !r.success).collect();
    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.file.as_deref().unwrap_or(""),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    if !config.batch.continue_on_error && !failed.is_empty() {
        anyhow::bail!("Batch stopped after a failed document");
    }

    Ok(())
}

/// Expand a directory or glob pattern into statement files, sorted.
fn collect_inputs(input: &str) -> anyhow::Result<Vec<PathBuf>> {
    let pattern = if Path::new(input).is_dir() {
        format!("{}/*", input.trim_end_matches('/'))
    } else {
        input.to_string()
    };

    let mut files: Vec<PathBuf> = glob(&pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file() && is_statement_file(p))
        .collect();
    files.sort();

    Ok(files)
}

fn is_statement_file(path: &Path) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
}

/// Extract one file once a worker slot is free.
async fn process_document(
    extractor: Arc<StatementExtractor>,
    path: PathBuf,
    semaphore: Arc<Semaphore>,
    timeout: Option<Duration>,
) -> ExtractionResult {
    let permit = semaphore.acquire_owned().await.ok();
    let file = path.display().to_string();
    run_blocking(file, permit, timeout, move || extractor.extract_path(&path)).await
}

/// Run `job` on the blocking pool, bounded by `timeout` when one is set.
///
/// The permit is released when the job itself returns, so a timed-out job
/// still occupies its worker slot.
async fn run_blocking<F>(
    file: String,
    permit: Option<OwnedSemaphorePermit>,
    timeout: Option<Duration>,
    job: F,
) -> ExtractionResult
where
    F: FnOnce() -> ExtractionResult + Send + 'static,
{
    let task = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        job()
    });

    let joined = match timeout {
        Some(limit) => match tokio::time::timeout(limit, task).await {
            Ok(joined) => joined,
            Err(_) => {
                return ExtractionResult::failed(
                    StatementRecord::default(),
                    format!("timed out after {:?}", limit),
                )
                .with_file(file)
                .with_processing_time(limit.as_millis() as u64);
            }
        },
        None => task.await,
    };

    joined.unwrap_or_else(|e| {
        ExtractionResult::failed(StatementRecord::default(), format!("worker failed: {}", e))
            .with_file(file)
    })
}

/// Per-document CSV name: `<stem>_<issuer>_extracted.csv`.
fn csv_file_name(result: &ExtractionResult) -> String {
    let stem = result
        .file
        .as_deref()
        .and_then(|f| Path::new(f).file_stem())
        .and_then(|s| s.to_str())
        .unwrap_or("statement");
    format!("{}_{}_extracted.csv", stem, result.issuer.tag())
}

fn write_statement_csv(output_dir: &Path, result: &ExtractionResult) -> anyhow::Result<()> {
    let path = output_dir.join(csv_file_name(result));
    let file = fs::File::create(&path)?;
    super::write_rows(file, &result.data.to_rows())?;
    debug!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardstmt_core::Issuer;

    #[test]
    fn test_csv_file_name() {
        let result = ExtractionResult::succeeded(StatementRecord::new(Issuer::Sbi), Vec::new())
            .with_file("/tmp/in/jan_2024.pdf");
        assert_eq!(csv_file_name(&result), "jan_2024_sbi_extracted.csv");
    }

    #[test]
    fn test_collect_inputs_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.TXT", "notes.md"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }

        let files = collect_inputs(dir.path().to_str().unwrap()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.TXT", "b.pdf"]);
    }

    #[tokio::test]
    async fn test_no_timeout_runs_to_completion() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jan.txt");
        fs::write(&path, "HDFC Bank\nTotal Amount Due: 10.00\n").unwrap();

        let result = process_document(
            Arc::new(StatementExtractor::default()),
            path,
            Arc::new(Semaphore::new(1)),
            None,
        )
        .await;

        assert!(result.success, "{:?}", result.error);
        assert_eq!(result.issuer, Issuer::Hdfc);
    }

    #[tokio::test]
    async fn test_slow_job_times_out() {
        let result = run_blocking(
            "slow.pdf".to_string(),
            None,
            Some(Duration::from_millis(20)),
            || {
                std::thread::sleep(Duration::from_millis(500));
                ExtractionResult::succeeded(StatementRecord::new(Issuer::Hdfc), Vec::new())
            },
        )
        .await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("timed out after 20ms"));
        assert_eq!(result.file.as_deref(), Some("slow.pdf"));
    }

    #[tokio::test]
    async fn test_timed_out_job_keeps_its_slot() {
        let semaphore = Arc::new(Semaphore::new(1));
        let permit = Arc::clone(&semaphore).acquire_owned().await.unwrap();

        let result = run_blocking(
            "slow.pdf".to_string(),
            Some(permit),
            Some(Duration::from_millis(20)),
            || {
                std::thread::sleep(Duration::from_millis(300));
                ExtractionResult::succeeded(StatementRecord::new(Issuer::Hdfc), Vec::new())
            },
        )
        .await;

        assert!(!result.success);
        assert_eq!(semaphore.available_permits(), 0);

        let permit = tokio::time::timeout(Duration::from_secs(5), semaphore.acquire())
            .await
            .unwrap();
        assert!(permit.is_ok());
    }
}

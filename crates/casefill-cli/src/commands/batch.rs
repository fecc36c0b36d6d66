//! Batch command - backfill every record in a directory.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, ValueEnum};
use console::style;
use glob::{Pattern, glob};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, warn};

use casefill_core::{FieldSelection, RecordUpdater, UpdateOutcome};

use super::load_config;

const PROGRESS_LOG_INTERVAL: usize = 100;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Directory of JSON case records (default: paths.records_dir from config)
    records_dir: Option<PathBuf>,

    /// Root directory that record sourcePaths are relative to
    #[arg(short, long)]
    documents_root: Option<PathBuf>,

    /// Fields to backfill
    #[arg(long, value_enum, value_delimiter = ',', default_values_t = [Field::Title, Field::Date])]
    fields: Vec<Field>,

    /// Report what would change without writing records
    #[arg(long)]
    dry_run: bool,

    /// Write a per-record summary CSV
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Stop at the first record that cannot be processed
    #[arg(long)]
    fail_fast: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Field {
    /// caseTitle
    Title,
    /// trialDate
    Date,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    Updated,
    Skipped,
    Failed,
}

impl Status {
    fn as_str(self) -> &'static str {
        match self {
            Status::Updated => "updated",
            Status::Skipped => "skipped",
            Status::Failed => "failed",
        }
    }
}

/// Result of processing a single record.
struct RecordResult {
    path: PathBuf,
    status: Status,
    outcome: UpdateOutcome,
    error: Option<String>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(root) = &args.documents_root {
        config.paths.documents_root = root.clone();
    }
    let records_dir = args
        .records_dir
        .clone()
        .unwrap_or_else(|| config.paths.records_dir.clone());

    if !records_dir.is_dir() {
        anyhow::bail!("Records directory not found: {}", records_dir.display());
    }

    let files = find_records(&records_dir)?;
    if files.is_empty() {
        anyhow::bail!("No JSON records found in {}", records_dir.display());
    }

    println!(
        "{} Found {} records in {}",
        style("ℹ").blue(),
        files.len(),
        records_dir.display()
    );
    if args.dry_run {
        println!("{} Dry run, no records will be written", style("ℹ").blue());
    }

    let fields = FieldSelection {
        title: args.fields.contains(&Field::Title),
        date: args.fields.contains(&Field::Date),
    };
    let updater = RecordUpdater::new(config).with_fields(fields);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} records")?
            .progress_chars("=>-"),
    );

    let total = files.len();
    let mut results = Vec::with_capacity(total);

    for (i, path) in files.into_iter().enumerate() {
        let result = match updater.update_file(&path, args.dry_run) {
            Ok(outcome) => RecordResult {
                status: if outcome.is_updated() {
                    Status::Updated
                } else {
                    Status::Skipped
                },
                path,
                outcome,
                error: None,
            },
            Err(e) => {
                if args.fail_fast {
                    pb.abandon();
                    error!("Failed to process {}: {}", path.display(), e);
                    anyhow::bail!("Processing failed: {}", e);
                }
                warn!("Failed to process {}: {}", path.display(), e);
                RecordResult {
                    path,
                    status: Status::Failed,
                    outcome: UpdateOutcome::default(),
                    error: Some(e.to_string()),
                }
            }
        };
        results.push(result);

        pb.inc(1);
        if (i + 1) % PROGRESS_LOG_INTERVAL == 0 {
            info!("Processed {}/{} records", i + 1, total);
        }
    }

    pb.finish_and_clear();

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let count = |status: Status| results.iter().filter(|r| r.status == status).count();
    let failed: Vec<_> = results.iter().filter(|r| r.status == Status::Failed).collect();

    println!();
    println!(
        "{} Processed {} records in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} updated, {} skipped, {} failed",
        style(count(Status::Updated)).green(),
        style(count(Status::Skipped)).yellow(),
        style(count(Status::Failed)).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed records:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// `*.json` directly inside `dir`, sorted by name.
fn find_records(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let pattern = format!("{}/*.json", Pattern::escape(&dir.to_string_lossy()));
    let mut files: Vec<PathBuf> = glob(&pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}

fn write_summary(path: &Path, results: &[RecordResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "title",
        "title_strategy",
        "date",
        "date_strategy",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let title = result.outcome.title.as_ref();
        let date = result.outcome.date.as_ref();

        wtr.write_record([
            filename,
            result.status.as_str(),
            title.map(|t| t.value.as_str()).unwrap_or(""),
            title.map(|t| t.strategy.as_str()).unwrap_or(""),
            date.map(|d| d.value.as_str()).unwrap_or(""),
            date.map(|d| d.strategy.as_str()).unwrap_or(""),
            result.error.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

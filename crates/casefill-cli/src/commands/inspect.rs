//! Inspect command - run both cascades on one document.

use std::fmt::Display;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::debug;

use casefill_core::{CaseExtractor, Document, Extracted, FieldSelection};

use super::load_config;

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// HTML source document
    #[arg(required = true)]
    document: PathBuf,

    /// Record filename to use for the title fallback
    #[arg(long)]
    record_name: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// JSON output
    Json,
}

pub fn run(args: InspectArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.document.is_file() {
        anyhow::bail!("Document not found: {}", args.document.display());
    }

    let document = Document::read(&args.document)?;
    let extractor = CaseExtractor::new(config);
    debug!(
        "Rendered {} lines from {}",
        extractor.render(&document).len(),
        args.document.display()
    );

    let extraction = extractor.extract(
        Some(&document),
        args.record_name.as_deref(),
        FieldSelection::all(),
    );

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&extraction)?),
        OutputFormat::Text => {
            print_field("Title", extraction.title.as_ref());
            print_field("Date", extraction.date.as_ref());
        }
    }

    Ok(())
}

fn print_field<S: Display>(label: &str, found: Option<&Extracted<S>>) {
    match found {
        Some(found) => println!(
            "{}: {} {}",
            style(label).bold(),
            found.value,
            style(format!("({})", found.strategy)).dim()
        ),
        None => println!("{}: {}", style(label).bold(), style("not found").yellow()),
    }
}

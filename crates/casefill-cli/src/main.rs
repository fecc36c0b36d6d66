//! `casefill` fills in the `caseTitle` and `trialDate` of JSON case records
//! from the HTML judgment each record points at through
//! `metadata.sourcePath`.
//!
//! Typical use is a `casefill inspect` on one document to check what the
//! cascades pick, then `casefill batch --dry-run --summary out.csv` over the
//! records directory, then the same batch without `--dry-run`. Paths and
//! extraction limits live in the JSON file managed by `casefill config`.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, inspect};

/// Backfill missing case titles and judgment dates on law-report records
///
/// Only fields that are absent, null, empty, or the scanned-page
/// placeholder "pages.gif" are written. Existing values are left alone.
#[derive(Parser)]
#[command(name = "casefill")]
#[command(author, version, about)]
#[command(after_help = "Example:\n  casefill batch records/ --documents-root \"LAW FINDER\" --dry-run")]
struct Cli {
    /// Log to stderr: -v records written, -vv chosen strategies, -vvv every attempt
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file [default: <config dir>/casefill/config.json]
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Backfill every JSON record in a directory
    Batch(batch::BatchArgs),

    /// Print the title and date one HTML document would yield
    Inspect(inspect::InspectArgs),

    /// Show or edit the paths and extraction limits
    Config(config::ConfigArgs),
}

/// Record updates are logged at info, strategy choices at debug and each
/// rejected strategy at trace.
fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries results and summaries
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli.verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Batch(args) => batch::run(args, config_path),
        Commands::Inspect(args) => inspect::run(args, config_path),
        Commands::Config(args) => config::run(args, config_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(log_level(0), Level::WARN);
        assert_eq!(log_level(1), Level::INFO);
        assert_eq!(log_level(2), Level::DEBUG);
        assert_eq!(log_level(7), Level::TRACE);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["casefill", "inspect", "case.htm", "-vv", "-c", "alt.json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config.as_deref(), Some("alt.json"));
        assert!(matches!(cli.command, Commands::Inspect(_)));
    }
}

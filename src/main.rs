//! Reel-Tally main entry point
//!
//! Command-line interface: load configuration, run the tally, print the
//! JSON report to stdout. All diagnostics go to stderr so the report stays
//! pipeable.

use anyhow::Context;
use clap::Parser;
use reel_tally::config::{default_config, load_config};
use reel_tally::engine::run_tally;
use reel_tally::report::render_report;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Reel-Tally: count the img tags on the IMDB page of every movie in theaters
///
/// Walks the in-theaters catalog page by page, resolves each movie to an
/// IMDB id (directly or by title search), fetches its IMDB page, and prints
/// one JSON array of {url, count, imdb_id} records.
#[derive(Parser, Debug)]
#[command(name = "reel-tally")]
#[command(version = "1.0.0")]
#[command(about = "An image-tag census for movies in theaters", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Override the number of parallel workers
    #[arg(short = 't', long)]
    threads: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load configuration, or fall back to the built-in defaults
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => default_config().context("built-in defaults failed validation")?,
    };

    if let Some(threads) = cli.threads {
        config.pool.workers = threads;
    }

    tracing::info!(
        "Tallying with {} workers against {}",
        config.pool.workers,
        config.catalog.endpoint
    );

    // Run the tally; under persistent transient failures this can block
    // indefinitely, since every fetch retries forever.
    let summary = run_tally(&config).await?;

    // The report is the program's one stdout artifact.
    let report = render_report(&summary.records)?;
    println!("{}", report);

    // Skipped entries only surface as a stderr summary.
    if !summary.skipped.is_empty() {
        tracing::warn!("{} entries skipped:", summary.skipped.len());
        for title in &summary.skipped {
            tracing::warn!("  couldn't resolve {:?}", title);
        }
    }

    tracing::debug!(
        "Catalog total: {:?}, records: {}",
        summary.total_entries,
        summary.records.len()
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("reel_tally=info,warn"),
            1 => EnvFilter::new("reel_tally=debug,info"),
            2 => EnvFilter::new("reel_tally=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

//! rustpubmed - PubMed Paper Fetcher
//!
//! Fetches papers matching a search query from PubMed and flags authors
//! whose affiliation looks non-academic.
//!
//! ## Usage
//!
//! ```bash
//! rustpubmed "cancer immunotherapy" --file results.csv
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use rustpubmed::{esearch, esummary, output};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

/// PubMed Paper Fetcher - flags non-academic authors by affiliation
#[derive(Parser)]
#[command(name = "rustpubmed")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Search query for PubMed
    query: String,

    /// Filename to save the results as CSV (prints to stdout when omitted)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .init();

    let client = reqwest::Client::builder()
        .user_agent(concat!("rustpubmed/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let ids = esearch::fetch_ids(&client, &cli.query)
        .await
        .context("PubMed search failed")?;

    if ids.is_empty() {
        info!("No PubMed IDs found for the given query");
        return Ok(());
    }

    let papers = esummary::fetch_details(&client, &ids)
        .await
        .context("PubMed summary fetch failed")?;

    if papers.is_empty() {
        info!("No paper details could be fetched");
        return Ok(());
    }

    match cli.file {
        Some(path) => {
            output::save_csv(&path, &papers)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(count = papers.len(), path = %path.display(), "Saved results");
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            output::print_records(&mut handle, &papers).context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

//! # Ad Fontes Scrape
//!
//! Scrapes the [Ad Fontes Media](https://adfontesmedia.com/static-mbc/)
//! Media Bias Chart into a flat table of `source,reliability,bias`.
//!
//! ## Usage
//!
//! ```sh
//! adfontes_scrape -o ad_fontes_media_sources_ratings.csv
//! ```
//!
//! ## Architecture
//!
//! The application is a two-level crawl:
//! 1. **Indexing**: Collect every rated source from the rankings index page
//! 2. **Pacing**: Wait a random 1–10 seconds before each detail page, since
//!    the site blocks clients that crawl too fast
//! 3. **Extraction**: Pull reliability and bias scores from each source's page
//! 4. **Output**: Write the table once, at the end of the run
//!
//! With the default pacing a full run takes a while; run it in the
//! background. The chart is updated regularly, so once a month is plenty.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod error;
mod fetcher;
mod models;
mod outputs;
mod pacing;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use fetcher::HttpFetcher;
use pacing::Pacer;
use pipeline::RunContext;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("adfontes_scrape starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = args.into_config().inspect_err(|e| {
        error!(error = %e, "Rejected configuration");
    })?;
    info!(
        index_url = %config.index_url,
        min_wait = config.pacing.lower(),
        max_wait = config.pacing.upper(),
        output = %config.output.display(),
        format = ?config.format,
        "Configuration loaded"
    );

    let fetcher = HttpFetcher::new(&config.user_agent, config.timeout)?;
    let pacer = Pacer::from_os_rng(config.pacing);

    let summary = match RunContext::new(config, fetcher, pacer).run().await {
        Ok(summary) => summary,
        Err(e) => {
            error!(error = %e, "Run aborted");
            return Err(e.into());
        }
    };

    info!(
        discovered = summary.discovered,
        recorded = summary.recorded,
        skipped = summary.skipped,
        output = %summary.output_path.display(),
        elapsed_secs = summary.elapsed.as_secs(),
        "Scrape complete"
    );
    Ok(())
}

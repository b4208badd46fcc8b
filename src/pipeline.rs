//! The scrape run: index → paced detail visits → table output.
//!
//! A run moves through fixed stages on a single flow of control:
//!
//! 1. **Fetch index**: download and parse the index page. A fetch failure or
//!    an index without sources aborts the run; nothing is written.
//! 2. **For each source**: pace, fetch the detail page, extract the rating,
//!    then record a row or skip the source. Per-source failures are logged
//!    and never abort the run.
//! 3. **Write output**: serialize the table once, replacing any previous file.
//!
//! Requests are deliberately sequential: the random pause between them is
//! what keeps the site from blocking the crawler.

use crate::cli::ScrapeConfig;
use crate::error::ScrapeError;
use crate::fetcher::PageFetcher;
use crate::models::{OutputRow, ResultTable, RunSummary, SourceLink, SourceOutcome};
use crate::outputs::write_table;
use crate::pacing::{Pacer, UniformRandom};
use crate::scrapers::{IndexPage, parse_detail};
use crate::utils::truncate_for_log;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

/// Progress is logged after every this many sources.
const PROGRESS_EVERY: usize = 25;

/// Everything a run needs, threaded explicitly through each stage.
///
/// Built once at startup and consumed by [`RunContext::run`].
pub struct RunContext<F, R> {
    config: ScrapeConfig,
    fetcher: F,
    pacer: Pacer<R>,
}

impl<F, R> RunContext<F, R>
where
    F: PageFetcher,
    R: UniformRandom,
{
    /// Assemble a run.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated run configuration
    /// * `fetcher` - Where pages come from
    /// * `pacer` - Pause policy applied before every detail page
    pub fn new(config: ScrapeConfig, fetcher: F, pacer: Pacer<R>) -> Self {
        Self {
            config,
            fetcher,
            pacer,
        }
    }

    /// Execute the whole run.
    ///
    /// # Errors
    ///
    /// Fails if the index page cannot be fetched, lists no sources, or the
    /// output cannot be written. Detail-page failures only skip the source.
    #[instrument(level = "info", skip_all, fields(index_url = %self.config.index_url))]
    pub async fn run(mut self) -> Result<RunSummary, ScrapeError> {
        let t0 = Instant::now();

        let sources = self.discover_sources().await?;
        let discovered = sources.len();

        let (table, skipped) = self.collect_ratings(&sources).await;

        if let Err(e) = write_table(&table, &self.config.output, self.config.format).await {
            error!(error = %e, "Failed to write result table");
            return Err(e);
        }

        Ok(RunSummary {
            discovered,
            recorded: table.len(),
            skipped,
            output_path: self.config.output.clone(),
            elapsed: t0.elapsed(),
        })
    }

    /// Fetch the index page and list its rated sources.
    #[instrument(level = "info", skip_all)]
    async fn discover_sources(&self) -> Result<Vec<SourceLink>, ScrapeError> {
        let index_url = &self.config.index_url;
        info!(%index_url, "Extracting links for the rated sources");

        let html = self.fetcher.fetch(index_url).await.inspect_err(|e| {
            error!(error = %e, "Could not fetch the index page");
        })?;

        let sources: Vec<SourceLink> = IndexPage::parse(&html, index_url).sources().collect();
        if sources.is_empty() {
            error!(%index_url, "Index page lists no rated sources");
            return Err(ScrapeError::EmptyIndex {
                url: index_url.to_string(),
            });
        }

        info!(count = sources.len(), "Indexed rated sources");
        debug!(sources = ?sources.iter().map(|s| &s.name).collect::<Vec<_>>(), "Source names");
        Ok(sources)
    }

    /// Visit every source in order; returns the table and the number skipped.
    #[instrument(level = "info", skip_all, fields(count = sources.len()))]
    async fn collect_ratings(&mut self, sources: &[SourceLink]) -> (ResultTable, usize) {
        info!(
            count = sources.len(),
            "Extracting reliability and bias scores"
        );

        let mut table = ResultTable::new();
        let mut skipped = 0usize;

        for (i, link) in sources.iter().enumerate() {
            let delay = self.pacer.wait().await;
            debug!(source = %link.name, ?delay, "Working on source");

            match self.visit(link).await {
                SourceOutcome::Recorded(row) => {
                    debug!(
                        source = %row.source,
                        reliability = row.reliability,
                        bias = row.bias,
                        "Recorded rating"
                    );
                    table.push(row);
                }
                SourceOutcome::Skipped { source, reason } => {
                    warn!(%source, url = %link.detail_url, %reason, "Skipping source");
                    skipped += 1;
                }
            }

            let processed = i + 1;
            if processed % PROGRESS_EVERY == 0 {
                info!(
                    processed,
                    total = sources.len(),
                    recorded = table.len(),
                    skipped,
                    "Progress"
                );
            }
        }

        if table.is_empty() {
            warn!(
                skipped,
                "No detail page yielded a rating; the site markup may have changed"
            );
        }
        (table, skipped)
    }

    /// Fetch and parse one detail page.
    async fn visit(&self, link: &SourceLink) -> SourceOutcome {
        let result = match self.fetcher.fetch(&link.detail_url).await {
            Ok(html) => parse_detail(&html).map(|rating| OutputRow::new(link, rating)),
            Err(e) => Err(e),
        };

        match result {
            Ok(row) => SourceOutcome::Recorded(row),
            Err(e) => {
                debug_assert!(e.is_per_source());
                SourceOutcome::Skipped {
                    source: link.name.clone(),
                    reason: truncate_for_log(&e.to_string(), 300),
                }
            }
        }
    }
}

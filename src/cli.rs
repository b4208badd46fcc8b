//! Command-line interface.
//!
//! Every option has a default, so a bare `adfontes_scrape` scrapes the live
//! chart into `ad_fontes_media_sources_ratings.csv`. The main options can
//! also come from environment variables.

use crate::error::ScrapeError;
use crate::pacing::PacingBounds;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_INDEX_URL: &str =
    "https://adfontesmedia.com/rankings-by-individual-news-source/";
pub const DEFAULT_OUTPUT: &str = "ad_fontes_media_sources_ratings.csv";
pub const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Serialization of the result table.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `source,reliability,bias` with a header row
    #[default]
    Csv,
    /// Pretty-printed array of row objects
    Json,
}

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Scrape with defaults
/// adfontes_scrape
///
/// # Faster pacing, custom output location
/// adfontes_scrape --min-wait 0.5 --max-wait 3 -o data/ratings.csv
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Index page listing every rated source
    #[arg(short = 'u', long, env = "ADFONTES_INDEX_URL", default_value = DEFAULT_INDEX_URL)]
    pub index_url: String,

    /// Shortest pause before each detail page, in seconds
    #[arg(long, env = "ADFONTES_MIN_WAIT", default_value_t = PacingBounds::DEFAULT_LOWER_SECS)]
    pub min_wait: f64,

    /// Longest pause before each detail page, in seconds
    #[arg(long, env = "ADFONTES_MAX_WAIT", default_value_t = PacingBounds::DEFAULT_UPPER_SECS)]
    pub max_wait: f64,

    /// Where to write the result table
    #[arg(short, long, env = "ADFONTES_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[arg(long, env = "ADFONTES_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

/// Validated run configuration.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub index_url: Url,
    pub pacing: PacingBounds,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Cli {
    /// Check the raw arguments and turn them into a [`ScrapeConfig`].
    pub fn into_config(self) -> Result<ScrapeConfig, ScrapeError> {
        let index_url = Url::parse(&self.index_url).map_err(|e| {
            ScrapeError::InvalidConfig(format!("index URL `{}`: {e}", self.index_url))
        })?;
        if !matches!(index_url.scheme(), "http" | "https") {
            return Err(ScrapeError::InvalidConfig(format!(
                "index URL must be http(s), got `{index_url}`"
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ScrapeError::InvalidConfig(
                "timeout must be at least one second".to_string(),
            ));
        }

        Ok(ScrapeConfig {
            index_url,
            pacing: PacingBounds::new(self.min_wait, self.max_wait)?,
            output: self.output,
            format: self.format,
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent,
        })
    }
}

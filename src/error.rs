//! Error taxonomy for a scrape run.
//!
//! Detail-page failures ([`ScrapeError::Fetch`] and [`ScrapeError::Extraction`])
//! are recoverable: the pipeline skips the affected source and moves on.
//! Everything else aborts the run before the output table is written.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Network or HTTP failure while fetching a page.
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// An expected rating field is absent or is not a number.
    #[error("could not extract `{field}`: {reason}")]
    Extraction { field: &'static str, reason: String },

    /// The index page listed no rated sources.
    #[error("index page {url} yielded no rated sources (has the site markup changed?)")]
    EmptyIndex { url: String },

    /// Rejected command-line or environment configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Writing the result table failed.
    #[error("failed to write output {path}: {reason}")]
    Output { path: String, reason: String },
}

impl ScrapeError {
    /// Returns true if the error only concerns a single source's detail page.
    pub fn is_per_source(&self) -> bool {
        matches!(
            self,
            ScrapeError::Fetch { .. } | ScrapeError::Extraction { .. }
        )
    }

    pub(crate) fn fetch(url: impl Into<String>, reason: impl ToString) -> Self {
        ScrapeError::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn extraction(field: &'static str, reason: impl Into<String>) -> Self {
        ScrapeError::Extraction {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn output(path: impl Into<String>, reason: impl ToString) -> Self {
        ScrapeError::Output {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

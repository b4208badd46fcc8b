//! Page fetching over plain HTTP(S) GET.
//!
//! [`PageFetcher`] is the seam between the pipeline and the network; the
//! pipeline only ever sees page bodies or a [`ScrapeError::Fetch`].

use crate::error::ScrapeError;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};
use url::Url;

/// Fetch the raw HTML body of a page.
pub trait PageFetcher {
    /// Issue one request for `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Fetch`] when the URL is not HTTP(S), the
    /// network is unreachable, the request times out, or the server answers
    /// with a non-success status.
    async fn fetch(&self, url: &Url) -> Result<String, ScrapeError>;
}

/// [`PageFetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build the shared client.
    ///
    /// # Arguments
    ///
    /// * `user_agent` - `User-Agent` header sent with every request
    /// * `timeout` - Limit on each request, connect through body
    ///
    /// # Returns
    ///
    /// The fetcher, or [`ScrapeError::InvalidConfig`] if the client cannot
    /// be built (e.g. a user agent that is not a valid header value).
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| ScrapeError::InvalidConfig(format!("HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch(&self, url: &Url) -> Result<String, ScrapeError> {
        ensure_http(url)?;

        let t0 = Instant::now();
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ScrapeError::fetch(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Server answered with a non-success status");
            return Err(ScrapeError::fetch(url.as_str(), format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ScrapeError::fetch(url.as_str(), e))?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}

/// Reject anything that is not an absolute HTTP(S) URL.
pub fn ensure_http(url: &Url) -> Result<(), ScrapeError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ScrapeError::fetch(
            url.as_str(),
            format!("unsupported scheme `{other}`"),
        )),
    }
}

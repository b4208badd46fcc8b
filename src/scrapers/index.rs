//! Index page parsing: discover every rated source and its detail page.
//!
//! The rankings index renders one source per `h3` heading, each wrapping an
//! anchor to that source's "… Bias and Reliability" page:
//!
//! ```html
//! <h3><a href="https://adfontesmedia.com/cnn-bias-and-reliability/">CNN Bias and Reliability</a></h3>
//! ```
//!
//! The site also puts headings around links to unrelated pages and other
//! hosts, so only anchors that resolve to the index page's own host count.

use crate::models::SourceLink;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};
use url::Url;

static HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h3").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Suffix the site appends to every link title.
const TITLE_SUFFIX: &str = " Bias and Reliability";

/// A parsed index page.
pub struct IndexPage {
    document: Html,
    base_url: Url,
}

impl IndexPage {
    /// Parse `html`, resolving relative links against `base_url`.
    #[instrument(level = "debug", skip_all, fields(bytes = html.len(), %base_url))]
    pub fn parse(html: &str, base_url: &Url) -> Self {
        Self {
            document: Html::parse_document(html),
            base_url: base_url.clone(),
        }
    }

    /// Rated sources in document order.
    ///
    /// Yields nothing (rather than failing) when the markup holds no
    /// matching links.
    pub fn sources(&self) -> impl Iterator<Item = SourceLink> + '_ {
        self.document
            .select(&HEADING)
            .filter_map(move |heading| self.source_in(heading))
    }

    fn source_in(&self, heading: ElementRef<'_>) -> Option<SourceLink> {
        let anchor = heading.select(&LINK).next()?;
        let href = anchor.value().attr("href")?;

        let detail_url = match self.base_url.join(href) {
            Ok(url) => url,
            Err(e) => {
                debug!(%href, error = %e, "Skipping unresolvable link");
                return None;
            }
        };
        if detail_url.host_str() != self.base_url.host_str() {
            debug!(%detail_url, "Skipping off-site link");
            return None;
        }

        let name = clean_source_name(&anchor.text().collect::<String>());
        if name.is_empty() {
            debug!(%detail_url, "Skipping link without a name");
            return None;
        }

        Some(SourceLink { name, detail_url })
    }
}

/// Turn an index link title into the plain source name.
///
/// ```ignore
/// assert_eq!(clean_source_name("\n\tCNN Bias and Reliability\n"), "CNN");
/// ```
pub fn clean_source_name(title: &str) -> String {
    title
        .replace(['\t', '\n', '\r'], "")
        .replace(TITLE_SUFFIX, "")
        .trim()
        .to_string()
}

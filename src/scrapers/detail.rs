//! Detail page parsing: pull the reliability and bias scores.
//!
//! Each source page renders its scores as bold labels inside paragraphs:
//!
//! ```html
//! <p><strong>Reliability: 42.5</strong></p>
//! <p><strong>Bias: -3.2</strong></p>
//! ```
//!
//! Some pages keep only the label in bold (`<strong>Bias:</strong> -3.2`),
//! so the text following the bold label is used when it carries no value.

use crate::error::ScrapeError;
use crate::models::Rating;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static STRONG: Lazy<Selector> = Lazy::new(|| Selector::parse("strong").unwrap());

/// Leading signed decimal; anything after it (e.g. "(Skews Left)") is ignored.
static SCORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([+\-\x{2212}]?)\s*(\d+(?:\.\d*)?|\.\d+)").unwrap());

const RELIABILITY: &str = "reliability";
const BIAS: &str = "bias";

/// Extract the [`Rating`] from a detail page.
///
/// # Errors
///
/// Returns [`ScrapeError::Extraction`] naming the first field that is
/// missing from the page or whose value is not a number.
#[instrument(level = "debug", skip_all, fields(bytes = html.len()))]
pub fn parse_detail(html: &str) -> Result<Rating, ScrapeError> {
    let document = Html::parse_document(html);

    let mut reliability = None;
    let mut bias = None;

    for paragraph in document.select(&PARAGRAPH) {
        let Some((label, value)) = labeled_field(paragraph) else {
            continue;
        };
        let slot = match label.as_str() {
            RELIABILITY => &mut reliability,
            BIAS => &mut bias,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    debug!(?reliability, ?bias, "Raw rating fields");
    Ok(Rating {
        reliability: parse_score(RELIABILITY, reliability.as_deref())?,
        bias: parse_score(BIAS, bias.as_deref())?,
    })
}

/// Split a paragraph's bold `Label: value` into a lowercase label and raw value.
fn labeled_field(paragraph: ElementRef<'_>) -> Option<(String, String)> {
    let strong = paragraph.select(&STRONG).next()?;
    let bold = strong.text().collect::<String>();
    let (label, value) = bold.split_once(':')?;

    let value = if value.trim().is_empty() {
        text_after(strong)
    } else {
        value.to_string()
    };

    Some((label.trim().to_lowercase(), value.trim().to_string()))
}

/// Text of every node that follows `element` within its parent.
fn text_after(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    for node in element.next_siblings() {
        if let Some(t) = node.value().as_text() {
            text.push_str(t);
        } else if let Some(child) = ElementRef::wrap(node) {
            text.extend(child.text());
        }
    }
    text
}

/// Parse a score, tolerating whitespace, an explicit sign and trailing text.
pub fn parse_score(field: &'static str, raw: Option<&str>) -> Result<f64, ScrapeError> {
    let raw = raw.ok_or_else(|| ScrapeError::extraction(field, "field not found on page"))?;
    let caps = SCORE
        .captures(raw.trim())
        .ok_or_else(|| ScrapeError::extraction(field, format!("`{raw}` is not a number")))?;

    let magnitude: f64 = caps[2]
        .parse()
        .map_err(|e| ScrapeError::extraction(field, format!("`{raw}`: {e}")))?;
    match &caps[1] {
        "-" | "\u{2212}" => Ok(-magnitude),
        _ => Ok(magnitude),
    }
}

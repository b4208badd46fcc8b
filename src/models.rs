//! Data models for a single scrape run.
//!
//! All of these are transient: they are created and consumed within one run,
//! and only the [`ResultTable`] outlives the pipeline (as the output file).

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// A rated source discovered on the index page.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceLink {
    /// The plain source name as shown on the index page.
    pub name: String,
    /// Absolute URL of the source's detail page.
    pub detail_url: Url,
}

/// Scores extracted from one detail page.
///
/// Values are taken verbatim from the site: reliability is a non-negative
/// score, bias is signed (negative leans left, positive leans right).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating {
    pub reliability: f64,
    pub bias: f64,
}

/// One line of the output table.
///
/// Field order defines the column order (`source,reliability,bias`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRow {
    pub source: String,
    pub reliability: f64,
    pub bias: f64,
}

impl OutputRow {
    pub fn new(link: &SourceLink, rating: Rating) -> Self {
        Self {
            source: link.name.clone(),
            reliability: rating.reliability,
            bias: rating.bias,
        }
    }
}

/// Rows in the order their sources were discovered on the index page.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultTable(Vec<OutputRow>);

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: OutputRow) {
        self.0.push(row);
    }

    pub fn rows(&self) -> &[OutputRow] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<OutputRow>> for ResultTable {
    fn from(rows: Vec<OutputRow>) -> Self {
        Self(rows)
    }
}

/// What happened to one source during the detail loop.
#[derive(Debug)]
pub enum SourceOutcome {
    Recorded(OutputRow),
    Skipped { source: String, reason: String },
}

/// Counts reported at the end of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub discovered: usize,
    pub recorded: usize,
    pub skipped: usize,
    pub output_path: PathBuf,
    pub elapsed: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_row_takes_name_from_link() {
        let link = SourceLink {
            name: "Foo News".to_string(),
            detail_url: Url::parse("https://adfontesmedia.com/foo-news-bias-and-reliability/")
                .unwrap(),
        };
        let row = OutputRow::new(
            &link,
            Rating {
                reliability: 35.1,
                bias: -1.0,
            },
        );
        assert_eq!(row.source, "Foo News");
        assert_eq!(row.reliability, 35.1);
        assert_eq!(row.bias, -1.0);
    }

    #[test]
    fn test_result_table_keeps_insertion_order() {
        let mut table = ResultTable::new();
        assert!(table.is_empty());
        for (i, name) in ["A", "B", "C"].iter().enumerate() {
            table.push(OutputRow {
                source: name.to_string(),
                reliability: i as f64,
                bias: 0.0,
            });
        }
        let names: Vec<_> = table.rows().iter().map(|r| r.source.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(table.len(), 3);
    }
}

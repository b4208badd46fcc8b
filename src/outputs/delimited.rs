//! Comma-separated rendering of the result table.
//!
//! One header row (`source,reliability,bias`) followed by one line per
//! recorded source. Scores are plain decimals (`35.1`, `-1.0`); a source
//! name is quoted only when it contains the delimiter, a quote or a newline.

use crate::models::ResultTable;
use csv::{QuoteStyle, Terminator, WriterBuilder};

const HEADER: [&str; 3] = ["source", "reliability", "bias"];

/// Render the table as comma-separated text.
///
/// # Arguments
///
/// * `table` - Rows to render, in order
///
/// # Returns
///
/// The UTF-8 bytes of the file, header first, each line ending in `\n`.
pub fn render(table: &ResultTable) -> Result<Vec<u8>, csv::Error> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    // Written by hand so an empty table still gets its header.
    writer.write_record(HEADER)?;
    for row in table.rows() {
        writer.serialize(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OutputRow;

    fn row(source: &str, reliability: f64, bias: f64) -> OutputRow {
        OutputRow {
            source: source.to_string(),
            reliability,
            bias,
        }
    }

    fn render_string(rows: Vec<OutputRow>) -> String {
        String::from_utf8(render(&ResultTable::from(rows)).unwrap()).unwrap()
    }

    #[test]
    fn test_second_line_is_plain_row() {
        let text = render_string(vec![row("Foo News", 35.1, -1.0)]);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("source,reliability,bias"));
        assert_eq!(lines.next(), Some("Foo News,35.1,-1.0"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_name_with_delimiter_is_quoted() {
        let text = render_string(vec![row("Gamma, Inc.", 40.0, 0.0)]);
        assert_eq!(text.lines().nth(1), Some("\"Gamma, Inc.\",40.0,0.0"));
    }

    #[test]
    fn test_empty_table_has_header_only() {
        assert_eq!(render_string(vec![]), "source,reliability,bias\n");
    }

    #[test]
    fn test_rows_keep_order() {
        let text = render_string(vec![row("A", 1.5, 2.0), row("C", 3.0, -4.25)]);
        let lines: Vec<_> = text.lines().skip(1).collect();
        assert_eq!(lines, vec!["A,1.5,2.0", "C,3.0,-4.25"]);
    }
}

//! JSON rendering of the result table.
//!
//! ```text
//! [
//!   {
//!     "source": "Foo News",
//!     "reliability": 35.1,
//!     "bias": -1.0
//!   }
//! ]
//! ```

use crate::models::ResultTable;

/// Render the table as a pretty-printed JSON array.
///
/// # Arguments
///
/// * `table` - Rows to render, in order
///
/// # Returns
///
/// The UTF-8 bytes of the document with a trailing newline.
pub fn render(table: &ResultTable) -> Result<Vec<u8>, serde_json::Error> {
    let mut bytes = serde_json::to_vec_pretty(table)?;
    bytes.push(b'\n');
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OutputRow;

    #[test]
    fn test_render_keeps_row_order_and_field_names() {
        let table = ResultTable::from(vec![
            OutputRow {
                source: "A".into(),
                reliability: 40.0,
                bias: 2.5,
            },
            OutputRow {
                source: "C".into(),
                reliability: 31.2,
                bias: -8.0,
            },
        ]);
        let text = String::from_utf8(render(&table).unwrap()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["source"], "A");
        assert_eq!(value[1]["source"], "C");
        assert_eq!(value[1]["reliability"], 31.2);
        assert!(text.ends_with("]\n"));
    }

    #[test]
    fn test_render_empty_table() {
        assert_eq!(render(&ResultTable::new()).unwrap(), b"[]\n");
    }
}

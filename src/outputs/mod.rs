//! Serialization of the final result table.
//!
//! The table is written exactly once, after every source has been visited.
//! A run that aborts earlier leaves any previous output untouched.
//!
//! # Submodules
//!
//! - [`delimited`]: comma-separated table with a `source,reliability,bias` header
//! - [`json`]: pretty-printed JSON array of the same rows

pub mod delimited;
pub mod json;

use crate::cli::OutputFormat;
use crate::error::ScrapeError;
use crate::models::ResultTable;
use crate::utils::ensure_parent_dir;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Render `table` in `format` and write it to `path`, replacing any existing file.
///
/// Missing parent directories are created first.
///
/// # Arguments
///
/// * `table` - Rows in discovery order
/// * `path` - Destination file
/// * `format` - CSV or JSON
///
/// # Returns
///
/// `Ok(())` once the file is written, or [`ScrapeError::Output`] if
/// rendering, directory creation or the write fails.
#[instrument(level = "info", skip_all, fields(rows = table.len(), path = %path.display(), ?format))]
pub async fn write_table(
    table: &ResultTable,
    path: &Path,
    format: OutputFormat,
) -> Result<(), ScrapeError> {
    let rendered = match format {
        OutputFormat::Csv => delimited::render(table).map_err(|e| e.to_string()),
        OutputFormat::Json => json::render(table).map_err(|e| e.to_string()),
    };
    let bytes = rendered.map_err(|e| ScrapeError::output(path.display().to_string(), e))?;

    ensure_parent_dir(path).await?;
    fs::write(path, bytes)
        .await
        .map_err(|e| ScrapeError::output(path.display().to_string(), e))?;
    info!(?format, "Wrote result table");
    Ok(())
}

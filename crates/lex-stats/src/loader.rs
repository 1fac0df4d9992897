//! CSV loading into a [`Dataset`].
//!
//! Polars is used purely as a CSV decoder: every column is read as text,
//! then headers and values are trimmed and nulls become empty strings.
//! Bytes that are not valid UTF-8 are replaced with U+FFFD instead of
//! failing the load. No statistics are computed here.

use crate::dataset::Dataset;
use crate::error::{Result, ResultExt, StatsError};
use once_cell::sync::Lazy;
use polars::io::csv::read::{CsvEncoding, CsvReadOptions};
use polars::prelude::*;
use regex::Regex;
use std::io::Cursor;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Number of header names echoed in the load log line.
const SAMPLE_COLUMNS: usize = 5;

// Polars renames repeated headers to `<name>_duplicated_<n>`.
static DUPLICATED_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.*)_duplicated_\d+$").expect("Invalid regex: duplicated header")
});

/// Load a CSV file.
///
/// Falls back to a pre-cleaned copy of the content when the file cannot
/// be parsed as-is (stray doubled quotes, blank lines).
pub fn load_csv(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let start = Instant::now();

    let df = match read_path(path) {
        Ok(df) => df,
        Err(e) => {
            debug!("Standard loading failed: {}", e);
            let bytes = std::fs::read(path)
                .map_err(StatsError::from)
                .context(path.display().to_string())?;
            let content = String::from_utf8_lossy(&bytes);
            warn!("Retrying {} with cleaned content", path.display());
            read_content(&clean_csv_content(&content))
                .context(format!("Failed to parse {}", path.display()))?
        }
    };

    let dataset = dataframe_to_dataset(&df)?;
    log_loaded(&dataset, start);
    Ok(dataset)
}

/// Load CSV from an in-memory string.
pub fn load_csv_from_str(content: &str) -> Result<Dataset> {
    let start = Instant::now();

    let df = match read_content(content) {
        Ok(df) => df,
        Err(e) => {
            debug!("Standard parsing failed: {}", e);
            read_content(&clean_csv_content(content)).context("Failed to parse CSV content")?
        }
    };

    let dataset = dataframe_to_dataset(&df)?;
    log_loaded(&dataset, start);
    Ok(dataset)
}

fn string_schema_options() -> CsvReadOptions {
    CsvReadOptions::default()
        .with_has_header(true)
        // 0 rows of inference reads every column as String
        .with_infer_schema_length(Some(0))
        .with_parse_options(
            CsvParseOptions::default()
                .with_quote_char(Some(b'"'))
                .with_encoding(CsvEncoding::LossyUtf8),
        )
}

fn read_path(path: &Path) -> PolarsResult<DataFrame> {
    string_schema_options()
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
}

fn read_content(content: &str) -> PolarsResult<DataFrame> {
    let cursor = Cursor::new(content.to_string());
    string_schema_options()
        .into_reader_with_file_handle(cursor)
        .finish()
}

/// Convert a string-typed frame into trimmed, row-major records.
///
/// Repeated headers are restored to their names in the file, so that
/// [`Dataset::new`] rejects them.
fn dataframe_to_dataset(df: &DataFrame) -> Result<Dataset> {
    let names: Vec<&str> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.as_str())
        .collect();
    let headers: Vec<String> = names
        .iter()
        .map(|name| restore_header_name(name, &names).trim().to_string())
        .collect();

    let mut rows: Vec<Vec<String>> = (0..df.height())
        .map(|_| Vec::with_capacity(headers.len()))
        .collect();

    for column in df.get_columns() {
        let series = column
            .as_materialized_series()
            .cast(&DataType::String)
            .context(format!("Failed to read column '{}' as text", column.name()))?;
        let values = series.str()?;
        for (row, value) in rows.iter_mut().zip(values.into_iter()) {
            row.push(value.map(str::trim).unwrap_or_default().to_string());
        }
    }

    Dataset::new(headers, rows)
}

/// Undo polars' renaming of a repeated header.
///
/// Only applies when the base name is itself a header of the file.
fn restore_header_name<'a>(name: &'a str, names: &[&str]) -> &'a str {
    match DUPLICATED_HEADER.captures(name).and_then(|c| c.get(1)) {
        Some(base) if names.contains(&base.as_str()) => base.as_str(),
        _ => name,
    }
}

fn log_loaded(dataset: &Dataset, start: Instant) {
    info!(
        "Loaded {} rows, {} columns in {:.2}s",
        dataset.row_count(),
        dataset.column_count(),
        start.elapsed().as_secs_f64()
    );
    let sample: Vec<&String> = dataset.headers().iter().take(SAMPLE_COLUMNS).collect();
    debug!("Sample columns: {:?}", sample);
}

/// Remove doubled quotes and blank lines.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

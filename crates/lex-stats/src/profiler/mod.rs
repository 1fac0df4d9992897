//! Data profiling module for dataset analysis.
//!
//! This module provides:
//! - Numeric-vs-text classification of raw values
//! - Numeric summaries (mean, min, max, sample std)
//! - Categorical summaries (cardinality, top-K frequencies)
//! - Column and dataset profilers built on the above

pub mod classifier;
pub mod statistics;

use crate::config::DEFAULT_TOP_K;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::types::{ColumnStats, ColumnSummary, DatasetReport};
use tracing::{debug, info};

pub use classifier::{is_numeric, parse_numeric, to_numeric};
pub use statistics::{
    FrequencyTable, mean, sample_std, summarize_categorical, summarize_numeric,
};

/// Profiles a single column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnProfiler {
    top_k: usize,
}

impl Default for ColumnProfiler {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

impl ColumnProfiler {
    /// Profiler reporting the `top_k` most frequent values of text columns.
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    /// Profile one column of the dataset.
    ///
    /// A column is numeric when at least one non-empty value parses as a
    /// number; the numeric stats then cover only the values that parse,
    /// while `non_null` still counts every non-empty value. Otherwise it is
    /// categorical over all non-empty values.
    ///
    /// Fails with [`crate::StatsError::MissingColumn`] when `column` is not a
    /// header.
    pub fn profile(&self, dataset: &Dataset, column: &str) -> Result<ColumnStats> {
        let values = dataset.column_values(column)?;
        let total = values.len();
        let non_null: Vec<&str> = values.into_iter().filter(|v| !v.is_empty()).collect();

        let numbers = to_numeric(&non_null);
        let summary = match summarize_numeric(&numbers) {
            Some(stats) => ColumnSummary::Numeric(stats),
            None => ColumnSummary::Categorical(summarize_categorical(
                non_null.iter().copied(),
                self.top_k,
            )),
        };

        debug!(
            column,
            kind = summary.kind().as_str(),
            non_null = non_null.len(),
            numeric = numbers.len(),
            "Profiled column"
        );

        Ok(ColumnStats {
            name: column.to_string(),
            total,
            non_null: non_null.len(),
            null: total - non_null.len(),
            summary,
        })
    }
}

/// Profiles every column of a dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetProfiler {
    column_profiler: ColumnProfiler,
}

impl DatasetProfiler {
    pub fn new(top_k: usize) -> Self {
        Self {
            column_profiler: ColumnProfiler::new(top_k),
        }
    }

    /// Profile all headers in header order.
    pub fn profile(&self, dataset: &Dataset) -> Result<DatasetReport> {
        self.profile_columns(dataset, dataset.headers())
    }

    /// Profile an explicit list of columns, in the given order.
    ///
    /// All-or-nothing: any name absent from the dataset fails the whole
    /// call and no report is produced.
    pub fn profile_columns<S: AsRef<str>>(
        &self,
        dataset: &Dataset,
        columns: &[S],
    ) -> Result<DatasetReport> {
        dataset.column_indices(columns)?;

        let columns = columns
            .iter()
            .map(|c| self.column_profiler.profile(dataset, c.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let report = DatasetReport {
            row_count: dataset.row_count(),
            column_count: dataset.column_count(),
            columns,
        };

        info!(
            "Profiled {} columns over {} rows ({} numeric, {} categorical)",
            report.columns.len(),
            report.row_count,
            report.numeric_columns().count(),
            report.categorical_columns().count()
        );

        Ok(report)
    }
}

//! Descriptive Statistics Library
//!
//! Column profiling and group-by summaries for delimited tabular data,
//! computed by hand over string records.
//!
//! # Overview
//!
//! - **Type Inference**: a column is numeric when any non-empty value parses
//!   as a finite number, categorical otherwise
//! - **Numeric Summaries**: count, mean, min, max and sample standard deviation
//! - **Categorical Summaries**: cardinality and top-K values, ties broken by
//!   first appearance
//! - **Grouping**: partition by one or more columns and report per-group
//!   mean/count of measure columns
//! - **Reporting**: plain text and JSON output
//!
//! Polars is only used to decode CSV files ([`loader`]); every statistic is
//! computed in [`profiler`] and [`grouping`].
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_stats::{AnalysisConfig, ReportGenerator, load_csv, run_analysis};
//!
//! let dataset = load_csv("data/posts.csv")?;
//!
//! let config = AnalysisConfig::builder()
//!     .group_by(["Facebook_Id"])
//!     .group_by(["Facebook_Id", "Page Category"])
//!     .build()?;
//!
//! let report = run_analysis(&dataset, &config)?;
//! println!("{}", ReportGenerator::render_text(&report, config.preview_limit));
//! ```
//!
//! # Error Policy
//!
//! Profiling a column that is not in the header is a hard error
//! ([`StatsError::MissingColumn`]). Grouping by a missing column returns a
//! [`MissingColumnError`] instead, which [`run_analysis`] records and moves
//! past:
//!
//! ```rust,ignore
//! use lex_stats::{DatasetProfiler, GroupEngine};
//!
//! // Fails the whole call
//! let err = DatasetProfiler::default().profile_columns(&dataset, &["Views"]);
//!
//! // Reports the missing names, nothing is partitioned
//! if let Err(missing) = GroupEngine::group(&dataset, &["Region"], &["Likes"]) {
//!     eprintln!("Missing columns: {:?}", missing.columns);
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod grouping;
pub mod loader;
pub mod profiler;
pub mod reporting;
pub mod types;

// Re-exports for convenient access
pub use analysis::run_analysis;
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError};
pub use dataset::{Dataset, Record};
pub use error::{MissingColumnError, Result as StatsResult, ResultExt, StatsError};
pub use grouping::{GroupEngine, Partition};
pub use loader::{load_csv, load_csv_from_str};
pub use profiler::{ColumnProfiler, DatasetProfiler};
pub use reporting::{ReportGenerator, TextReport};
pub use types::{
    AnalysisReport, CategoricalStats, ColumnKind, ColumnStats, ColumnSummary, DatasetReport,
    GroupKey, GroupSummary, GroupingOutcome, GroupingReport, MeasureStats, NumericStats,
    ValueCount,
};

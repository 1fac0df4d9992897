//! Configuration types for a statistics run.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic setup. The engine itself never reads these
//! defaults; they are handed to it by [`crate::analysis::run_analysis`].

use serde::{Deserialize, Serialize};

/// Default number of frequent values reported for categorical columns.
pub const DEFAULT_TOP_K: usize = 5;

/// Default number of groups shown in text reports.
pub const DEFAULT_PREVIEW_LIMIT: usize = 3;

/// Engagement metrics summarized per group unless configured otherwise.
pub const DEFAULT_MEASURE_COLUMNS: [&str; 3] = ["Likes", "Comments", "Shares"];

/// Configuration for a statistics run.
///
/// Use [`AnalysisConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use lex_stats::config::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .group_by(["Facebook_Id"])
///     .group_by(["Facebook_Id", "Page Category"])
///     .top_k(10)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Groupings to compute. Each entry is one ordered list of grouping
    /// columns and produces an independent group-by report.
    /// Default: none
    pub groupings: Vec<Vec<String>>,

    /// Columns whose mean and count are reported for every group.
    /// Columns missing from the header are skipped.
    /// Default: Likes, Comments, Shares
    pub measure_columns: Vec<String>,

    /// Number of most frequent values kept for categorical columns.
    /// Default: 5
    pub top_k: usize,

    /// Number of groups printed per grouping in text reports.
    /// Has no effect on what the engine computes.
    /// Default: 3
    pub preview_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            groupings: Vec::new(),
            measure_columns: default_measure_columns(),
            top_k: DEFAULT_TOP_K,
            preview_limit: DEFAULT_PREVIEW_LIMIT,
        }
    }
}

fn default_measure_columns() -> Vec<String> {
    DEFAULT_MEASURE_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .collect()
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let config: AnalysisConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.top_k == 0 {
            return Err(ConfigValidationError::InvalidTopK(self.top_k));
        }

        for (index, grouping) in self.groupings.iter().enumerate() {
            if grouping.is_empty() {
                return Err(ConfigValidationError::EmptyGrouping(index));
            }
            if grouping.iter().any(|c| c.trim().is_empty()) {
                return Err(ConfigValidationError::BlankColumnName {
                    field: "groupings".to_string(),
                });
            }
        }

        if self.measure_columns.iter().any(|c| c.trim().is_empty()) {
            return Err(ConfigValidationError::BlankColumnName {
                field: "measure_columns".to_string(),
            });
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid top_k: {0} (must be at least 1)")]
    InvalidTopK(usize),

    #[error("Grouping #{0} has no columns")]
    EmptyGrouping(usize),

    #[error("Blank column name in '{field}'")]
    BlankColumnName { field: String },
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    groupings: Vec<Vec<String>>,
    measure_columns: Option<Vec<String>>,
    top_k: Option<usize>,
    preview_limit: Option<usize>,
}

impl AnalysisConfigBuilder {
    /// Add a grouping. Columns are used in the given order to build keys.
    pub fn group_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groupings
            .push(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Replace all groupings.
    pub fn groupings(mut self, groupings: Vec<Vec<String>>) -> Self {
        self.groupings = groupings;
        self
    }

    /// Set the measure columns summarized per group.
    pub fn measure_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.measure_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set how many frequent values categorical columns report.
    pub fn top_k(mut self, k: usize) -> Self {
        self.top_k = Some(k);
        self
    }

    /// Set how many groups text reports show per grouping.
    pub fn preview_limit(mut self, limit: usize) -> Self {
        self.preview_limit = Some(limit);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let config = AnalysisConfig {
            groupings: self.groupings,
            measure_columns: self
                .measure_columns
                .unwrap_or_else(default_measure_columns),
            top_k: self.top_k.unwrap_or(DEFAULT_TOP_K),
            preview_limit: self.preview_limit.unwrap_or(DEFAULT_PREVIEW_LIMIT),
        };

        config.validate()?;
        Ok(config)
    }
}

//! Custom error types for the statistics engine.
//!
//! This module provides the error hierarchy using `thiserror`. Profiling
//! treats an unknown column as fatal, while grouping hands the caller a bare
//! [`MissingColumnError`] so the run can continue with the next grouping.
//!
//! Errors are serializable so they can be embedded in JSON output.

use crate::config::ConfigValidationError;
use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// One or more referenced columns are absent from the header list.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("Missing columns: {columns:?}")]
pub struct MissingColumnError {
    /// Names that were requested but not found, in request order.
    pub columns: Vec<String>,
}

impl MissingColumnError {
    /// Error for a single missing column.
    pub fn single(column: impl Into<String>) -> Self {
        Self {
            columns: vec![column.into()],
        }
    }
}

/// The main error type for the statistics engine.
#[derive(Error, Debug)]
pub enum StatsError {
    /// A referenced column does not exist in the dataset.
    #[error(transparent)]
    MissingColumn(#[from] MissingColumnError),

    /// The dataset is malformed (duplicate headers, ragged rows).
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigValidationError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper (CSV decoding only).
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<StatsError>,
    },
}

impl StatsError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        StatsError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code, independent of the message text.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingColumn(_) => "MISSING_COLUMN",
            Self::InvalidDataset(_) => "INVALID_DATASET",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// The missing column names, if this error (or its source) is a
    /// missing-column failure.
    pub fn missing_columns(&self) -> Option<&[String]> {
        match self {
            Self::MissingColumn(e) => Some(&e.columns),
            Self::WithContext { source, .. } => source.missing_columns(),
            _ => None,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for StatsError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("StatsError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for statistics operations.
pub type Result<T> = std::result::Result<T, StatsError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| StatsError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        let error = StatsError::from(MissingColumnError::single("Likes"));
        assert_eq!(error.error_code(), "MISSING_COLUMN");
        assert_eq!(
            StatsError::InvalidDataset("ragged".to_string()).error_code(),
            "INVALID_DATASET"
        );
    }

    #[test]
    fn test_missing_column_message_names_columns() {
        let error = MissingColumnError {
            columns: vec!["Page".to_string(), "Region".to_string()],
        };
        let message = error.to_string();
        assert!(message.contains("Page"));
        assert!(message.contains("Region"));
    }

    #[test]
    fn test_missing_columns_accessor() {
        let error = StatsError::from(MissingColumnError::single("Shares"));
        assert_eq!(error.missing_columns(), Some(&["Shares".to_string()][..]));
        assert_eq!(StatsError::InvalidDataset("x".into()).missing_columns(), None);
    }

    #[test]
    fn test_error_serialization() {
        let error = StatsError::from(MissingColumnError::single("Age"));
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("MISSING_COLUMN"));
        assert!(json.contains("Age"));
    }

    #[test]
    fn test_with_context() {
        let error =
            StatsError::from(MissingColumnError::single("test")).with_context("During profiling");
        assert!(error.to_string().contains("During profiling"));
        assert_eq!(error.error_code(), "MISSING_COLUMN");
        assert!(error.missing_columns().is_some());
    }
}

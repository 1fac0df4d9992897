//! In-memory tabular dataset consumed by the profiler and the group engine.
//!
//! A [`Dataset`] is a fixed header list plus an ordered sequence of
//! [`Record`]s. Values are stored as already-trimmed strings; an empty
//! string is a null field. Datasets are immutable once built.

use crate::error::{MissingColumnError, Result, StatsError};
use std::collections::HashMap;

/// One row of the dataset: field values in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    values: Vec<String>,
}

impl Record {
    /// Create a record from values in header order.
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    /// Value at a header position.
    pub fn value(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    /// All values in header order.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Header list plus records, with name lookup.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    headers: Vec<String>,
    index: HashMap<String, usize>,
    records: Vec<Record>,
}

impl Dataset {
    /// Build a dataset from a header list and rows of values.
    ///
    /// Fails with [`StatsError::InvalidDataset`] when a header name repeats
    /// or a row does not have exactly one value per header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let mut index = HashMap::with_capacity(headers.len());
        for (position, name) in headers.iter().enumerate() {
            if index.insert(name.clone(), position).is_some() {
                return Err(StatsError::InvalidDataset(format!(
                    "duplicate header '{}'",
                    name
                )));
            }
        }

        let mut records = Vec::with_capacity(rows.len());
        for (row_number, row) in rows.into_iter().enumerate() {
            if row.len() != headers.len() {
                return Err(StatsError::InvalidDataset(format!(
                    "row {} has {} fields, expected {}",
                    row_number,
                    row.len(),
                    headers.len()
                )));
            }
            records.push(Record::new(row));
        }

        Ok(Self {
            headers,
            index,
            records,
        })
    }

    /// Build a dataset from string-keyed records.
    ///
    /// Each map must contain exactly the header names.
    pub fn from_maps(headers: Vec<String>, maps: Vec<HashMap<String, String>>) -> Result<Self> {
        let mut rows = Vec::with_capacity(maps.len());
        for (row_number, mut map) in maps.into_iter().enumerate() {
            if map.len() != headers.len() {
                return Err(StatsError::InvalidDataset(format!(
                    "record {} has {} fields, expected {}",
                    row_number,
                    map.len(),
                    headers.len()
                )));
            }
            let mut row = Vec::with_capacity(headers.len());
            for name in &headers {
                let value = map.remove(name).ok_or_else(|| {
                    StatsError::InvalidDataset(format!(
                        "record {} has no field '{}'",
                        row_number, name
                    ))
                })?;
                row.push(value);
            }
            rows.push(row);
        }
        Self::new(headers, rows)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Header position of a column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Header positions for several columns, or every missing name.
    pub fn column_indices<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> std::result::Result<Vec<usize>, MissingColumnError> {
        let mut indices = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in names {
            match self.column_index(name.as_ref()) {
                Some(i) => indices.push(i),
                None => missing.push(name.as_ref().to_string()),
            }
        }

        if missing.is_empty() {
            Ok(indices)
        } else {
            Err(MissingColumnError { columns: missing })
        }
    }

    /// Every record's value for a column, in record order.
    pub fn column_values(&self, name: &str) -> Result<Vec<&str>> {
        let index = self
            .column_index(name)
            .ok_or_else(|| MissingColumnError::single(name))?;
        Ok(self
            .records
            .iter()
            .map(|r| r.value(index).unwrap_or_default())
            .collect())
    }

    /// Value of one record at a named column.
    pub fn value(&self, record: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.records.get(record)?.value(index)
    }
}

static_assertions::assert_impl_all!(Dataset: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_dataset_shape() {
        let ds = Dataset::new(
            headers(&["Page", "Likes"]),
            vec![row(&["X", "10"]), row(&["Y", ""])],
        )
        .unwrap();

        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.column_count(), 2);
        assert_eq!(ds.value(1, "Page"), Some("Y"));
        assert_eq!(ds.value(1, "Likes"), Some(""));
        assert_eq!(ds.value(2, "Likes"), None);
    }

    #[test]
    fn test_duplicate_header_rejected() {
        let result = Dataset::new(headers(&["A", "A"]), vec![]);
        assert!(matches!(result, Err(StatsError::InvalidDataset(_))));
    }

    #[test]
    fn test_ragged_row_rejected() {
        let result = Dataset::new(headers(&["A", "B"]), vec![row(&["1"])]);
        assert!(matches!(result, Err(StatsError::InvalidDataset(_))));
    }

    #[test]
    fn test_column_values_in_record_order() {
        let ds = Dataset::new(
            headers(&["Likes"]),
            vec![row(&["10"]), row(&["20"]), row(&["abc"])],
        )
        .unwrap();

        assert_eq!(ds.column_values("Likes").unwrap(), vec!["10", "20", "abc"]);
    }

    #[test]
    fn test_column_values_missing_column() {
        let ds = Dataset::new(headers(&["Likes"]), vec![]).unwrap();
        let err = ds.column_values("Shares").unwrap_err();
        assert_eq!(err.missing_columns(), Some(&["Shares".to_string()][..]));
    }

    #[test]
    fn test_column_indices_reports_every_missing_name() {
        let ds = Dataset::new(headers(&["A", "B"]), vec![]).unwrap();
        assert_eq!(ds.column_indices(&["B", "A"]).unwrap(), vec![1, 0]);

        let err = ds.column_indices(&["C", "A", "D"]).unwrap_err();
        assert_eq!(err.columns, vec!["C", "D"]);
    }

    #[test]
    fn test_from_maps_orders_by_header() {
        let mut first = HashMap::new();
        first.insert("B".to_string(), "2".to_string());
        first.insert("A".to_string(), "1".to_string());

        let ds = Dataset::from_maps(headers(&["A", "B"]), vec![first]).unwrap();
        assert_eq!(ds.records()[0].values(), &["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn test_from_maps_rejects_foreign_key() {
        let mut record = HashMap::new();
        record.insert("A".to_string(), "1".to_string());
        record.insert("Z".to_string(), "2".to_string());

        let result = Dataset::from_maps(headers(&["A", "B"]), vec![record]);
        assert!(matches!(result, Err(StatsError::InvalidDataset(_))));
    }
}

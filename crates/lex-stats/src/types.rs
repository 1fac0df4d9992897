use serde::{Deserialize, Serialize};

// ============================================================================
// Column Statistics
// ============================================================================

/// Classification outcome of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
        }
    }
}

/// Summary of the numeric values of a column or group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    /// Number of values that parsed as numbers.
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation (n - 1 denominator); 0 below two values.
    pub std: f64,
}

/// A distinct value and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Summary of a text column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalStats {
    /// Number of distinct non-empty values.
    pub unique: usize,
    /// Most frequent values, by descending count then first appearance.
    pub top_k: Vec<ValueCount>,
}

/// Kind-specific payload of [`ColumnStats`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnSummary {
    Numeric(NumericStats),
    Categorical(CategoricalStats),
}

impl ColumnSummary {
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnSummary::Numeric(_) => ColumnKind::Numeric,
            ColumnSummary::Categorical(_) => ColumnKind::Categorical,
        }
    }
}

/// Per-column profiling result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub name: String,
    /// Number of records.
    pub total: usize,
    /// Records with a non-empty value.
    pub non_null: usize,
    /// `total - non_null`.
    pub null: usize,
    pub summary: ColumnSummary,
}

impl ColumnStats {
    pub fn kind(&self) -> ColumnKind {
        self.summary.kind()
    }

    pub fn numeric(&self) -> Option<&NumericStats> {
        match &self.summary {
            ColumnSummary::Numeric(stats) => Some(stats),
            ColumnSummary::Categorical(_) => None,
        }
    }

    pub fn categorical(&self) -> Option<&CategoricalStats> {
        match &self.summary {
            ColumnSummary::Categorical(stats) => Some(stats),
            ColumnSummary::Numeric(_) => None,
        }
    }

    /// Null share in percent; 0 for an empty dataset.
    pub fn null_percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.null as f64 / self.total as f64) * 100.0
        }
    }
}

/// Dataset-level profiling result. Columns are kept in header order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetReport {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnStats>,
}

impl DatasetReport {
    /// Look up a column's stats by name.
    pub fn column(&self, name: &str) -> Option<&ColumnStats> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn numeric_columns(&self) -> impl Iterator<Item = &ColumnStats> {
        self.columns
            .iter()
            .filter(|c| c.kind() == ColumnKind::Numeric)
    }

    pub fn categorical_columns(&self) -> impl Iterator<Item = &ColumnStats> {
        self.columns
            .iter()
            .filter(|c| c.kind() == ColumnKind::Categorical)
    }
}

// ============================================================================
// Grouping
// ============================================================================

/// Ordered tuple of raw values identifying one group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(pub Vec<String>);

impl GroupKey {
    /// Pair each key component with its grouping column name.
    pub fn labelled<'a>(&'a self, columns: &'a [String]) -> Vec<(&'a str, &'a str)> {
        columns
            .iter()
            .zip(self.0.iter())
            .map(|(c, v)| (c.as_str(), v.as_str()))
            .collect()
    }
}

/// Mean and count of one measure column within a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureStats {
    pub column: String,
    pub mean: f64,
    /// Numeric values used; never more than the group's member count.
    pub count: usize,
}

/// Result for one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub key: GroupKey,
    pub member_count: usize,
    /// Measures present in the header and numeric within this group,
    /// in configured order.
    pub measures: Vec<MeasureStats>,
}

impl GroupSummary {
    pub fn measure(&self, column: &str) -> Option<&MeasureStats> {
        self.measures.iter().find(|m| m.column == column)
    }
}

/// Every group of one grouping, in first-seen key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingReport {
    pub group_columns: Vec<String>,
    pub measure_columns: Vec<String>,
    pub group_count: usize,
    pub groups: Vec<GroupSummary>,
}

impl GroupingReport {
    pub fn group(&self, key: &[&str]) -> Option<&GroupSummary> {
        self.groups.iter().find(|g| {
            g.key.0.len() == key.len() && g.key.0.iter().zip(key).all(|(a, b)| a == b)
        })
    }

    /// The first `limit` groups, for display.
    pub fn preview(&self, limit: usize) -> &[GroupSummary] {
        &self.groups[..limit.min(self.groups.len())]
    }

    /// Sum of member counts over all groups.
    pub fn total_members(&self) -> usize {
        self.groups.iter().map(|g| g.member_count).sum()
    }
}

// ============================================================================
// Analysis Run
// ============================================================================

/// Result of one configured grouping inside an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GroupingOutcome {
    Grouped(GroupingReport),
    /// Grouping columns were absent; nothing was partitioned.
    MissingColumns {
        requested: Vec<String>,
        missing: Vec<String>,
    },
}

impl GroupingOutcome {
    pub fn report(&self) -> Option<&GroupingReport> {
        match self {
            GroupingOutcome::Grouped(report) => Some(report),
            GroupingOutcome::MissingColumns { .. } => None,
        }
    }
}

/// Profiling plus every configured grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub dataset: DatasetReport,
    pub groupings: Vec<GroupingOutcome>,
}

static_assertions::assert_impl_all!(DatasetReport: Send, Sync);
static_assertions::assert_impl_all!(GroupingReport: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(key: &[&str], members: usize) -> GroupSummary {
        GroupSummary {
            key: GroupKey(key.iter().map(|s| s.to_string()).collect()),
            member_count: members,
            measures: Vec::new(),
        }
    }

    #[test]
    fn test_column_summary_serializes_with_kind_tag() {
        let stats = ColumnStats {
            name: "Category".to_string(),
            total: 2,
            non_null: 2,
            null: 0,
            summary: ColumnSummary::Categorical(CategoricalStats {
                unique: 1,
                top_k: vec![ValueCount {
                    value: "a".to_string(),
                    count: 2,
                }],
            }),
        };

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["summary"]["kind"], "categorical");
        assert_eq!(json["summary"]["top_k"][0]["value"], "a");
    }

    #[test]
    fn test_columns_by_kind_keep_header_order() {
        let column = |name: &str, summary: ColumnSummary| ColumnStats {
            name: name.to_string(),
            total: 1,
            non_null: 1,
            null: 0,
            summary,
        };
        let numeric = || {
            ColumnSummary::Numeric(NumericStats {
                count: 1,
                mean: 1.0,
                min: 1.0,
                max: 1.0,
                std: 0.0,
            })
        };
        let categorical = || {
            ColumnSummary::Categorical(CategoricalStats {
                unique: 1,
                top_k: Vec::new(),
            })
        };

        let report = DatasetReport {
            row_count: 1,
            column_count: 3,
            columns: vec![
                column("Likes", numeric()),
                column("Page", categorical()),
                column("Shares", numeric()),
            ],
        };

        let numeric_names: Vec<&str> = report.numeric_columns().map(|c| c.name.as_str()).collect();
        let categorical_names: Vec<&str> = report
            .categorical_columns()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(numeric_names, vec!["Likes", "Shares"]);
        assert_eq!(categorical_names, vec!["Page"]);
    }

    #[test]
    fn test_null_percentage_empty_dataset() {
        let stats = ColumnStats {
            name: "x".to_string(),
            total: 0,
            non_null: 0,
            null: 0,
            summary: ColumnSummary::Categorical(CategoricalStats {
                unique: 0,
                top_k: Vec::new(),
            }),
        };
        assert_eq!(stats.null_percentage(), 0.0);
    }

    #[test]
    fn test_preview_truncates_without_panicking() {
        let report = GroupingReport {
            group_columns: vec!["Page".to_string()],
            measure_columns: Vec::new(),
            group_count: 2,
            groups: vec![summary(&["X"], 2), summary(&["Y"], 1)],
        };

        assert_eq!(report.preview(1).len(), 1);
        assert_eq!(report.preview(10).len(), 2);
        assert_eq!(report.total_members(), 3);
        assert_eq!(report.group(&["Y"]).unwrap().member_count, 1);
        assert!(report.group(&["Z"]).is_none());
    }

    #[test]
    fn test_group_key_labelled() {
        let key = GroupKey(vec!["7".to_string(), "Politician".to_string()]);
        let columns = vec!["Facebook_Id".to_string(), "Page Category".to_string()];
        assert_eq!(
            key.labelled(&columns),
            vec![("Facebook_Id", "7"), ("Page Category", "Politician")]
        );
    }
}

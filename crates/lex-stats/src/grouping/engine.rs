use crate::dataset::Dataset;
use crate::error::MissingColumnError;
use crate::profiler::{mean, to_numeric};
use crate::types::{GroupKey, GroupSummary, GroupingReport, MeasureStats};
use std::collections::HashMap;
use tracing::{debug, info};

/// Records of a dataset split by the values of the grouping columns.
///
/// Groups are kept in the order their key was first seen; members are
/// record indices in record order.
#[derive(Debug)]
pub struct Partition<'a> {
    dataset: &'a Dataset,
    columns: Vec<String>,
    groups: Vec<(GroupKey, Vec<usize>)>,
}

impl<'a> Partition<'a> {
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Keys and member record indices, in first-seen key order.
    pub fn groups(&self) -> impl Iterator<Item = (&GroupKey, &[usize])> {
        self.groups.iter().map(|(k, m)| (k, m.as_slice()))
    }

    /// Member record indices of one group.
    pub fn members(&self, key: &GroupKey) -> Option<&[usize]> {
        self.groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, m)| m.as_slice())
    }

    /// Mean and count of every measure column, per group.
    ///
    /// A measure absent from the header is skipped for every group; a
    /// measure with no numeric value inside a group is skipped for that
    /// group only.
    pub fn summarize<S: AsRef<str>>(&self, measure_columns: &[S]) -> GroupingReport {
        let measures: Vec<(&str, usize)> = measure_columns
            .iter()
            .filter_map(|m| {
                let name = m.as_ref();
                let index = self.dataset.column_index(name);
                if index.is_none() {
                    debug!(measure = name, "Measure column not in header, skipping");
                }
                index.map(|i| (name, i))
            })
            .collect();

        let records = self.dataset.records();
        let groups = self
            .groups
            .iter()
            .map(|(key, members)| {
                let measures = measures
                    .iter()
                    .filter_map(|&(name, index)| {
                        let numbers = to_numeric(
                            members
                                .iter()
                                .filter_map(|&r| records[r].value(index))
                                .filter(|v| !v.is_empty()),
                        );
                        (!numbers.is_empty()).then(|| MeasureStats {
                            column: name.to_string(),
                            mean: mean(&numbers),
                            count: numbers.len(),
                        })
                    })
                    .collect();

                GroupSummary {
                    key: key.clone(),
                    member_count: members.len(),
                    measures,
                }
            })
            .collect();

        GroupingReport {
            group_columns: self.columns.clone(),
            measure_columns: measure_columns
                .iter()
                .map(|m| m.as_ref().to_string())
                .collect(),
            group_count: self.groups.len(),
            groups,
        }
    }
}

/// Partitions records by grouping columns and summarizes measures per group.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupEngine;

impl GroupEngine {
    /// Split the dataset into groups keyed by `group_columns`, in order.
    ///
    /// Every missing grouping column is reported and nothing is partitioned.
    pub fn partition<'a, S: AsRef<str>>(
        dataset: &'a Dataset,
        group_columns: &[S],
    ) -> Result<Partition<'a>, MissingColumnError> {
        let indices = dataset.column_indices(group_columns)?;

        let mut positions: HashMap<GroupKey, usize> = HashMap::new();
        let mut groups: Vec<(GroupKey, Vec<usize>)> = Vec::new();

        for (row, record) in dataset.records().iter().enumerate() {
            let key = GroupKey(
                indices
                    .iter()
                    .map(|&i| record.value(i).unwrap_or_default().to_string())
                    .collect(),
            );
            match positions.get(&key) {
                Some(&g) => groups[g].1.push(row),
                None => {
                    positions.insert(key.clone(), groups.len());
                    groups.push((key, vec![row]));
                }
            }
        }

        Ok(Partition {
            dataset,
            columns: group_columns
                .iter()
                .map(|c| c.as_ref().to_string())
                .collect(),
            groups,
        })
    }

    /// Partition and summarize in one call.
    ///
    /// A missing grouping column is returned as a [`MissingColumnError`] for
    /// the caller to report; it is not meant to abort a larger run.
    pub fn group<S: AsRef<str>, M: AsRef<str>>(
        dataset: &Dataset,
        group_columns: &[S],
        measure_columns: &[M],
    ) -> Result<GroupingReport, MissingColumnError> {
        let partition = Self::partition(dataset, group_columns)?;
        let report = partition.summarize(measure_columns);

        info!(
            "Grouped by {:?}: {} groups",
            report.group_columns, report.group_count
        );

        Ok(report)
    }
}

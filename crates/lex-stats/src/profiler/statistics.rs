//! Numeric and categorical summarizers used for column profiling.

use crate::types::{CategoricalStats, NumericStats, ValueCount};
use std::collections::HashMap;

// ============================================================================
// Numeric
// ============================================================================

/// Arithmetic mean; 0 for an empty slice.
///
/// Stays finite for any finite input: when the plain sum overflows, the
/// values are rescaled by their largest magnitude first.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = plain_mean(values);
    if mean.is_finite() {
        return mean;
    }
    rescaled(values, plain_mean)
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Sample standard deviation (n - 1 denominator); 0 when fewer than two
/// values are given.
///
/// Squared deviations that overflow are handled by rescaling, so the result
/// is finite unless the deviation itself exceeds `f64::MAX` (values close to
/// `f64::MAX` with opposite signs).
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let std = plain_sample_std(values);
    if std.is_finite() {
        return std;
    }
    rescaled(values, plain_sample_std)
}

fn plain_mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn plain_sample_std(values: &[f64]) -> f64 {
    let mean = plain_mean(values);
    let variance: f64 = values
        .iter()
        .map(|v| (v - mean).powi(2))
        .sum::<f64>()
        / (values.len() - 1) as f64;

    variance.sqrt()
}

/// Apply a scale-equivariant statistic to `values / m`, then multiply by `m`,
/// where `m` is the largest magnitude.
fn rescaled(values: &[f64], stat: fn(&[f64]) -> f64) -> f64 {
    let scale = values.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return stat(values);
    }
    let scaled: Vec<f64> = values.iter().map(|v| v / scale).collect();
    stat(&scaled) * scale
}

/// Count, mean, min, max and sample std of a non-empty slice.
pub fn summarize_numeric(values: &[f64]) -> Option<NumericStats> {
    Some(NumericStats {
        count: values.len(),
        mean: mean(values),
        min: min(values)?,
        max: max(values)?,
        std: sample_std(values),
    })
}

// ============================================================================
// Categorical
// ============================================================================

/// Occurrence counts of string values, kept in first-seen order.
#[derive(Debug, Default)]
pub struct FrequencyTable<'a> {
    positions: HashMap<&'a str, usize>,
    entries: Vec<(&'a str, usize)>,
}

impl<'a> FrequencyTable<'a> {
    /// Count values in a single pass.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut table = Self::default();
        for value in values {
            table.add(value);
        }
        table
    }

    pub fn add(&mut self, value: &'a str) {
        match self.positions.get(value) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.positions.insert(value, self.entries.len());
                self.entries.push((value, 1));
            }
        }
    }

    /// Number of distinct values.
    pub fn unique(&self) -> usize {
        self.entries.len()
    }

    /// The `k` most frequent values. Equal counts keep first-seen order.
    ///
    /// Only the selected prefix is sorted, so high-cardinality columns do
    /// not pay for a full sort.
    pub fn top_k(&self, k: usize) -> Vec<ValueCount> {
        if k == 0 {
            return Vec::new();
        }

        // (count desc, first-seen asc) is a total order over distinct values.
        let mut ranked: Vec<(usize, usize)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(seen, &(_, count))| (count, seen))
            .collect();
        let by_rank = |a: &(usize, usize), b: &(usize, usize)| b.0.cmp(&a.0).then(a.1.cmp(&b.1));

        if k < ranked.len() {
            ranked.select_nth_unstable_by(k - 1, by_rank);
            ranked.truncate(k);
        }
        ranked.sort_unstable_by(by_rank);

        ranked
            .into_iter()
            .map(|(count, seen)| ValueCount {
                value: self.entries[seen].0.to_string(),
                count,
            })
            .collect()
    }
}

/// Distinct count and top-`k` values of non-empty strings.
pub fn summarize_categorical<'a, I>(values: I, k: usize) -> CategoricalStats
where
    I: IntoIterator<Item = &'a str>,
{
    let table = FrequencyTable::from_values(values);
    CategoricalStats {
        unique: table.unique(),
        top_k: table.top_k(k),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vc(value: &str, count: usize) -> ValueCount {
        ValueCount {
            value: value.to_string(),
            count,
        }
    }

    // ==================== numeric tests ====================

    #[test]
    fn test_mean_basic_and_empty() {
        assert_eq!(mean(&[10.0, 20.0, 30.0]), 20.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min(&[3.0, -1.0, 2.0]), Some(-1.0));
        assert_eq!(max(&[3.0, -1.0, 2.0]), Some(3.0));
        assert_eq!(min(&[]), None);
        assert_eq!(max(&[]), None);
    }

    #[test]
    fn test_sample_std_basic() {
        // Mean 20, squared deviations 100 + 0 + 100, divided by n - 1 = 2
        assert_eq!(sample_std(&[10.0, 20.0, 30.0]), 10.0);
    }

    #[test]
    fn test_sample_std_five_values() {
        // Variance = 10 / 4 = 2.5
        let std = sample_std(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!((std - 2.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_sample_std_small_samples_are_zero() {
        assert_eq!(sample_std(&[]), 0.0);
        assert_eq!(sample_std(&[42.0]), 0.0);
    }

    #[test]
    fn test_sample_std_identical_values() {
        assert_eq!(sample_std(&[5.0, 5.0, 5.0, 5.0]), 0.0);
    }

    #[test]
    fn test_large_values_stay_finite() {
        assert_eq!(mean(&[1e308, 1e308]), 1e308);
        assert_eq!(sample_std(&[1e308, 1e308]), 0.0);

        let std = sample_std(&[1e308, -1e308]);
        assert!(std.is_finite());
        assert!((std / 1e308 - 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(mean(&[1e308, -1e308]), 0.0);
    }

    #[test]
    fn test_summarize_numeric() {
        let stats = summarize_numeric(&[10.0, 20.0, 30.0]).unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.mean, 20.0);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 30.0);
        assert_eq!(stats.std, 10.0);
        assert!(summarize_numeric(&[]).is_none());
    }

    // ==================== categorical tests ====================

    #[test]
    fn test_top_k_ties_follow_first_seen() {
        let stats = summarize_categorical(["a", "b", "a", "a", "c"], 5);
        assert_eq!(stats.unique, 3);
        assert_eq!(stats.top_k, vec![vc("a", 3), vc("b", 1), vc("c", 1)]);
    }

    #[test]
    fn test_top_k_truncates_to_k() {
        let values = ["x", "y", "z", "y", "w", "z", "z"];
        let stats = summarize_categorical(values, 2);
        assert_eq!(stats.unique, 4);
        assert_eq!(stats.top_k, vec![vc("z", 3), vc("y", 2)]);
    }

    #[test]
    fn test_top_k_selection_keeps_earliest_among_ties() {
        // Ten values seen once each; the selection must keep the first three.
        let values: Vec<String> = (0..10).map(|i| format!("v{}", i)).collect();
        let table = FrequencyTable::from_values(values.iter().map(String::as_str));
        let top = table.top_k(3);
        assert_eq!(top, vec![vc("v0", 1), vc("v1", 1), vc("v2", 1)]);
    }

    #[test]
    fn test_top_k_length_is_min_of_k_and_unique() {
        let table = FrequencyTable::from_values(["a", "b", "a"]);
        assert_eq!(table.top_k(5).len(), 2);
        assert_eq!(table.top_k(1).len(), 1);
        assert!(table.top_k(0).is_empty());
    }

    #[test]
    fn test_top_k_sorted_descending() {
        let values = ["q", "r", "r", "s", "s", "s", "t", "t", "t", "t"];
        let top = FrequencyTable::from_values(values).top_k(4);
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
        assert_eq!(top[0], vc("t", 4));
    }

    #[test]
    fn test_categorical_empty_input() {
        let stats = summarize_categorical(Vec::<&str>::new(), 5);
        assert_eq!(stats.unique, 0);
        assert!(stats.top_k.is_empty());
    }
}

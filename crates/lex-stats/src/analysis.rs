//! One-shot analysis: dataset profile plus every configured grouping.

use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::error::{Result, ResultExt};
use crate::grouping::GroupEngine;
use crate::profiler::DatasetProfiler;
use crate::types::{AnalysisReport, GroupingOutcome};
use tracing::{info, warn};

/// Profile the dataset and run each configured grouping.
///
/// Profiling failures abort the run. A grouping whose columns are missing
/// is recorded as [`GroupingOutcome::MissingColumns`] and the remaining
/// groupings still run.
pub fn run_analysis(dataset: &Dataset, config: &AnalysisConfig) -> Result<AnalysisReport> {
    config.validate()?;

    info!(
        "Profiling {} rows x {} columns",
        dataset.row_count(),
        dataset.column_count()
    );
    let report = DatasetProfiler::new(config.top_k)
        .profile(dataset)
        .context("During dataset profiling")?;

    let groupings = config
        .groupings
        .iter()
        .map(|columns| {
            match GroupEngine::group(dataset, columns, &config.measure_columns) {
                Ok(grouped) => GroupingOutcome::Grouped(grouped),
                Err(missing) => {
                    warn!("Skipping grouping {:?}: {}", columns, missing);
                    GroupingOutcome::MissingColumns {
                        requested: columns.clone(),
                        missing: missing.columns,
                    }
                }
            }
        })
        .collect();

    Ok(AnalysisReport {
        dataset: report,
        groupings,
    })
}

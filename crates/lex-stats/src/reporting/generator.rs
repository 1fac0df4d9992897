use crate::error::Result;
use crate::types::{
    AnalysisReport, ColumnStats, ColumnSummary, GroupingOutcome, GroupingReport,
};
use chrono::Local;
use serde::Serialize;
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

const RULE_WIDTH: usize = 50;

// ============================================================================
// JSON Report File
// ============================================================================

/// Envelope written by [`ReportGenerator::write_report_to_file`].
#[derive(Debug, Clone, Serialize)]
pub struct StatsReportFile<'a> {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file
    pub input_file: &'a str,
    #[serde(flatten)]
    pub analysis: &'a AnalysisReport,
}

// ============================================================================
// Text Report
// ============================================================================

/// Human-readable rendering of an [`AnalysisReport`].
///
/// Only the first `preview_limit` groups of each grouping are listed; the
/// group count line always reflects all of them.
pub struct TextReport<'a> {
    report: &'a AnalysisReport,
    preview_limit: usize,
}

impl<'a> TextReport<'a> {
    pub fn new(report: &'a AnalysisReport, preview_limit: usize) -> Self {
        Self {
            report,
            preview_limit,
        }
    }

    fn write_column(f: &mut fmt::Formatter<'_>, column: &ColumnStats) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "--- {} ({}) ---", column.name, column.kind().as_str())?;
        writeln!(
            f,
            "Total: {} | Non-null: {} | Null: {}",
            column.total, column.non_null, column.null
        )?;

        match &column.summary {
            ColumnSummary::Numeric(stats) => writeln!(
                f,
                "Mean: {:.2} | Min: {} | Max: {} | Std: {:.2}",
                stats.mean, stats.min, stats.max, stats.std
            ),
            ColumnSummary::Categorical(stats) => {
                let top: Vec<String> = stats
                    .top_k
                    .iter()
                    .map(|vc| format!("{} ({})", vc.value, vc.count))
                    .collect();
                writeln!(f, "Unique: {} | Top: {}", stats.unique, top.join(", "))
            }
        }
    }

    fn write_grouping(&self, f: &mut fmt::Formatter<'_>, outcome: &GroupingOutcome) -> fmt::Result {
        match outcome {
            GroupingOutcome::MissingColumns { requested, missing } => {
                writeln!(f)?;
                writeln!(f, "GROUP-BY STATS: {:?}", requested)?;
                writeln!(f, " Missing columns: {:?}", missing)
            }
            GroupingOutcome::Grouped(report) => self.write_groups(f, report),
        }
    }

    fn write_groups(&self, f: &mut fmt::Formatter<'_>, report: &GroupingReport) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "GROUP-BY STATS: {:?}", report.group_columns)?;
        writeln!(f, "Found {} groups", report.group_count)?;

        for (i, group) in report.preview(self.preview_limit).iter().enumerate() {
            let key: Vec<String> = group
                .key
                .labelled(&report.group_columns)
                .into_iter()
                .map(|(c, v)| format!("{}: {}", c, v))
                .collect();

            writeln!(f)?;
            writeln!(
                f,
                "Group {}: {{{}}} ({} rows)",
                i + 1,
                key.join(", "),
                group.member_count
            )?;
            for measure in &group.measures {
                writeln!(
                    f,
                    "  {}: mean={:.2}, count={}",
                    measure.column, measure.mean, measure.count
                )?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dataset = &self.report.dataset;

        writeln!(f, "OVERALL DATASET STATS")?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(
            f,
            "Rows: {}, Columns: {}",
            dataset.row_count, dataset.column_count
        )?;

        for column in &dataset.columns {
            Self::write_column(f, column)?;
        }

        for outcome in &self.report.groupings {
            self.write_grouping(f, outcome)?;
        }
        Ok(())
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Writes analysis reports as text or JSON.
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./outputs"),
        }
    }
}

impl ReportGenerator {
    /// Create a new ReportGenerator writing into `output_dir`.
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Render the report as plain text.
    pub fn render_text(report: &AnalysisReport, preview_limit: usize) -> String {
        TextReport::new(report, preview_limit).to_string()
    }

    /// Render the report as pretty-printed JSON.
    pub fn render_json(report: &AnalysisReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    /// Write the report to `<output_dir>/<report_base_name>_stats.json`.
    pub fn write_report_to_file(
        &self,
        report: &AnalysisReport,
        input_file: &str,
        report_base_name: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let envelope = StatsReportFile {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file,
            analysis: report,
        };

        let report_path = self
            .output_dir
            .join(format!("{}_stats.json", report_base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(&envelope)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        CategoricalStats, DatasetReport, GroupKey, GroupSummary, MeasureStats, NumericStats,
        ValueCount,
    };

    fn sample_report() -> AnalysisReport {
        let group = |key: &str, members: usize, mean: f64| GroupSummary {
            key: GroupKey(vec![key.to_string()]),
            member_count: members,
            measures: vec![MeasureStats {
                column: "Likes".to_string(),
                mean,
                count: members,
            }],
        };

        AnalysisReport {
            dataset: DatasetReport {
                row_count: 5,
                column_count: 2,
                columns: vec![
                    ColumnStats {
                        name: "Likes".to_string(),
                        total: 5,
                        non_null: 4,
                        null: 1,
                        summary: ColumnSummary::Numeric(NumericStats {
                            count: 3,
                            mean: 20.0,
                            min: 10.0,
                            max: 30.0,
                            std: 10.0,
                        }),
                    },
                    ColumnStats {
                        name: "Page".to_string(),
                        total: 5,
                        non_null: 5,
                        null: 0,
                        summary: ColumnSummary::Categorical(CategoricalStats {
                            unique: 2,
                            top_k: vec![
                                ValueCount { value: "X".to_string(), count: 3 },
                                ValueCount { value: "Y".to_string(), count: 2 },
                            ],
                        }),
                    },
                ],
            },
            groupings: vec![
                GroupingOutcome::Grouped(GroupingReport {
                    group_columns: vec!["Page".to_string()],
                    measure_columns: vec!["Likes".to_string()],
                    group_count: 2,
                    groups: vec![group("X", 3, 20.0), group("Y", 2, 15.5)],
                }),
                GroupingOutcome::MissingColumns {
                    requested: vec!["Region".to_string()],
                    missing: vec!["Region".to_string()],
                },
            ],
        }
    }

    #[test]
    fn test_render_text_columns() {
        let text = ReportGenerator::render_text(&sample_report(), 3);

        assert!(text.contains("Rows: 5, Columns: 2"));
        assert!(text.contains("--- Likes (numeric) ---"));
        assert!(text.contains("Total: 5 | Non-null: 4 | Null: 1"));
        assert!(text.contains("Mean: 20.00 | Min: 10 | Max: 30 | Std: 10.00"));
        assert!(text.contains("--- Page (categorical) ---"));
        assert!(text.contains("Unique: 2 | Top: X (3), Y (2)"));
    }

    #[test]
    fn test_render_text_groups_and_missing() {
        let text = ReportGenerator::render_text(&sample_report(), 3);

        assert!(text.contains("Found 2 groups"));
        assert!(text.contains("Group 1: {Page: X} (3 rows)"));
        assert!(text.contains("  Likes: mean=15.50, count=2"));
        assert!(text.contains("Missing columns: [\"Region\"]"));
    }

    #[test]
    fn test_render_text_preview_limit() {
        let text = ReportGenerator::render_text(&sample_report(), 1);

        assert!(text.contains("Found 2 groups"));
        assert!(text.contains("Group 1:"));
        assert!(!text.contains("Group 2:"));
    }

    #[test]
    fn test_render_json_tags() {
        let json = ReportGenerator::render_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["dataset"]["columns"][0]["summary"]["kind"], "numeric");
        assert_eq!(value["groupings"][0]["status"], "grouped");
        assert_eq!(value["groupings"][1]["status"], "missing_columns");
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let generator = ReportGenerator::new(dir.path().join("out"));

        let path = generator
            .write_report_to_file(&sample_report(), "data/posts.csv", "posts")
            .unwrap();

        assert!(path.ends_with("posts_stats.json"));
        let content = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["input_file"], "data/posts.csv");
        assert!(value["generated_at"].is_string());
        assert_eq!(value["dataset"]["row_count"], 5);
    }
}

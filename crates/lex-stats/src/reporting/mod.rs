//! Report generation module.
//!
//! Renders an [`crate::types::AnalysisReport`] for people or machines:
//! - Plain text, with a per-grouping preview limit
//! - Pretty JSON to stdout (`--json` CLI flag)
//! - JSON file output (`--emit-report` CLI flag)
//!
//! # Example
//!
//! ```rust,ignore
//! use lex_stats::reporting::ReportGenerator;
//!
//! println!("{}", ReportGenerator::render_text(&report, 3));
//!
//! let generator = ReportGenerator::new(PathBuf::from("output"));
//! generator.write_report_to_file(&report, "data/posts.csv", "posts")?;
//! ```

mod generator;

pub use generator::{ReportGenerator, StatsReportFile, TextReport};

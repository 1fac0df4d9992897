//! Group-by aggregation over a dataset.
//!
//! Records are partitioned by the exact string values of one or more
//! grouping columns; each group then reports the mean and count of the
//! configured measure columns.
//!
//! # Example
//!
//! ```rust,ignore
//! use lex_stats::grouping::GroupEngine;
//!
//! match GroupEngine::group(&dataset, &["Facebook_Id"], &["Likes", "Shares"]) {
//!     Ok(report) => println!("{} groups", report.group_count),
//!     Err(missing) => println!("Missing columns: {:?}", missing.columns),
//! }
//! ```

mod engine;

pub use engine::{GroupEngine, Partition};

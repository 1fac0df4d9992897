//! CLI entry point for descriptive statistics over a CSV file.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use lex_stats::{AnalysisConfig, AnalysisReport, ReportGenerator, load_csv, run_analysis};
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    author = "Lex Machina Team",
    version,
    about = "Descriptive statistics and group-by summaries for CSV data",
    long_about = "Profiles every column of a CSV file (numeric: mean/min/max/std, \
                  text: cardinality and most frequent values) and summarizes \
                  measure columns per group.\n\n\
                  EXAMPLES:\n  \
                  # Profile all columns\n  \
                  lex-stats -i posts.csv\n\n  \
                  # Add two groupings\n  \
                  lex-stats -i posts.csv -g Facebook_Id -g \"Facebook_Id,Page Category\"\n\n  \
                  # Machine-readable output\n  \
                  lex-stats -i posts.csv -g Facebook_Id --json"
)]
struct Args {
    /// Path to the CSV file to analyze
    #[arg(short, long)]
    input: String,

    /// Grouping columns, comma-separated. Repeat for several groupings
    #[arg(short = 'g', long = "group-by")]
    group_by: Vec<String>,

    /// Measure columns summarized per group, comma-separated
    #[arg(long, value_delimiter = ',')]
    measures: Option<Vec<String>>,

    /// Number of frequent values shown for text columns
    #[arg(long)]
    top_k: Option<usize>,

    /// Number of groups printed per grouping
    #[arg(long)]
    preview_limit: Option<usize>,

    /// JSON configuration file; command-line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for --emit-report
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Write a JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_stats.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Output JSON to stdout instead of the text report
    ///
    /// Disables all logging; only the JSON report is printed.
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and the report)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let config = build_config(&args)?;

    info!("Loading dataset from: {}", args.input);
    let dataset = load_csv(&args.input)?;

    let report = match run_analysis(&dataset, &config) {
        Ok(report) => report,
        Err(e) => {
            error!("Analysis failed: {}", e);
            return Err(anyhow!("Analysis failed: {}", e));
        }
    };

    handle_output(&report, &config, &args)
}

/// Merge the optional config file with command-line overrides.
fn build_config(args: &Args) -> Result<AnalysisConfig> {
    let base = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            AnalysisConfig::from_json(&json)?
        }
        None => AnalysisConfig::default(),
    };

    let mut builder = AnalysisConfig::builder()
        .groupings(base.groupings)
        .measure_columns(base.measure_columns)
        .top_k(args.top_k.unwrap_or(base.top_k))
        .preview_limit(args.preview_limit.unwrap_or(base.preview_limit));

    for grouping in &args.group_by {
        builder = builder.group_by(parse_column_list(grouping));
    }

    if let Some(ref measures) = args.measures {
        builder = builder.measure_columns(measures.iter().map(|m| m.trim().to_string()));
    }

    Ok(builder.build()?)
}

/// Split "A, B" into trimmed column names.
fn parse_column_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

/// Handle output based on CLI flags.
///
/// - Default: print the text report to stdout
/// - `--json`: print JSON to stdout only (no logs)
/// - `--emit-report`: also write a JSON report file
fn handle_output(report: &AnalysisReport, config: &AnalysisConfig, args: &Args) -> Result<()> {
    if args.emit_report {
        let input_stem = extract_file_stem(&args.input);
        let generator = ReportGenerator::new(PathBuf::from(&args.output));
        let report_path = generator.write_report_to_file(report, &args.input, &input_stem)?;
        info!("Report written to: {}", report_path.display());
    }

    if args.json {
        println!("{}", ReportGenerator::render_json(report)?);
        return Ok(());
    }

    print!(
        "{}",
        ReportGenerator::render_text(report, config.preview_limit)
    );
    Ok(())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::Level;

use crate::config;
use crate::data::RunResult;
use crate::filter::compile_filters;
use crate::parsers::{load_metadata_file, load_run_file};
use crate::reporting::{self, ReportSettings};

/// Fractional digits used for formatted statistics when neither the CLI nor
/// the configuration overrides it.
const DEFAULT_SIG_FIGS: u8 = 2;

#[derive(Parser)]
#[command(version, name = "perf-bench-report")]
#[command(about = "Consolidate performance test runs into a comparative HTML report")]
pub struct Cli {
    /// Increase verbosity level (can be specified multiple times.) The first
    /// level sets level "info", second sets level "debug", and third sets
    /// level "trace" for the logger.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Run result JSON files, in run order. The order given here becomes the
    /// horizontal axis of every chart.
    #[arg(short = 'f', long = "results", required = true, num_args = 1..)]
    pub results: Vec<PathBuf>,

    /// Baseline run result JSON file. Prepended as the first run and used as
    /// the source of baseline comparison values.
    #[arg(short, long)]
    pub baseline: Option<PathBuf>,

    /// Directory the report folder is created in. Defaults to the configured
    /// directory, or the current directory.
    #[arg(long)]
    pub report_dir: Option<PathBuf>,

    /// Number of digits after the decimal point for formatted statistics.
    #[arg(long)]
    pub sig_figs: Option<u8>,

    /// Regex patterns restricting which tests are reported. May be given
    /// multiple times; a test is kept when any pattern matches.
    #[arg(long = "filter")]
    pub filters: Vec<String>,

    /// Type-metadata JSON file produced by the metadata processor.
    #[arg(long)]
    pub metadata: Option<PathBuf>,

    /// Report title.
    #[arg(long)]
    pub title: Option<String>,
}

pub fn handle_calls() -> Result<()> {
    let cli = Cli::parse();
    let logger_level = match cli.verbose {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(logger_level.as_str())).init();

    let filters = compile_filters(&cli.filters)?;

    let has_benchmark_results = cli.baseline.is_some();
    let runs = load_runs(cli.baseline.as_deref(), &cli.results)?;

    let metadata = match cli.metadata.as_deref() {
        Some(path) => load_metadata_file(path)?,
        None => Vec::new(),
    };

    let settings = ReportSettings {
        report_dir: cli
            .report_dir
            .or_else(config::report_dir)
            .unwrap_or_else(|| PathBuf::from(".")),
        sig_figs: cli
            .sig_figs
            .or_else(config::report_sig_figs)
            .unwrap_or(DEFAULT_SIG_FIGS),
        has_benchmark_results,
        title: cli.title.or_else(config::report_title),
        filters,
    };

    let report_path = reporting::write_report(&runs, metadata, &settings)?;
    println!("Writing Report To: {}", report_path.display());

    Ok(())
}

/// Load all run files in caller order. A supplied baseline run is loaded
/// first, flagged, and placed at run index 0, where the baseline-value
/// lookup expects it.
fn load_runs(
    baseline: Option<&std::path::Path>,
    results: &[PathBuf],
) -> Result<Vec<RunResult>> {
    let mut runs = Vec::with_capacity(results.len() + 1);

    if let Some(path) = baseline {
        let mut baseline_run = load_run_file(path)?;
        baseline_run.is_baseline = true;
        runs.push(baseline_run);
    }

    for path in results {
        runs.push(load_run_file(path)?);
    }

    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn baseline_is_prepended_and_flagged() {
        let dir = tempfile::tempdir().unwrap();
        let write_run = |name: &str| {
            let path = dir.path().join(format!("{name}.json"));
            let mut f = std::fs::File::create(&path).unwrap();
            write!(
                f,
                r#"{{"name": "{name}", "start_time": "2026-08-01T10:30:00Z", "test_results": []}}"#
            )
            .unwrap();
            path
        };

        let baseline_path = write_run("baseline");
        let run_path = write_run("nightly");

        let runs = load_runs(Some(&baseline_path), &[run_path]).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].name, "baseline");
        assert!(runs[0].is_baseline);
        assert_eq!(runs[1].name, "nightly");
        assert!(!runs[1].is_baseline);
    }

    #[test]
    fn runs_keep_caller_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = Vec::new();
        for name in ["third", "first", "second"] {
            let path = dir.path().join(format!("{name}.json"));
            let mut f = std::fs::File::create(&path).unwrap();
            write!(
                f,
                r#"{{"name": "{name}", "start_time": "2026-08-01T10:30:00Z", "test_results": []}}"#
            )
            .unwrap();
            paths.push(path);
        }

        let runs = load_runs(None, &paths).unwrap();
        let names: Vec<_> = runs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["third", "first", "second"]);
    }
}

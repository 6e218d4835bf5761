use anyhow::Result;
use perf_bench_report::cli;

// Main entry point
fn main() -> Result<()> {
    cli::handle_calls()
}

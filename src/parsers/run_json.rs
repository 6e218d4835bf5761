use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::RunResult;

/// Parse a single run result from its JSON representation.
pub fn parse_run(input: &str) -> Result<RunResult> {
    serde_json::from_str(input).context("Failed to parse run result JSON")
}

/// Load one run result file.
///
/// A run whose JSON carries an empty display name is named after the file
/// stem, mirroring how result files identify runs on the report axis.
pub fn load_run_file(path: &Path) -> Result<RunResult> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read run result file {}", path.display()))?;
    let mut run = parse_run(&content)
        .with_context(|| format!("Invalid run result file {}", path.display()))?;

    if run.name.is_empty() {
        run.name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
    }

    Ok(run)
}

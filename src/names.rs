use itertools::Itertools;

use crate::data::RunResult;

/// Maps an arbitrary display name to a key safe for grouping and for use in
/// generated identifiers: every character outside `[0-9a-zA-Z]` becomes `_`.
///
/// Two raw names that sanitize to the same key are treated as the same
/// entity across runs. This merge is deliberate; it groups the same test
/// across naming drift.
#[must_use]
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Sanitized names of all tests found anywhere in the run set, deduplicated
/// and sorted ascending. This fixes the row order of the report.
#[must_use]
pub fn distinct_test_names(runs: &[RunResult]) -> Vec<String> {
    runs.iter()
        .flat_map(|run| run.test_results.iter())
        .map(|test| sanitize(&test.test_name))
        .unique()
        .sorted()
        .collect()
}

/// Sanitized names of all sample groups found anywhere in the run set,
/// deduplicated and sorted ascending. This fixes the per-row column order.
#[must_use]
pub fn distinct_sample_group_names(runs: &[RunResult]) -> Vec<String> {
    runs.iter()
        .flat_map(|run| run.test_results.iter())
        .flat_map(|test| test.sample_group_results.iter())
        .map(|sg| sanitize(&sg.sample_group_name))
        .unique()
        .sorted()
        .collect()
}

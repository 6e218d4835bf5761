use crate::data::{RunResult, SampleGroupResult};
use crate::run_index::RunIndex;

/// Pass/fail classification of one run's bar in a sample-group chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartColor {
    Pass,
    Fail,
}

/// Classifies a single run's result for a sample group.
///
/// Fail requires a present sample group with its regression flag set;
/// a run with no matching sample group is never a failure.
#[must_use]
pub fn per_run_color(result: Option<&SampleGroupResult>) -> ChartColor {
    match result {
        Some(sg) if sg.regressed => ChartColor::Fail,
        _ => ChartColor::Pass,
    }
}

/// Per-run color classifications for a (test, sample group) pair, one entry
/// per run in run order.
#[must_use]
pub fn color_array(index: &RunIndex<'_>, test_name: &str, group_name: &str) -> Vec<ChartColor> {
    (0..index.run_count())
        .map(|run_idx| per_run_color(index.sample_group_in_run(run_idx, test_name, group_name)))
        .collect()
}

/// True if any run's matching sample group reports a regression for this
/// (test, sample group) pair.
#[must_use]
pub fn sample_group_has_regressions(
    index: &RunIndex<'_>,
    test_name: &str,
    group_name: &str,
) -> bool {
    (0..index.run_count()).any(|run_idx| {
        index
            .sample_group_in_run(run_idx, test_name, group_name)
            .map(|sg| sg.regressed)
            .unwrap_or(false)
    })
}

/// Test-level failure flag: a global OR across the whole run set over every
/// distinct sample-group name that has at least one sample anywhere for this
/// test. A test is flagged as soon as any historical run shows a regression
/// for any of its sample groups.
#[must_use]
pub fn test_has_any_failure(
    index: &RunIndex<'_>,
    test_name: &str,
    distinct_sample_group_names: &[String],
) -> bool {
    distinct_sample_group_names
        .iter()
        .filter(|group| index.sample_group_has_samples(test_name, group))
        .any(|group| sample_group_has_regressions(index, test_name, group))
}

/// Process-wide aggregate: did any sample group of any test in any run
/// regress. Drives the default state of the show-failed-only toggle.
#[must_use]
pub fn any_regressions(runs: &[RunResult]) -> bool {
    runs.iter().any(RunResult::has_regressions)
}

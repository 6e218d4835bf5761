use regex::Regex;
use thiserror::Error;

use crate::data::{RunResult, TypeMetadata};
use crate::filter::matches_any_filter;
use crate::names::{distinct_sample_group_names, distinct_test_names};
use crate::regression::{
    color_array, sample_group_has_regressions, test_has_any_failure, ChartColor,
};
use crate::run_index::RunIndex;
use crate::series::{build_series, SeriesSet};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("performance test run results list is empty, no report will be written")]
    NoRunResults,
}

/// Immutable inputs of one report generation, threaded through the pure
/// derive steps instead of being held as shared mutable state.
pub struct ReportContext<'a> {
    pub runs: &'a [RunResult],
    /// Digits after the decimal point for every formatted statistic.
    pub sig_figs: u8,
    /// False suppresses the baseline overlay everywhere.
    pub has_benchmark_results: bool,
    /// Optional regex filters restricting which distinct tests are reported.
    pub filters: &'a [Regex],
}

/// One x-axis entry: the run's display name plus its formatted start date
/// and time.
#[derive(Debug, Clone, PartialEq)]
pub struct RunLabel {
    pub name: String,
    pub date: String,
    pub time: String,
}

/// One sample-group chart: series, coloring, failure flag, and the display
/// metadata taken from the first run that has a match.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGroupBlock {
    /// Sanitized sample-group name; also the chart title.
    pub name: String,
    pub unit: String,
    pub aggregation_type: String,
    pub threshold: f64,
    pub sample_count: usize,
    pub colors: Vec<ChartColor>,
    pub series: SeriesSet,
    /// True if any run reported this sample group as regressed.
    pub regressed: bool,
}

impl SampleGroupBlock {
    /// The label shown for values of this chart: the unit when one is
    /// configured, otherwise the sample-group name itself.
    #[must_use]
    pub fn value_label(&self) -> &str {
        if self.unit.is_empty() || self.unit == "None" {
            &self.name
        } else {
            &self.unit
        }
    }
}

/// One report row: a distinct test with its populated sample groups.
#[derive(Debug, Clone, PartialEq)]
pub struct TestBlock {
    /// Sanitized test name.
    pub name: String,
    /// True iff at least one retained sample group regressed in any run.
    pub failed: bool,
    pub sample_groups: Vec<SampleGroupBlock>,
}

/// The assembled document structure handed to the rendering sink.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportModel {
    pub run_labels: Vec<RunLabel>,
    pub tests: Vec<TestBlock>,
    /// Did any test in this report fail. Lets the presentation layer decide
    /// the default state of the show-failed-only toggle.
    pub any_test_failures: bool,
    pub has_benchmark_results: bool,
    pub metadata: Vec<TypeMetadata>,
}

impl ReportModel {
    /// True if any metadata category reports mismatched configuration
    /// fields across runs; renders the global warning banner.
    #[must_use]
    pub fn has_metadata_mismatches(&self) -> bool {
        self.metadata.iter().any(|m| m.has_mismatches)
    }

    /// True when every category reports zero valid results, meaning the
    /// "no metadata available" notice should be rendered instead of the
    /// configuration table.
    #[must_use]
    pub fn no_metadata_available(&self) -> bool {
        self.metadata.iter().all(|m| m.valid_result_count == 0)
    }
}

/// Assembles the full report model: distinct tests in sorted order, each
/// with its distinct sample groups in sorted order, skipping (test, sample
/// group) pairs with zero samples across all runs.
pub fn assemble(
    ctx: &ReportContext<'_>,
    metadata: Vec<TypeMetadata>,
) -> Result<ReportModel, ReportError> {
    if ctx.runs.is_empty() {
        return Err(ReportError::NoRunResults);
    }

    let index = RunIndex::new(ctx.runs);
    let test_names = distinct_test_names(ctx.runs);
    let group_names = distinct_sample_group_names(ctx.runs);

    let run_labels = ctx
        .runs
        .iter()
        .map(|run| RunLabel {
            name: run.name.clone(),
            date: run.start_time.format("%m/%d/%Y").to_string(),
            time: run.start_time.format("%H:%M:%S").to_string(),
        })
        .collect();

    let tests: Vec<TestBlock> = test_names
        .iter()
        .filter(|name| matches_any_filter(name, ctx.filters))
        .map(|test_name| {
            let sample_groups: Vec<SampleGroupBlock> = group_names
                .iter()
                .filter_map(|group_name| {
                    // Pairs with zero samples anywhere have no representative
                    // and are skipped.
                    let representative =
                        index.first_matching_sample_group(test_name, group_name)?;

                    Some(SampleGroupBlock {
                        name: group_name.clone(),
                        unit: representative.sample_unit.clone(),
                        aggregation_type: representative.aggregation_type.clone(),
                        threshold: representative.threshold,
                        sample_count: representative.sample_count,
                        colors: color_array(&index, test_name, group_name),
                        series: build_series(
                            &index,
                            test_name,
                            group_name,
                            ctx.sig_figs,
                            ctx.has_benchmark_results,
                        ),
                        regressed: sample_group_has_regressions(&index, test_name, group_name),
                    })
                })
                .collect();

            TestBlock {
                name: test_name.clone(),
                failed: test_has_any_failure(&index, test_name, &group_names),
                sample_groups,
            }
        })
        .collect();

    let any_test_failures = tests.iter().any(|t| t.failed);

    Ok(ReportModel {
        run_labels,
        tests,
        any_test_failures,
        has_benchmark_results: ctx.has_benchmark_results,
        metadata,
    })
}

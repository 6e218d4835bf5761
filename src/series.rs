use crate::run_index::RunIndex;

/// The seven per-run value sequences of one (test, sample group) pair.
///
/// Each sequence has exactly one entry per run, in run order. An entry is
/// either a fixed-point decimal string or `None`, the missing-data sentinel
/// the rendering layer serializes as `null`. Sequences are never jagged.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSet {
    pub aggregated: Vec<Option<String>>,
    pub median: Vec<Option<String>>,
    pub min: Vec<Option<String>>,
    pub max: Vec<Option<String>>,
    pub average: Vec<Option<String>>,
    pub stdev: Vec<Option<String>>,
    pub baseline: Vec<Option<String>>,
}

impl SeriesSet {
    /// All seven sequences, labeled, for rendering and invariant checks.
    #[must_use]
    pub fn labeled(&self) -> [(&'static str, &Vec<Option<String>>); 7] {
        [
            ("Aggregated", &self.aggregated),
            ("Median", &self.median),
            ("Min", &self.min),
            ("Max", &self.max),
            ("Average", &self.average),
            ("Stdev", &self.stdev),
            ("Baseline", &self.baseline),
        ]
    }
}

/// Formats a statistic as a fixed-point decimal string with exactly
/// `sig_figs` digits after the decimal point. Rust's formatting is
/// locale-invariant: period separator, no grouping.
#[must_use]
pub fn format_value(value: f64, sig_figs: u8) -> String {
    format!("{:.*}", sig_figs as usize, value)
}

/// The baseline overlay value for a (test, sample group) pair.
///
/// Sourced from the first run in the run sequence (run index 0) by sanitized
/// test- then sample-group-name lookup. This is deliberately not the run
/// whose `is_baseline` flag is set; callers arrange for the designated
/// baseline run to occupy index 0. Returns `None` when no benchmark results
/// were supplied or no match exists.
#[must_use]
pub fn baseline_value(
    index: &RunIndex<'_>,
    test_name: &str,
    group_name: &str,
    has_benchmark_results: bool,
    sig_figs: u8,
) -> Option<String> {
    if !has_benchmark_results || index.run_count() == 0 {
        return None;
    }
    index
        .sample_group_in_run(0, test_name, group_name)
        .map(|sg| format_value(sg.baseline_value, sig_figs))
}

/// Builds the seven series for a (test, sample group) pair.
///
/// For each run in order, the test is located first-match-wins and the
/// sample group within it by sanitized-name equality; a miss at either level
/// yields the sentinel for all six statistic slots. The baseline sequence is
/// evaluated once per pair and repeated across all run slots: it renders as
/// an overlay line, not a per-run bar.
#[must_use]
pub fn build_series(
    index: &RunIndex<'_>,
    test_name: &str,
    group_name: &str,
    sig_figs: u8,
    has_benchmark_results: bool,
) -> SeriesSet {
    let run_count = index.run_count();

    let mut aggregated = Vec::with_capacity(run_count);
    let mut median = Vec::with_capacity(run_count);
    let mut min = Vec::with_capacity(run_count);
    let mut max = Vec::with_capacity(run_count);
    let mut average = Vec::with_capacity(run_count);
    let mut stdev = Vec::with_capacity(run_count);

    for run_idx in 0..run_count {
        match index.sample_group_in_run(run_idx, test_name, group_name) {
            Some(sg) => {
                aggregated.push(Some(format_value(sg.aggregated_value, sig_figs)));
                median.push(Some(format_value(sg.median, sig_figs)));
                min.push(Some(format_value(sg.min, sig_figs)));
                max.push(Some(format_value(sg.max, sig_figs)));
                average.push(Some(format_value(sg.average, sig_figs)));
                stdev.push(Some(format_value(sg.standard_deviation, sig_figs)));
            }
            None => {
                aggregated.push(None);
                median.push(None);
                min.push(None);
                max.push(None);
                average.push(None);
                stdev.push(None);
            }
        }
    }

    let baseline_entry = baseline_value(index, test_name, group_name, has_benchmark_results, sig_figs);
    let baseline = vec![baseline_entry; run_count];

    SeriesSet {
        aggregated,
        median,
        min,
        max,
        average,
        stdev,
        baseline,
    }
}

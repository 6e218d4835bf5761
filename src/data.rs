use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One complete performance-test execution.
///
/// Runs are supplied by the run provider in a fixed order; that order becomes
/// the horizontal axis of every chart in the report.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunResult {
    /// Display name of the run, typically derived from the result file.
    pub name: String,
    pub start_time: DateTime<Utc>,
    /// Marks this run as the designated baseline run. At most one run should
    /// carry this flag; exclusivity is not enforced here.
    #[serde(default)]
    pub is_baseline: bool,
    #[serde(default)]
    pub test_results: Vec<TestResult>,
}

/// A single named test inside a run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestResult {
    pub test_name: String,
    #[serde(default)]
    pub sample_group_results: Vec<SampleGroupResult>,
}

/// One named sample group within a test, with its precomputed statistics.
///
/// All statistics arrive precomputed from upstream; this crate never reduces
/// raw samples. The regression flag is likewise upstream's verdict against
/// the threshold and is only propagated here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SampleGroupResult {
    pub sample_group_name: String,
    pub sample_unit: String,
    pub aggregation_type: String,
    pub threshold: f64,
    pub sample_count: usize,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub average: f64,
    pub standard_deviation: f64,
    /// The statistic charted by default; may equal any of the others
    /// depending on upstream configuration.
    pub aggregated_value: f64,
    pub baseline_value: f64,
    #[serde(default)]
    pub regressed: bool,
}

/// A category of configuration metadata captured per run, as produced by the
/// external metadata processor. Consumed flags-only: this crate performs no
/// mismatch computation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypeMetadata {
    pub type_name: String,
    #[serde(default)]
    pub has_mismatches: bool,
    #[serde(default)]
    pub valid_result_count: usize,
    #[serde(default)]
    pub field_groups: Vec<FieldGroup>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldGroup {
    pub field_name: String,
    #[serde(default)]
    pub has_mismatches: bool,
    #[serde(default)]
    pub values: Vec<FieldValue>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldValue {
    pub value: String,
    pub run_name: String,
    #[serde(default)]
    pub source_path: String,
    #[serde(default)]
    pub is_mismatched: bool,
}

impl RunResult {
    /// True if any sample group in any test of this run reports a regression.
    #[must_use]
    pub fn has_regressions(&self) -> bool {
        self.test_results
            .iter()
            .flat_map(|t| t.sample_group_results.iter())
            .any(|sg| sg.regressed)
    }
}

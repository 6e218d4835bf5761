//! Shared constructors for unit-test data.

use chrono::{TimeZone, Utc};

use crate::data::{RunResult, SampleGroupResult, TestResult};

pub fn sample_group(name: &str, regressed: bool) -> SampleGroupResult {
    SampleGroupResult {
        sample_group_name: name.to_string(),
        sample_unit: "Millisecond".to_string(),
        aggregation_type: "Median".to_string(),
        threshold: 0.15,
        sample_count: 100,
        min: 10.0,
        max: 20.0,
        median: 15.0,
        average: 15.0,
        standard_deviation: 1.0,
        aggregated_value: 15.0,
        baseline_value: 15.0,
        regressed,
    }
}

pub fn test_result(name: &str, sample_groups: Vec<SampleGroupResult>) -> TestResult {
    TestResult {
        test_name: name.to_string(),
        sample_group_results: sample_groups,
    }
}

pub fn run(name: &str, test_results: Vec<TestResult>) -> RunResult {
    RunResult {
        name: name.to_string(),
        start_time: Utc.with_ymd_and_hms(2026, 8, 1, 10, 30, 0).unwrap(),
        is_baseline: false,
        test_results,
    }
}

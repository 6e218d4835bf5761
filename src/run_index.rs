use std::collections::HashMap;

use crate::data::{RunResult, SampleGroupResult, TestResult};
use crate::names::sanitize;

/// Per-run lookup tables from sanitized name to entity.
///
/// Built once per report generation so that series construction does not
/// re-scan every run's test list for every (test, sample group) pair.
/// Matching is first-match-wins: if two entries in one run sanitize to the
/// same key, the earlier one is kept.
pub struct RunIndex<'a> {
    runs: &'a [RunResult],
    tests_by_name: Vec<HashMap<String, IndexedTest<'a>>>,
}

struct IndexedTest<'a> {
    test: &'a TestResult,
    groups_by_name: HashMap<String, &'a SampleGroupResult>,
}

impl<'a> RunIndex<'a> {
    #[must_use]
    pub fn new(runs: &'a [RunResult]) -> RunIndex<'a> {
        let tests_by_name = runs
            .iter()
            .map(|run| {
                let mut tests: HashMap<String, IndexedTest<'a>> = HashMap::new();
                for test in &run.test_results {
                    let mut groups_by_name: HashMap<String, &SampleGroupResult> = HashMap::new();
                    for sg in &test.sample_group_results {
                        groups_by_name
                            .entry(sanitize(&sg.sample_group_name))
                            .or_insert(sg);
                    }
                    tests
                        .entry(sanitize(&test.test_name))
                        .or_insert(IndexedTest {
                            test,
                            groups_by_name,
                        });
                }
                tests
            })
            .collect();

        RunIndex {
            runs,
            tests_by_name,
        }
    }

    #[must_use]
    pub fn runs(&self) -> &'a [RunResult] {
        self.runs
    }

    #[must_use]
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// The matching test result in the given run, if any.
    #[must_use]
    pub fn test_in_run(&self, run_idx: usize, test_name: &str) -> Option<&'a TestResult> {
        self.tests_by_name[run_idx]
            .get(test_name)
            .map(|indexed| indexed.test)
    }

    /// The matching sample group of the matching test in the given run.
    #[must_use]
    pub fn sample_group_in_run(
        &self,
        run_idx: usize,
        test_name: &str,
        group_name: &str,
    ) -> Option<&'a SampleGroupResult> {
        self.tests_by_name[run_idx]
            .get(test_name)
            .and_then(|indexed| indexed.groups_by_name.get(group_name).copied())
    }

    /// Per-run test results matching the given sanitized test name, in run
    /// order. Runs without a match are absent here; padding to the full run
    /// count happens during series construction.
    #[must_use]
    pub fn results_for_test(&self, test_name: &str) -> Vec<&'a TestResult> {
        (0..self.run_count())
            .filter_map(|run_idx| self.test_in_run(run_idx, test_name))
            .collect()
    }

    /// True if any run has a matching test carrying a matching sample group.
    #[must_use]
    pub fn sample_group_has_samples(&self, test_name: &str, group_name: &str) -> bool {
        (0..self.run_count())
            .any(|run_idx| self.sample_group_in_run(run_idx, test_name, group_name).is_some())
    }

    /// The first run's matching sample group, used as the representative
    /// source for display metadata (unit, aggregation type, threshold,
    /// sample count). Later runs are assumed consistent, not diffed.
    #[must_use]
    pub fn first_matching_sample_group(
        &self,
        test_name: &str,
        group_name: &str,
    ) -> Option<&'a SampleGroupResult> {
        (0..self.run_count())
            .find_map(|run_idx| self.sample_group_in_run(run_idx, test_name, group_name))
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use unindent::unindent;

use perf_bench_report::parsers::{load_metadata_file, load_run_file};
use perf_bench_report::reporting::{write_report, ReportSettings};

fn write_run_file(dir: &Path, name: &str, start_time: &str, regressed: bool) -> PathBuf {
    let path = dir.join(format!("{name}.json"));
    let content = unindent(&format!(
        r#"
        {{
          "name": "{name}",
          "start_time": "{start_time}",
          "test_results": [
            {{
              "test_name": "Frame Time",
              "sample_group_results": [
                {{
                  "sample_group_name": "FPS",
                  "sample_unit": "Millisecond",
                  "aggregation_type": "Median",
                  "threshold": 0.15,
                  "sample_count": 100,
                  "min": 10.0,
                  "max": 20.0,
                  "median": 15.0,
                  "average": 15.0,
                  "standard_deviation": 1.0,
                  "aggregated_value": 15.0,
                  "baseline_value": 15.0,
                  "regressed": {regressed}
                }}
              ]
            }}
          ]
        }}
        "#
    ));
    fs::write(&path, content).unwrap();
    path
}

fn default_settings(report_dir: PathBuf) -> ReportSettings {
    ReportSettings {
        report_dir,
        sig_figs: 2,
        has_benchmark_results: true,
        title: None,
        filters: vec![],
    }
}

#[test]
fn report_for_two_runs_end_to_end() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();

    let run_a = write_run_file(input_dir.path(), "RunA", "2026-08-01T10:30:00Z", false);
    let run_b = write_run_file(input_dir.path(), "RunB", "2026-08-02T10:30:00Z", true);

    let runs = vec![
        load_run_file(&run_a).unwrap(),
        load_run_file(&run_b).unwrap(),
    ];

    let path = write_report(&runs, vec![], &default_settings(output_dir.path().into())).unwrap();

    assert!(path.starts_with(output_dir.path().join("PerfBenchmarkReport")));
    assert!(path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("PerfBenchmarkReport_"));

    let html = fs::read_to_string(&path).unwrap();
    // Distinct names are sanitized, the chart id combines test and group.
    assert!(html.contains("Frame_Time"));
    assert!(html.contains("Frame_Time_FPS"));
    // Formatted with two fractional digits, invariant decimal point.
    assert!(html.contains("15.00"));
    // Both run labels land on the axis.
    assert!(html.contains("RunA"));
    assert!(html.contains("RunB"));
    // RunB regressed, so passing rows start hidden.
    assert!(html.contains("<script>toggleChartsWithNoFailures();</script>"));
}

#[test]
fn run_without_the_test_stays_green_and_padded() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();

    let run_a = write_run_file(input_dir.path(), "RunA", "2026-08-01T10:30:00Z", false);
    let empty_path = input_dir.path().join("RunEmpty.json");
    fs::write(
        &empty_path,
        r#"{"name": "RunEmpty", "start_time": "2026-08-02T10:30:00Z", "test_results": []}"#,
    )
    .unwrap();

    let runs = vec![
        load_run_file(&run_a).unwrap(),
        load_run_file(&empty_path).unwrap(),
    ];

    let path = write_report(&runs, vec![], &default_settings(output_dir.path().into())).unwrap();
    let html = fs::read_to_string(&path).unwrap();

    // The missing run appears on the axis and as a null series slot.
    assert!(html.contains("RunEmpty"));
    assert!(html.contains("null"));
    // No failures anywhere: nothing is auto-hidden.
    assert!(!html.contains("<script>toggleChartsWithNoFailures();</script>"));
}

#[test]
fn metadata_mismatch_warning_is_rendered() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();

    let run_a = write_run_file(input_dir.path(), "RunA", "2026-08-01T10:30:00Z", false);
    let runs = vec![load_run_file(&run_a).unwrap()];

    let metadata_path = input_dir.path().join("metadata.json");
    fs::write(
        &metadata_path,
        unindent(
            r#"
            [
              {
                "type_name": "Player Settings",
                "has_mismatches": true,
                "valid_result_count": 1,
                "field_groups": [
                  {
                    "field_name": "GpuSkinning",
                    "has_mismatches": true,
                    "values": [
                      {"value": "True", "run_name": "RunA", "source_path": "results/a", "is_mismatched": false},
                      {"value": "False", "run_name": "RunB", "source_path": "results/b", "is_mismatched": true}
                    ]
                  }
                ]
              }
            ]
            "#,
        ),
    )
    .unwrap();

    let metadata = load_metadata_file(&metadata_path).unwrap();
    let path = write_report(&runs, metadata, &default_settings(output_dir.path().into())).unwrap();
    let html = fs::read_to_string(&path).unwrap();

    assert!(html.contains("Mismatched test configurations present"));
    assert!(html.contains("GpuSkinning"));
}

#[test]
fn empty_run_collection_is_rejected_without_output() {
    let output_dir = TempDir::new().unwrap();
    let result = write_report(&[], vec![], &default_settings(output_dir.path().into()));
    assert!(result.is_err());
    assert!(fs::read_dir(output_dir.path()).unwrap().next().is_none());
}

#[test]
fn baseline_suppressed_without_benchmark_results() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();

    let run_a = write_run_file(input_dir.path(), "RunA", "2026-08-01T10:30:00Z", false);
    let runs = vec![load_run_file(&run_a).unwrap()];

    let mut settings = default_settings(output_dir.path().into());
    settings.has_benchmark_results = false;

    let path = write_report(&runs, vec![], &settings).unwrap();
    let html = fs::read_to_string(&path).unwrap();
    assert!(!html.contains("Baseline (Millisecond)"));
    assert!(html.contains("no baseline results"));
}

use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use plotly::{
    common::{DashType, Font, Line, Marker, Mode, Title, Visible},
    layout::Axis,
    Bar, Configuration, Layout, Plot, Scatter,
};
use regex::Regex;

use crate::data::{RunResult, TypeMetadata};
use crate::model::{assemble, ReportContext, ReportModel, SampleGroupBlock, TestBlock};
use crate::regression::ChartColor;

/// Name of the report folder and the file-name prefix of every report.
const REPORT_NAME: &str = "PerfBenchmarkReport";

const DEFAULT_REPORT_TITLE: &str = "Performance Benchmark Report";

const NO_METADATA_NOTICE: &str = "Metadata not available for any of the test runs.";

// Chart color constants, shared by bars and the legend.
/// RGBA color for regressed bars. Red with 50% opacity.
const FAIL_COLOR: &str = "rgba(255, 99, 132, 0.5)";

/// RGBA color for passing bars. Blue with 50% opacity.
const PASS_COLOR: &str = "rgba(54, 162, 235, 0.5)";

/// Color of the baseline overlay line.
const BASELINE_COLOR: &str = "rgb(255, 159, 64)";

/// Line width for the baseline overlay.
const BASELINE_LINE_WIDTH: f64 = 2.0;

/// Default HTML scaffold. Placeholders are substituted during rendering;
/// the plotly.js library script tags are emitted once in the head, each
/// chart body carries its own inline div + script.
const DEFAULT_HTML_TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
    <meta charset="utf-8"/>
    <title>{{TITLE}}</title>
    {{PLOTLY_HEAD}}
    <style>{{CUSTOM_CSS}}</style>
    <script>{{TOGGLE_SCRIPT}}</script>
</head>
<body>
    <div class="title"><h1>{{TITLE}}</h1></div>
    {{WARNING_SECTION}}
    {{CONFIG_SECTION}}
    {{TOGGLE_SECTION}}
    {{REPORT_BODY}}
    <div class="footer">Generated {{TIMESTAMP}}</div>
    {{ONLOAD_SCRIPT}}
</body>
</html>"#;

const DEFAULT_CSS: &str = r#"
body { font-family: sans-serif; margin: 2em; }
.title h1 { margin-bottom: 0.2em; }
.testname { background: #f0f0f0; padding: 0.5em 1em; margin-top: 2em; }
.chartcell { margin: 1em 0 2em 0; }
.configwarning { color: #b00020; font-weight: bold; }
.typename { font-weight: bold; margin-top: 1em; }
.typenamewarning { font-weight: bold; margin-top: 1em; color: #b00020; }
.fieldgroup { margin: 0.2em 0; }
.fieldgroupwarning { margin: 0.2em 0; color: #b00020; }
.fieldname { display: inline-block; min-width: 18em; }
.fieldvalue { display: inline-block; }
.warningtable { border-collapse: collapse; margin: 0.3em 0 0.6em 1em; }
.warningtable th, .warningtable td { border: 1px solid #ccc; padding: 0.2em 0.6em; }
.targetvalue { font-weight: bold; }
.showfailedtests { margin: 1.5em 0 0.5em 0; }
.footer { margin-top: 3em; color: #888; font-size: 0.8em; }
"#;

/// Hides/shows every element carrying the `nofailures` class. Rows and
/// charts without failures are the ones eligible for hiding.
const TOGGLE_SCRIPT: &str = r#"
function toggleChartsWithNoFailures() {
    var x = document.getElementsByClassName("nofailures");
    for (var i = 0; i < x.length; i++) {
        if (x[i].style.display === "none") {
            x[i].removeAttribute("style");
        } else {
            x[i].style.display = "none";
        }
    }
}
"#;

/// Output location and formatting knobs of one report invocation.
pub struct ReportSettings {
    /// Base directory; the report folder is created inside it.
    pub report_dir: PathBuf,
    pub sig_figs: u8,
    /// False suppresses baseline overlays and the show-failed-only toggle.
    pub has_benchmark_results: bool,
    pub title: Option<String>,
    pub filters: Vec<Regex>,
}

fn color_css(color: ChartColor) -> &'static str {
    match color {
        ChartColor::Pass => PASS_COLOR,
        ChartColor::Fail => FAIL_COLOR,
    }
}

/// Stable element id of one sample-group chart.
fn chart_id(test_name: &str, group_name: &str) -> String {
    format!("{}_{}", test_name, group_name)
}

/// One bar plot per (test, sample group) pair: aggregated values as bars
/// colored by pass/fail, the remaining statistics as legend-only traces,
/// and the baseline as a dashed overlay line.
fn sample_group_plot(model: &ReportModel, block: &SampleGroupBlock) -> Plot {
    let run_count = model.run_labels.len();
    let x: Vec<usize> = (0..run_count).collect();

    let tick_values: Vec<f64> = (0..run_count).map(|i| i as f64).collect();
    let tick_text: Vec<String> = model
        .run_labels
        .iter()
        .map(|label| format!("{}<br>{} {}", label.name, label.date, label.time))
        .collect();

    let hover_texts: Vec<String> = block
        .colors
        .iter()
        .zip(block.series.stdev.iter())
        .map(|(color, stdev)| {
            let verdict = match color {
                ChartColor::Fail => "regressed",
                ChartColor::Pass => "within threshold",
            };
            format!(
                "{}<br>Threshold: {}<br>Standard deviation: {}<br>Sample count: {}",
                verdict,
                block.threshold,
                stdev.as_deref().unwrap_or("null"),
                block.sample_count
            )
        })
        .collect();

    let marker_colors: Vec<String> = block
        .colors
        .iter()
        .map(|c| color_css(*c).to_string())
        .collect();

    let mut plot = Plot::new();
    plot.set_configuration(Configuration::default().responsive(true).fill_frame(false));

    let bars = Bar::new(x.clone(), block.series.aggregated.clone())
        .name(block.value_label())
        .marker(Marker::new().color_array(marker_colors))
        .hover_text_array(hover_texts)
        .show_legend(true);
    plot.add_trace(bars);

    // The non-default statistics stay hidden until picked from the legend.
    let hidden_stats = [
        ("Median", &block.series.median),
        ("Min", &block.series.min),
        ("Max", &block.series.max),
        ("Average", &block.series.average),
        ("Stdev", &block.series.stdev),
    ];
    for (label, series) in hidden_stats {
        let trace = Scatter::new(x.clone(), series.clone())
            .name(format!("{} ({})", label, block.value_label()))
            .mode(Mode::LinesMarkers)
            .visible(Visible::LegendOnly)
            .show_legend(true);
        plot.add_trace(trace);
    }

    if model.has_benchmark_results && block.series.baseline.iter().any(Option::is_some) {
        let baseline = Scatter::new(x, block.series.baseline.clone())
            .name(format!("Baseline ({})", block.value_label()))
            .mode(Mode::Lines)
            .line(
                Line::new()
                    .color(BASELINE_COLOR)
                    .dash(DashType::Dash)
                    .width(BASELINE_LINE_WIDTH),
            )
            .show_legend(true);
        plot.add_trace(baseline);
    }

    let x_axis = Axis::new()
        .tick_values(tick_values)
        .tick_text(tick_text)
        .tick_angle(45.0)
        .tick_font(Font::new().family("monospace"));
    let y_axis = Axis::new().title(Title::from(
        format!("{} {}", block.aggregation_type, block.value_label()).as_str(),
    ));
    let layout = Layout::new()
        .title(Title::from(block.name.as_str()))
        .x_axis(x_axis)
        .y_axis(y_axis);
    plot.set_layout(layout);

    plot
}

fn render_test_section(model: &ReportModel, test: &TestBlock) -> String {
    let test_class = if test.failed { "" } else { " nofailures" };
    let mut section = format!(
        "<div class=\"testname{}\"><h5>Test Name:</h5><h3>{}</h3></div>\n",
        test_class, test.name
    );

    for block in &test.sample_groups {
        let chart_class = if block.regressed { "" } else { " nofailures" };
        let plot = sample_group_plot(model, block);
        let id = chart_id(&test.name, &block.name);
        section.push_str(&format!(
            "<div class=\"chartcell{}\">{}</div>\n",
            chart_class,
            plot.to_inline_html(Some(&id))
        ));
    }

    section
}

/// The configuration table: one block per metadata category, mismatched
/// field groups expanded into a per-run value table.
fn render_config_section(metadata: &[TypeMetadata]) -> String {
    if metadata.is_empty() {
        return format!("<div class=\"fieldname\">{}</div>\n", NO_METADATA_NOTICE);
    }

    let mut out = String::from("<div class=\"testconfig\">\n");
    for type_metadata in metadata {
        let class = if type_metadata.has_mismatches {
            "typenamewarning"
        } else {
            "typename"
        };
        out.push_str(&format!(
            "<hr/><div class=\"{}\">{}</div>\n",
            class, type_metadata.type_name
        ));

        if type_metadata.field_groups.is_empty() {
            out.push_str(&format!(
                "<div class=\"fieldname\">{}</div>\n",
                NO_METADATA_NOTICE
            ));
            continue;
        }

        for field_group in &type_metadata.field_groups {
            if field_group.has_mismatches {
                out.push_str("<div class=\"fieldgroupwarning\">");
                out.push_str(&format!(
                    "<div class=\"fieldname\">{}</div>\n",
                    field_group.field_name
                ));
                out.push_str("<table class=\"warningtable\">");
                out.push_str("<tr><th>Value</th><th>Result File</th><th>Path</th></tr>");
                for (i, value) in field_group.values.iter().enumerate() {
                    // The first row is the configuration compared against.
                    let cell_class = if i == 0 || !value.is_mismatched {
                        " class=\"targetvalue\""
                    } else {
                        ""
                    };
                    out.push_str(&format!(
                        "<tr><td{0}>{1}</td><td{0}>{2}</td><td{0}>{3}</td></tr>",
                        cell_class, value.value, value.run_name, value.source_path
                    ));
                }
                out.push_str("</table></div>\n");
            } else {
                let value = field_group
                    .values
                    .first()
                    .map(|v| v.value.as_str())
                    .unwrap_or("");
                out.push_str(&format!(
                    "<div class=\"fieldgroup\"><div class=\"fieldname\">{}</div><div class=\"fieldvalue\">{}</div></div>\n",
                    field_group.field_name, value
                ));
            }
        }
    }
    out.push_str("</div>\n");
    out
}

fn render_warning_section(model: &ReportModel) -> String {
    if model.has_metadata_mismatches() {
        "<div class=\"configwarning\">Mismatched test configurations present</div>".to_string()
    } else if model.no_metadata_available() {
        format!("<div class=\"configwarning\">{}</div>", NO_METADATA_NOTICE)
    } else {
        String::new()
    }
}

fn render_toggle_section(model: &ReportModel) -> String {
    if model.has_benchmark_results {
        let checked = if model.any_test_failures {
            " checked"
        } else {
            ""
        };
        format!(
            "<div class=\"showfailedtests\"><label>Show failed tests only \
             <input type=\"checkbox\" onclick=\"toggleChartsWithNoFailures()\"{}></label></div>",
            checked
        )
    } else {
        "<div class=\"showfailedtests\"><label>Show failed tests only \
         <input type=\"checkbox\" disabled> \
         (no failed tests to show because there are no baseline results)</label></div>"
            .to_string()
    }
}

/// Renders the assembled model into one self-contained HTML document.
fn render(model: &ReportModel, title: &str) -> String {
    let report_body: String = model
        .tests
        .iter()
        .map(|test| render_test_section(model, test))
        .collect();

    // Runs with failures start with passing rows hidden.
    let onload_script = if model.any_test_failures {
        "<script>toggleChartsWithNoFailures();</script>"
    } else {
        ""
    };

    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

    DEFAULT_HTML_TEMPLATE
        .replace("{{TITLE}}", title)
        .replace("{{PLOTLY_HEAD}}", &Plot::online_cdn_js())
        .replace("{{CUSTOM_CSS}}", DEFAULT_CSS)
        .replace("{{TOGGLE_SCRIPT}}", TOGGLE_SCRIPT)
        .replace("{{WARNING_SECTION}}", &render_warning_section(model))
        .replace("{{CONFIG_SECTION}}", &render_config_section(&model.metadata))
        .replace("{{TOGGLE_SECTION}}", &render_toggle_section(model))
        .replace("{{REPORT_BODY}}", &report_body)
        .replace("{{TIMESTAMP}}", &timestamp)
        .replace("{{ONLOAD_SCRIPT}}", onload_script)
}

/// Assembles the report model from the supplied runs and writes one
/// timestamped HTML report below `<report_dir>/PerfBenchmarkReport/`.
///
/// Returns the path of the written report. Fails without output when the
/// run collection is empty or the report directory cannot be created; a
/// failure after the file opened may leave a partial file behind.
pub fn write_report(
    runs: &[RunResult],
    metadata: Vec<TypeMetadata>,
    settings: &ReportSettings,
) -> Result<PathBuf> {
    let ctx = ReportContext {
        runs,
        sig_figs: settings.sig_figs,
        has_benchmark_results: settings.has_benchmark_results,
        filters: &settings.filters,
    };
    let model = assemble(&ctx, metadata)?;

    let title = settings.title.as_deref().unwrap_or(DEFAULT_REPORT_TITLE);
    let html = render(&model, title);

    let report_directory = settings.report_dir.join(REPORT_NAME);
    if let Err(e) = fs::create_dir_all(&report_directory) {
        log::error!(
            "Failed to create report directory {}: {}",
            report_directory.display(),
            e
        );
        return Err(e).with_context(|| {
            format!(
                "Failed to create report directory {}",
                report_directory.display()
            )
        });
    }

    let file_name = format!(
        "{}_{}.html",
        REPORT_NAME,
        Local::now().format("%Y-%m-%d_%H-%M-%S-%3f")
    );
    let report_path = report_directory.join(file_name);

    let mut file = match File::create(&report_path) {
        Ok(file) => file,
        Err(e) => {
            log::error!(
                "Failed to create report file {}: {}",
                report_path.display(),
                e
            );
            return Err(e).with_context(|| {
                format!("Failed to create report file {}", report_path.display())
            });
        }
    };

    log::info!("Writing report to {}", report_path.display());
    file.write_all(html.as_bytes())
        .with_context(|| format!("Failed to write report file {}", report_path.display()))?;

    Ok(report_path)
}

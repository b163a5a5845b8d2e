//! # HTML Reporting Module / HTML 报告模块
//!
//! This module handles the generation of HTML run reports.
//! It creates a single self-contained page with summary statistics, a table of
//! every test, the failure details and the benchmark comparisons.
//!
//! 此模块处理 HTML 运行报告的生成。
//! 它创建一个自包含的页面，包含摘要统计、所有测试的表格、失败详情以及基准测试比较。

use std::path::Path;

use anyhow::Result;
use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::core::models::{BenchmarkReport, BenchmarkStats, RunReport, TestStatus, UnitKind};
use crate::infra::clock::format_millis;
use crate::infra::fs::write_report;
use crate::infra::t;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; margin: 2em; color: #222; }
h1 { border-bottom: 2px solid #4caf50; padding-bottom: .3em; }
table { border-collapse: collapse; width: 100%; margin-bottom: 2em; }
th, td { border: 1px solid #ddd; padding: 6px 10px; text-align: left; }
th { background: #f5f5f5; }
.status-passed { color: #2e7d32; font-weight: bold; }
.status-failed { color: #c62828; font-weight: bold; }
.aborted { background: #ffebee; border: 1px solid #c62828; padding: 1em; }
.faster { font-weight: bold; }
code { background: #f5f5f5; padding: 0 3px; }
"#;

/// Renders the run report as an HTML document.
///
/// 将运行报告渲染为 HTML 文档。
pub fn render_html_report(report: &RunReport, locale: &str) -> String {
    let title = t!("html.title", locale = locale).to_string();
    let markup = html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (title) }
                style { (PreEscaped(HTML_STYLE)) }
            }
            body {
                h1 { (title) }
                p {
                    (t!("html.started", locale = locale).to_string()) ": "
                    (report.started_at.format("%Y-%m-%d %H:%M:%S").to_string())
                }
                @if let Some(reason) = &report.aborted {
                    div class="aborted" {
                        (t!("html.aborted", locale = locale).to_string()) " " code { (reason) }
                    }
                }
                (summary_table(report, locale))
                (units_table(report, locale))
                @if !report.failures.is_empty() {
                    (failures_table(report, locale))
                }
                @if !report.benchmarks.is_empty() {
                    (benchmarks_table(&report.benchmarks, locale))
                }
                @if !report.rejected.is_empty() {
                    h2 { (t!("html.rejected", locale = locale).to_string()) }
                    table {
                        tr {
                            th { (t!("html.unit", locale = locale).to_string()) }
                            th { (t!("html.reason", locale = locale).to_string()) }
                        }
                        @for rejection in &report.rejected {
                            tr {
                                td { code { (rejection.unit.qualified_name()) } }
                                td { (rejection.reason) }
                            }
                        }
                    }
                }
            }
        }
    };
    markup.into_string()
}

/// Generates the HTML report and writes it to `output_path`.
///
/// # Errors / 错误
/// Returns an error if the file (or its parent directory) cannot be written.
/// 如果无法写入文件（或其父目录），则返回错误。
pub fn generate_html_report(report: &RunReport, output_path: &Path, locale: &str) -> Result<()> {
    write_report(output_path, &render_html_report(report, locale))
}

fn summary_table(report: &RunReport, locale: &str) -> Markup {
    html! {
        h2 { (t!("html.summary", locale = locale).to_string()) }
        @if report.passed() {
            p class="status-passed" id="verdict" { (t!("html.verdict_passed", locale = locale).to_string()) }
        } @else {
            p class="status-failed" id="verdict" { (t!("html.verdict_failed", locale = locale).to_string()) }
        }
        table {
            tr {
                th { (t!("html.passed", locale = locale).to_string()) }
                th { (t!("html.failed", locale = locale).to_string()) }
                th { (t!("html.errors", locale = locale).to_string()) }
            }
            tr {
                td class="status-passed" { (report.passed_count()) }
                td class="status-failed" { (report.failed_count()) }
                td { (report.errors) }
            }
        }
    }
}

fn units_table(report: &RunReport, locale: &str) -> Markup {
    html! {
        h2 { (t!("html.units", locale = locale).to_string()) }
        table {
            tr {
                th { (t!("html.unit", locale = locale).to_string()) }
                th { (t!("html.kind", locale = locale).to_string()) }
                th { (t!("html.status", locale = locale).to_string()) }
                th { (t!("html.duration", locale = locale).to_string()) }
            }
            @for outcome in &report.outcomes {
                tr {
                    td { code { (outcome.unit.qualified_name()) } }
                    td {
                        @match outcome.unit.kind {
                            UnitKind::Fixture => { "fixture" }
                            UnitKind::Function => { "function" }
                        }
                    }
                    @match outcome.status {
                        TestStatus::Passed => {
                            td class="status-passed" { (t!("html.passed", locale = locale).to_string()) }
                        }
                        TestStatus::Failed => {
                            td class="status-failed" { (t!("html.failed", locale = locale).to_string()) }
                        }
                    }
                    td { (format_millis(outcome.duration)) }
                }
            }
        }
    }
}

fn failures_table(report: &RunReport, locale: &str) -> Markup {
    html! {
        h2 { (t!("html.failures", locale = locale).to_string()) }
        table {
            tr {
                th { (t!("html.unit", locale = locale).to_string()) }
                th { (t!("html.location", locale = locale).to_string()) }
                th { (t!("html.check", locale = locale).to_string()) }
                th { (t!("html.expected", locale = locale).to_string()) }
                th { (t!("html.actual", locale = locale).to_string()) }
            }
            @for failure in &report.failures {
                tr {
                    td { code { (failure.unit.qualified_name()) } }
                    td { (failure.location.to_string()) }
                    td { code { (failure.actual_expr) } " == " code { (failure.expected_expr) } }
                    td { (failure.expected) }
                    td { (failure.actual) }
                }
            }
        }
    }
}

fn benchmarks_table(benchmarks: &[BenchmarkReport], locale: &str) -> Markup {
    html! {
        h2 { (t!("html.benchmarks", locale = locale).to_string()) }
        table {
            tr {
                th { (t!("html.benchmark", locale = locale).to_string()) }
                th { (t!("html.label", locale = locale).to_string()) }
                th { (t!("html.iterations", locale = locale).to_string()) }
                th { (t!("html.total", locale = locale).to_string()) }
                th { (t!("html.min", locale = locale).to_string()) }
                th { (t!("html.max", locale = locale).to_string()) }
                th { (t!("html.mean", locale = locale).to_string()) }
                th { (t!("html.faster", locale = locale).to_string()) }
            }
            @for bench in benchmarks {
                (contender_row(bench, &bench.first, locale))
                (contender_row(bench, &bench.second, locale))
            }
        }
    }
}

fn contender_row(bench: &BenchmarkReport, stats: &BenchmarkStats, locale: &str) -> Markup {
    let faster = std::ptr::eq(bench.faster(), stats);
    let (min, max, mean) = match stats.mean() {
        Some(mean) => (
            format_millis(stats.min),
            format_millis(stats.max),
            format_millis(mean),
        ),
        None => ("-".to_string(), "-".to_string(), "-".to_string()),
    };
    html! {
        tr class=[faster.then_some("faster")] {
            td { (bench.name) }
            td { (stats.label) }
            td { (stats.iterations) }
            td { (format_millis(stats.total)) }
            td { (min) }
            td { (max) }
            td { (mean) }
            td {
                @if faster {
                    (t!("html.faster", locale = locale).to_string())
                }
            }
        }
    }
}

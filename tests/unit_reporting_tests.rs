mod common;

use std::time::Duration;

use chrono::Local;
use common::{recording_harness, register_math};
use fixture_bench::core::events::{Event, Reporter};
use fixture_bench::models::{
    BenchmarkReport, BenchmarkStats, FailureKind, FailureRecord, RunReport, SourceLocation, UnitId,
    UnitKind,
};
use fixture_bench::reporting::console::{ConsoleReporter, banner};
use fixture_bench::reporting::html::render_html_report;
use fixture_bench::reporting::{EventLog, JsonReporter, generate_json_report};
use tempfile::tempdir;

fn plain() {
    colored::control::set_override(false);
}

fn sample_failure() -> FailureRecord {
    FailureRecord {
        unit: UnitId::function("math", "add_bad"),
        location: SourceLocation {
            file: "tests/math.rs".to_string(),
            line: 12,
        },
        kind: FailureKind::Assertion,
        actual_expr: "2 + 2".to_string(),
        expected_expr: "equals(5)".to_string(),
        expected: "5".to_string(),
        actual: "4".to_string(),
    }
}

/// Every banner line is exactly 78 columns wide.
/// 横幅的每一行都恰好 78 列宽。
#[test]
fn test_banner_width() {
    let text = banner("Running 2 tests grouped in math");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    for line in lines {
        assert_eq!(line.chars().count(), 78);
    }
    assert!(text.contains("|    Running 2 tests grouped in math"));
}

#[test]
fn test_console_test_lines() {
    plain();
    let reporter = ConsoleReporter::new("en");

    let started = reporter.render(&Event::TestStarted {
        group: "math".to_string(),
        name: "add_ok".to_string(),
        index: 1,
        count: 2,
    });
    assert_eq!(started, vec!["  * Running math.add_ok (1/2)"]);

    let group = reporter.render(&Event::GroupStarted {
        name: "math".to_string(),
        kind: UnitKind::Function,
        count: 2,
    });
    assert!(group[0].contains("Running 2 tests grouped in math"));
}

#[test]
fn test_console_failure_block() {
    plain();
    let lines = ConsoleReporter::new("en").render(&Event::AssertionFailed {
        failure: sample_failure(),
    });
    let text = lines.join("\n");
    assert!(text.contains("! Error"));
    assert!(text.contains("tests/math.rs"));
    assert!(text.contains("12"));
    assert!(text.contains("\"2 + 2\" == \"equals(5)\""));
    assert!(text.contains("* Expected : 5"));
    assert!(text.contains("* Value is : 4"));
}

#[test]
fn test_console_summary() {
    plain();
    let reporter = ConsoleReporter::new("en");

    let success = reporter.render(&Event::RunSummary {
        errors: 0,
        failed: Vec::new(),
    });
    assert!(success.join("\n").contains("Every test passed"));

    let failure = reporter
        .render(&Event::RunSummary {
            errors: 1,
            failed: vec![UnitId::function("math", "add_bad")],
        })
        .join("\n");
    assert!(failure.contains("1 failed checks"));
    assert!(failure.contains("math::add_bad failed"));
}

/// Zero-iteration benchmarks print n/a instead of sentinel values.
#[test]
fn test_console_benchmark_without_iterations() {
    plain();
    let lines = ConsoleReporter::new("en").render(&Event::BenchmarkResult {
        name: "b".to_string(),
        label: "small vector".to_string(),
        total: Duration::ZERO,
        min: Duration::MAX,
        max: Duration::ZERO,
        mean: None,
    });
    let text = lines.join("\n");
    assert!(text.contains("small vector"));
    assert!(text.contains("n/a"));
}

/// Messages follow the reporter's locale.
/// 消息跟随报告器的语言设置。
#[test]
fn test_console_localized() {
    plain();
    let en = ConsoleReporter::new("en").render(&Event::BenchmarkWinner {
        name: "b".to_string(),
        label: "fast".to_string(),
    });
    let zh = ConsoleReporter::new("zh-CN").render(&Event::BenchmarkWinner {
        name: "b".to_string(),
        label: "fast".to_string(),
    });
    assert!(en[0].contains("fast was faster"));
    assert_ne!(en, zh);
    assert!(zh[0].contains("fast"));
}

#[test]
fn test_json_lines() {
    let mut reporter = JsonReporter::new(Vec::new());
    reporter.report(&Event::TestPassed {
        duration: Duration::from_millis(1),
    });
    reporter.report(&Event::RunSummary {
        errors: 0,
        failed: Vec::new(),
    });

    let output = String::from_utf8(reporter.into_inner()).unwrap();
    let lines: Vec<serde_json::Value> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["event"], "test_passed");
    assert_eq!(lines[1]["event"], "run_summary");
    assert_eq!(lines[1]["errors"], 0);
}

#[test]
fn test_event_log_clones_share_events() {
    let log = EventLog::new();
    let mut writer = log.clone();
    writer.report(&Event::BenchmarksStarted { count: 1 });

    assert_eq!(log.len(), 1);
    log.clear();
    assert!(writer.is_empty());
}

fn sample_report() -> RunReport {
    let (mut harness, _log) = recording_harness();
    register_math(&mut harness);
    let mut report = harness.run_all();

    let mut first = BenchmarkStats::new("small vector");
    first.record(Duration::from_micros(10));
    let mut second = BenchmarkStats::new("big vector");
    second.record(Duration::from_micros(30));
    report.benchmarks.push(BenchmarkReport {
        name: "sort_vectors".to_string(),
        repetitions: 1,
        first,
        second,
    });
    report
}

#[test]
fn test_html_report_contents() {
    let html = render_html_report(&sample_report(), "en");

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Test Harness Report"));
    assert!(html.contains("math.add_ok"));
    assert!(html.contains("math.add_bad"));
    assert!(html.contains("sort_vectors"));
    assert!(html.contains("<tr class=\"faster\">"));
}

#[test]
fn test_html_escapes_user_text() {
    let mut report = RunReport::new(Local::now());
    report.aborted = Some("<script>".to_string());
    let html = render_html_report(&report, "en");
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>"));
}

#[test]
fn test_json_report_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reports").join("run.json");

    generate_json_report(&sample_report(), &path).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["errors"], 1);
    assert_eq!(value["failed_units"][0]["name"], "add_bad");
    assert_eq!(value["benchmarks"][0]["first"]["label"], "small vector");
}

#[test]
fn test_html_verdict_follows_run_status() {
    let failing = render_html_report(&sample_report(), "en");
    assert!(failing.contains("Some checks failed"));

    let passing = render_html_report(&RunReport::new(Local::now()), "en");
    assert!(passing.contains("Every check passed."));
}

mod common;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use common::{recording_harness, register_math, started_units};
use fixture_bench::core::events::{Event, Reporter};
use fixture_bench::models::{FailureKind, TestStatus, UnitId, UnitKind};
use fixture_bench::{Checker, Fixture, Harness, HarnessConfig, almost_equals, equals};

/// One passing and one failing test: counter 1, the failure listed once.
/// 一个通过、一个失败的测试：计数器为 1，失败只列出一次。
#[test]
fn test_math_group_scenario() {
    let (mut harness, log) = recording_harness();
    register_math(&mut harness);

    let report = harness.run_all();

    assert_eq!(report.errors, 1);
    assert_eq!(report.exit_status(), 1);
    assert_eq!(report.failed_units, vec![UnitId::function("math", "add_bad")]);
    assert_eq!(report.failures[0].expected, "5");
    assert_eq!(report.failures[0].actual, "4");

    let events = log.events();
    assert_eq!(
        events[0],
        Event::GroupStarted {
            name: "math".to_string(),
            kind: UnitKind::Function,
            count: 2,
        }
    );
    assert_eq!(started_units(&events), vec!["math.add_ok", "math.add_bad"]);
    assert!(matches!(events[2], Event::TestPassed { .. }));
    assert!(matches!(events[4], Event::AssertionFailed { .. }));
    assert!(matches!(events[5], Event::TestFailed { .. }));
    assert_eq!(
        events.last(),
        Some(&Event::RunSummary {
            errors: 1,
            failed: vec![UnitId::function("math", "add_bad")],
        })
    );
}

/// An empty harness only emits the summary and reports success.
/// 空的 harness 只发出摘要并报告成功。
#[test]
fn test_empty_run() {
    let (mut harness, log) = recording_harness();

    let report = harness.run_all();

    assert_eq!(report.exit_status(), 0);
    assert!(report.passed());
    assert_eq!(
        log.events(),
        vec![Event::RunSummary {
            errors: 0,
            failed: Vec::new(),
        }]
    );
}

#[test]
fn test_groups_run_in_lexical_order() {
    let (mut harness, log) = recording_harness();
    harness.register_test("zeta", "z", |_| {});
    harness.register_test("alpha", "b", |_| {});
    harness.register_test("alpha", "a", |_| {});

    harness.run_all();

    assert_eq!(
        started_units(&log.events()),
        vec!["alpha.b", "alpha.a", "zeta.z"]
    );
}

/// A panicking test is recorded and the next test still runs.
/// panic 的测试会被记录，下一个测试照常运行。
#[test]
fn test_panic_is_isolated_per_unit() {
    let (mut harness, _log) = recording_harness();
    let ran = Rc::new(Cell::new(false));
    let flag = Rc::clone(&ran);

    harness.register_test("boom", "a_panics", |_| panic!("kaboom"));
    harness.register_test("boom", "b_runs", move |_| flag.set(true));

    let report = harness.run_all();

    assert!(ran.get());
    assert!(report.aborted.is_none());
    assert_eq!(report.errors, 1);
    assert_eq!(report.failures[0].kind, FailureKind::Panic);
    assert_eq!(report.failures[0].actual, "kaboom");
    assert_eq!(report.outcomes[0].status, TestStatus::Failed);
    assert_eq!(report.outcomes[1].status, TestStatus::Passed);
}

/// Every failed check counts, even several in one unit.
#[test]
fn test_counter_counts_checks_not_units() {
    let (mut harness, _log) = recording_harness();
    harness.register_test("g", "three_failures", |t| {
        t.check(false);
        t.check(false);
        t.assert_that(1, equals(2));
    });

    let report = harness.run_all();

    assert_eq!(report.errors, 3);
    assert_eq!(report.failed_units.len(), 1);
    assert_eq!(report.outcomes[0].errors, 3);
}

#[test]
fn test_exit_status_saturates() {
    let (mut harness, _log) = recording_harness();
    harness.register_test("g", "many", |t| {
        for _ in 0..300 {
            t.check(false);
        }
    });

    let report = harness.run_all();

    assert_eq!(report.errors, 300);
    assert_eq!(report.exit_status(), 255);
}

#[derive(Default)]
struct Coordinates {
    x: i32,
    y: i32,
}

impl Fixture for Coordinates {
    fn set_up(&mut self) {
        self.x = 45;
        self.y = 10;
    }

    fn run(&mut self, check: &Checker<'_>) {
        check.assert_that(self.x, equals(45));
        check.assert_that(self.y, equals(11));
    }
}

/// Fixtures run before function tests; their failures count the same way.
/// 夹具在函数测试之前运行；其失败以相同方式计数。
#[test]
fn test_fixtures_run_first() {
    let (mut harness, log) = recording_harness();
    harness.register_test("a_functions", "t", |_| {});
    harness.register_fixture::<Coordinates>("Coordinates", "set_up_state");

    let report = harness.run_all();

    assert_eq!(
        started_units(&log.events()),
        vec!["Coordinates.set_up_state", "a_functions.t"]
    );
    assert_eq!(report.errors, 1);
    assert_eq!(report.failed_units, vec![UnitId::fixture("Coordinates", "set_up_state")]);
}

struct Broken;

impl Default for Broken {
    fn default() -> Self {
        panic!("no memory")
    }
}

impl Fixture for Broken {
    fn run(&mut self, _check: &Checker<'_>) {}
}

#[test]
fn test_rejected_fixture_is_reported_not_run() {
    let (mut harness, log) = recording_harness();
    assert!(!harness.register_fixture::<Broken>("Broken", "never"));

    let report = harness.run_all();

    assert_eq!(report.errors, 0);
    assert_eq!(report.rejected.len(), 1);
    assert!(matches!(log.events()[0], Event::FixtureRejected { .. }));
    assert!(started_units(&log.events()).is_empty());
}

/// The slower contender loses; ties go to the first one.
/// 较慢的一方落败；耗时相同时第一个获胜。
#[test]
fn test_benchmark_winner() {
    let (mut harness, log) = recording_harness();
    harness.register_benchmark(
        "sleepy",
        3,
        || std::thread::sleep(Duration::from_millis(5)),
        "slow",
        || {},
        "fast",
    );

    let report = harness.run_all();

    let bench = &report.benchmarks[0];
    assert_eq!(bench.first.iterations, 3);
    assert_eq!(bench.second.iterations, 3);
    assert!(bench.first.min <= bench.first.max);
    assert_eq!(bench.faster().label, "fast");
    assert!(log.events().contains(&Event::BenchmarkWinner {
        name: "sleepy".to_string(),
        label: "fast".to_string(),
    }));
}

/// Zero repetitions execute nothing and keep the sentinel extremes.
/// 零次重复不执行任何内容，并保留哨兵极值。
#[test]
fn test_zero_repetitions() {
    let (mut harness, log) = recording_harness();
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    harness.register_benchmark("empty", 0, move || counter.set(counter.get() + 1), "a", || {}, "b");

    let report = harness.run_all();

    assert_eq!(calls.get(), 0);
    let bench = &report.benchmarks[0];
    assert_eq!(bench.first.min, Duration::MAX);
    assert_eq!(bench.first.max, Duration::ZERO);
    assert_eq!(bench.first.mean(), None);
    assert_eq!(bench.faster().label, "a");
    assert!(log.events().iter().any(|e| matches!(
        e,
        Event::BenchmarkResult { mean: None, .. }
    )));
}

#[test]
fn test_filter_and_disabled_benchmarks() {
    let (mut harness, log) = recording_harness();
    register_math(&mut harness);
    harness.register_test("other", "skipped", |t| {
        t.check(false);
    });
    harness.register_benchmark("math_bench", 1, || {}, "a", || {}, "b");
    harness.set_config(HarnessConfig {
        filter: Some("add_ok".to_string()),
        ..HarnessConfig::default()
    });

    let report = harness.run_all();
    assert_eq!(report.errors, 0);
    assert_eq!(started_units(&log.events()), vec!["math.add_ok"]);
    assert!(report.benchmarks.is_empty());

    let (mut harness, _log) = recording_harness();
    harness.register_benchmark("b", 1, || {}, "a", || {}, "b");
    harness.set_config(HarnessConfig {
        run_benchmarks: false,
        ..HarnessConfig::default()
    });
    assert!(harness.run_all().benchmarks.is_empty());
}

/// A benchmark panic escapes the unit boundaries and aborts the run.
/// 基准测试中的 panic 会逃逸出单元边界并中止运行。
#[test]
fn test_benchmark_panic_aborts_run() {
    let (mut harness, log) = recording_harness();
    harness.register_test("g", "ok", |_| {});
    harness.register_benchmark("bad", 1, || panic!("bench exploded"), "a", || {}, "b");

    let report = harness.run_all();

    assert_eq!(report.aborted.as_deref(), Some("bench exploded"));
    assert_eq!(report.exit_status(), 1);
    assert_eq!(report.outcomes.len(), 1);
    let events = log.events();
    assert_eq!(
        events.last(),
        Some(&Event::RunAborted {
            reason: "bench exploded".to_string(),
        })
    );
    assert!(!events.iter().any(|e| matches!(e, Event::RunSummary { .. })));
}

struct PanickingReporter;

impl Reporter for PanickingReporter {
    fn report(&mut self, _event: &Event) {
        panic!("reporter broke");
    }
}

#[test]
fn test_reporter_panic_aborts_quietly() {
    let mut harness = Harness::with_reporter(PanickingReporter);
    harness.register_test("g", "t", |_| {});

    let report = harness.run_all();

    assert_eq!(report.aborted.as_deref(), Some("reporter broke"));
}

/// The registry is drained; a second run has nothing to do.
/// 注册表会被清空；第二次运行没有任何内容。
#[test]
fn test_second_run_is_empty() {
    let (mut harness, _log) = recording_harness();
    register_math(&mut harness);

    assert_eq!(harness.run_all().errors, 1);
    let second = harness.run_all();
    assert_eq!(second.errors, 0);
    assert!(second.outcomes.is_empty());
}

/// Two harnesses in one process never share counters.
#[test]
fn test_independent_harnesses() {
    let (mut failing, _) = recording_harness();
    let (mut passing, _) = recording_harness();
    register_math(&mut failing);
    passing.register_test("g", "ok", |t| {
        t.check(true);
    });

    assert_eq!(failing.run_all().errors, 1);
    assert_eq!(passing.run_all().errors, 0);
}

/// A tolerance check at the edge of an unsigned type passes instead of panicking.
/// 无符号类型边缘的容差检查会通过，而不是 panic。
#[test]
fn test_tolerance_at_type_limits_passes() {
    let (mut harness, _log) = recording_harness();
    harness.register_test("limits", "unsigned_floor", |t| {
        t.assert_that(5_u8, almost_equals(0_u8, 10_u8));
        t.assert_that(i32::MAX, almost_equals(i32::MAX, 1));
    });

    let report = harness.run_all();

    assert_eq!(report.errors, 0);
    assert!(report.passed());
}

//! # Test Execution Engine Module / 测试执行引擎模块
//!
//! This module owns the `Harness`: the context object that holds the registry,
//! the configuration and the reporter, and drives a run from the first fixture
//! to the final summary.
//!
//! 此模块包含 `Harness`：持有注册表、配置与报告器的上下文对象，
//! 负责驱动一次从第一个夹具到最终摘要的完整运行。
//!
//! ## Run order / 运行顺序
//!
//! 1. fixtures, class by class
//! 2. function tests, group by group
//! 3. benchmarks, in registration order
//! 4. summary
//!
//! Each test unit runs behind its own panic boundary. A panic that escapes
//! those (a benchmark body, a reporter) ends the run early with partial results.
//!
//! 每个测试单元都在自己的 panic 边界内运行。逃逸出这些边界的 panic
//! （基准测试主体、报告器）会提前结束运行，并保留部分结果。

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::Local;

use crate::core::assertion::{Checker, Ledger};
use crate::core::config::HarnessConfig;
use crate::core::events::{Event, Reporter};
use crate::core::fixture::{Fixture, FixtureEntry};
use crate::core::models::{
    BenchmarkReport, BenchmarkStats, RunReport, TestOutcome, TestStatus, UnitId, UnitKind,
};
use crate::core::registry::{BenchmarkSpec, Contender, Registry, TestCase};
use crate::infra::clock::measure;
use crate::infra::unwind::catch_panic;
use crate::reporting::console::ConsoleReporter;

/// A self-contained test harness: registrations, settings and the event sink.
///
/// Several harnesses can coexist in one process; none of their state is global.
///
/// 一个自包含的测试 harness：注册内容、设置以及事件接收端。
/// 同一进程中可以共存多个 harness，它们的状态都不是全局的。
pub struct Harness {
    registry: Registry,
    config: HarnessConfig,
    reporter: Box<dyn Reporter>,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    /// A harness reporting to the console in English.
    pub fn new() -> Self {
        Self::with_reporter(ConsoleReporter::new("en"))
    }

    pub fn with_reporter(reporter: impl Reporter + 'static) -> Self {
        Self {
            registry: Registry::new(),
            config: HarnessConfig::default(),
            reporter: Box::new(reporter),
        }
    }

    pub fn set_reporter(&mut self, reporter: impl Reporter + 'static) {
        self.reporter = Box::new(reporter);
    }

    pub fn set_config(&mut self, config: HarnessConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// See [`Registry::register_test`].
    #[track_caller]
    pub fn register_test(
        &mut self,
        group: impl Into<String>,
        name: impl Into<String>,
        body: impl Fn(&Checker<'_>) + 'static,
    ) {
        self.registry.register_test(group, name, body);
    }

    /// See [`Registry::register_fixture`].
    #[track_caller]
    pub fn register_fixture<F>(
        &mut self,
        class_name: impl Into<String>,
        test_name: impl Into<String>,
    ) -> bool
    where
        F: Fixture + Default + 'static,
    {
        self.registry.register_fixture::<F>(class_name, test_name)
    }

    /// See [`Registry::register_fixture_with`].
    #[track_caller]
    pub fn register_fixture_with<F, Fac>(
        &mut self,
        class_name: impl Into<String>,
        test_name: impl Into<String>,
        factory: Fac,
    ) -> bool
    where
        F: Fixture + 'static,
        Fac: FnOnce() -> anyhow::Result<F>,
    {
        self.registry
            .register_fixture_with(class_name, test_name, factory)
    }

    /// Registers a benchmark timing `first` against `second`, each run
    /// `repetitions` times.
    ///
    /// 注册一个基准测试，比较 `first` 与 `second` 的耗时，各运行 `repetitions` 次。
    pub fn register_benchmark(
        &mut self,
        name: impl Into<String>,
        repetitions: u32,
        first: impl Fn() + 'static,
        first_label: impl Into<String>,
        second: impl Fn() + 'static,
        second_label: impl Into<String>,
    ) {
        self.registry.register_benchmark(
            name,
            repetitions,
            Contender::new(first_label, first),
            Contender::new(second_label, second),
        );
    }

    /// Runs fixtures, then function tests, then benchmarks, then the summary.
    ///
    /// The registry is drained: every unit runs at most once and a second call
    /// finds nothing left to run. `RunReport::errors` is the run's error
    /// counter, zero when everything passed.
    ///
    /// 依次运行夹具、函数测试、基准测试，最后输出摘要。
    /// 注册表会被清空：每个单元最多运行一次，再次调用将没有可运行的内容。
    /// `RunReport::errors` 为本次运行的错误计数器，全部通过时为零。
    pub fn run_all(&mut self) -> RunReport {
        let Registry {
            functions,
            fixtures,
            benchmarks,
            rejected,
        } = self.registry.take();

        let mut run = Run {
            ledger: Ledger::new(),
            report: RunReport::new(Local::now()),
            config: &self.config,
            reporter: self.reporter.as_mut(),
        };

        let result = catch_panic(|| {
            for rejection in &rejected {
                run.emit(Event::FixtureRejected {
                    unit: rejection.unit.clone(),
                    reason: rejection.reason.clone(),
                });
            }
            run.run_fixtures(fixtures);
            run.run_functions(&functions);
            run.run_benchmarks(&benchmarks);
        });

        match result {
            Ok(()) => run.summary(),
            Err(reason) => {
                run.report.aborted = Some(reason.clone());
                // The reporter may be what panicked; keep the abort itself quiet if so.
                let _ = catch_panic(|| run.emit(Event::RunAborted { reason }));
            }
        }

        let mut report = run.finish();
        report.rejected = rejected;
        report
    }
}

/// State of one run in progress.
struct Run<'h> {
    ledger: Ledger,
    report: RunReport,
    config: &'h HarnessConfig,
    reporter: &'h mut dyn Reporter,
}

/// Counter and failure-list positions taken just before a unit starts.
#[derive(Clone, Copy)]
struct Snapshot {
    errors: usize,
    failures: usize,
}

impl Run<'_> {
    fn emit(&mut self, event: Event) {
        self.reporter.report(&event);
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            errors: self.ledger.error_count(),
            failures: self.ledger.failure_len(),
        }
    }

    fn run_fixtures(&mut self, fixtures: BTreeMap<String, Vec<FixtureEntry>>) {
        for (class_name, mut entries) in fixtures {
            entries.retain(|entry| self.config.selects(&entry.id));
            if entries.is_empty() {
                continue;
            }
            let count = entries.len();
            self.emit(Event::GroupStarted {
                name: class_name.clone(),
                kind: UnitKind::Fixture,
                count,
            });

            for (index, entry) in entries.iter_mut().enumerate() {
                self.emit(Event::TestStarted {
                    group: class_name.clone(),
                    name: entry.id.name.clone(),
                    index: index + 1,
                    count,
                });

                let before = self.snapshot();
                let id = entry.id.clone();
                let duration = {
                    let checker = Checker::new(&id, &self.ledger);
                    match entry.drive(&checker) {
                        Ok(outcome) => {
                            for (phase, message) in &outcome.panics {
                                checker.record_panic(&entry.origin, phase, message);
                            }
                            outcome.duration
                        }
                        Err(e) => {
                            checker.record_panic(&entry.origin, "lifecycle", &e.to_string());
                            Duration::ZERO
                        }
                    }
                };
                self.finish_unit(id, before, duration);
            }
        }
    }

    fn run_functions(&mut self, functions: &BTreeMap<String, Vec<TestCase>>) {
        for (group, cases) in functions {
            let selected: Vec<&TestCase> = cases
                .iter()
                .filter(|case| self.config.selects(&case.id))
                .collect();
            if selected.is_empty() {
                continue;
            }
            let count = selected.len();
            self.emit(Event::GroupStarted {
                name: group.clone(),
                kind: UnitKind::Function,
                count,
            });

            for (index, case) in selected.into_iter().enumerate() {
                self.emit(Event::TestStarted {
                    group: group.clone(),
                    name: case.id.name.clone(),
                    index: index + 1,
                    count,
                });

                let before = self.snapshot();
                let duration = {
                    let checker = Checker::new(&case.id, &self.ledger);
                    let (result, duration) = measure(|| catch_panic(|| case.call(&checker)));
                    if let Err(message) = result {
                        checker.record_panic(&case.origin, "test body", &message);
                    }
                    duration
                };
                self.finish_unit(case.id.clone(), before, duration);
            }
        }
    }

    /// Compares the counter against its snapshot and emits the verdict.
    /// 将计数器与快照比较，并发出判定结果。
    fn finish_unit(&mut self, unit: UnitId, before: Snapshot, duration: Duration) {
        let errors = self.ledger.error_count() - before.errors;
        let status = if errors == 0 {
            self.emit(Event::TestPassed { duration });
            TestStatus::Passed
        } else {
            for failure in self.ledger.failures_since(before.failures) {
                self.emit(Event::AssertionFailed { failure });
            }
            self.emit(Event::TestFailed {
                group: unit.group.clone(),
                name: unit.name.clone(),
            });
            self.report.failed_units.push(unit.clone());
            TestStatus::Failed
        };

        self.report.outcomes.push(TestOutcome {
            unit,
            status,
            duration,
            errors,
        });
    }

    fn run_benchmarks(&mut self, benchmarks: &[BenchmarkSpec]) {
        let selected: Vec<&BenchmarkSpec> = benchmarks
            .iter()
            .filter(|spec| self.config.selects_benchmark(&spec.name))
            .collect();
        if selected.is_empty() {
            return;
        }
        self.emit(Event::BenchmarksStarted {
            count: selected.len(),
        });

        for spec in selected {
            self.emit(Event::BenchmarkStarted {
                name: spec.name.clone(),
            });
            let first = self.run_contender(spec, &spec.first);
            let second = self.run_contender(spec, &spec.second);
            let result = BenchmarkReport {
                name: spec.name.clone(),
                repetitions: spec.repetitions,
                first,
                second,
            };
            self.emit(Event::BenchmarkWinner {
                name: spec.name.clone(),
                label: result.faster().label.clone(),
            });
            self.report.benchmarks.push(result);
        }
    }

    fn run_contender(&mut self, spec: &BenchmarkSpec, contender: &Contender) -> BenchmarkStats {
        let mut stats = BenchmarkStats::new(contender.label.clone());
        for _ in 0..spec.repetitions {
            let ((), sample) = measure(|| contender.call());
            stats.record(sample);
        }
        self.emit(Event::BenchmarkResult {
            name: spec.name.clone(),
            label: stats.label.clone(),
            total: stats.total,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
        });
        stats
    }

    fn summary(&mut self) {
        self.emit(Event::RunSummary {
            errors: self.ledger.error_count(),
            failed: self.report.failed_units.clone(),
        });
    }

    fn finish(self) -> RunReport {
        let Run {
            ledger, mut report, ..
        } = self;
        let (errors, failures) = ledger.into_parts();
        report.errors = errors;
        report.failures = failures;
        report
    }
}

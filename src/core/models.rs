//! # Data Models Module / 数据模型模块
//!
//! This module defines the data structures produced by a harness run:
//! unit identities, failure records, per-unit outcomes, benchmark statistics
//! and the aggregate run report.
//!
//! 此模块定义了一次 harness 运行产生的数据结构：
//! 单元标识、失败记录、单元结果、基准测试统计以及汇总的运行报告。

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::Location;
use std::time::Duration;

/// Distinguishes free-function tests from fixture tests.
/// 区分函数测试与夹具（fixture）测试。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// A callable registered under a group name / 以分组名注册的可调用对象
    Function,
    /// A `Fixture` instance registered under a class name / 以类名注册的 `Fixture` 实例
    Fixture,
}

/// Identity of a registered unit: its group (or fixture class) and its name.
/// 已注册单元的标识：其分组（或夹具类名）及名称。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId {
    pub group: String,
    pub name: String,
    pub kind: UnitKind,
}

impl UnitId {
    pub fn function(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            kind: UnitKind::Function,
        }
    }

    pub fn fixture(class_name: impl Into<String>, test_name: impl Into<String>) -> Self {
        Self {
            group: class_name.into(),
            name: test_name.into(),
            kind: UnitKind::Fixture,
        }
    }

    /// The `group.name` form used by filters and console output.
    /// 过滤器和控制台输出使用的 `group.name` 形式。
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.group, self.name)
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.group, self.name)
    }
}

/// A file/line pair pointing at user code.
/// 指向用户代码的文件/行号。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
}

impl SourceLocation {
    pub fn from_caller(location: &Location<'_>) -> Self {
        Self {
            file: location.file().to_string(),
            line: location.line(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Why a failure record was written.
/// 写入失败记录的原因。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A comparator rejected the actual value / 比较器拒绝了实际值
    Assertion,
    /// A panic escaped the unit body, its set-up or its tear-down / panic 逃逸出单元主体、set-up 或 tear-down
    Panic,
}

/// One failed check, attributed to the unit that was running.
///
/// The `*_expr` fields hold the literal source text when the check came
/// through the `assert_that!` macro, otherwise the rendered values.
///
/// 一次失败的检查，归属于正在运行的单元。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub unit: UnitId,
    pub location: SourceLocation,
    pub kind: FailureKind,
    pub actual_expr: String,
    pub expected_expr: String,
    pub expected: String,
    pub actual: String,
}

/// Final state of a unit after it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    Passed,
    Failed,
}

/// The result of running a single function test or fixture test.
/// 运行单个函数测试或夹具测试的结果。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
    pub unit: UnitId,
    pub status: TestStatus,
    /// Wall-clock time of the unit body (the `run` phase for fixtures).
    /// 单元主体的实际耗时（对夹具而言仅为 `run` 阶段）。
    pub duration: Duration,
    /// How many errors the unit added to the run's counter.
    /// 该单元为本次运行的计数器增加的错误数。
    pub errors: usize,
}

impl TestOutcome {
    pub fn is_failure(&self) -> bool {
        self.status == TestStatus::Failed
    }
}

/// Aggregated timings of one benchmark contender.
///
/// With zero iterations `min` stays at `Duration::MAX` and `max` at
/// `Duration::ZERO`.
///
/// 一个基准测试参与者的汇总耗时。迭代次数为零时，`min` 保持为 `Duration::MAX`，
/// `max` 保持为 `Duration::ZERO`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkStats {
    pub label: String,
    pub iterations: u32,
    pub total: Duration,
    pub min: Duration,
    pub max: Duration,
}

impl BenchmarkStats {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            iterations: 0,
            total: Duration::ZERO,
            min: Duration::MAX,
            max: Duration::ZERO,
        }
    }

    /// Folds one measured iteration into the aggregate.
    /// 将一次测量的迭代合并到汇总中。
    pub fn record(&mut self, sample: Duration) {
        self.iterations += 1;
        self.total += sample;
        self.min = self.min.min(sample);
        self.max = self.max.max(sample);
    }

    /// Mean duration per iteration, `None` when nothing ran.
    /// 每次迭代的平均耗时；未运行时返回 `None`。
    pub fn mean(&self) -> Option<Duration> {
        (self.iterations > 0).then(|| self.total / self.iterations)
    }
}

/// Head-to-head result of one benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub name: String,
    pub repetitions: u32,
    pub first: BenchmarkStats,
    pub second: BenchmarkStats,
}

impl BenchmarkReport {
    /// The contender with the lower total time. Ties go to the first one.
    /// 总耗时较低的参与者。耗时相同时取第一个。
    pub fn faster(&self) -> &BenchmarkStats {
        if self.second.total < self.first.total {
            &self.second
        } else {
            &self.first
        }
    }
}

/// A fixture whose construction failed during registration.
/// 注册期间构造失败的夹具。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rejection {
    pub unit: UnitId,
    pub reason: String,
}

/// Everything a call to `Harness::run_all` produced.
///
/// `errors` is the run's error counter and doubles as the status code:
/// zero means every check passed.
///
/// 一次 `Harness::run_all` 调用产生的全部结果。
/// `errors` 即本次运行的错误计数器，同时作为状态码：零表示所有检查均通过。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: DateTime<Local>,
    pub errors: usize,
    pub failures: Vec<FailureRecord>,
    pub failed_units: Vec<UnitId>,
    pub outcomes: Vec<TestOutcome>,
    pub benchmarks: Vec<BenchmarkReport>,
    pub rejected: Vec<Rejection>,
    /// Set when a panic escaped every per-unit boundary and ended the run early.
    /// 当 panic 逃逸出所有单元边界并提前结束运行时设置。
    pub aborted: Option<String>,
}

impl RunReport {
    pub fn new(started_at: DateTime<Local>) -> Self {
        Self {
            started_at,
            errors: 0,
            failures: Vec::new(),
            failed_units: Vec::new(),
            outcomes: Vec::new(),
            benchmarks: Vec::new(),
            rejected: Vec::new(),
            aborted: None,
        }
    }

    pub fn passed(&self) -> bool {
        self.errors == 0 && self.aborted.is_none()
    }

    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_failure()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    /// Process exit status: the error count saturated to 255, or 1 for an
    /// aborted run that recorded no error.
    ///
    /// 进程退出码：错误计数（上限 255），若运行被中止且没有记录错误则为 1。
    pub fn exit_status(&self) -> u8 {
        match (self.errors, &self.aborted) {
            (0, Some(_)) => 1,
            (errors, _) => errors.min(u8::MAX as usize) as u8,
        }
    }
}

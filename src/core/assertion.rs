//! # Assertion Engine Module / 断言引擎模块
//!
//! Non-fatal checks. A failed check writes a `FailureRecord` to the run's
//! `Ledger` and bumps its error counter, then execution simply continues with
//! the next statement of the test body.
//!
//! 非致命检查。失败的检查会向本次运行的 `Ledger` 写入一条 `FailureRecord`
//! 并增加错误计数器，然后测试主体继续执行下一条语句。

use std::cell::{Cell, Ref, RefCell};
use std::fmt::Debug;
use std::panic::Location;

use crate::core::comparator::Comparator;
use crate::core::models::{FailureKind, FailureRecord, SourceLocation, UnitId};
use crate::infra::unwind::catch_panic;

/// Per-run error counter and failure list.
///
/// A fresh ledger is created by every `Harness::run_all`, so two runs (or two
/// harnesses) never share counters.
///
/// 每次运行的错误计数器与失败列表。每次 `Harness::run_all` 都会创建新的 ledger，
/// 因此两次运行（或两个 harness）之间不会共享计数器。
#[derive(Debug, Default)]
pub struct Ledger {
    errors: Cell<usize>,
    failures: RefCell<Vec<FailureRecord>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of the error counter.
    pub fn error_count(&self) -> usize {
        self.errors.get()
    }

    pub fn failures(&self) -> Ref<'_, Vec<FailureRecord>> {
        self.failures.borrow()
    }

    /// Appends a record and increments the counter by exactly one.
    /// 追加一条记录，并将计数器精确加一。
    pub fn record(&self, failure: FailureRecord) {
        self.failures.borrow_mut().push(failure);
        self.errors.set(self.errors.get() + 1);
    }

    /// Records from index `from` onwards, used to report what one unit added.
    pub(crate) fn failures_since(&self, from: usize) -> Vec<FailureRecord> {
        self.failures.borrow()[from..].to_vec()
    }

    pub(crate) fn failure_len(&self) -> usize {
        self.failures.borrow().len()
    }

    pub(crate) fn into_parts(self) -> (usize, Vec<FailureRecord>) {
        (self.errors.into_inner(), self.failures.into_inner())
    }
}

/// Handle given to every test body. Failures are attributed to `unit`.
///
/// 传递给每个测试主体的句柄。失败会归属于 `unit`。
#[derive(Debug, Clone, Copy)]
pub struct Checker<'a> {
    unit: &'a UnitId,
    ledger: &'a Ledger,
}

impl<'a> Checker<'a> {
    pub fn new(unit: &'a UnitId, ledger: &'a Ledger) -> Self {
        Self { unit, ledger }
    }

    pub fn unit(&self) -> &UnitId {
        self.unit
    }

    /// Error counter of the whole run, not just of this unit.
    /// 整个运行的错误计数器，而不仅是本单元的。
    pub fn error_count(&self) -> usize {
        self.ledger.error_count()
    }

    /// Evaluates `comparator` against `actual` and records a failure when it
    /// does not hold. The failure location is the caller's.
    ///
    /// Prefer the [`assert_that!`](crate::assert_that) macro, which also
    /// captures the source text of both expressions.
    ///
    /// 针对 `actual` 求值 `comparator`，不成立时记录失败。失败位置为调用者的位置。
    #[track_caller]
    pub fn assert_that<T, C>(&self, actual: T, comparator: C) -> bool
    where
        T: Debug,
        C: Comparator<T>,
    {
        let actual_text = format!("{:?}", actual);
        let expected_text = comparator.expected();
        self.assert_that_expr(actual, comparator, &actual_text, &expected_text)
    }

    /// Same as [`Checker::assert_that`] with explicit expression texts.
    #[track_caller]
    pub fn assert_that_expr<T, C>(
        &self,
        actual: T,
        comparator: C,
        actual_expr: &str,
        expected_expr: &str,
    ) -> bool
    where
        T: Debug,
        C: Comparator<T>,
    {
        if comparator.run(&actual) {
            return true;
        }
        self.fail(
            Location::caller(),
            FailureKind::Assertion,
            actual_expr,
            expected_expr,
            comparator.expected(),
            format!("{:?}", actual),
        );
        false
    }

    /// Passes when `condition` is true.
    #[track_caller]
    pub fn check(&self, condition: bool) -> bool {
        if condition {
            return true;
        }
        self.fail(
            Location::caller(),
            FailureKind::Assertion,
            "condition",
            "true",
            "true".to_string(),
            "false".to_string(),
        );
        false
    }

    /// Passes when calling `f` panics. The panic does not leave this call.
    /// 当调用 `f` 发生 panic 时通过。panic 不会传出此调用。
    #[track_caller]
    pub fn assert_panics(&self, f: impl FnOnce()) -> bool {
        match catch_panic(f) {
            Err(_) => true,
            Ok(()) => {
                self.fail(
                    Location::caller(),
                    FailureKind::Assertion,
                    "closure",
                    "panic",
                    "a panic".to_string(),
                    "returned normally".to_string(),
                );
                false
            }
        }
    }

    /// Passes when calling `f` returns normally.
    #[track_caller]
    pub fn assert_no_panic(&self, f: impl FnOnce()) -> bool {
        match catch_panic(f) {
            Ok(()) => true,
            Err(message) => {
                self.fail(
                    Location::caller(),
                    FailureKind::Assertion,
                    "closure",
                    "no panic",
                    "no panic".to_string(),
                    format!("panicked: {message}"),
                );
                false
            }
        }
    }

    /// Records a panic that escaped this unit, located at `origin`.
    pub(crate) fn record_panic(&self, origin: &SourceLocation, phase: &str, message: &str) {
        self.ledger.record(FailureRecord {
            unit: self.unit.clone(),
            location: origin.clone(),
            kind: FailureKind::Panic,
            actual_expr: phase.to_string(),
            expected_expr: "no panic".to_string(),
            expected: "no panic".to_string(),
            actual: message.to_string(),
        });
    }

    fn fail(
        &self,
        location: &Location<'_>,
        kind: FailureKind,
        actual_expr: &str,
        expected_expr: &str,
        expected: String,
        actual: String,
    ) {
        self.ledger.record(FailureRecord {
            unit: self.unit.clone(),
            location: SourceLocation::from_caller(location),
            kind,
            actual_expr: actual_expr.to_string(),
            expected_expr: expected_expr.to_string(),
            expected,
            actual,
        });
    }
}

/// Checks `actual` against a comparator, capturing the source text of both
/// expressions for the failure message.
///
/// ```ignore
/// assert_that!(t, 2 + 2, equals(4));
/// ```
#[macro_export]
macro_rules! assert_that {
    ($checker:expr, $actual:expr, $expected:expr $(,)?) => {
        $checker.assert_that_expr(
            $actual,
            $expected,
            stringify!($actual),
            stringify!($expected),
        )
    };
}

/// Checks that a boolean expression holds, keeping its source text.
#[macro_export]
macro_rules! check {
    ($checker:expr, $condition:expr $(,)?) => {
        $checker.assert_that_expr(
            $condition,
            $crate::core::comparator::equals(true),
            stringify!($condition),
            "true",
        )
    };
}

//! # Run Events Module / 运行事件模块
//!
//! The runner never prints. It emits `Event`s to a `Reporter`, which decides
//! how (or whether) to render them.
//!
//! 运行器从不直接打印。它向 `Reporter` 发送 `Event`，由后者决定如何（或是否）呈现。

use serde::Serialize;
use std::time::Duration;

use crate::core::models::{FailureRecord, UnitId, UnitKind};

/// Structured progress emitted by the runner, in the order things happen.
/// 运行器按发生顺序发出的结构化进度事件。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// A fixture could not be constructed at registration time.
    FixtureRejected { unit: UnitId, reason: String },
    /// A group (or fixture class) with `count` selected units begins.
    GroupStarted {
        name: String,
        kind: UnitKind,
        count: usize,
    },
    /// `index` is 1-based.
    TestStarted {
        group: String,
        name: String,
        index: usize,
        count: usize,
    },
    TestPassed { duration: Duration },
    /// One per failure record the running unit produced.
    AssertionFailed { failure: FailureRecord },
    TestFailed { group: String, name: String },
    BenchmarksStarted { count: usize },
    BenchmarkStarted { name: String },
    BenchmarkResult {
        name: String,
        label: String,
        total: Duration,
        min: Duration,
        max: Duration,
        mean: Option<Duration>,
    },
    BenchmarkWinner { name: String, label: String },
    /// A panic escaped the per-unit boundaries; nothing else follows.
    RunAborted { reason: String },
    RunSummary {
        errors: usize,
        failed: Vec<UnitId>,
    },
}

/// A sink for run events.
/// 运行事件的接收端。
pub trait Reporter {
    fn report(&mut self, event: &Event);
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn report(&mut self, _event: &Event) {}
}

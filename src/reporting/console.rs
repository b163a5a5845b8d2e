//! # Console Reporting Module / 控制台报告模块
//!
//! Renders run events as coloured, localized console lines: banner boxes for
//! groups and results, one line per test, and an indented block per failure.
//!
//! 将运行事件渲染为彩色、本地化的控制台输出：分组与结果使用横幅框，
//! 每个测试一行，每个失败一个缩进块。
//!
//! ## Output Format / 输出格式
//! ```text
//! +----------------------------------------------------------------------------+
//! |    Running 2 tests grouped in math                                         |
//! +----------------------------------------------------------------------------+
//!   * Running math.add_ok (1/2)
//!        Passed in 0.002 ms
//! ```

use colored::*;

use crate::core::events::{Event, Reporter};
use crate::core::models::{FailureKind, FailureRecord, UnitKind};
use crate::infra::clock::format_millis;
use crate::infra::t;

/// Width of banner boxes, borders included.
const MAX_COLUMN: usize = 78;

/// Prints every event to stdout. Colour follows `colored`'s global switch.
/// 将每个事件打印到标准输出。颜色遵循 `colored` 的全局开关。
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    locale: String,
}

impl ConsoleReporter {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }

    /// The lines an event renders to, without printing them.
    /// 返回事件渲染出的行，但不打印。
    pub fn render(&self, event: &Event) -> Vec<String> {
        let locale = self.locale.as_str();
        match event {
            Event::FixtureRejected { unit, reason } => vec![
                t!("rejected.fixture", locale = locale, unit = unit, reason = reason)
                    .red()
                    .to_string(),
            ],
            Event::GroupStarted { name, kind, count } => {
                let text = match kind {
                    UnitKind::Fixture => {
                        t!("banner.fixture_group", locale = locale, count = count, name = name)
                    }
                    UnitKind::Function => {
                        t!("banner.function_group", locale = locale, count = count, name = name)
                    }
                };
                vec![banner(&text).green().to_string()]
            }
            Event::TestStarted {
                group,
                name,
                index,
                count,
            } => vec![format!(
                "{}{}{}",
                t!("test.running", locale = locale).cyan(),
                format!("{group}.{name}").yellow(),
                format!(" ({index}/{count})").cyan()
            )],
            Event::TestPassed { duration } => vec![
                t!("test.passed", locale = locale, duration = format_millis(*duration))
                    .green()
                    .to_string(),
            ],
            Event::AssertionFailed { failure } => self.render_failure(failure),
            Event::TestFailed { group, name } => vec![
                t!("test.failed", locale = locale, unit = format!("{group}.{name}"))
                    .red()
                    .to_string(),
            ],
            Event::BenchmarksStarted { count } => vec![
                banner(&t!("banner.benchmarks", locale = locale, count = count))
                    .green()
                    .to_string(),
            ],
            Event::BenchmarkStarted { name } => vec![format!(
                "{}{}",
                t!("bench.running", locale = locale).cyan(),
                name.yellow()
            )],
            Event::BenchmarkResult {
                label,
                total,
                min,
                max,
                mean,
                ..
            } => {
                // A zero-repetition run keeps sentinel extremes; print n/a instead.
                let (min, max, mean) = match mean {
                    Some(mean) => (
                        format_millis(*min),
                        format_millis(*max),
                        format_millis(*mean),
                    ),
                    None => {
                        let na = t!("bench.no_iterations", locale = locale).to_string();
                        (na.clone(), na.clone(), na)
                    }
                };
                vec![
                    t!("bench.contender", locale = locale, label = label)
                        .green()
                        .to_string(),
                    t!("bench.total", locale = locale, value = format_millis(*total))
                        .magenta()
                        .to_string(),
                    t!("bench.max", locale = locale, value = max)
                        .magenta()
                        .to_string(),
                    t!("bench.min", locale = locale, value = min)
                        .magenta()
                        .to_string(),
                    t!("bench.mean", locale = locale, value = mean)
                        .magenta()
                        .to_string(),
                ]
            }
            Event::BenchmarkWinner { label, .. } => vec![
                t!("bench.winner", locale = locale, label = label)
                    .cyan()
                    .to_string(),
            ],
            Event::RunAborted { reason } => vec![
                t!("run.aborted", locale = locale, reason = reason)
                    .red()
                    .bold()
                    .to_string(),
            ],
            Event::RunSummary { errors, failed } => {
                let mut lines = vec![banner(&t!("banner.results", locale = locale))
                    .green()
                    .to_string()];
                if *errors == 0 {
                    lines.push(t!("summary.success", locale = locale).green().to_string());
                } else {
                    lines.push(
                        t!("summary.failure", locale = locale, count = errors)
                            .red()
                            .to_string(),
                    );
                    lines.push(t!("summary.listing", locale = locale).cyan().to_string());
                    for unit in failed {
                        lines.push(
                            t!("summary.failed_unit", locale = locale, unit = unit)
                                .red()
                                .to_string(),
                        );
                    }
                }
                lines
            }
        }
    }

    fn render_failure(&self, failure: &FailureRecord) -> Vec<String> {
        let locale = self.locale.as_str();
        let header = match failure.kind {
            FailureKind::Assertion => t!("failure.header", locale = locale),
            FailureKind::Panic => t!("failure.panic_header", locale = locale),
        };
        vec![
            format!("\n{}", header.red()),
            format!(
                "{}{}",
                t!("failure.file", locale = locale).cyan(),
                failure.location.file.yellow()
            ),
            format!(
                "{}{}",
                t!("failure.line", locale = locale).cyan(),
                failure.location.line.to_string().magenta()
            ),
            format!(
                "{}{} == {}",
                t!("failure.check", locale = locale).cyan(),
                format!("\"{}\"", failure.actual_expr).magenta(),
                format!("\"{}\"", failure.expected_expr).magenta()
            ),
            format!(
                "{}{}",
                t!("failure.expected", locale = locale).cyan(),
                failure.expected.magenta()
            ),
            format!(
                "{}{}",
                t!("failure.actual", locale = locale).cyan(),
                failure.actual.magenta()
            ),
        ]
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new("en")
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, event: &Event) {
        for line in self.render(event) {
            println!("{line}");
        }
    }
}

/// Draws a three-line box around `text`, `MAX_COLUMN` characters wide.
///
/// ```text
/// +---------+
/// |    Text |
/// +---------+
/// ```
pub fn banner(text: &str) -> String {
    let border = format!("+{}+", "-".repeat(MAX_COLUMN - 2));
    let padding = (MAX_COLUMN - 1).saturating_sub(5 + text.chars().count());
    format!("{border}\n|    {text}{}|\n{border}", " ".repeat(padding))
}

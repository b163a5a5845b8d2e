//! # List Command Module / 列表命令模块
//!
//! Prints what a suite registered without running anything.
//!
//! 打印测试套件注册的内容，但不运行任何测试。

use colored::*;

use crate::core::execution::Harness;
use crate::core::models::UnitKind;
use crate::infra::t;

/// Prints registered fixtures, function tests, benchmarks and rejected fixtures.
pub fn execute(harness: &Harness, locale: &str) {
    for line in render(harness, locale) {
        println!("{line}");
    }
}

/// The lines `list` prints, in order.
/// `list` 打印的各行，按顺序排列。
pub fn render(harness: &Harness, locale: &str) -> Vec<String> {
    let registry = harness.registry();
    if registry.is_empty() && registry.rejected().is_empty() {
        return vec![t!("list.empty", locale = locale).yellow().to_string()];
    }

    let units = registry.units();
    let mut lines = Vec::new();

    for (kind, header) in [
        (UnitKind::Fixture, t!("list.fixtures", locale = locale)),
        (UnitKind::Function, t!("list.functions", locale = locale)),
    ] {
        let names: Vec<String> = units
            .iter()
            .filter(|unit| unit.kind == kind)
            .map(|unit| format!("  {}", unit.qualified_name()))
            .collect();
        if !names.is_empty() {
            lines.push(header.cyan().bold().to_string());
            lines.extend(names);
        }
    }

    let benchmarks = registry.benchmarks();
    if !benchmarks.is_empty() {
        lines.push(t!("list.benchmarks", locale = locale).cyan().bold().to_string());
        for spec in benchmarks {
            lines.push(
                t!(
                    "list.benchmark_entry",
                    locale = locale,
                    name = &spec.name,
                    first = &spec.first.label,
                    second = &spec.second.label,
                    repetitions = spec.repetitions
                )
                .to_string(),
            );
        }
    }

    for rejection in registry.rejected() {
        lines.push(
            t!(
                "rejected.fixture",
                locale = locale,
                unit = &rejection.unit,
                reason = &rejection.reason
            )
            .red()
            .to_string(),
        );
    }

    lines
}

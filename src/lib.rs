//! # Fixture Bench Library / Fixture Bench 库
//!
//! A small, explicit test-and-benchmark harness. Declare function tests and
//! fixture tests on a [`Harness`], check values with non-fatal assertions,
//! compare two callables with head-to-head benchmarks, and turn the run's
//! error count into a process exit status.
//!
//! 一个小巧、显式的测试与基准测试 harness。在 [`Harness`] 上声明函数测试和夹具测试，
//! 使用非致命断言检查值，通过对比基准测试比较两个可调用对象，
//! 并将运行的错误计数转换为进程退出码。
//!
//! ```no_run
//! use fixture_bench::{Harness, assert_that, equals};
//!
//! let mut harness = Harness::new();
//! harness.register_test("math", "add", |t| {
//!     assert_that!(t, 2 + 2, equals(4));
//! });
//! let report = harness.run_all();
//! std::process::exit(report.exit_status() as i32);
//! ```
//!
//! ## Modules / 模块
//!
//! - `core` - Registry, assertions, fixtures and the runner
//! - `infra` - Timing, panic boundaries, file output and i18n
//! - `reporting` - Console, JSON, in-memory and HTML reporting
//! - `cli` - Command-line entry point for suite binaries
//!
//! - `core` - 注册表、断言、夹具与运行器
//! - `infra` - 计时、panic 边界、文件输出与国际化
//! - `reporting` - 控制台、JSON、内存与 HTML 报告
//! - `cli` - 测试套件二进制的命令行入口

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::comparator::{AlmostEquals, Comparator, Equals, NotEquals, Tolerance};
pub use crate::core::{
    Checker, Event, Fixture, Harness, HarnessConfig, Reporter, RunReport, almost_equals, equals,
    not_equals,
};
pub use crate::core::models;

/// Initializes the application's internationalization (i18n) based on the system locale.
///
/// This function detects the user's system locale and sets the appropriate
/// language for the harness's console output. It attempts to match the full
/// locale (e.g., "zh-CN"), then just the language code (e.g., "en"), and
/// finally falls back to the default language ("en").
///
/// Returns the selected locale.
pub fn init() -> String {
    let locale = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    let lang = resolve_locale(&locale);
    rust_i18n::set_locale(&lang);
    lang
}

/// Maps a requested locale onto one the harness ships translations for.
/// 将请求的语言区域映射到 harness 提供翻译的语言区域。
pub fn resolve_locale(requested: &str) -> String {
    let available_locales = rust_i18n::available_locales!();

    // Try the full locale first (e.g., "zh-CN"), then the language part only
    // (e.g., "en" from "en-US"), and finally fall back to "en".
    let is_available = |code: &str| available_locales.iter().any(|l| *l == code);

    if is_available(requested) {
        return requested.to_string();
    }
    requested
        .split(['-', '_'])
        .next()
        .filter(|lang_code| is_available(lang_code))
        .unwrap_or("en")
        .to_string()
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");

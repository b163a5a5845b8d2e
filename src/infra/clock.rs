//! # Clock Module / 计时模块
//!
//! Wall-clock measurement around a unit's primary action.
//! 围绕单元主要动作的实际耗时测量。

use std::time::{Duration, Instant};

/// Runs `f` and returns its result together with the elapsed wall-clock time.
/// The clock is sampled immediately before and after the call.
///
/// 运行 `f`，返回其结果以及经过的实际时间。在调用前后立即采样时钟。
pub fn measure<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}

/// Renders a duration as milliseconds with microsecond precision, e.g. `1.250 ms`.
pub fn format_millis(duration: Duration) -> String {
    format!("{:.3} ms", duration.as_secs_f64() * 1000.0)
}

//! # Unwind Boundary Module / 展开边界模块
//!
//! Helpers that turn a panic escaping user code into a plain error message,
//! so one failing unit cannot take the rest of the run down with it.
//!
//! Panics caught here are silent: the message ends up in a failure record or
//! an abort event, not on stderr. Panics outside a boundary still reach the
//! previously installed hook.
//!
//! 将用户代码中逃逸的 panic 转换为普通错误消息的辅助函数，
//! 使单个失败的单元不会拖垮整个运行。
//! 在此处捕获的 panic 不会输出到标准错误；边界之外的 panic 仍交给原有的钩子处理。

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};

use once_cell::sync::OnceCell;

static QUIET_HOOK: OnceCell<()> = OnceCell::new();

thread_local! {
    /// Nesting depth of `catch_panic` calls on this thread.
    static BOUNDARY_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Installs, once per process, a hook that stays quiet while the panicking
/// thread is inside a boundary and defers to the previous hook otherwise.
fn install_quiet_hook() {
    QUIET_HOOK.get_or_init(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if BOUNDARY_DEPTH.with(Cell::get) == 0 {
                previous(info);
            }
        }));
    });
}

/// Restores the depth even when the boundary is left by unwinding.
struct DepthGuard;

impl DepthGuard {
    fn enter() -> Self {
        BOUNDARY_DEPTH.with(|depth| depth.set(depth.get() + 1));
        DepthGuard
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        BOUNDARY_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Runs `f`, returning `Err(message)` if it panicked.
/// 运行 `f`，若发生 panic 则返回 `Err(message)`。
pub fn catch_panic<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    install_quiet_hook();
    let _guard = DepthGuard::enter();
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| panic_message(payload.as_ref()))
}

/// Extracts the human-readable message from a panic payload.
/// 从 panic 负载中提取可读的消息。
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

//! # Fixture Lifecycle Module / 夹具生命周期模块
//!
//! A fixture is a stateful test unit with set-up and tear-down hooks around a
//! single `run` body. Each registered instance is driven through exactly one
//! `Constructed → SetUp → Running → TornDown` cycle.
//!
//! 夹具是一个有状态的测试单元，在单个 `run` 主体前后带有 set-up 与 tear-down 钩子。
//! 每个已注册的实例恰好经历一次 `Constructed → SetUp → Running → TornDown` 周期。

use std::time::Duration;

use anyhow::{Result, bail};

use crate::core::assertion::Checker;
use crate::core::models::{SourceLocation, UnitId};
use crate::infra::clock::measure;
use crate::infra::unwind::catch_panic;

/// Capability implemented by fixture tests.
///
/// `set_up` and `tear_down` default to no-ops. `tear_down` runs even when
/// `set_up` or `run` panicked.
///
/// 夹具测试实现的能力接口。`set_up` 与 `tear_down` 默认为空操作。
/// 即使 `set_up` 或 `run` 发生 panic，`tear_down` 也会执行。
pub trait Fixture {
    /// Initializes the resources used by `run`.
    /// 初始化 `run` 使用的资源。
    fn set_up(&mut self) {}

    /// The test body.
    /// 测试主体。
    fn run(&mut self, check: &Checker<'_>);

    /// Releases what `set_up` acquired.
    /// 释放 `set_up` 获取的资源。
    fn tear_down(&mut self) {}
}

/// Where an instance is in its single-use lifecycle.
/// 实例在其一次性生命周期中所处的阶段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureState {
    Constructed,
    SetUp,
    Running,
    TornDown,
}

/// A registered fixture instance together with its identity.
/// 已注册的夹具实例及其标识。
pub struct FixtureEntry {
    pub id: UnitId,
    pub origin: SourceLocation,
    state: FixtureState,
    fixture: Box<dyn Fixture>,
}

impl std::fmt::Debug for FixtureEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixtureEntry")
            .field("id", &self.id)
            .field("origin", &self.origin)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// What happened while driving one fixture.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LifecycleOutcome {
    /// Duration of the `run` phase only; zero when `run` never started.
    pub duration: Duration,
    /// Panics caught per phase, as `(phase, message)`.
    pub panics: Vec<(&'static str, String)>,
}

impl FixtureEntry {
    pub fn new(id: UnitId, origin: SourceLocation, fixture: Box<dyn Fixture>) -> Self {
        Self {
            id,
            origin,
            state: FixtureState::Constructed,
            fixture,
        }
    }

    pub fn state(&self) -> FixtureState {
        self.state
    }

    /// Drives `set_up → run → tear_down`. Panics in any phase are caught and
    /// returned; a panicking `set_up` skips `run`, tear-down always happens.
    /// Refuses an instance that already left `Constructed`.
    ///
    /// 执行 `set_up → run → tear_down`。任一阶段的 panic 都会被捕获并返回；
    /// `set_up` panic 时跳过 `run`，但 tear-down 一定执行。
    /// 已离开 `Constructed` 状态的实例会被拒绝。
    pub fn drive(&mut self, check: &Checker<'_>) -> Result<LifecycleOutcome> {
        if self.state != FixtureState::Constructed {
            bail!("fixture {} was already run ({:?})", self.id, self.state);
        }
        let mut outcome = LifecycleOutcome::default();
        let fixture = &mut self.fixture;

        match catch_panic(|| fixture.set_up()) {
            Ok(()) => {
                self.state = FixtureState::SetUp;

                self.state = FixtureState::Running;
                let (result, duration) = measure(|| catch_panic(|| fixture.run(check)));
                outcome.duration = duration;
                if let Err(message) = result {
                    outcome.panics.push(("run", message));
                }
            }
            Err(message) => outcome.panics.push(("set_up", message)),
        }

        if let Err(message) = catch_panic(|| fixture.tear_down()) {
            outcome.panics.push(("tear_down", message));
        }
        self.state = FixtureState::TornDown;

        Ok(outcome)
    }
}

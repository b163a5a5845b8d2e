//! # Registry Module / 注册表模块
//!
//! Holds everything a harness will run: function tests grouped by group name,
//! fixture instances grouped by class name, and benchmark definitions.
//!
//! Groups and classes are visited in lexical key order; inside a group, units
//! keep their registration order.
//!
//! 保存 harness 将要运行的全部内容：按分组名归类的函数测试、按类名归类的夹具实例，
//! 以及基准测试定义。分组和类按字典序访问；分组内部保持注册顺序。

use std::collections::BTreeMap;
use std::fmt;
use std::panic::Location;

use anyhow::Result;

use crate::core::assertion::Checker;
use crate::core::fixture::{Fixture, FixtureEntry};
use crate::core::models::{Rejection, SourceLocation, UnitId};
use crate::infra::unwind::catch_panic;

/// Body of a function test.
pub type TestFn = Box<dyn Fn(&Checker<'_>)>;

/// A named free-function test.
/// 一个具名的函数测试。
pub struct TestCase {
    pub id: UnitId,
    /// Where the test was registered; panics escaping the body point here.
    /// 测试注册的位置；从主体逃逸的 panic 指向此处。
    pub origin: SourceLocation,
    body: TestFn,
}

impl TestCase {
    pub fn call(&self, check: &Checker<'_>) {
        (self.body)(check)
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("id", &self.id)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// One labelled side of a benchmark.
/// 基准测试中带标签的一方。
pub struct Contender {
    pub label: String,
    body: Box<dyn Fn()>,
}

impl Contender {
    pub fn new(label: impl Into<String>, body: impl Fn() + 'static) -> Self {
        Self {
            label: label.into(),
            body: Box::new(body),
        }
    }

    pub fn call(&self) {
        (self.body)()
    }
}

/// Two callables compared by repeated timing.
/// 通过重复计时进行比较的两个可调用对象。
pub struct BenchmarkSpec {
    pub name: String,
    pub repetitions: u32,
    pub first: Contender,
    pub second: Contender,
}

impl fmt::Debug for BenchmarkSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchmarkSpec")
            .field("name", &self.name)
            .field("repetitions", &self.repetitions)
            .field("first", &self.first.label)
            .field("second", &self.second.label)
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    pub(crate) functions: BTreeMap<String, Vec<TestCase>>,
    pub(crate) fixtures: BTreeMap<String, Vec<FixtureEntry>>,
    pub(crate) benchmarks: Vec<BenchmarkSpec>,
    pub(crate) rejected: Vec<Rejection>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `body` as test `name` of `group`. A second registration
    /// under the same pair replaces the body and keeps the original position.
    ///
    /// 将 `body` 注册为 `group` 中名为 `name` 的测试。对同一对名称的再次注册
    /// 会替换主体并保留原位置。
    #[track_caller]
    pub fn register_test(
        &mut self,
        group: impl Into<String>,
        name: impl Into<String>,
        body: impl Fn(&Checker<'_>) + 'static,
    ) {
        let origin = SourceLocation::from_caller(Location::caller());
        let id = UnitId::function(group, name);
        let case = TestCase {
            id,
            origin,
            body: Box::new(body),
        };
        let group = self.functions.entry(case.id.group.clone()).or_default();
        match group.iter_mut().find(|existing| existing.id == case.id) {
            Some(existing) => *existing = case,
            None => group.push(case),
        }
    }

    /// Constructs `F::default()` and appends it under `class_name`.
    /// Returns `false` when construction panicked; the fixture is then
    /// recorded as rejected and never runs.
    #[track_caller]
    pub fn register_fixture<F>(
        &mut self,
        class_name: impl Into<String>,
        test_name: impl Into<String>,
    ) -> bool
    where
        F: Fixture + Default + 'static,
    {
        self.register_fixture_with(class_name, test_name, || Ok(F::default()))
    }

    /// Like [`Registry::register_fixture`] with a fallible factory. Both an
    /// `Err` and a panic from `factory` reject the fixture.
    ///
    /// 与 [`Registry::register_fixture`] 相同，但使用可能失败的工厂函数。
    /// 工厂返回 `Err` 或发生 panic 都会拒绝该夹具。
    #[track_caller]
    pub fn register_fixture_with<F, Fac>(
        &mut self,
        class_name: impl Into<String>,
        test_name: impl Into<String>,
        factory: Fac,
    ) -> bool
    where
        F: Fixture + 'static,
        Fac: FnOnce() -> Result<F>,
    {
        let origin = SourceLocation::from_caller(Location::caller());
        let id = UnitId::fixture(class_name, test_name);

        let reason = match catch_panic(factory) {
            Ok(Ok(fixture)) => {
                self.fixtures
                    .entry(id.group.clone())
                    .or_default()
                    .push(FixtureEntry::new(id, origin, Box::new(fixture)));
                return true;
            }
            Ok(Err(e)) => format!("{e:#}"),
            Err(message) => format!("panicked during construction: {message}"),
        };

        self.rejected.push(Rejection { unit: id, reason });
        false
    }

    /// Appends a benchmark comparing `first` against `second`.
    /// With zero repetitions nothing is executed.
    pub fn register_benchmark(
        &mut self,
        name: impl Into<String>,
        repetitions: u32,
        first: Contender,
        second: Contender,
    ) {
        self.benchmarks.push(BenchmarkSpec {
            name: name.into(),
            repetitions,
            first,
            second,
        });
    }

    /// Every registered test unit, fixtures first, in run order.
    /// 按运行顺序列出所有已注册的测试单元，夹具在前。
    pub fn units(&self) -> Vec<UnitId> {
        let fixtures = self.fixtures.values().flatten().map(|f| f.id.clone());
        let functions = self.functions.values().flatten().map(|t| t.id.clone());
        fixtures.chain(functions).collect()
    }

    pub fn benchmarks(&self) -> &[BenchmarkSpec] {
        &self.benchmarks
    }

    pub fn rejected(&self) -> &[Rejection] {
        &self.rejected
    }

    pub fn test_count(&self) -> usize {
        let fixtures: usize = self.fixtures.values().map(Vec::len).sum();
        let functions: usize = self.functions.values().map(Vec::len).sum();
        fixtures + functions
    }

    pub fn is_empty(&self) -> bool {
        self.test_count() == 0 && self.benchmarks.is_empty()
    }

    /// Moves every registration out, leaving this registry empty.
    pub(crate) fn take(&mut self) -> Registry {
        std::mem::take(self)
    }
}

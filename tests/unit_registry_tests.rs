use anyhow::anyhow;
use fixture_bench::core::registry::{Contender, Registry};
use fixture_bench::models::{UnitId, UnitKind};
use fixture_bench::{Checker, Fixture};

#[derive(Default)]
struct Noop;

impl Fixture for Noop {
    fn run(&mut self, _check: &Checker<'_>) {}
}

struct Exploding;

impl Default for Exploding {
    fn default() -> Self {
        panic!("out of resources")
    }
}

impl Fixture for Exploding {
    fn run(&mut self, _check: &Checker<'_>) {}
}

/// Groups come out in lexical order, tests within a group in insertion order.
/// 分组按字典序输出，分组内的测试按插入顺序输出。
#[test]
fn test_group_and_insertion_order() {
    let mut registry = Registry::new();
    registry.register_test("zeta", "first", |_| {});
    registry.register_test("alpha", "second", |_| {});
    registry.register_test("alpha", "first", |_| {});

    let names: Vec<String> = registry.units().iter().map(UnitId::qualified_name).collect();
    assert_eq!(names, vec!["alpha.second", "alpha.first", "zeta.first"]);
}

/// Re-registering a (group, name) pair replaces the body in place.
/// 重复注册同一 (group, name) 会原地替换主体。
#[test]
fn test_duplicate_registration_overwrites() {
    let mut registry = Registry::new();
    registry.register_test("g", "a", |t| {
        t.check(false);
    });
    registry.register_test("g", "b", |_| {});
    registry.register_test("g", "a", |_| {});

    assert_eq!(registry.test_count(), 2);
    let names: Vec<String> = registry.units().iter().map(|u| u.name.clone()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_fixtures_listed_before_functions() {
    let mut registry = Registry::new();
    registry.register_test("a_group", "t", |_| {});
    assert!(registry.register_fixture::<Noop>("Zed", "one"));
    assert!(registry.register_fixture::<Noop>("Zed", "two"));

    let units = registry.units();
    assert_eq!(units.len(), 3);
    assert_eq!(units[0], UnitId::fixture("Zed", "one"));
    assert_eq!(units[1].kind, UnitKind::Fixture);
    assert_eq!(units[2].kind, UnitKind::Function);
}

/// A panicking constructor is caught; the fixture is rejected, not registered.
/// 构造函数 panic 会被捕获；该夹具被拒绝而不会被注册。
#[test]
fn test_panicking_constructor_is_rejected() {
    let mut registry = Registry::new();
    assert!(!registry.register_fixture::<Exploding>("Exploding", "never_runs"));

    assert_eq!(registry.test_count(), 0);
    assert_eq!(registry.rejected().len(), 1);
    let rejection = &registry.rejected()[0];
    assert_eq!(rejection.unit, UnitId::fixture("Exploding", "never_runs"));
    assert!(rejection.reason.contains("out of resources"));
}

#[test]
fn test_failing_factory_is_rejected() {
    let mut registry = Registry::new();
    let registered =
        registry.register_fixture_with("Db", "connect", || -> anyhow::Result<Noop> {
            Err(anyhow!("connection refused"))
        });

    assert!(!registered);
    assert!(registry.is_empty());
    assert_eq!(registry.rejected()[0].reason, "connection refused");
}

#[test]
fn test_benchmarks_keep_registration_order() {
    let mut registry = Registry::new();
    registry.register_benchmark("b", 3, Contender::new("x", || {}), Contender::new("y", || {}));
    registry.register_benchmark("a", 0, Contender::new("x", || {}), Contender::new("y", || {}));

    let names: Vec<&str> = registry.benchmarks().iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["b", "a"]);
    assert_eq!(registry.benchmarks()[0].repetitions, 3);
    assert_eq!(registry.benchmarks()[0].first.label, "x");
    assert!(!registry.is_empty());
}

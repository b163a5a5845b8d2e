use criterion::{Criterion, criterion_group, criterion_main};
use fixture_bench::core::events::SilentReporter;
use fixture_bench::{Checker, Fixture, Harness, equals};
use std::hint::black_box;

#[derive(Default)]
struct Counter {
    value: u64,
}

impl Fixture for Counter {
    fn set_up(&mut self) {
        self.value = 1;
    }

    fn run(&mut self, check: &Checker<'_>) {
        check.assert_that(self.value, equals(1));
    }
}

fn populated_harness(tests: usize) -> Harness {
    let mut harness = Harness::with_reporter(SilentReporter);
    for i in 0..tests {
        harness.register_test(format!("group_{}", i % 10), format!("test_{i}"), |t| {
            t.assert_that(black_box(2 + 2), equals(4));
        });
        harness.register_fixture::<Counter>("Counter", format!("fixture_{i}"));
    }
    harness
}

fn bench_run_all(c: &mut Criterion) {
    c.bench_function("run_all_100_units", |b| {
        b.iter_batched(
            || populated_harness(50),
            |mut harness| black_box(harness.run_all()),
            criterion::BatchSize::SmallInput,
        );
    });
}

fn bench_failing_checks(c: &mut Criterion) {
    c.bench_function("run_all_failing_checks", |b| {
        b.iter_batched(
            || {
                let mut harness = Harness::with_reporter(SilentReporter);
                harness.register_test("failing", "many", |t| {
                    for i in 0..100 {
                        t.assert_that(i, equals(-1));
                    }
                });
                harness
            },
            |mut harness| black_box(harness.run_all()),
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_run_all, bench_failing_checks);
criterion_main!(benches);

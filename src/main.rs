//! Demonstration suite: a sorting benchmark, a fixture with set-up state,
//! panic checks and a few value comparisons.

use std::process::ExitCode;

use fixture_bench::{
    Checker, Fixture, Harness, almost_equals, assert_that, check, cli, equals,
    not_equals,
};

/// Deterministic pseudo-random values for the sorting benchmark.
fn scrambled(len: usize, mut seed: u64) -> Vec<u64> {
    (0..len)
        .map(|_| {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed
        })
        .collect()
}

#[derive(Default)]
struct CoordinatesFixture {
    x: i32,
    y: i32,
}

impl Fixture for CoordinatesFixture {
    fn set_up(&mut self) {
        self.x = 45;
        self.y = 10;
    }

    fn run(&mut self, t: &Checker<'_>) {
        let label = String::from("a");
        assert_that!(t, "a", equals(label));
        assert_that!(t, self.x, equals(45));
        assert_that!(t, self.y, equals(10));
        assert_that!(t, self.y, not_equals(2));
        assert_that!(t, 0.1_f32, almost_equals(0.09_f32, 0.02_f32));
    }

    fn tear_down(&mut self) {
        self.x = 0;
    }
}

fn register(harness: &mut Harness) {
    harness.register_fixture::<CoordinatesFixture>("CoordinatesFixture", "use_assert_that");

    harness.register_test("check_panics", "no_panic", |t| {
        t.assert_no_panic(|| {
            let _ = "42".parse::<u32>();
        });
    });
    harness.register_test("check_panics", "panics", |t| {
        t.assert_panics(|| {
            let values: Vec<u32> = Vec::new();
            let _ = values[3];
        });
    });

    harness.register_test("math", "arithmetic", |t| {
        assert_that!(t, 2 + 2, equals(4));
        assert_that!(t, 7 * 6, not_equals(41));
        check!(t, 10 % 3 == 1);
    });
    harness.register_test("math", "float_rounding", |t| {
        assert_that!(t, 0.1 + 0.2, almost_equals(0.3, 1e-9));
    });

    let small = scrambled(10_000, 0x9e37_79b9);
    let big = scrambled(20_000, 0x7f4a_7c15);
    harness.register_benchmark(
        "sort_vectors",
        10,
        move || {
            let mut v = small.clone();
            v.sort_unstable();
        },
        "small vector",
        move || {
            let mut v = big.clone();
            v.sort_unstable();
        },
        "big vector",
    );
}

fn main() -> ExitCode {
    cli::main_with(register)
}

//! # Comparator Module / 比较器模块
//!
//! Small predicate objects used by the assertion engine. A comparator holds the
//! expected operand(s) and decides whether an actual value satisfies it.
//!
//! 断言引擎使用的小型谓词对象。比较器持有期望的操作数，
//! 并判断实际值是否满足条件。

use std::fmt::Debug;
use std::time::Duration;

/// An expected-value check evaluated against an actual value of type `T`.
/// 针对类型为 `T` 的实际值求值的期望值检查。
pub trait Comparator<T: ?Sized> {
    /// Returns `true` when `actual` satisfies the check.
    /// 当 `actual` 满足检查条件时返回 `true`。
    fn run(&self, actual: &T) -> bool;

    /// Renders the expected side for failure messages.
    /// 为失败消息渲染期望值。
    fn expected(&self) -> String;
}

/// Passes iff `actual == expected`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equals<E> {
    pub expected: E,
}

/// Passes iff `actual != expected`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotEquals<E> {
    pub expected: E,
}

/// Passes iff `expected - precision < actual < expected + precision`.
/// Both bounds are exclusive.
///
/// 当 `expected - precision < actual < expected + precision` 时通过，两端均为开区间。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlmostEquals<E> {
    pub expected: E,
    pub precision: E,
}

impl<T, E> Comparator<T> for Equals<E>
where
    T: PartialEq<E> + ?Sized,
    E: Debug,
{
    fn run(&self, actual: &T) -> bool {
        actual.eq(&self.expected)
    }

    fn expected(&self) -> String {
        format!("{:?}", self.expected)
    }
}

impl<T, E> Comparator<T> for NotEquals<E>
where
    T: PartialEq<E> + ?Sized,
    E: Debug,
{
    fn run(&self, actual: &T) -> bool {
        actual.ne(&self.expected)
    }

    fn expected(&self) -> String {
        format!("not {:?}", self.expected)
    }
}

/// Numeric types `AlmostEquals` can bracket. Bounds that do not fit in the
/// type come back as `None` and leave that side of the interval open.
///
/// `AlmostEquals` 可以使用的数值类型。超出类型范围的边界返回 `None`，
/// 该侧区间视为无界。
pub trait Tolerance: PartialOrd + Copy + Debug {
    fn lower_bound(self, precision: Self) -> Option<Self>;
    fn upper_bound(self, precision: Self) -> Option<Self>;
}

macro_rules! checked_tolerance {
    ($($ty:ty),* $(,)?) => {$(
        impl Tolerance for $ty {
            fn lower_bound(self, precision: Self) -> Option<Self> {
                self.checked_sub(precision)
            }

            fn upper_bound(self, precision: Self) -> Option<Self> {
                self.checked_add(precision)
            }
        }
    )*};
}

checked_tolerance!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, Duration,
);

macro_rules! float_tolerance {
    ($($ty:ty),*) => {$(
        impl Tolerance for $ty {
            fn lower_bound(self, precision: Self) -> Option<Self> {
                Some(self - precision)
            }

            fn upper_bound(self, precision: Self) -> Option<Self> {
                Some(self + precision)
            }
        }
    )*};
}

float_tolerance!(f32, f64);

impl<T: Tolerance> Comparator<T> for AlmostEquals<T> {
    fn run(&self, actual: &T) -> bool {
        let above_lower = self
            .expected
            .lower_bound(self.precision)
            .is_none_or(|lower| lower < *actual);
        let below_upper = self
            .expected
            .upper_bound(self.precision)
            .is_none_or(|upper| *actual < upper);
        above_lower && below_upper
    }

    fn expected(&self) -> String {
        format!("{:?} +/- {:?}", self.expected, self.precision)
    }
}

// Shorthands so call sites read `equals(4)` instead of `Equals { expected: 4 }`.

pub fn equals<E>(expected: E) -> Equals<E> {
    Equals { expected }
}

pub fn not_equals<E>(expected: E) -> NotEquals<E> {
    NotEquals { expected }
}

pub fn almost_equals<E>(expected: E, precision: E) -> AlmostEquals<E> {
    AlmostEquals {
        expected,
        precision,
    }
}

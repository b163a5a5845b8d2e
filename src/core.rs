//! # Core Module / 核心模块
//!
//! This module contains the core of the harness: comparators, the assertion
//! engine, the registry, the fixture lifecycle and the runner.
//!
//! 此模块包含 harness 的核心：比较器、断言引擎、注册表、夹具生命周期以及运行器。

pub mod assertion;
pub mod comparator;
pub mod config;
pub mod events;
pub mod execution;
pub mod fixture;
pub mod models;
pub mod registry;

// Re-exports
pub use assertion::{Checker, Ledger};
pub use comparator::{almost_equals, equals, not_equals};
pub use config::HarnessConfig;
pub use events::{Event, Reporter};
pub use execution::Harness;
pub use fixture::Fixture;
pub use models::RunReport;

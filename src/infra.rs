//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for the harness:
//! timing, panic boundaries, report file output, and i18n support.
//!
//! 此模块为 harness 提供基础设施服务：
//! 计时、panic 边界、报告文件输出以及国际化支持。

pub mod clock;
pub mod fs;
pub mod unwind;

// Re-export i18n functions for easier access
pub use rust_i18n::t;

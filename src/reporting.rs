//! # Reporting Module / 报告模块
//!
//! Reporter implementations consuming the runner's events, and the report
//! files written once a run is over.
//!
//! 消费运行器事件的报告器实现，以及运行结束后写出的报告文件。

pub mod console;
pub mod html;
pub mod json;
pub mod memory;

// Re-export common reporting items
pub use console::ConsoleReporter;
pub use html::generate_html_report;
pub use json::{JsonReporter, generate_json_report};
pub use memory::EventLog;

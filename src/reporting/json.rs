//! # JSON Reporting Module / JSON 报告模块
//!
//! Machine-readable output: one JSON object per event (JSON Lines), and the
//! whole `RunReport` as a pretty-printed document.
//!
//! 机器可读的输出：每个事件一个 JSON 对象（JSON Lines），
//! 以及格式化输出的完整 `RunReport` 文档。

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::events::{Event, Reporter};
use crate::core::models::RunReport;
use crate::infra::fs::write_report;

/// Writes each event as a single JSON line to `W`.
/// 将每个事件作为单行 JSON 写入 `W`。
#[derive(Debug)]
pub struct JsonReporter<W: Write> {
    out: W,
}

impl JsonReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, event: &Event) {
        let written = serde_json::to_string(event)
            .map_err(io::Error::from)
            .and_then(|line| writeln!(self.out, "{line}"));
        if let Err(e) = written {
            eprintln!("Failed to write event: {e}");
        }
    }
}

/// Serializes the run report to `output_path`, creating parent directories.
/// 将运行报告序列化到 `output_path`，必要时创建父目录。
pub fn generate_json_report(report: &RunReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize run report")?;
    write_report(output_path, &json)
}

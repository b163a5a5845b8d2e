use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::models::UnitId;

/// How run events are rendered.
/// 运行事件的呈现方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Coloured, localized console lines / 彩色、本地化的控制台输出
    #[default]
    Console,
    /// One JSON object per event / 每个事件一个 JSON 对象
    Json,
}

/// Harness settings, usually loaded from `Harness.toml`.
/// Every field has a default, so an empty file is a valid configuration.
///
/// Harness 设置，通常从 `Harness.toml` 加载。
/// 每个字段都有默认值，因此空文件也是有效的配置。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HarnessConfig {
    /// The language for the harness's output messages (e.g., "en", "zh-CN").
    /// Defaults to "en" if not specified.
    ///
    /// 输出消息的语言（例如 "en", "zh-CN"）。如果未指定，则默认为 "en"。
    #[serde(default = "default_language")]
    pub language: String,

    /// Whether console output uses colours.
    /// 控制台输出是否使用颜色。
    #[serde(default = "default_true")]
    pub color: bool,

    #[serde(default)]
    pub format: OutputFormat,

    /// Only units whose `group.name` contains this text run. Benchmarks are
    /// matched on their name.
    ///
    /// 仅运行 `group.name` 包含该文本的单元。基准测试按名称匹配。
    #[serde(default)]
    pub filter: Option<String>,

    /// Set to `false` to skip every benchmark.
    /// 设为 `false` 可跳过所有基准测试。
    #[serde(default = "default_true")]
    pub run_benchmarks: bool,

    /// Where to write an HTML report after the run.
    #[serde(default)]
    pub html_report: Option<PathBuf>,

    /// Where to write the JSON-serialized run report.
    #[serde(default)]
    pub json_report: Option<PathBuf>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            color: true,
            format: OutputFormat::Console,
            filter: None,
            run_benchmarks: true,
            html_report: None,
            json_report: None,
        }
    }
}

impl HarnessConfig {
    /// Reads and parses a TOML configuration file.
    /// 读取并解析 TOML 配置文件。
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Whether a test unit passes the filter.
    pub fn selects(&self, unit: &UnitId) -> bool {
        self.matches(&unit.qualified_name())
    }

    /// Whether a benchmark passes the filter and benchmarks are enabled.
    pub fn selects_benchmark(&self, name: &str) -> bool {
        self.run_benchmarks && self.matches(name)
    }

    fn matches(&self, text: &str) -> bool {
        self.filter
            .as_deref()
            .is_none_or(|pattern| text.contains(pattern))
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_true() -> bool {
    true
}

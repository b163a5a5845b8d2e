//! # Init Command Module / 初始化命令模块
//!
//! This module implements the `init` command, which creates a new
//! `Harness.toml` configuration file, either from defaults or by asking a few
//! questions.
//!
//! 此模块实现 `init` 命令，用于创建新的 `Harness.toml` 配置文件，
//! 可以直接使用默认值，也可以通过几个问题交互式生成。

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Select};

use crate::core::config::HarnessConfig;
use crate::infra::fs::ensure_parent_dir;
use crate::infra::t;

/// Written by `init --non-interactive`. Parses to `HarnessConfig::default()`.
pub const DEFAULT_CONFIG: &str = r#"# Test Harness Configuration / 测试 Harness 配置

# Language for output messages / 输出消息的语言
language = "en"

# Coloured console output / 彩色控制台输出
color = true

# Output format: "console" or "json" / 输出格式："console" 或 "json"
format = "console"

# Run benchmarks after the tests / 在测试之后运行基准测试
run_benchmarks = true

# Only run units whose group.name contains this text / 仅运行 group.name 包含该文本的单元
# filter = "math"

# Optional reports / 可选报告
# html_report = "target/harness-report.html"
# json_report = "target/harness-report.json"
"#;

const LANGUAGES: [&str; 2] = ["en", "zh-CN"];

/// Executes the init command.
///
/// # Arguments
/// * `output` - Path for the new configuration file
/// * `force` - Whether to overwrite an existing file
/// * `non_interactive` - Write [`DEFAULT_CONFIG`] without prompting
/// * `locale` - Language for messages and prompts
pub fn execute(output: &Path, force: bool, non_interactive: bool, locale: &str) -> Result<()> {
    if output.exists() && !force {
        println!(
            "{}",
            t!("init.file_exists", locale = locale, path = output.display()).red()
        );
        println!("{}", t!("init.use_force", locale = locale).yellow());
        return Ok(());
    }

    let content = if non_interactive {
        DEFAULT_CONFIG.to_string()
    } else {
        prompt_config(locale)?.to_toml()?
    };

    ensure_parent_dir(output).with_context(|| {
        let parent = output.parent().unwrap_or(output);
        t!(
            "init.create_parent_dir_failed",
            locale = locale,
            path = parent.display()
        )
        .to_string()
    })?;

    fs::write(output, content).with_context(|| {
        t!("init.write_failed", locale = locale, path = output.display()).to_string()
    })?;

    println!(
        "{}",
        t!("init.success", locale = locale, path = output.display()).green()
    );
    println!("{}", t!("init.next_steps", locale = locale));

    Ok(())
}

fn prompt_config(locale: &str) -> Result<HarnessConfig> {
    let default_language = LANGUAGES.iter().position(|l| *l == locale).unwrap_or(0);
    let language = Select::new()
        .with_prompt(t!("init.prompt_language", locale = locale).to_string())
        .items(&LANGUAGES)
        .default(default_language)
        .interact()?;
    let color = Confirm::new()
        .with_prompt(t!("init.prompt_color", locale = locale).to_string())
        .default(true)
        .interact()?;
    let run_benchmarks = Confirm::new()
        .with_prompt(t!("init.prompt_benchmarks", locale = locale).to_string())
        .default(true)
        .interact()?;

    Ok(HarnessConfig {
        language: LANGUAGES[language].to_string(),
        color,
        run_benchmarks,
        ..HarnessConfig::default()
    })
}

//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` command: load the configuration, apply
//! command-line overrides, run the suite and write the optional reports.
//!
//! 此模块实现 `run` 命令：加载配置、应用命令行覆盖项、运行测试套件并写入可选报告。

use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::*;

use crate::cli::DEFAULT_CONFIG_FILE;
use crate::core::config::{HarnessConfig, OutputFormat};
use crate::core::execution::Harness;
use crate::infra::t;
use crate::reporting::{ConsoleReporter, JsonReporter, generate_html_report, generate_json_report};

/// Options of the `run` command. `None`/`false` leaves the configured value alone.
/// `run` 命令的选项。`None`/`false` 表示保留配置文件中的值。
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config: PathBuf,
    /// The config path was given on the command line, so it must exist.
    pub config_explicit: bool,
    pub lang: Option<String>,
    pub filter: Option<String>,
    pub no_bench: bool,
    pub format: Option<OutputFormat>,
    pub no_color: bool,
    pub html: Option<PathBuf>,
    pub json_report: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG_FILE),
            config_explicit: false,
            lang: None,
            filter: None,
            no_bench: false,
            format: None,
            no_color: false,
            html: None,
            json_report: None,
        }
    }
}

impl RunOptions {
    /// Command-line values win over the configuration file.
    /// 命令行的值优先于配置文件。
    pub fn apply(&self, config: &mut HarnessConfig) {
        if let Some(lang) = &self.lang {
            config.language = lang.clone();
        }
        if let Some(filter) = &self.filter {
            config.filter = Some(filter.clone());
        }
        if self.no_bench {
            config.run_benchmarks = false;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.no_color {
            config.color = false;
        }
        if let Some(html) = &self.html {
            config.html_report = Some(html.clone());
        }
        if let Some(json) = &self.json_report {
            config.json_report = Some(json.clone());
        }
    }
}

/// Executes the run command and returns the process exit status.
///
/// # Errors / 错误
/// Fails when the configuration cannot be loaded. Test failures are not
/// errors; they show up in the returned status.
///
/// 无法加载配置时失败。测试失败不算错误，它们体现在返回的状态码中。
pub fn execute(harness: &mut Harness, options: RunOptions) -> Result<u8> {
    let (mut config, loaded) = load_config(&options.config, options.config_explicit)?;
    options.apply(&mut config);

    let locale = crate::resolve_locale(&config.language);
    rust_i18n::set_locale(&locale);

    if !config.color {
        colored::control::set_override(false);
    }

    match config.format {
        OutputFormat::Console => {
            if loaded {
                println!(
                    "{}",
                    t!("run.config_loaded", path = options.config.display()).cyan()
                );
            } else {
                println!("{}", t!("run.config_default").yellow());
            }
            harness.set_reporter(ConsoleReporter::new(locale.clone()));
        }
        // Stdout carries only event lines in JSON mode.
        OutputFormat::Json => harness.set_reporter(JsonReporter::stdout()),
    }

    harness.set_config(config.clone());
    let report = harness.run_all();

    if let Some(path) = &config.html_report {
        match generate_html_report(&report, path, &locale) {
            Ok(()) => eprintln!("{}", t!("run.html_written", path = path.display()).green()),
            Err(e) => eprintln!("{} {:#}", t!("run.report_failed").red(), e),
        }
    }
    if let Some(path) = &config.json_report {
        match generate_json_report(&report, path) {
            Ok(()) => eprintln!("{}", t!("run.json_written", path = path.display()).green()),
            Err(e) => eprintln!("{} {:#}", t!("run.report_failed").red(), e),
        }
    }

    Ok(report.exit_status())
}

/// Loads the configuration file. A missing file that was not asked for
/// explicitly means default settings. Returns whether a file was read.
///
/// 加载配置文件。未显式指定且不存在的文件表示使用默认设置。返回是否读取了文件。
pub fn load_config(path: &Path, explicit: bool) -> Result<(HarnessConfig, bool)> {
    if !explicit && !path.exists() {
        return Ok((HarnessConfig::default(), false));
    }
    Ok((HarnessConfig::load(path)?, true))
}

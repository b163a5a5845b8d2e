//! # CLI Module / 命令行模块
//!
//! Command-line entry point for suite binaries. A suite binary registers its
//! tests in one function and hands it to [`main_with`]:
//!
//! 测试套件二进制的命令行入口。套件在一个函数中注册测试，并将其交给 [`main_with`]：
//!
//! ```no_run
//! use fixture_bench::{Harness, cli};
//!
//! fn register(harness: &mut Harness) {
//!     harness.register_test("math", "add", |t| {
//!         t.check(2 + 2 == 4);
//!     });
//! }
//!
//! fn main() -> std::process::ExitCode {
//!     cli::main_with(register)
//! }
//! ```

pub mod commands;

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use colored::*;

use crate::core::config::OutputFormat;
use crate::core::execution::Harness;
use crate::infra::t;

/// Default configuration file looked up by `run`.
pub const DEFAULT_CONFIG_FILE: &str = "Harness.toml";

/// Parses the process arguments, registers the suite and runs the selected
/// command. The exit code is the run's error count, saturated to 255.
///
/// 解析进程参数、注册测试套件并执行所选命令。退出码为本次运行的错误计数（上限 255）。
pub fn main_with(register: impl FnOnce(&mut Harness)) -> ExitCode {
    match run_from(std::env::args_os(), register) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}

/// Same as [`main_with`] with explicit arguments, returning the exit status.
pub fn run_from<I, T>(args: I, register: impl FnOnce(&mut Harness)) -> Result<u8>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    // Pre-parse language and initialize i18n first.
    let requested_lang = pre_parse_language(&args);
    let language = match &requested_lang {
        Some(lang) => crate::resolve_locale(lang),
        None => crate::init(),
    };
    rust_i18n::set_locale(&language);

    let matches = build_cli(&language).get_matches_from(args);

    let mut harness = Harness::new();
    register(&mut harness);

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            let options = run_options(run_matches, requested_lang);
            commands::run::execute(&mut harness, options)
        }
        Some(("list", _)) => {
            commands::list::execute(&harness, &language);
            Ok(0)
        }
        Some(("init", init_matches)) => {
            let output = init_matches
                .get_one::<PathBuf>("output")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            let force = init_matches.get_flag("force");
            let non_interactive = init_matches.get_flag("non-interactive");
            commands::init::execute(&output, force, non_interactive, &language)?;
            Ok(0)
        }
        _ => {
            // No subcommand: run everything with default options.
            let options = commands::run::RunOptions {
                lang: requested_lang,
                ..Default::default()
            };
            commands::run::execute(&mut harness, options)
        }
    }
}

/// Looks for a `--lang <VALUE>` or `--lang=<VALUE>` argument before the full
/// CLI is built, so help texts can be localized.
pub fn pre_parse_language(args: &[OsString]) -> Option<String> {
    let mut args = args.iter().map(|arg| arg.to_str());
    while let Some(arg) = args.next() {
        match arg {
            Some("--lang") => return args.next().flatten().map(str::to_string),
            Some(arg) => {
                if let Some(lang) = arg.strip_prefix("--lang=") {
                    return Some(lang.to_string());
                }
            }
            None => {}
        }
    }
    None
}

fn run_options(matches: &ArgMatches, lang: Option<String>) -> commands::run::RunOptions {
    let format = matches
        .get_one::<String>("format")
        .map(|format| match format.as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Console,
        });

    commands::run::RunOptions {
        config: matches
            .get_one::<PathBuf>("config")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
        config_explicit: matches.value_source("config") == Some(ValueSource::CommandLine),
        lang,
        filter: matches.get_one::<String>("filter").cloned(),
        no_bench: matches.get_flag("no-bench"),
        format,
        no_color: matches.get_flag("no-color"),
        html: matches.get_one::<PathBuf>("html").cloned(),
        json_report: matches.get_one::<PathBuf>("json-report").cloned(),
    }
}

fn build_cli(locale: &str) -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli.about", locale = locale).to_string())
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli.lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("run")
                .about(t!("cli.run_about", locale = locale).to_string())
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help(t!("cli.config", locale = locale).to_string())
                        .value_name("CONFIG")
                        .default_value(DEFAULT_CONFIG_FILE)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("filter")
                        .short('f')
                        .long("filter")
                        .help(t!("cli.filter", locale = locale).to_string())
                        .value_name("TEXT")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("no-bench")
                        .long("no-bench")
                        .help(t!("cli.no_bench", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .help(t!("cli.format", locale = locale).to_string())
                        .value_name("FORMAT")
                        .value_parser(["console", "json"])
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("no-color")
                        .long("no-color")
                        .help(t!("cli.no_color", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("html")
                        .long("html")
                        .help(t!("cli.html", locale = locale).to_string())
                        .value_name("HTML")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("json-report")
                        .long("json-report")
                        .help(t!("cli.json_report", locale = locale).to_string())
                        .value_name("JSON")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(Command::new("list").about(t!("cli.list_about", locale = locale).to_string()))
        .subcommand(
            Command::new("init")
                .about(t!("cli.init_about", locale = locale).to_string())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help(t!("cli.output", locale = locale).to_string())
                        .value_name("OUTPUT")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help(t!("cli.force", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("cli.non_interactive", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

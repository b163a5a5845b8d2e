//! Subcommands of the suite CLI / 套件命令行的子命令

pub mod init;
pub mod list;
pub mod run;

//! # File System Operations Module / 文件系统操作模块
//!
//! Writing report and configuration files, creating missing parent
//! directories on the way.
//!
//! 写入报告与配置文件，并在需要时创建缺失的父目录。

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Creates the parent directory of `path` if it does not exist yet.
/// 如果 `path` 的父目录不存在，则创建它。
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create directory: {}", parent.display())
            })?;
        }
    }
    Ok(())
}

/// Writes `contents` to `path`, replacing any existing file.
///
/// # Arguments
/// * `path` - Destination file
/// * `contents` - Full file contents
pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, contents)
        .with_context(|| format!("Failed to write report: {}", path.display()))
}

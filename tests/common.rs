//! Shared test utilities for integration tests.
//!
//! Provides helpers for writing markdown fixtures to temporary directories
//! and running the `gh-autolink` binary against them.

#![allow(dead_code)]

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Full commit hash used across fixtures.
pub const SHA: &str = "a5c3785ed8d6a35868bc169f07e40e889087fd2e";

/// Writes markdown into a fresh temporary directory.
///
/// # Returns
///
/// Temporary directory (kept alive by the caller) and the file path
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_markdown(name: &str, content: &str) -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join(name);
    std::fs::write(&path, content)?;
    Ok((dir, path))
}

/// Runs the built binary with arguments.
///
/// # Errors
///
/// Returns error if the process cannot be spawned
pub fn run_cli(args: &[&str], cwd: &Path) -> Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_gh-autolink"))
        .args(args)
        .current_dir(cwd)
        .output()?;
    Ok(output)
}

//! Dependency installation through the project's package manager
//!
//! The package manager runs as a child process that is awaited with a
//! bounded timeout. A child still running when the timeout expires is
//! killed and reported as [`InstallOutcome::TimedOut`].

use crate::config::key::PackageManager;
use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Lines of stderr kept in a failure report
const STDERR_TAIL_LINES: usize = 20;

/// Lines of stdout shown after a successful install
pub const STDOUT_TAIL_LINES: usize = 5;

/// Result of one package manager invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Succeeded { stdout: String },
    Failed { code: Option<i32>, stderr: String },
    TimedOut { after: Duration },
}

impl InstallOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, InstallOutcome::Succeeded { .. })
    }

    /// Last `lines` of a successful run's output, if it printed anything
    pub fn stdout_tail(&self, lines: usize) -> Option<String> {
        match self {
            InstallOutcome::Succeeded { stdout } if !stdout.trim().is_empty() => {
                Some(tail(stdout, lines))
            }
            _ => None,
        }
    }
}

impl fmt::Display for InstallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallOutcome::Succeeded { .. } => write!(f, "Dependencies installed"),
            InstallOutcome::Failed { code: Some(code), .. } => {
                write!(f, "Installation failed with exit code {}", code)
            }
            InstallOutcome::Failed { code: None, .. } => {
                write!(f, "Installation was terminated by a signal")
            }
            InstallOutcome::TimedOut { after } => {
                write!(f, "Installation timed out after {} seconds", after.as_secs())
            }
        }
    }
}

/// Arguments passed to the package manager
pub fn install_args(pm: PackageManager, packages: &[String], dev: bool) -> Vec<String> {
    let verb = match pm {
        PackageManager::Npm => "install",
        PackageManager::Bun => "add",
    };
    let mut args = vec![verb.to_string()];
    if dev {
        args.push("-D".to_string());
    }
    args.extend(packages.iter().cloned());
    args
}

/// The full command line, for display
pub fn install_command(pm: PackageManager, packages: &[String], dev: bool) -> String {
    let mut parts = vec![pm.binary().to_string()];
    parts.extend(install_args(pm, packages, dev));
    parts.join(" ")
}

/// Install `packages` in `cwd`, waiting at most `limit`
///
/// An empty package list succeeds without spawning anything.
pub async fn install(
    pm: PackageManager,
    packages: &[String],
    dev: bool,
    cwd: &Path,
    limit: Duration,
) -> Result<InstallOutcome> {
    install_with(&[pm.binary().to_string()], pm, packages, dev, cwd, limit).await
}

/// Like [`install`], but launched through `launcher` instead of the package manager binary
///
/// `launcher` is the program followed by any leading arguments.
pub async fn install_with(
    launcher: &[String],
    pm: PackageManager,
    packages: &[String],
    dev: bool,
    cwd: &Path,
    limit: Duration,
) -> Result<InstallOutcome> {
    let (program, leading) = launcher
        .split_first()
        .context("Install launcher has no program")?;
    if packages.is_empty() {
        return Ok(InstallOutcome::Succeeded {
            stdout: String::new(),
        });
    }
    let mut args = leading.to_vec();
    args.extend(install_args(pm, packages, dev));
    run_with_timeout(program, &args, cwd, limit).await
}

/// Spawn `program` and wait for it to exit within `limit`
///
/// Spawn errors are returned as `Err`; everything after a successful spawn
/// is reported through the outcome.
pub async fn run_with_timeout(
    program: &str,
    args: &[String],
    cwd: &Path,
    limit: Duration,
) -> Result<InstallOutcome> {
    let child = TokioCommand::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("Failed to start {}", program))?;

    // Dropping the pending wait drops the child, which kills it
    let output = match timeout(limit, child.wait_with_output()).await {
        Ok(output) => output.with_context(|| format!("Failed to wait for {}", program))?,
        Err(_) => return Ok(InstallOutcome::TimedOut { after: limit }),
    };

    if output.status.success() {
        Ok(InstallOutcome::Succeeded {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    } else {
        Ok(InstallOutcome::Failed {
            code: output.status.code(),
            stderr: tail(&String::from_utf8_lossy(&output.stderr), STDERR_TAIL_LINES),
        })
    }
}

fn tail(text: &str, lines: usize) -> String {
    let all: Vec<&str> = text.trim_end().lines().collect();
    let start = all.len().saturating_sub(lines);
    all[start..].join("\n")
}

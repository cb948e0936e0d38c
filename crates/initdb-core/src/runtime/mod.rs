//! Package manager detection and dependency installation
//!
//! This module provides:
//! - Detection of npm, Node.js and Bun on PATH
//! - Timed package installs that report success, failure or timeout

pub mod check;
pub mod install;

pub use check::{check_bun, check_node, check_npm, check_package_manager, RuntimeInfo};
pub use install::{install, install_command, install_with, InstallOutcome, STDOUT_TAIL_LINES};

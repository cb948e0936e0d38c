//! initdb-core - Shared library for the node-initdb and node-add CLIs
//!
//! This library scaffolds Node.js backend projects (Express, Fastify or
//! Elysia on MongoDB or SQL, in JavaScript or TypeScript) from an embedded
//! template catalog.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - catalog lookup, name binding, staged
//!   materialization, timed dependency installation
//! - **Layer 2: Workflow Orchestration** - the configuration collector,
//!   package.json generation and the [`project`] workflows
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use initdb_core::config::{ConfigurationKey, PackageMetadata};
//! use initdb_core::project;
//!
//! let metadata = PackageMetadata::defaults(&key, "shop-api");
//! let report = project::scaffold_project(&root, &key, &metadata).await?;
//! let outcomes = report.install.run(&root, settings.install_timeout).await?;
//! ```

pub mod config;
pub mod error;
pub mod project;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{AxisFlags, ConfigurationKey, PackageMetadata, PartialKey, Settings};
pub use error::{Result, ScaffoldError};
pub use runtime::{check_package_manager, InstallOutcome, RuntimeInfo};
pub use templates::{lookup, materialize, MaterializeReport, ScaffoldManifest};

#[cfg(feature = "tui")]
pub use tui::{run_add, run_init};

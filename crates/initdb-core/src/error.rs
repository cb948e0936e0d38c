//! Error types shared by the scaffolding pipeline

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// More than one flag was given for the same axis
    #[error("Conflicting {axis} flags: {} (choose only one)", flags.join(", "))]
    ConflictingFlags {
        axis: &'static str,
        flags: Vec<&'static str>,
    },

    #[error("Missing module name. Usage: node-add <module-name> [flags]")]
    MissingModuleName,

    /// An axis is still unset after flags, detection and prompting
    #[error("No {axis} selected")]
    UnresolvedAxis { axis: &'static str },

    /// A single answer failed validation; the question is asked again
    #[error("Invalid {question}: {reason}")]
    InvalidAnswer {
        question: &'static str,
        reason: String,
    },

    #[error("Template catalog is malformed: {0}")]
    Catalog(String),

    #[error("Template source not found: {0}")]
    MissingSource(String),

    #[error("Failed to render package.json: {0}")]
    PackageJson(#[from] serde_json::Error),

    #[error("Refusing to overwrite existing module files: {}", paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "))]
    ModuleExists { paths: Vec<PathBuf> },

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl ScaffoldError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

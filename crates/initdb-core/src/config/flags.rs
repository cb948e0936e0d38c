//! Command-line axis flags shared by both binaries

use super::key::{Database, Framework, Language, PackageManager, PartialKey};
use crate::error::{Result, ScaffoldError};
use std::ffi::OsString;

/// Flags selecting the database, framework, language and package manager
///
/// Every axis accepts at most one flag. Conflicts are detected by
/// [`AxisFlags::resolve`] instead of clap so they exit with status 1.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct AxisFlags {
    /// Use MongoDB with mongoose
    #[arg(short = 'm', long = "mongo")]
    pub mongo: bool,

    /// Use a SQL database with sequelize
    #[arg(short = 's', long = "seque")]
    pub seque: bool,

    /// Use Express
    #[arg(short = 'e', long = "express")]
    pub express: bool,

    /// Use Fastify
    #[arg(short = 'f', long = "fastify")]
    pub fastify: bool,

    /// Use Elysia (also accepted as -el)
    #[arg(long = "elysia")]
    pub elysia: bool,

    /// Generate JavaScript sources
    #[arg(short = 'j', long = "javascript")]
    pub javascript: bool,

    /// Generate TypeScript sources
    #[arg(short = 't', long = "typescript")]
    pub typescript: bool,

    /// Install dependencies with npm
    #[arg(long = "npm")]
    pub npm: bool,

    /// Install dependencies with bun
    #[arg(long = "bun")]
    pub bun: bool,
}

impl AxisFlags {
    /// Turn the flags into a partial key, failing on any axis with two or more flags set
    pub fn resolve(&self) -> Result<PartialKey> {
        Ok(PartialKey {
            database: pick(
                "database",
                &[
                    (self.mongo, "--mongo", Database::Mongo),
                    (self.seque, "--seque", Database::Sequelize),
                ],
            )?,
            framework: pick(
                "framework",
                &[
                    (self.express, "--express", Framework::Express),
                    (self.fastify, "--fastify", Framework::Fastify),
                    (self.elysia, "--elysia", Framework::Elysia),
                ],
            )?,
            language: pick(
                "language",
                &[
                    (self.javascript, "--javascript", Language::JavaScript),
                    (self.typescript, "--typescript", Language::TypeScript),
                ],
            )?,
            package_manager: pick(
                "package manager",
                &[
                    (self.npm, "--npm", PackageManager::Npm),
                    (self.bun, "--bun", PackageManager::Bun),
                ],
            )?,
        })
    }
}

fn pick<T: Copy>(axis: &'static str, options: &[(bool, &'static str, T)]) -> Result<Option<T>> {
    let chosen: Vec<_> = options.iter().filter(|(set, _, _)| *set).collect();
    match chosen.as_slice() {
        [] => Ok(None),
        [(_, _, value)] => Ok(Some(*value)),
        many => Err(ScaffoldError::ConflictingFlags {
            axis,
            flags: many.iter().map(|(_, flag, _)| *flag).collect(),
        }),
    }
}

/// Rewrite the two-letter `-el` short form into `--elysia` before clap sees it
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            if arg == "-el" {
                OsString::from("--elysia")
            } else {
                arg
            }
        })
        .collect()
}

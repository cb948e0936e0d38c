//! Scaffolding workflows shared by both binaries
//!
//! A full project is: catalog lookup, package.json added to the manifest,
//! materialization, then dependency installation. Adding a module only
//! materializes the model, controller and route for one resource.

use crate::config::generator::package_json_descriptor;
use crate::config::{ConfigurationKey, PackageManager, PackageMetadata};
use crate::error::{Result, ScaffoldError};
use crate::runtime::install::{install_with, InstallOutcome};
use crate::templates::{self, materialize, MaterializeReport, ScaffoldManifest};
use std::path::Path;
use std::time::Duration;

/// Packages to install after the tree is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    pub package_manager: PackageManager,
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
}

impl InstallPlan {
    pub fn for_manifest(key: &ConfigurationKey, manifest: &ScaffoldManifest) -> Self {
        Self {
            package_manager: key.package_manager,
            dependencies: manifest.dependencies.clone(),
            dev_dependencies: manifest.dev_dependencies.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && self.dev_dependencies.is_empty()
    }

    /// The (packages, dev) batches in install order
    pub fn batches(&self) -> Vec<(&[String], bool)> {
        [(&self.dependencies[..], false), (&self.dev_dependencies[..], true)]
            .into_iter()
            .filter(|(packages, _)| !packages.is_empty())
            .collect()
    }

    /// Install runtime then dev dependencies, stopping at the first batch that does not succeed
    ///
    /// One outcome is returned per batch that ran.
    pub async fn run(&self, cwd: &Path, limit: Duration) -> anyhow::Result<Vec<InstallOutcome>> {
        self.run_with(&[self.package_manager.binary().to_string()], cwd, limit)
            .await
    }

    /// Like [`InstallPlan::run`], launching each batch through `launcher`
    pub async fn run_with(
        &self,
        launcher: &[String],
        cwd: &Path,
        limit: Duration,
    ) -> anyhow::Result<Vec<InstallOutcome>> {
        let mut outcomes = Vec::new();
        for (packages, dev) in self.batches() {
            let outcome =
                install_with(launcher, self.package_manager, packages, dev, cwd, limit).await?;
            let stop = !outcome.is_success();
            outcomes.push(outcome);
            if stop {
                break;
            }
        }
        Ok(outcomes)
    }
}

/// Result of writing a new project
#[derive(Debug, Clone)]
pub struct ProjectReport {
    pub materialized: MaterializeReport,
    pub install: InstallPlan,
}

/// Full manifest for a new project, package.json included
///
/// The framework's entry file is written at `metadata.main`.
pub fn project_manifest(key: &ConfigurationKey, metadata: &PackageMetadata) -> Result<ScaffoldManifest> {
    let mut manifest = templates::lookup(key, &metadata.name)?;
    let default_main = format!("index.{}", key.language.extension());
    manifest.move_file(&default_main, &metadata.main)?;
    manifest.files.push(package_json_descriptor(key, metadata)?);
    Ok(manifest)
}

/// Write a new project into `root`; installing is left to the caller
pub async fn scaffold_project(
    root: &Path,
    key: &ConfigurationKey,
    metadata: &PackageMetadata,
) -> Result<ProjectReport> {
    let manifest = project_manifest(key, metadata)?;
    let materialized = materialize(root, &manifest).await?;
    Ok(ProjectReport {
        materialized,
        install: InstallPlan::for_manifest(key, &manifest),
    })
}

/// Write the model, controller and route for `name` into `root`
///
/// Existing module files are left alone unless `force` is set.
pub async fn add_module(
    root: &Path,
    key: &ConfigurationKey,
    name: &str,
    force: bool,
) -> Result<MaterializeReport> {
    if name.trim().is_empty() {
        return Err(ScaffoldError::MissingModuleName);
    }

    let manifest = templates::module_manifest(key, name)?;

    if !force {
        let existing: Vec<_> = manifest
            .files
            .iter()
            .map(|f| f.relative_path())
            .filter(|path| root.join(path).exists())
            .collect();
        if !existing.is_empty() {
            return Err(ScaffoldError::ModuleExists { paths: existing });
        }
    }

    materialize(root, &manifest).await
}

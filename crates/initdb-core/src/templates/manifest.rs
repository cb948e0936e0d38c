//! Template catalog types and manifest resolution
//!
//! The catalog (`templates/catalog.yaml`) is plain data: it lists the
//! folders of a project, every file entry with the template source it is
//! rendered from, the three add-module entries, and dependency groups.
//! Entries carry a [`Selector`]; an entry applies to a
//! [`ConfigurationKey`] when every axis the selector names matches.

use super::binder::Bindings;
use super::source;
use crate::config::key::{ConfigurationKey, Database, Framework, Language, PackageManager};
use crate::error::{Result, ScaffoldError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Resource name bound into the module triplet of a fresh project
pub const EXAMPLE_RESOURCE: &str = "example";

/// Axis filter for catalog entries; unset axes match anything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Selector {
    #[serde(default)]
    pub database: Option<Database>,
    #[serde(default)]
    pub framework: Option<Framework>,
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub package_manager: Option<PackageManager>,
}

impl Selector {
    pub fn matches(&self, key: &ConfigurationKey) -> bool {
        self.database.map_or(true, |d| d == key.database)
            && self.framework.map_or(true, |f| f == key.framework)
            && self.language.map_or(true, |l| l == key.language)
            && self.package_manager.map_or(true, |p| p == key.package_manager)
    }
}

/// A file to render, before placeholder binding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    /// Folder relative to the project root (empty for the root itself)
    #[serde(default)]
    pub folder: String,

    /// File name pattern, may contain placeholders
    pub name: String,

    /// Template source id, may contain `{{ext}}`
    pub source: String,

    #[serde(default)]
    pub when: Selector,
}

/// Packages installed when the selector matches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyGroup {
    pub packages: Vec<String>,

    /// Install as development dependencies
    #[serde(default)]
    pub dev: bool,

    #[serde(default)]
    pub when: Selector,
}

/// Entries written by the add-module command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleSection {
    pub folders: Vec<String>,
    pub files: Vec<FileEntry>,
}

/// Root catalog document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub folders: Vec<String>,
    pub files: Vec<FileEntry>,
    pub module: ModuleSection,
    #[serde(default)]
    pub dependencies: Vec<DependencyGroup>,
}

/// One file to be written: folder, name and final content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub folder: String,
    pub name: String,
    pub content: String,
}

impl FileDescriptor {
    /// Path relative to the project root
    pub fn relative_path(&self) -> PathBuf {
        if self.folder.is_empty() {
            PathBuf::from(&self.name)
        } else {
            PathBuf::from(&self.folder).join(&self.name)
        }
    }
}

/// Everything needed to materialize one configuration
#[derive(Debug, Clone, Default)]
pub struct ScaffoldManifest {
    pub folders: Vec<String>,
    pub files: Vec<FileDescriptor>,
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
}

impl ScaffoldManifest {
    /// Find a descriptor by its path relative to the root
    pub fn file(&self, relative: &str) -> Option<&FileDescriptor> {
        self.files
            .iter()
            .find(|f| f.relative_path() == PathBuf::from(relative))
    }

    /// Write the file planned at `from` to `to` instead
    pub fn move_file(&mut self, from: &str, to: &str) -> Result<()> {
        if from == to {
            return Ok(());
        }
        if self.file(to).is_some() {
            return Err(ScaffoldError::Catalog(format!(
                "cannot move {} to {}: target already planned",
                from, to
            )));
        }

        let target = PathBuf::from(to);
        let file = self
            .files
            .iter_mut()
            .find(|f| f.relative_path() == PathBuf::from(from))
            .ok_or_else(|| ScaffoldError::Catalog(format!("no file planned at {}", from)))?;

        file.folder = target
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        file.name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(())
    }
}

impl Catalog {
    /// Parse the catalog compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::from_yaml(source::CATALOG)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| ScaffoldError::Catalog(e.to_string()))
    }

    /// Full project manifest for `key`
    ///
    /// Includes the module triplet bound to [`EXAMPLE_RESOURCE`].
    pub fn project_manifest(&self, key: &ConfigurationKey, project: &str) -> Result<ScaffoldManifest> {
        let ext = key.language.extension();
        let base = Bindings::new().with_project(project).with_ext(ext);
        let module = base.clone().with_name(EXAMPLE_RESOURCE);

        let mut files = render_entries(&self.files, key, &base)?;
        files.extend(render_entries(&self.module.files, key, &module)?);

        let mut folders = self.folders.clone();
        for folder in &self.module.folders {
            if !folders.contains(folder) {
                folders.push(folder.clone());
            }
        }

        let (dependencies, dev_dependencies) = self.dependencies_for(key);

        let manifest = ScaffoldManifest {
            folders,
            files,
            dependencies,
            dev_dependencies,
        };
        ensure_unique_paths(&manifest)?;
        Ok(manifest)
    }

    /// Manifest holding only the model, controller and route for `name`
    pub fn module_manifest(&self, key: &ConfigurationKey, name: &str) -> Result<ScaffoldManifest> {
        let bindings = Bindings::new()
            .with_name(name)
            .with_ext(key.language.extension());

        let manifest = ScaffoldManifest {
            folders: self.module.folders.clone(),
            files: render_entries(&self.module.files, key, &bindings)?,
            dependencies: Vec::new(),
            dev_dependencies: Vec::new(),
        };
        ensure_unique_paths(&manifest)?;
        Ok(manifest)
    }

    /// Runtime and development packages for `key`, deduplicated in catalog order
    pub fn dependencies_for(&self, key: &ConfigurationKey) -> (Vec<String>, Vec<String>) {
        let mut deps = Vec::new();
        let mut dev_deps = Vec::new();

        for group in self.dependencies.iter().filter(|g| g.when.matches(key)) {
            let target = if group.dev { &mut dev_deps } else { &mut deps };
            for package in &group.packages {
                if !target.contains(package) {
                    target.push(package.clone());
                }
            }
        }

        (deps, dev_deps)
    }
}

fn render_entries(
    entries: &[FileEntry],
    key: &ConfigurationKey,
    bindings: &Bindings,
) -> Result<Vec<FileDescriptor>> {
    entries
        .iter()
        .filter(|entry| entry.when.matches(key))
        .map(|entry| {
            let source_id = bindings.apply(&entry.source);
            let template = source::get(&source_id)
                .ok_or_else(|| ScaffoldError::MissingSource(source_id.clone()))?;
            Ok(FileDescriptor {
                folder: bindings.apply(&entry.folder),
                name: bindings.apply(&entry.name),
                content: bindings.apply(template),
            })
        })
        .collect()
}

fn ensure_unique_paths(manifest: &ScaffoldManifest) -> Result<()> {
    let mut seen = HashSet::new();
    for file in &manifest.files {
        let path = file.relative_path();
        if !seen.insert(path.clone()) {
            return Err(ScaffoldError::Catalog(format!(
                "duplicate target path {}",
                path.display()
            )));
        }
    }
    Ok(())
}

/// Resolve the full project manifest for `key` from the embedded catalog
pub fn lookup(key: &ConfigurationKey, project: &str) -> Result<ScaffoldManifest> {
    Catalog::embedded()?.project_manifest(key, project)
}

/// Resolve the add-module manifest for `key` from the embedded catalog
pub fn module_manifest(key: &ConfigurationKey, name: &str) -> Result<ScaffoldManifest> {
    Catalog::embedded()?.module_manifest(key, name)
}

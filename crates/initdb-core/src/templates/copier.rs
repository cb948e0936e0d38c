//! Writing a manifest to disk
//!
//! Files are first written into a staging directory inside the target root
//! and only moved into place once every file has been staged. A failure
//! while staging leaves the target tree untouched.

use super::manifest::ScaffoldManifest;
use crate::error::{Result, ScaffoldError};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

const STAGING_PREFIX: &str = ".initdb-staging-";

/// One filesystem change made by [`materialize`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    FolderCreated(PathBuf),
    FileWritten(PathBuf),
    FileOverwritten(PathBuf),
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::FolderCreated(p) => write!(f, "Created folder {}", p.display()),
            Change::FileWritten(p) => write!(f, "Created {}", p.display()),
            Change::FileOverwritten(p) => write!(f, "Overwrote {}", p.display()),
        }
    }
}

/// Changes made by one materialization, paths relative to the root
#[derive(Debug, Clone, Default)]
pub struct MaterializeReport {
    pub changes: Vec<Change>,
}

impl MaterializeReport {
    /// Relative paths of every file written, new or overwritten
    pub fn files(&self) -> Vec<&Path> {
        self.changes
            .iter()
            .filter_map(|c| match c {
                Change::FileWritten(p) | Change::FileOverwritten(p) => Some(p.as_path()),
                Change::FolderCreated(_) => None,
            })
            .collect()
    }

    pub fn created_folders(&self) -> Vec<&Path> {
        self.changes
            .iter()
            .filter_map(|c| match c {
                Change::FolderCreated(p) => Some(p.as_path()),
                _ => None,
            })
            .collect()
    }
}

/// Create the manifest's folders and write its files under `root`
///
/// Existing folders are fine; existing files are overwritten.
pub async fn materialize(root: &Path, manifest: &ScaffoldManifest) -> Result<MaterializeReport> {
    fs::create_dir_all(root)
        .await
        .map_err(|e| ScaffoldError::io(format!("Failed to create {}", root.display()), e))?;

    let staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(root)
        .map_err(|e| ScaffoldError::io("Failed to create staging directory", e))?;

    stage_files(staging.path(), manifest).await?;

    let mut report = MaterializeReport::default();

    for folder in &manifest.folders {
        let target = root.join(folder);
        if !target.is_dir() {
            fs::create_dir_all(&target).await.map_err(|e| {
                ScaffoldError::io(format!("Failed to create folder {}", target.display()), e)
            })?;
            report.changes.push(Change::FolderCreated(PathBuf::from(folder)));
        }
    }

    commit(staging.path(), root, &mut report).await?;

    staging
        .close()
        .map_err(|e| ScaffoldError::io("Failed to remove staging directory", e))?;

    Ok(report)
}

async fn stage_files(staging: &Path, manifest: &ScaffoldManifest) -> Result<()> {
    for file in &manifest.files {
        let target = staging.join(file.relative_path());
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                ScaffoldError::io(format!("Failed to stage {}", file.relative_path().display()), e)
            })?;
        }
        fs::write(&target, &file.content).await.map_err(|e| {
            ScaffoldError::io(format!("Failed to stage {}", file.relative_path().display()), e)
        })?;
    }
    Ok(())
}

/// Move every staged file to the same relative path under `root`
///
/// Existing targets are rewritten in place so symlinks and permissions survive.
async fn commit(staging: &Path, root: &Path, report: &mut MaterializeReport) -> Result<()> {
    for entry in WalkDir::new(staging).sort_by_file_name() {
        let entry =
            entry.map_err(|e| ScaffoldError::io("Failed to read staged files", e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(staging)
            .map_err(|e| ScaffoldError::Catalog(e.to_string()))?
            .to_path_buf();
        let target = root.join(&relative);

        if let Some(parent) = target.parent() {
            if !parent.is_dir() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    ScaffoldError::io(format!("Failed to create {}", parent.display()), e)
                })?;
                if let Ok(folder) = parent.strip_prefix(root) {
                    report.changes.push(Change::FolderCreated(folder.to_path_buf()));
                }
            }
        }

        let existed = target.exists();
        let written = if existed {
            match fs::read(entry.path()).await {
                Ok(content) => fs::write(&target, content).await,
                Err(e) => Err(e),
            }
        } else {
            fs::rename(entry.path(), &target).await
        };
        written.map_err(|e| ScaffoldError::io(format!("Failed to write {}", target.display()), e))?;

        report.changes.push(if existed {
            Change::FileOverwritten(relative)
        } else {
            Change::FileWritten(relative)
        });
    }

    Ok(())
}

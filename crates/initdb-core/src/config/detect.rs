//! Infer configuration axes from an existing project

use super::generator::PACKAGE_JSON;
use super::key::{Database, Framework, Language, PackageManager, PartialKey};
use serde_json::Value;
use std::path::Path;

const DATABASE_PACKAGES: &[(&str, Database)] = &[
    ("mongoose", Database::Mongo),
    ("sequelize", Database::Sequelize),
];

const FRAMEWORK_PACKAGES: &[(&str, Framework)] = &[
    ("express", Framework::Express),
    ("fastify", Framework::Fastify),
    ("elysia", Framework::Elysia),
];

const LOCKFILES: &[(&str, PackageManager)] = &[
    ("bun.lockb", PackageManager::Bun),
    ("bun.lock", PackageManager::Bun),
    ("package-lock.json", PackageManager::Npm),
];

/// Whether `root` looks like a Node.js project
pub fn is_node_project(root: &Path) -> bool {
    root.join(PACKAGE_JSON).is_file()
}

/// Axes that can be read off the project in `root`
///
/// An axis stays unset when nothing points at it, or when the project
/// points at more than one value. An unreadable package.json contributes
/// nothing.
pub fn detect(root: &Path) -> PartialKey {
    let package = std::fs::read_to_string(root.join(PACKAGE_JSON))
        .ok()
        .and_then(|content| serde_json::from_str::<Value>(&content).ok());
    let deps = package.as_ref().map(dependency_names).unwrap_or_default();

    let language = if root.join("tsconfig.json").is_file() {
        Some(Language::TypeScript)
    } else if package.is_some() {
        Some(Language::JavaScript)
    } else {
        None
    };

    PartialKey {
        database: unique_match(&deps, DATABASE_PACKAGES),
        framework: unique_match(&deps, FRAMEWORK_PACKAGES),
        language,
        package_manager: unique_lockfile(root),
    }
}

fn dependency_names(package: &Value) -> Vec<String> {
    ["dependencies", "devDependencies"]
        .iter()
        .filter_map(|section| package.get(section).and_then(Value::as_object))
        .flat_map(|deps| deps.keys().cloned())
        .collect()
}

fn unique_match<T: Copy + PartialEq>(deps: &[String], table: &[(&str, T)]) -> Option<T> {
    let mut found: Vec<T> = Vec::new();
    for (package, value) in table {
        if deps.iter().any(|d| d == package) && !found.contains(value) {
            found.push(*value);
        }
    }
    match found.as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

fn unique_lockfile(root: &Path) -> Option<PackageManager> {
    let present: Vec<PackageManager> = LOCKFILES
        .iter()
        .filter(|(file, _)| root.join(file).is_file())
        .map(|(_, pm)| *pm)
        .collect();
    match present.as_slice() {
        [first, rest @ ..] if rest.iter().all(|pm| pm == first) => Some(*first),
        _ => None,
    }
}

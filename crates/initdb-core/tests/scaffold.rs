//! End-to-end scaffolding against a scratch directory

use initdb_core::config::{ConfigurationKey, Database, Framework, Language, PackageManager};
use initdb_core::project::{add_module, scaffold_project};
use initdb_core::templates::materialize;
use initdb_core::{lookup, PackageMetadata};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

fn key(
    database: Database,
    framework: Framework,
    language: Language,
    package_manager: PackageManager,
) -> ConfigurationKey {
    ConfigurationKey {
        database,
        framework,
        language,
        package_manager,
    }
}

/// Every file under `root` with its content, keyed by relative path
fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let relative = e.path().strip_prefix(root).unwrap().to_path_buf();
            let content = std::fs::read(e.path()).unwrap();
            (relative, content)
        })
        .collect()
}

#[tokio::test]
async fn mongo_express_javascript_project() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("shop-api");
    let k = key(
        Database::Mongo,
        Framework::Express,
        Language::JavaScript,
        PackageManager::Npm,
    );
    let metadata = PackageMetadata::defaults(&k, "shop-api");

    let report = scaffold_project(&root, &k, &metadata).await.unwrap();

    for expected in [
        "config/dbConfig.js",
        "Controllers/health.Controller.js",
        "Routes/health.Route.js",
        "Models/example.Model.js",
        "uploads/dummy",
        "Utils/httpCodesAndMessages.js",
        "Utils/responseHandler.js",
        "index.js",
        ".env",
        "package.json",
    ] {
        assert!(root.join(expected).is_file(), "{expected} missing");
    }
    assert!(!root.join("tsconfig.json").exists());

    let package: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(root.join("package.json")).unwrap())
            .unwrap();
    assert_eq!(package["main"], "index.js");
    assert_eq!(package["scripts"]["start"], "node index.js");
    assert_eq!(package["name"], "shop-api");

    assert!(report.install.dependencies.contains(&"mongoose".to_string()));
    assert!(report.install.dependencies.contains(&"express".to_string()));
    assert_eq!(report.materialized.files().len(), snapshot(&root).len());
}

#[tokio::test]
async fn typescript_project_has_tsconfig_and_ts_sources() {
    let dir = tempfile::tempdir().unwrap();
    let k = key(
        Database::Sequelize,
        Framework::Elysia,
        Language::TypeScript,
        PackageManager::Bun,
    );
    let metadata = PackageMetadata::defaults(&k, "svc");

    scaffold_project(dir.path(), &k, &metadata).await.unwrap();

    let files = snapshot(dir.path());
    assert!(files.contains_key(Path::new("tsconfig.json")));
    assert!(files.contains_key(Path::new("index.ts")));
    assert!(files.contains_key(Path::new("Models/example.Model.ts")));
    assert!(!files.keys().any(|p| p.extension().is_some_and(|e| e == "js")));

    let package: serde_json::Value =
        serde_json::from_slice(&files[Path::new("package.json")]).unwrap();
    assert_eq!(package["scripts"]["start"], "bun run index.ts");
}

#[tokio::test]
async fn add_user_module_touches_only_the_triplet() {
    let dir = tempfile::tempdir().unwrap();
    let k = key(
        Database::Mongo,
        Framework::Express,
        Language::JavaScript,
        PackageManager::Npm,
    );
    let metadata = PackageMetadata::defaults(&k, "shop");
    scaffold_project(dir.path(), &k, &metadata).await.unwrap();
    let before = snapshot(dir.path());

    let report = add_module(dir.path(), &k, "user", false).await.unwrap();
    let after = snapshot(dir.path());

    let added: Vec<&PathBuf> = after.keys().filter(|p| !before.contains_key(*p)).collect();
    assert_eq!(
        added,
        vec![
            &PathBuf::from("Controllers/user.Controller.js"),
            &PathBuf::from("Models/user.Model.js"),
            &PathBuf::from("Routes/user.Route.js"),
        ]
    );
    for (path, content) in &before {
        assert_eq!(after.get(path), Some(content), "{} changed", path.display());
    }
    assert_eq!(report.files().len(), 3);
    assert!(report.created_folders().is_empty());

    for path in added {
        let content = String::from_utf8(after[path].clone()).unwrap();
        assert!(!content.contains("{{"), "unbound placeholder in {}", path.display());
    }
    let route = String::from_utf8(after[Path::new("Routes/user.Route.js")].clone()).unwrap();
    assert!(route.contains("require('../Controllers/user.Controller')"));
    assert!(route.contains("listUser"));
}

#[tokio::test]
async fn materializing_every_key_twice_is_stable() {
    for k in ConfigurationKey::all() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = lookup(&k, "demo").unwrap();

        materialize(dir.path(), &manifest).await.unwrap();
        let first = snapshot(dir.path());
        materialize(dir.path(), &manifest).await.unwrap();
        let second = snapshot(dir.path());

        assert_eq!(first, second, "second run differs for {k}");
        assert_eq!(first.len(), manifest.files.len());
    }
}

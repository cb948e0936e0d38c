//! package.json generation

use super::key::{ConfigurationKey, Language, PackageManager};
use crate::error::Result;
use crate::templates::FileDescriptor;
use serde::{Deserialize, Serialize};

/// File name written at the project root
pub const PACKAGE_JSON: &str = "package.json";

/// Name used when the directory name has nothing usable in it
pub const FALLBACK_NAME: &str = "my-app";

pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_TEST_COMMAND: &str = "echo \"Error: no test specified\" && exit 1";
pub const DEFAULT_LICENSE: &str = "ISC";

/// Answers to the package questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
    pub description: String,
    pub main: String,
    pub test: String,
    pub repository: Option<String>,
    pub keywords: Vec<String>,
    pub author: String,
    pub license: String,
}

impl PackageMetadata {
    /// Defaults for a project in a directory called `dir_name`
    pub fn defaults(key: &ConfigurationKey, dir_name: &str) -> Self {
        Self {
            name: sanitize_package_name(dir_name),
            version: DEFAULT_VERSION.to_string(),
            description: String::new(),
            main: format!("index.{}", key.language.extension()),
            test: DEFAULT_TEST_COMMAND.to_string(),
            repository: None,
            keywords: Vec::new(),
            author: String::new(),
            license: DEFAULT_LICENSE.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Scripts {
    start: String,
    dev: String,
    test: String,
}

#[derive(Debug, Serialize)]
struct Repository<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    url: &'a str,
}

#[derive(Debug, Serialize)]
struct PackageJson<'a> {
    name: &'a str,
    version: &'a str,
    description: &'a str,
    main: &'a str,
    scripts: Scripts,
    #[serde(skip_serializing_if = "Option::is_none")]
    repository: Option<Repository<'a>>,
    keywords: &'a [String],
    author: &'a str,
    license: &'a str,
}

/// `start` and `dev` scripts for the key's language and package manager
pub fn scripts_for(key: &ConfigurationKey, main: &str) -> (String, String) {
    match (key.package_manager, key.language) {
        (PackageManager::Npm, Language::JavaScript) => {
            (format!("node {main}"), format!("nodemon {main}"))
        }
        (PackageManager::Npm, Language::TypeScript) => {
            (format!("tsx {main}"), format!("tsx watch {main}"))
        }
        (PackageManager::Bun, _) => (format!("bun run {main}"), format!("bun --watch {main}")),
    }
}

/// Serialize `metadata` as pretty-printed package.json content
pub fn render_package_json(key: &ConfigurationKey, metadata: &PackageMetadata) -> Result<String> {
    let (start, dev) = scripts_for(key, &metadata.main);
    let document = PackageJson {
        name: &metadata.name,
        version: &metadata.version,
        description: &metadata.description,
        main: &metadata.main,
        scripts: Scripts {
            start,
            dev,
            test: metadata.test.clone(),
        },
        repository: metadata.repository.as_deref().map(|url| Repository { kind: "git", url }),
        keywords: &metadata.keywords,
        author: &metadata.author,
        license: &metadata.license,
    };

    let mut content = serde_json::to_string_pretty(&document)?;
    content.push('\n');
    Ok(content)
}

/// package.json as a root-level file descriptor
pub fn package_json_descriptor(
    key: &ConfigurationKey,
    metadata: &PackageMetadata,
) -> Result<FileDescriptor> {
    Ok(FileDescriptor {
        folder: String::new(),
        name: PACKAGE_JSON.to_string(),
        content: render_package_json(key, metadata)?,
    })
}

/// Turn a directory name into a valid npm package name
///
/// Lower-cases, drops leading dots and underscores, and replaces every
/// character npm does not allow with `-`.
pub fn sanitize_package_name(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let trimmed = lowered.trim_start_matches(['.', '_']);

    let mut name: String = trimmed
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_' | '~')
            {
                c
            } else {
                '-'
            }
        })
        .collect();
    name.truncate(214);

    if name.trim_matches(['-', '.', '_', '~']).is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::key::{Database, Framework};

    fn key(language: Language, package_manager: PackageManager) -> ConfigurationKey {
        ConfigurationKey {
            database: Database::Mongo,
            framework: Framework::Express,
            language,
            package_manager,
        }
    }

    #[test]
    fn test_defaults_follow_language() {
        let js = PackageMetadata::defaults(&key(Language::JavaScript, PackageManager::Npm), "shop");
        assert_eq!(js.main, "index.js");
        assert_eq!(js.version, "1.0.0");
        assert_eq!(js.license, "ISC");

        let ts = PackageMetadata::defaults(&key(Language::TypeScript, PackageManager::Npm), "shop");
        assert_eq!(ts.main, "index.ts");
    }

    #[test]
    fn test_scripts() {
        let k = key(Language::JavaScript, PackageManager::Npm);
        assert_eq!(
            scripts_for(&k, "index.js"),
            ("node index.js".to_string(), "nodemon index.js".to_string())
        );

        let k = key(Language::TypeScript, PackageManager::Npm);
        assert_eq!(scripts_for(&k, "index.ts").0, "tsx index.ts");

        let k = key(Language::TypeScript, PackageManager::Bun);
        assert_eq!(
            scripts_for(&k, "index.ts"),
            ("bun run index.ts".to_string(), "bun --watch index.ts".to_string())
        );
    }

    #[test]
    fn test_render_field_order_and_values() {
        let k = key(Language::JavaScript, PackageManager::Npm);
        let metadata = PackageMetadata::defaults(&k, "shop-api");
        let content = render_package_json(&k, &metadata).unwrap();

        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["name"], "shop-api");
        assert_eq!(value["main"], "index.js");
        assert_eq!(value["scripts"]["start"], "node index.js");
        assert_eq!(value["scripts"]["test"], DEFAULT_TEST_COMMAND);
        assert!(value.get("repository").is_none());

        let positions: Vec<usize> = ["\"name\"", "\"version\"", "\"main\"", "\"scripts\"", "\"license\""]
            .iter()
            .map(|field| content.find(field).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(content.ends_with("}\n"));
    }

    #[test]
    fn test_render_repository() {
        let k = key(Language::JavaScript, PackageManager::Npm);
        let mut metadata = PackageMetadata::defaults(&k, "shop");
        metadata.repository = Some("https://github.com/acme/shop.git".to_string());

        let value: serde_json::Value =
            serde_json::from_str(&render_package_json(&k, &metadata).unwrap()).unwrap();
        assert_eq!(value["repository"]["type"], "git");
        assert_eq!(value["repository"]["url"], "https://github.com/acme/shop.git");
    }

    #[test]
    fn test_sanitize_package_name() {
        assert_eq!(sanitize_package_name("My Project"), "my-project");
        assert_eq!(sanitize_package_name(".hidden_app"), "hidden_app");
        assert_eq!(sanitize_package_name("api@v2!"), "api-v2-");
        assert_eq!(sanitize_package_name("..."), FALLBACK_NAME);
        assert_eq!(sanitize_package_name(""), FALLBACK_NAME);
        assert_eq!(sanitize_package_name("tmp.X1y2"), "tmp.x1y2");
    }
}

//! The package.json questions: prompts, defaults and validation

use super::generator::PackageMetadata;
use crate::error::{Result, ScaffoldError};
use regex_lite::Regex;
use semver::Version;
use std::path::Path;
use std::sync::OnceLock;

/// Licenses offered by the license question
pub const LICENSES: &[&str] = &[
    "MIT",
    "ISC",
    "Apache-2.0",
    "GPL-3.0",
    "BSD-2-Clause",
    "BSD-3-Clause",
    "MPL-2.0",
    "LGPL-3.0",
    "Unlicense",
];

const MAX_NAME_LENGTH: usize = 214;

/// One package.json field asked about interactively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Version,
    Description,
    EntryPoint,
    TestCommand,
    GitRepository,
    Keywords,
    Author,
    License,
}

impl Field {
    /// Asking order
    pub const ALL: [Field; 9] = [
        Field::Name,
        Field::Version,
        Field::Description,
        Field::EntryPoint,
        Field::TestCommand,
        Field::GitRepository,
        Field::Keywords,
        Field::Author,
        Field::License,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "package name",
            Field::Version => "version",
            Field::Description => "description",
            Field::EntryPoint => "entry point",
            Field::TestCommand => "test command",
            Field::GitRepository => "git repository",
            Field::Keywords => "keywords",
            Field::Author => "author",
            Field::License => "license",
        }
    }

    pub fn prompt(&self) -> String {
        match self {
            Field::Keywords => "Keywords (comma separated)".to_string(),
            Field::License => format!("License ({})", LICENSES.join(", ")),
            other => {
                let label = other.label();
                let mut chars = label.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }

    /// The value used when the answer is blank
    pub fn default_answer(&self, defaults: &PackageMetadata) -> String {
        match self {
            Field::Name => defaults.name.clone(),
            Field::Version => defaults.version.clone(),
            Field::Description => defaults.description.clone(),
            Field::EntryPoint => defaults.main.clone(),
            Field::TestCommand => defaults.test.clone(),
            Field::GitRepository => defaults.repository.clone().unwrap_or_default(),
            Field::Keywords => defaults.keywords.join(", "),
            Field::Author => defaults.author.clone(),
            Field::License => defaults.license.clone(),
        }
    }

    /// Check a non-blank answer and return its normalized form
    pub fn validate(&self, answer: &str) -> Result<String> {
        let answer = answer.trim();
        match self {
            Field::Name => validate_name(answer),
            Field::Version => validate_version(answer),
            Field::EntryPoint => validate_entry_point(answer),
            Field::GitRepository => validate_repository(answer),
            Field::Keywords => Ok(split_keywords(answer).join(", ")),
            Field::License => validate_license(answer),
            Field::Description | Field::TestCommand | Field::Author => Ok(answer.to_string()),
        }
    }

    /// Resolve a raw answer: blank means the default, anything else is validated
    ///
    /// The entry point must also keep the extension of the default one, so
    /// a JavaScript project cannot start from a `.ts` file.
    pub fn resolve(&self, raw: &str, defaults: &PackageMetadata) -> Result<String> {
        if raw.trim().is_empty() {
            return Ok(self.default_answer(defaults));
        }
        let value = self.validate(raw)?;
        if *self == Field::EntryPoint {
            let expected = Path::new(&defaults.main).extension();
            if Path::new(&value).extension() != expected {
                return Err(invalid(
                    Field::EntryPoint,
                    format!(
                        "must end in .{} like {}",
                        expected.map(|e| e.to_string_lossy()).unwrap_or_default(),
                        defaults.main
                    ),
                ));
            }
        }
        Ok(value)
    }

    /// Store a resolved answer in `metadata`
    pub fn store(&self, metadata: &mut PackageMetadata, value: String) {
        match self {
            Field::Name => metadata.name = value,
            Field::Version => metadata.version = value,
            Field::Description => metadata.description = value,
            Field::EntryPoint => metadata.main = value,
            Field::TestCommand => metadata.test = value,
            Field::GitRepository => {
                metadata.repository = (!value.is_empty()).then_some(value);
            }
            Field::Keywords => metadata.keywords = split_keywords(&value),
            Field::Author => metadata.author = value,
            Field::License => metadata.license = value,
        }
    }
}

fn invalid(field: Field, reason: impl Into<String>) -> ScaffoldError {
    ScaffoldError::InvalidAnswer {
        question: field.label(),
        reason: reason.into(),
    }
}

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("validation pattern is valid"))
}

fn validate_name(answer: &str) -> Result<String> {
    static NAME: OnceLock<Regex> = OnceLock::new();
    let pattern = regex(
        &NAME,
        r"^(?:@[a-z0-9\-*~][a-z0-9\-*._~]*/)?[a-z0-9\-~][a-z0-9\-._~]*$",
    );

    if answer.len() > MAX_NAME_LENGTH {
        return Err(invalid(Field::Name, "must be at most 214 characters"));
    }
    if !pattern.is_match(answer) {
        return Err(invalid(
            Field::Name,
            "use lowercase letters, digits, '-', '.', '_' or '~', not starting with '.' or '_'",
        ));
    }
    Ok(answer.to_string())
}

fn validate_version(answer: &str) -> Result<String> {
    let cleaned = answer.strip_prefix('v').unwrap_or(answer);
    Version::parse(cleaned)
        .map(|v| v.to_string())
        .map_err(|e| invalid(Field::Version, format!("'{}' is not a semantic version ({})", answer, e)))
}

fn validate_entry_point(answer: &str) -> Result<String> {
    static ENTRY: OnceLock<Regex> = OnceLock::new();
    let pattern = regex(&ENTRY, r"^[A-Za-z0-9_\-][A-Za-z0-9_.\-]*\.(?:js|ts)$");

    if pattern.is_match(answer) {
        Ok(answer.to_string())
    } else {
        Err(invalid(
            Field::EntryPoint,
            "expected a file name in the project root ending in .js or .ts",
        ))
    }
}

fn validate_repository(answer: &str) -> Result<String> {
    static URL: OnceLock<Regex> = OnceLock::new();
    static SCP: OnceLock<Regex> = OnceLock::new();
    static SHORTHAND: OnceLock<Regex> = OnceLock::new();

    let url = regex(&URL, r"^(?:git\+)?(?:https?|ssh|git)://[^\s/]+/\S+$");
    let scp = regex(&SCP, r"^[A-Za-z0-9_.\-]+@[A-Za-z0-9_.\-]+:\S+$");
    let shorthand = regex(
        &SHORTHAND,
        r"^(?:(?:github|gitlab|bitbucket):)?[A-Za-z0-9_.\-]+/[A-Za-z0-9_.\-]+$",
    );

    if url.is_match(answer) || scp.is_match(answer) || shorthand.is_match(answer) {
        Ok(answer.to_string())
    } else {
        Err(invalid(
            Field::GitRepository,
            "expected a git URL such as https://github.com/user/repo.git",
        ))
    }
}

fn validate_license(answer: &str) -> Result<String> {
    LICENSES
        .iter()
        .find(|license| license.eq_ignore_ascii_case(answer))
        .map(|license| license.to_string())
        .ok_or_else(|| invalid(Field::License, format!("choose one of {}", LICENSES.join(", "))))
}

/// Split a comma separated answer into trimmed, non-empty keywords
pub fn split_keywords(answer: &str) -> Vec<String> {
    answer
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::key::{ConfigurationKey, Database, Framework, Language, PackageManager};

    fn defaults() -> PackageMetadata {
        PackageMetadata::defaults(
            &ConfigurationKey {
                database: Database::Mongo,
                framework: Framework::Express,
                language: Language::JavaScript,
                package_manager: PackageManager::Npm,
            },
            "shop",
        )
    }

    #[test]
    fn test_version_rejects_garbage_and_defaults_on_blank() {
        let err = Field::Version.resolve("abc", &defaults()).unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::InvalidAnswer {
                question: "version",
                ..
            }
        ));
        assert_eq!(Field::Version.resolve("", &defaults()).unwrap(), "1.0.0");
        assert_eq!(Field::Version.resolve("   ", &defaults()).unwrap(), "1.0.0");
        assert_eq!(Field::Version.resolve("v2.1.0", &defaults()).unwrap(), "2.1.0");
    }

    #[test]
    fn test_name_rules() {
        assert!(Field::Name.validate("shop-api").is_ok());
        assert!(Field::Name.validate("@acme/shop").is_ok());
        assert!(Field::Name.validate("Shop").is_err());
        assert!(Field::Name.validate(".hidden").is_err());
        assert!(Field::Name.validate("_private").is_err());
        assert!(Field::Name.validate("has space").is_err());
        assert!(Field::Name.validate(&"a".repeat(215)).is_err());
    }

    #[test]
    fn test_entry_point_rules() {
        assert!(Field::EntryPoint.validate("index.js").is_ok());
        assert!(Field::EntryPoint.validate("server.ts").is_ok());
        assert!(Field::EntryPoint.validate("src/server.ts").is_err());
        assert!(Field::EntryPoint.validate("index").is_err());
        assert!(Field::EntryPoint.validate("index.mjs").is_err());
        assert!(Field::EntryPoint.validate("/abs/index.js").is_err());
        assert!(Field::EntryPoint.validate("../index.js").is_err());
    }

    #[test]
    fn test_entry_point_keeps_the_project_language() {
        let js = defaults();
        assert_eq!(Field::EntryPoint.resolve("server.js", &js).unwrap(), "server.js");
        assert!(matches!(
            Field::EntryPoint.resolve("index.ts", &js).unwrap_err(),
            ScaffoldError::InvalidAnswer {
                question: "entry point",
                ..
            }
        ));
    }

    #[test]
    fn test_repository_rules() {
        assert!(Field::GitRepository
            .validate("https://github.com/acme/shop.git")
            .is_ok());
        assert!(Field::GitRepository
            .validate("git@github.com:acme/shop.git")
            .is_ok());
        assert!(Field::GitRepository.validate("acme/shop").is_ok());
        assert!(Field::GitRepository.validate("not a url").is_err());

        let mut metadata = defaults();
        let blank = Field::GitRepository.resolve("", &metadata).unwrap();
        Field::GitRepository.store(&mut metadata, blank);
        assert_eq!(metadata.repository, None);
    }

    #[test]
    fn test_license_is_normalized() {
        assert_eq!(Field::License.validate("mit").unwrap(), "MIT");
        assert_eq!(Field::License.validate("apache-2.0").unwrap(), "Apache-2.0");
        assert!(Field::License.validate("WTFPL").is_err());
        assert_eq!(Field::License.resolve("", &defaults()).unwrap(), "ISC");
    }

    #[test]
    fn test_keywords() {
        let mut metadata = defaults();
        let value = Field::Keywords.resolve(" api, rest ,, node ", &metadata).unwrap();
        assert_eq!(value, "api, rest, node");
        Field::Keywords.store(&mut metadata, value);
        assert_eq!(metadata.keywords, vec!["api", "rest", "node"]);
    }

    #[test]
    fn test_free_text_fields_accept_anything() {
        assert_eq!(
            Field::Author.validate("  Jane Doe <jane@example.com> ").unwrap(),
            "Jane Doe <jane@example.com>"
        );
        assert_eq!(
            Field::TestCommand.resolve("", &defaults()).unwrap(),
            "echo \"Error: no test specified\" && exit 1"
        );
    }

    #[test]
    fn test_prompts() {
        assert_eq!(Field::EntryPoint.prompt(), "Entry point");
        assert!(Field::License.prompt().contains("BSD-3-Clause"));
    }
}

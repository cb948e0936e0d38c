//! Configuration axes and the key that selects a catalog entry

use crate::error::{Result, ScaffoldError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Database layer of the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Mongo,
    Sequelize,
}

/// Web framework of the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Express,
    Fastify,
    Elysia,
}

/// Output language of the generated sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    TypeScript,
}

/// Package manager used to install dependencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Bun,
}

impl Database {
    pub const ALL: [Database; 2] = [Database::Mongo, Database::Sequelize];

    pub fn display_name(&self) -> &'static str {
        match self {
            Database::Mongo => "MongoDB (mongoose)",
            Database::Sequelize => "SQL (sequelize)",
        }
    }
}

impl Framework {
    pub const ALL: [Framework; 3] = [Framework::Express, Framework::Fastify, Framework::Elysia];

    pub fn display_name(&self) -> &'static str {
        match self {
            Framework::Express => "Express",
            Framework::Fastify => "Fastify",
            Framework::Elysia => "Elysia",
        }
    }
}

impl Language {
    pub const ALL: [Language; 2] = [Language::JavaScript, Language::TypeScript];

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
        }
    }

    /// Source file extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Language::JavaScript => "js",
            Language::TypeScript => "ts",
        }
    }
}

impl PackageManager {
    pub const ALL: [PackageManager; 2] = [PackageManager::Npm, PackageManager::Bun];

    /// Name of the executable
    pub fn binary(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Bun => "bun",
        }
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.binary())
    }
}

/// Fully resolved choice of database, framework, language and package manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfigurationKey {
    pub database: Database,
    pub framework: Framework,
    pub language: Language,
    pub package_manager: PackageManager,
}

impl ConfigurationKey {
    /// Every supported combination
    pub fn all() -> Vec<ConfigurationKey> {
        let mut keys = Vec::new();
        for database in Database::ALL {
            for framework in Framework::ALL {
                for language in Language::ALL {
                    for package_manager in PackageManager::ALL {
                        keys.push(ConfigurationKey {
                            database,
                            framework,
                            language,
                            package_manager,
                        });
                    }
                }
            }
        }
        keys
    }
}

impl fmt::Display for ConfigurationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} + {} + {} ({})",
            self.framework, self.database, self.language, self.package_manager
        )
    }
}

/// A configuration key whose axes may still be unset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartialKey {
    pub database: Option<Database>,
    pub framework: Option<Framework>,
    pub language: Option<Language>,
    pub package_manager: Option<PackageManager>,
}

impl PartialKey {
    /// Fill unset axes from `other`, keeping values already chosen
    pub fn or(self, other: PartialKey) -> PartialKey {
        PartialKey {
            database: self.database.or(other.database),
            framework: self.framework.or(other.framework),
            language: self.language.or(other.language),
            package_manager: self.package_manager.or(other.package_manager),
        }
    }

    /// Convert into a full key, naming the first unresolved axis on failure
    pub fn complete(self) -> Result<ConfigurationKey> {
        Ok(ConfigurationKey {
            database: self
                .database
                .ok_or(ScaffoldError::UnresolvedAxis { axis: "database" })?,
            framework: self
                .framework
                .ok_or(ScaffoldError::UnresolvedAxis { axis: "framework" })?,
            language: self
                .language
                .ok_or(ScaffoldError::UnresolvedAxis { axis: "language" })?,
            package_manager: self.package_manager.ok_or(ScaffoldError::UnresolvedAxis {
                axis: "package manager",
            })?,
        })
    }
}

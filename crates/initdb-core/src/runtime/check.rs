//! Package manager detection

use crate::config::key::PackageManager;
use anyhow::Result;
use std::process::Command;

/// Probe result for one executable
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

fn probe(binary: &str, name: &'static str) -> RuntimeInfo {
    let output = Command::new(binary).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    probe("node", "Node.js")
}

/// Check if npm is available
pub fn check_npm() -> RuntimeInfo {
    probe("npm", "npm")
}

/// Check if Bun is available
pub fn check_bun() -> RuntimeInfo {
    probe("bun", "Bun")
}

/// Check everything `pm` needs to install dependencies
///
/// npm needs Node.js as well; Bun is self-contained.
pub fn check_package_manager(pm: PackageManager) -> Result<Vec<RuntimeInfo>> {
    let results = match pm {
        PackageManager::Npm => vec![check_node(), check_npm()],
        PackageManager::Bun => vec![check_bun()],
    };

    let missing: Vec<&str> = results
        .iter()
        .filter(|info| !info.available)
        .map(|info| info.name)
        .collect();

    if !missing.is_empty() {
        anyhow::bail!(
            "Missing required tools:\n{}\nInstall from {}",
            missing
                .iter()
                .map(|m| format!("  - {}", m))
                .collect::<Vec<_>>()
                .join("\n"),
            install_hint(pm)
        );
    }

    Ok(results)
}

fn install_hint(pm: PackageManager) -> &'static str {
    match pm {
        PackageManager::Npm => "https://nodejs.org",
        PackageManager::Bun => "https://bun.sh",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_missing_binary() {
        let info = probe("definitely-not-installed-anywhere", "Nothing");
        assert!(!info.available);
        assert!(info.version.is_none());
        assert_eq!(info.name, "Nothing");
    }

    #[test]
    fn test_check_reports_consistent_availability() {
        for pm in PackageManager::ALL {
            match check_package_manager(pm) {
                Ok(found) => assert!(found.iter().all(|info| info.available)),
                Err(e) => assert!(e.to_string().contains(install_hint(pm))),
            }
        }
    }
}

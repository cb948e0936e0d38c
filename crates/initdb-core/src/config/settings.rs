//! Environment overrides for the scaffolding run

use std::time::Duration;

/// Environment variable overriding the install timeout (seconds)
pub const INSTALL_TIMEOUT_ENV: &str = "NODE_INITDB_INSTALL_TIMEOUT";

/// Environment variable that disables dependency installation when non-empty
pub const SKIP_INSTALL_ENV: &str = "NODE_INITDB_SKIP_INSTALL";

/// Default timeout for the package manager (5 minutes)
pub const DEFAULT_INSTALL_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub install_timeout: Duration,
    pub skip_install: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            install_timeout: DEFAULT_INSTALL_TIMEOUT,
            skip_install: false,
        }
    }
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup (used by tests)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let install_timeout = lookup(INSTALL_TIMEOUT_ENV)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_INSTALL_TIMEOUT);

        let skip_install = lookup(SKIP_INSTALL_ENV).is_some_and(|v| !v.trim().is_empty());

        Self {
            install_timeout,
            skip_install,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_timeout_override() {
        let settings = Settings::from_lookup(|key| {
            (key == INSTALL_TIMEOUT_ENV).then(|| "42".to_string())
        });
        assert_eq!(settings.install_timeout, Duration::from_secs(42));
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let settings = Settings::from_lookup(|key| {
            (key == INSTALL_TIMEOUT_ENV).then(|| "soon".to_string())
        });
        assert_eq!(settings.install_timeout, DEFAULT_INSTALL_TIMEOUT);
    }

    #[test]
    fn test_skip_install() {
        let settings =
            Settings::from_lookup(|key| (key == SKIP_INSTALL_ENV).then(|| "1".to_string()));
        assert!(settings.skip_install);

        let settings =
            Settings::from_lookup(|key| (key == SKIP_INSTALL_ENV).then(|| " ".to_string()));
        assert!(!settings.skip_install);
    }
}

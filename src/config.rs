//! Configuration loading and persistence
//!
//! Settings live in a TOML file under the user's config directory
//! (`~/.config/stash/config.toml` on Linux). Credentials are part of the
//! config on purpose: they are supplied externally and injected at runtime,
//! never embedded in source.

use crate::validators;
use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cache: CacheConfig,
    pub ui: UiConfig,
    pub credentials: CredentialStore,
}

/// Cache file settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache file used when the CLI is not given `--file`
    pub file: Option<PathBuf>,
}

/// Console output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Default output mode: "quiet", "normal", or "verbose"
    pub output_mode: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            output_mode: "normal".to_string(),
        }
    }
}

/// Username/password table loaded from the config file
///
/// Passwords are stored in the user's own config file and compared as plain
/// text. Nothing here is hardcoded; an empty table rejects every login.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialStore {
    pub users: BTreeMap<String, String>,
}

impl CredentialStore {
    /// Check a username/password pair against the table.
    ///
    /// Empty passwords are rejected before the lookup, even if an empty
    /// password is stored for the user.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        if !validators::check_password(password) {
            return false;
        }
        self.users
            .get(username)
            .map(|stored| stored == password)
            .unwrap_or(false)
    }

    /// True when no users are configured.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Config {
    /// Load the config file, falling back to defaults when it is missing
    /// or unreadable.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load the config, writing the defaults to disk when no file exists yet.
    pub fn load_or_create() -> Self {
        let config = Self::load();
        if let Ok(path) = Self::config_path() {
            if !path.exists() {
                let _ = config.save();
            }
        }
        config
    }

    /// Load from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save to the default location, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Path of the config file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "stash")
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Cache file to use for a command: CLI override, then the configured
    /// default, then `stash.json` in the current directory.
    pub fn resolve_cache_file(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.cache.file.clone())
            .unwrap_or_else(|| PathBuf::from("stash.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.cache.file.is_none());
        assert_eq!(config.ui.output_mode, "normal");
        assert!(config.credentials.is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.cache.file = Some(PathBuf::from("/tmp/records.json"));
        config
            .credentials
            .users
            .insert("alice".to_string(), "s3cret".to_string());

        config.save_to(&path).unwrap();
        let reloaded = Config::load_from(&path).unwrap();

        assert_eq!(reloaded.cache.file, config.cache.file);
        assert_eq!(reloaded.credentials.users, config.credentials.users);
    }

    #[test]
    fn test_load_from_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_verify_credentials() {
        let mut store = CredentialStore::default();
        store
            .users
            .insert("admin".to_string(), "hunter2".to_string());

        assert!(store.verify("admin", "hunter2"));
        assert!(!store.verify("admin", "wrong"));
        assert!(!store.verify("nobody", "hunter2"));
    }

    #[test]
    fn test_verify_rejects_empty_password() {
        let mut store = CredentialStore::default();
        store.users.insert("admin".to_string(), String::new());

        // Rejected by the non-empty gate, even though the stored value matches
        assert!(!store.verify("admin", ""));
    }

    #[test]
    fn test_resolve_cache_file_precedence() {
        let mut config = Config::default();
        assert_eq!(
            config.resolve_cache_file(None),
            PathBuf::from("stash.json")
        );

        config.cache.file = Some(PathBuf::from("/data/records.json"));
        assert_eq!(
            config.resolve_cache_file(None),
            PathBuf::from("/data/records.json")
        );

        assert_eq!(
            config.resolve_cache_file(Some(PathBuf::from("cli.json"))),
            PathBuf::from("cli.json")
        );
    }
}

//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Config file (JSON, `--config` or the default location)
//! 3. Built-in defaults (always present)

use std::fs;
use std::path::PathBuf;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Organization prefix for suggested package names.
    pub base_package: String,
    /// Flutter SDK directory used when `--sdk` is not given.
    pub sdk_path: Option<PathBuf>,
    /// Parent directory for new projects when `--location` is not given.
    pub location: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            base_package: "com.example".into(),
            sdk_path: None,
            location: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// `config_file` is the path the user passed via `--config` (or `None`
    /// to use the default location).  A missing file yields the built-in
    /// defaults; an unreadable or malformed file is an error.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let path = config_file.cloned().unwrap_or_else(Self::config_path);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Persist this configuration to `path` as pretty-printed JSON.
    pub fn save(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating config directory {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(self).context("serialising config")?;
        fs::write(path, raw).with_context(|| format!("writing config file {}", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.npw.json` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "npw", "npw")
            .map(|d| d.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from(".npw.json"))
    }

    /// Path of the recents history file (package name drop-downs).
    pub fn recents_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "npw", "npw")
            .map(|d| d.data_dir().join("recents.json"))
            .unwrap_or_else(|| PathBuf::from(".npw-recents.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_package() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.base_package, "com.example");
        assert!(cfg.defaults.sdk_path.is_none());
    }

    #[test]
    fn load_without_file_returns_defaults() {
        let missing = PathBuf::from("/definitely/not/here/config.json");
        let cfg = AppConfig::load(Some(&missing)).unwrap();
        assert_eq!(cfg.defaults.base_package, "com.example");
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut cfg = AppConfig::default();
        cfg.defaults.base_package = "com.acme".into();
        cfg.defaults.sdk_path = Some("/opt/flutter".into());
        cfg.save(&path).unwrap();

        let loaded = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.defaults.base_package, "com.acme");
        assert_eq!(loaded.defaults.sdk_path.as_deref(), Some("/opt/flutter".as_ref()));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"defaults":{"base_package":"io.shop"}}"#).unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.base_package, "io.shop");
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
        assert!(!AppConfig::recents_path().as_os_str().is_empty());
    }
}

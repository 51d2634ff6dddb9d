//! Application configuration
//!
//! Configuration loaded from `.browser-shell.toml`.

use crate::paths;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration loaded from `.browser-shell.toml`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Url of the tab opened when there is nothing else to show
    #[serde(default = "default_homepage")]
    pub homepage: String,

    /// Where the session snapshot is stored, defaults to the config directory
    #[serde(default)]
    pub session_file: Option<PathBuf>,

    /// Restore the tabs of the previous run on startup
    #[serde(default = "default_true")]
    pub restore_session: bool,

    /// Suspend background tabs when memory gets critically low
    #[serde(default = "default_true")]
    pub trim_memory_on_critical: bool,

    /// Engine to create tab sessions with
    #[serde(default = "default_engine_name")]
    pub engine_name: String,
}

fn default_homepage() -> String {
    "https://www.mozilla.org".to_string()
}

fn default_true() -> bool {
    true
}

fn default_engine_name() -> String {
    "headless".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            homepage: default_homepage(),
            session_file: None,
            restore_session: default_true(),
            trim_memory_on_critical: default_true(),
            engine_name: default_engine_name(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some((path, content)) = crate::load_config_file() {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file {}: {}", path.display(), e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Load config from a specific file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Configured session file or the default one in the config directory
    pub fn session_file_path(&self) -> Result<PathBuf> {
        match &self.session_file {
            Some(path) => Ok(path.clone()),
            None => paths::session_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.homepage, "https://www.mozilla.org");
        assert_eq!(config.session_file, None);
        assert!(config.restore_session);
        assert!(config.trim_memory_on_critical);
        assert_eq!(config.engine_name, "headless");
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml = r#"
            homepage = "https://example.com"
            restore_session = false
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.homepage, "https://example.com");
        assert!(!config.restore_session);
        // Other fields should use defaults
        assert!(config.trim_memory_on_critical);
        assert_eq!(config.engine_name, "headless");
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "session_file = \"/tmp/browser/session.json\"\n").unwrap();

        let config = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(
            config.session_file_path().unwrap(),
            PathBuf::from("/tmp/browser/session.json")
        );
    }

    #[test]
    fn test_load_from_path_reports_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "restore_session = maybe").unwrap();

        let err = AppConfig::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}

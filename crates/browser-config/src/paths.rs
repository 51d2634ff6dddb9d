//! Configuration and cache directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/browser-shell/`, `~/.cache/browser-shell/`
//! - macOS: `~/Library/Application Support/browser-shell/`, `~/Library/Caches/browser-shell/`
//! - Windows: `%APPDATA%\browser-shell\`, `%LOCALAPPDATA%\browser-shell\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "browser-shell";

/// Get the application config directory, creating it if needed
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create config directory: {:?}", dir))?;
    Ok(dir)
}

/// Get the application cache directory, creating it if needed
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create cache directory: {:?}", dir))?;
    Ok(dir)
}

/// Default location of the session snapshot
pub fn session_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("session.json"))
}

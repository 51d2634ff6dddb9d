//! Lookup of `.browser-shell.toml`
//!
//! A file in the working directory shadows the one in the home directory.

use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = ".browser-shell.toml";

/// Places a config file is looked for, in order
fn candidates(home: Option<&Path>) -> Vec<PathBuf> {
    std::iter::once(PathBuf::from(CONFIG_FILE))
        .chain(home.map(|home| home.join(CONFIG_FILE)))
        .collect()
}

/// First readable candidate with its content
fn read_first(candidates: &[PathBuf]) -> Option<(PathBuf, String)> {
    candidates.iter().find_map(|path| {
        std::fs::read_to_string(path)
            .ok()
            .map(|content| (path.clone(), content))
    })
}

/// Path and content of the config file in use, if there is one
pub fn load_config_file() -> Option<(PathBuf, String)> {
    let found = read_first(&candidates(dirs::home_dir().as_deref()));
    match &found {
        Some((path, _)) => log::debug!("Found config file {}", path.display()),
        None => log::debug!("No {} found", CONFIG_FILE),
    }
    found
}

//! Configuration and file locations for browser-shell
//!
//! This crate provides:
//! - Application configuration (AppConfig) loaded from TOML
//! - Config file lookup (CWD first, then home directory)
//! - Platform specific config and cache directories

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::AppConfig;
pub use config_file::load_config_file;

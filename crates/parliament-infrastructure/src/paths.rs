//! Unified path management for Parliamentarium files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/parliamentarium/      # Config directory
//! ├── config.toml                 # Application configuration
//! ├── secret.json                 # API keys
//! └── topic_cache.json            # Topic awaiting a session
//!
//! ~/.local/share/parliamentarium/ # Data directory
//! ├── meetings/                   # One <id>.json per deliberation
//! └── logs/                       # parliament.log.YYYY-MM-DD
//! ```

use parliament_core::error::{ParliamentError, Result};
use std::path::PathBuf;

const APP_DIR: &str = "parliamentarium";

pub struct ParliamentPaths;

impl ParliamentPaths {
    /// Returns the configuration directory (e.g. `~/.config/parliamentarium/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| ParliamentError::config("Cannot find config directory"))
    }

    /// Returns the data directory (e.g. `~/.local/share/parliamentarium/`).
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| ParliamentError::config("Cannot find data directory"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600).
    pub fn secret_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("secret.json"))
    }

    pub fn topic_cache_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("topic_cache.json"))
    }

    pub fn meetings_dir() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("meetings"))
    }

    pub fn logs_dir() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_under_app_dirs() {
        if let (Ok(config), Ok(data)) = (ParliamentPaths::config_dir(), ParliamentPaths::data_dir()) {
            assert!(config.ends_with(APP_DIR));
            assert_eq!(ParliamentPaths::config_file().unwrap(), config.join("config.toml"));
            assert_eq!(ParliamentPaths::secret_file().unwrap(), config.join("secret.json"));
            assert_eq!(ParliamentPaths::meetings_dir().unwrap(), data.join("meetings"));
            assert_eq!(ParliamentPaths::logs_dir().unwrap(), data.join("logs"));
        }
    }
}

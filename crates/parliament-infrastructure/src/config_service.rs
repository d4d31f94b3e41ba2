//! Configuration service.
//!
//! Loads the root configuration from `~/.config/parliamentarium/config.toml`
//! and caches it. A missing file yields the defaults.

use crate::paths::ParliamentPaths;
use crate::storage::AtomicFile;
use parliament_core::config::RootConfig;
use parliament_core::error::Result;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Uses the default config file location.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(ParliamentPaths::config_file()?))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the root configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<RootConfig> {
        {
            let cached = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let loaded = AtomicFile::<RootConfig>::toml(self.path.clone())
            .load()?
            .unwrap_or_default();
        debug!(path = %self.path.display(), "Loaded configuration");

        let mut cached = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *cached = Some(loaded.clone());
        Ok(loaded)
    }

    /// Writes `config` to disk and refreshes the cache.
    pub fn save(&self, config: &RootConfig) -> Result<()> {
        AtomicFile::<RootConfig>::toml(self.path.clone()).save(config)?;
        let mut cached = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *cached = Some(config.clone());
        Ok(())
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut cached = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *cached = None;
    }
}

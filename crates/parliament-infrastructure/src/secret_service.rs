//! Secret service.
//!
//! Reads API credentials from `secret.json`. Providers the file leaves out
//! are filled from the environment: `GEMINI_API_KEY_1` through
//! `GEMINI_API_KEY_5` and `OPENROUTER_API_KEY`.

use crate::paths::ParliamentPaths;
use crate::storage::AtomicFile;
use parliament_core::config::{GeminiConfig, OpenRouterConfig, SecretConfig};
use parliament_core::error::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Number of numbered Gemini key variables consulted.
pub const GEMINI_KEY_SLOTS: usize = 5;
pub const OPENROUTER_KEY_VAR: &str = "OPENROUTER_API_KEY";

pub struct SecretService {
    path: PathBuf,
}

impl SecretService {
    /// Uses the default secret file location.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(ParliamentPaths::secret_file()?))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the secrets, falling back to the process environment.
    pub fn load(&self) -> Result<SecretConfig> {
        self.load_with_env(|name| std::env::var(name).ok())
    }

    /// Loads the secrets with `lookup` standing in for the environment.
    pub fn load_with_env<F>(&self, lookup: F) -> Result<SecretConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut secrets = AtomicFile::<SecretConfig>::json(self.path.clone())
            .load()?
            .unwrap_or_default();

        let gemini_missing = secrets
            .gemini
            .as_ref()
            .is_none_or(|gemini| gemini.api_keys.is_empty());
        if gemini_missing {
            let api_keys: Vec<String> = (1..=GEMINI_KEY_SLOTS)
                .filter_map(|slot| lookup(&format!("GEMINI_API_KEY_{slot}")))
                .filter(|key| !key.trim().is_empty())
                .collect();
            if !api_keys.is_empty() {
                debug!(count = api_keys.len(), "Gemini keys taken from environment");
                let model_name = secrets.gemini.take().and_then(|g| g.model_name);
                secrets.gemini = Some(GeminiConfig {
                    api_keys,
                    model_name,
                });
            }
        }

        if secrets.openrouter.is_none() {
            if let Some(api_key) = lookup(OPENROUTER_KEY_VAR).filter(|k| !k.trim().is_empty()) {
                debug!("OpenRouter key taken from environment");
                secrets.openrouter = Some(OpenRouterConfig {
                    api_key,
                    model_name: None,
                });
            }
        }

        Ok(secrets)
    }
}

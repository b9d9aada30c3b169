//! Configuration service implementation.
//!
//! Loads `RootConfig` from `config.toml`, writing the defaults on first run
//! so users have a file to edit.

use std::sync::{Arc, RwLock};

use sur_core::config::RootConfig;
use sur_core::error::Result;

use crate::paths::SurPaths;
use crate::storage::AtomicTomlFile;

/// Loads and caches the root configuration.
#[derive(Clone)]
pub struct ConfigService {
    file: Arc<AtomicTomlFile<RootConfig>>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    pub fn new(paths: &SurPaths) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(paths.config_file())),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Loads the configuration from disk, bypassing the cache.
    ///
    /// A missing file is created with default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or created.
    pub fn load(&self) -> Result<RootConfig> {
        let config = match self.file.load()? {
            Some(config) => config,
            None => {
                let config = RootConfig::default();
                self.file.save(&config)?;
                tracing::info!(path = %self.file.path().display(), "Wrote default config");
                config
            }
        };

        if let Ok(mut cache) = self.config.write() {
            *cache = Some(config.clone());
        }
        Ok(config)
    }

    /// Gets the configuration, loading it on first access.
    ///
    /// Falls back to defaults (without caching them) when the file is unusable.
    pub fn get_config(&self) -> RootConfig {
        if let Ok(cache) = self.config.read() {
            if let Some(cached) = cache.as_ref() {
                return cached.clone();
            }
        }

        self.load().unwrap_or_else(|e| {
            tracing::warn!("Using default config: {}", e);
            RootConfig::default()
        })
    }
}

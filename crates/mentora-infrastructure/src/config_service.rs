//! Configuration service implementation.
//!
//! Loads the application configuration from `config.toml` and caches it to
//! avoid repeated file I/O. A missing or unreadable file yields the default
//! configuration (the platform must keep working without one).

use crate::paths::MentoraPaths;
use crate::storage::AtomicTomlFile;
use mentora_core::config::AppConfig;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the application config.
#[derive(Debug, Clone)]
pub struct ConfigService {
    config_path: PathBuf,
    /// Cached configuration; `None` until first access.
    cache: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Creates a service reading from the given config file path.
    pub fn new(config_path: PathBuf) -> Self {
        Self {
            config_path,
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service reading from the platform default location.
    pub fn default_location() -> Result<Self, crate::paths::PathError> {
        Ok(Self::new(MentoraPaths::config_file()?))
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> AppConfig {
        {
            let read_lock = self.cache.read().unwrap();
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = self.load_config();

        {
            let mut write_lock = self.cache.write().unwrap();
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.cache.write().unwrap();
        *write_lock = None;
    }

    fn load_config(&self) -> AppConfig {
        let file = AtomicTomlFile::<AppConfig>::new(self.config_path.clone());
        match file.load() {
            Ok(Some(config)) => config,
            Ok(None) => AppConfig::default(),
            Err(e) => {
                tracing::warn!(
                    "failed to load config from {}: {}; using defaults",
                    self.config_path.display(),
                    e
                );
                AppConfig::default()
            }
        }
    }
}

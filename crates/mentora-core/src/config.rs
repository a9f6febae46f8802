//! Application configuration types.
//!
//! Deserialized from `config.toml` by the infrastructure layer. All fields
//! are optional with sensible defaults so a missing or empty file yields a
//! working configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Storage settings.
    #[serde(default)]
    pub storage: StorageSettings,
}

/// Where session records and user profiles live on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Overrides the platform config directory as the storage root.
    /// When unset, the platform default is used.
    #[serde(default)]
    pub base_dir: Option<PathBuf>,
}

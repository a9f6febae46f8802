//! Unified path management for mentora storage.
//!
//! All mentora configuration and records live under a single base directory,
//! resolved per platform via the `dirs` crate (e.g. `~/.config/mentora` on
//! Linux). The storage root can be overridden through `AppConfig`.

use mentora_core::config::AppConfig;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Platform configuration directory could not be determined.
    #[error("cannot determine platform config directory")]
    ConfigDirNotFound,
}

/// Unified path management for mentora.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/mentora/           # Base directory (platform dependent)
/// ├── config.toml              # Application configuration
/// ├── sessions/                # Booking records, one TOML file each
/// └── users/                   # User profiles, one TOML file each
/// ```
pub struct MentoraPaths;

impl MentoraPaths {
    /// Returns the mentora base directory for the current platform.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("mentora"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the storage root, honoring the configured override.
    pub fn storage_root(config: &AppConfig) -> Result<PathBuf, PathError> {
        match &config.storage.base_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::config_dir(),
        }
    }
}

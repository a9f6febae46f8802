//! TOML-file-backed IdentityDirectory implementation.
//!
//! User profiles live as one TOML file per user under `<root>/users/`. This
//! is the non-authoritative lookup source the booking flow consults
//! best-effort for display names.

use crate::paths::MentoraPaths;
use crate::storage::{storage_error, AtomicTomlFile};
use async_trait::async_trait;
use mentora_core::config::AppConfig;
use mentora_core::error::Result;
use mentora_core::identity::{IdentityDirectory, UserProfile};
use mentora_core::MentoraError;
use std::fs;
use std::path::{Path, PathBuf};

/// A directory of user profiles stored as TOML files.
pub struct TomlUserDirectory {
    users_dir: PathBuf,
}

impl TomlUserDirectory {
    /// Creates a new `TomlUserDirectory` under the given base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the `users/` subdirectory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let users_dir = base_dir.as_ref().join("users");
        fs::create_dir_all(&users_dir)?;
        Ok(Self { users_dir })
    }

    /// Creates a directory rooted at the configured storage location.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let root = MentoraPaths::storage_root(config)
            .map_err(|e| MentoraError::data_access(e.to_string()))?;
        Self::new(root)
    }

    fn profile_file(&self, user_id: &str) -> AtomicTomlFile<UserProfile> {
        AtomicTomlFile::new(self.users_dir.join(format!("{}.toml", user_id)))
    }

    /// Stores a user profile (used for provisioning and tests).
    pub fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        self.profile_file(&profile.id)
            .save(profile)
            .map_err(storage_error)
    }
}

#[async_trait]
impl IdentityDirectory for TomlUserDirectory {
    async fn find_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        self.profile_file(user_id).load().map_err(storage_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentora_core::actor::Role;
    use tempfile::TempDir;

    #[tokio::test]
    async fn save_and_find_profile() {
        let temp_dir = TempDir::new().unwrap();
        let directory = TomlUserDirectory::new(temp_dir.path()).unwrap();

        let profile = UserProfile {
            id: "user-1".to_string(),
            name: "Ada".to_string(),
            role: Role::Mentor,
        };
        directory.save_profile(&profile).unwrap();

        let found = directory.find_profile("user-1").await.unwrap().unwrap();
        assert_eq!(found, profile);
    }

    #[tokio::test]
    async fn unknown_user_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let directory = TomlUserDirectory::new(temp_dir.path()).unwrap();

        assert!(directory.find_profile("nobody").await.unwrap().is_none());
    }
}

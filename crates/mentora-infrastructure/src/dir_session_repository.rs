//! Directory-of-TOML-files SessionRepository implementation.
//!
//! Each booking record is one TOML file under `<root>/sessions/`. Writes go
//! through `AtomicTomlFile` (tmp file + rename), and every conditional
//! operation holds the record's advisory lock across its read-check-write
//! window, so a racing transition observes `InvalidTransition` instead of
//! silently overwriting the winner.

use crate::paths::MentoraPaths;
use crate::storage::{storage_error, AtomicTomlFile};
use async_trait::async_trait;
use mentora_core::actor::Role;
use mentora_core::config::AppConfig;
use mentora_core::error::Result;
use mentora_core::session::{Session, SessionRepository, SessionStatus};
use mentora_core::MentoraError;
use std::fs;
use std::path::{Path, PathBuf};

/// A repository implementation storing booking records as TOML files.
pub struct DirSessionRepository {
    sessions_dir: PathBuf,
}

impl DirSessionRepository {
    /// Creates a new `DirSessionRepository` under the given base directory.
    ///
    /// The `sessions/` subdirectory is created if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory structure cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let sessions_dir = base_dir.as_ref().join("sessions");
        fs::create_dir_all(&sessions_dir)?;
        Ok(Self { sessions_dir })
    }

    /// Creates a repository rooted at the configured storage location.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let root = MentoraPaths::storage_root(config)
            .map_err(|e| MentoraError::data_access(e.to_string()))?;
        Self::new(root)
    }

    /// Returns the directory holding the record files.
    pub fn sessions_dir(&self) -> &Path {
        &self.sessions_dir
    }

    fn record_file(&self, session_id: &str) -> AtomicTomlFile<Session> {
        AtomicTomlFile::new(self.sessions_dir.join(format!("{}.toml", session_id)))
    }

    fn load_all(&self) -> Result<Vec<Session>> {
        let mut sessions = Vec::new();

        for entry in fs::read_dir(&self.sessions_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
                continue;
            }

            let file = AtomicTomlFile::<Session>::new(path.clone());
            match file.load() {
                Ok(Some(session)) => sessions.push(session),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        "skipping unreadable session record {}: {}",
                        path.display(),
                        e
                    );
                }
            }
        }

        // Most recently created first; RFC 3339 strings order correctly.
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sessions)
    }
}

#[async_trait]
impl SessionRepository for DirSessionRepository {
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>> {
        self.record_file(session_id).load().map_err(storage_error)
    }

    async fn insert(&self, session: &Session) -> Result<()> {
        let file = self.record_file(&session.id);
        let _guard = file.lock().map_err(storage_error)?;

        if file.load().map_err(storage_error)?.is_some() {
            return Err(MentoraError::data_access(format!(
                "session '{}' already exists",
                session.id
            )));
        }

        file.save(session).map_err(storage_error)
    }

    async fn update_if_status(
        &self,
        session: &Session,
        expected: SessionStatus,
        operation: &'static str,
    ) -> Result<()> {
        let file = self.record_file(&session.id);
        let _guard = file.lock().map_err(storage_error)?;

        let stored = file
            .load()
            .map_err(storage_error)?
            .ok_or_else(|| MentoraError::not_found("session", &session.id))?;

        if stored.status != expected {
            return Err(MentoraError::invalid_transition(stored.status, operation));
        }

        file.save(session).map_err(storage_error)
    }

    async fn delete_if_status(
        &self,
        session_id: &str,
        expected: SessionStatus,
        operation: &'static str,
    ) -> Result<()> {
        let file = self.record_file(session_id);
        let _guard = file.lock().map_err(storage_error)?;

        let stored = file
            .load()
            .map_err(storage_error)?
            .ok_or_else(|| MentoraError::not_found("session", session_id))?;

        if stored.status != expected {
            return Err(MentoraError::invalid_transition(stored.status, operation));
        }

        file.delete().map_err(storage_error)?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Session>> {
        self.load_all()
    }

    async fn list_by_participant(&self, role: Role, actor_id: &str) -> Result<Vec<Session>> {
        let sessions = self.load_all()?;
        Ok(sessions
            .into_iter()
            .filter(|session| match role {
                Role::Student => session.student_id == actor_id,
                Role::Mentor => session.mentor_id == actor_id,
            })
            .collect())
    }
}

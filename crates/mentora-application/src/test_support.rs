//! In-memory mock ports for use-case tests.

use async_trait::async_trait;
use mentora_core::actor::Role;
use mentora_core::error::Result;
use mentora_core::identity::{IdentityDirectory, UserProfile};
use mentora_core::session::{Session, SessionRepository, SessionStatus};
use mentora_core::MentoraError;
use std::collections::HashMap;
use std::sync::Mutex;

/// Mock SessionRepository with the same conditional-write semantics as the
/// file-backed implementation.
pub struct MockSessionRepository {
    sessions: Mutex<HashMap<String, Session>>,
}

impl MockSessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Puts a session into the store directly, bypassing lifecycle rules.
    pub fn seed(&self, session: Session) {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.id.clone(), session);
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.lock().unwrap().contains_key(session_id)
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>> {
        Ok(self.sessions.lock().unwrap().get(session_id).cloned())
    }

    async fn insert(&self, session: &Session) -> Result<()> {
        let mut sessions = self.sessions.lock().unwrap();
        if sessions.contains_key(&session.id) {
            return Err(MentoraError::data_access(format!(
                "session '{}' already exists",
                session.id
            )));
        }
        sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn update_if_status(
        &self,
        session: &Session,
        expected: SessionStatus,
        operation: &'static str,
    ) -> Result<()> {
        let mut sessions = self.sessions.lock().unwrap();
        let stored = sessions
            .get(&session.id)
            .ok_or_else(|| MentoraError::not_found("session", &session.id))?;
        if stored.status != expected {
            return Err(MentoraError::invalid_transition(stored.status, operation));
        }
        sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn delete_if_status(
        &self,
        session_id: &str,
        expected: SessionStatus,
        operation: &'static str,
    ) -> Result<()> {
        let mut sessions = self.sessions.lock().unwrap();
        let stored = sessions
            .get(session_id)
            .ok_or_else(|| MentoraError::not_found("session", session_id))?;
        if stored.status != expected {
            return Err(MentoraError::invalid_transition(stored.status, operation));
        }
        sessions.remove(session_id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Session>> {
        let mut sessions: Vec<Session> =
            self.sessions.lock().unwrap().values().cloned().collect();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sessions)
    }

    async fn list_by_participant(&self, role: Role, actor_id: &str) -> Result<Vec<Session>> {
        let mut sessions: Vec<Session> = self
            .sessions
            .lock()
            .unwrap()
            .values()
            .filter(|session| match role {
                Role::Student => session.student_id == actor_id,
                Role::Mentor => session.mentor_id == actor_id,
            })
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sessions)
    }
}

/// Mock IdentityDirectory backed by a fixed profile set.
pub struct MockIdentityDirectory {
    profiles: HashMap<String, UserProfile>,
}

impl MockIdentityDirectory {
    pub fn with_profiles(profiles: Vec<UserProfile>) -> Self {
        Self {
            profiles: profiles
                .into_iter()
                .map(|profile| (profile.id.clone(), profile))
                .collect(),
        }
    }
}

#[async_trait]
impl IdentityDirectory for MockIdentityDirectory {
    async fn find_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        Ok(self.profiles.get(user_id).cloned())
    }
}

/// IdentityDirectory that always fails, for best-effort lookup tests.
pub struct FailingDirectory;

#[async_trait]
impl IdentityDirectory for FailingDirectory {
    async fn find_profile(&self, _user_id: &str) -> Result<Option<UserProfile>> {
        Err(MentoraError::data_access("directory unavailable"))
    }
}

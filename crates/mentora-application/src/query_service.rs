//! Read-only session projections for dashboards.
//!
//! No authorization beyond "an actor sees only their own role slot": every
//! query is scoped to the sessions where the actor's id occupies the slot of
//! their role.

use chrono::{DateTime, Utc};
use mentora_core::actor::Actor;
use mentora_core::error::Result;
use mentora_core::session::{Session, SessionRepository, SessionStatus};
use serde::Serialize;
use std::sync::Arc;

/// Dashboard partitions of an actor's sessions.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardPartitions {
    /// Confirmed sessions whose nominal scheduled instant is in the future.
    pub upcoming: Vec<Session>,
    /// Completed sessions.
    pub completed: Vec<Session>,
}

/// Read-only query service over the session repository.
pub struct SessionQueryService {
    sessions: Arc<dyn SessionRepository>,
}

impl SessionQueryService {
    /// Creates a new `SessionQueryService`.
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    /// Lists the actor's sessions, optionally filtered by status, most
    /// recently created first.
    pub async fn list_by_actor_and_status(
        &self,
        actor: &Actor,
        status: Option<SessionStatus>,
    ) -> Result<Vec<Session>> {
        let mut sessions = self
            .sessions
            .list_by_participant(actor.role, &actor.id)
            .await?;

        if let Some(status) = status {
            sessions.retain(|session| session.status == status);
        }

        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sessions)
    }

    /// Partitions the actor's sessions for dashboard display.
    pub async fn dashboard(&self, actor: &Actor, now: DateTime<Utc>) -> Result<DashboardPartitions> {
        let sessions = self.list_by_actor_and_status(actor, None).await?;

        let mut partitions = DashboardPartitions::default();
        for session in sessions {
            if session.is_upcoming(now) {
                partitions.upcoming.push(session);
            } else if session.status == SessionStatus::Completed {
                partitions.completed.push(session);
            }
        }
        Ok(partitions)
    }
}

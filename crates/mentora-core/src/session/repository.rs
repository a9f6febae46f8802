//! Session repository trait.
//!
//! Defines the interface for session persistence operations.

use super::model::{Session, SessionStatus};
use crate::actor::Role;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for managing session persistence.
///
/// This trait defines the contract for persisting and retrieving booking
/// records, decoupling the lifecycle engine from the specific storage
/// mechanism (e.g., TOML files, database, remote API).
///
/// The write operations are conditional: a transition commits only if the
/// persisted status still matches what the caller read. Two concurrent
/// conflicting transitions therefore resolve to exactly one winner; the
/// loser observes `InvalidTransition` instead of silently overwriting.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Finds a session by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Session))`: session found
    /// - `Ok(None)`: session not found
    /// - `Err(_)`: storage failure
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>>;

    /// Stores a newly created session.
    ///
    /// # Errors
    ///
    /// Returns a `DataAccess` error if a record with the same id already
    /// exists, or a storage error if the write fails.
    async fn insert(&self, session: &Session) -> Result<()>;

    /// Replaces a stored session iff its persisted status equals `expected`.
    ///
    /// This is the conditional-write primitive behind every transition:
    /// `UPDATE ... WHERE id = ? AND status = ?` in repository form.
    ///
    /// # Arguments
    ///
    /// * `session` - The fully mutated record to store
    /// * `expected` - The status the stored record must still have
    /// * `operation` - Label for the transition, used in error reporting
    ///
    /// # Errors
    ///
    /// - `NotFound` if the record vanished
    /// - `InvalidTransition` if the persisted status no longer matches
    /// - storage errors otherwise
    async fn update_if_status(
        &self,
        session: &Session,
        expected: SessionStatus,
        operation: &'static str,
    ) -> Result<()>;

    /// Removes a stored session iff its persisted status equals `expected`.
    ///
    /// Same conditional semantics as [`update_if_status`], for the hard
    /// delete of a pending request.
    ///
    /// [`update_if_status`]: SessionRepository::update_if_status
    async fn delete_if_status(
        &self,
        session_id: &str,
        expected: SessionStatus,
        operation: &'static str,
    ) -> Result<()>;

    /// Lists all stored sessions, most recently created first.
    async fn list_all(&self) -> Result<Vec<Session>>;

    /// Lists sessions where `actor_id` occupies the given role slot,
    /// most recently created first.
    async fn list_by_participant(&self, role: Role, actor_id: &str) -> Result<Vec<Session>>;
}

//! Identity directory port.
//!
//! The platform's identity context authenticates users; the core only
//! consumes it. The directory is queried best-effort at booking time to
//! denormalize display names onto the session record - a failed lookup is
//! logged by the caller and never blocks the primary write.

use crate::actor::Role;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A user profile as known to the identity directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Stable user id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The role this user signs in with.
    pub role: Role,
}

/// Read-only access to user profiles.
///
/// Implementations are external to the lifecycle engine; results are treated
/// as a non-authoritative cache source. Authorization decisions never consult
/// this directory - they use the ids stored on the session record.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Finds a user profile by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UserProfile))`: profile found
    /// - `Ok(None)`: no such user
    /// - `Err(_)`: directory failure
    async fn find_profile(&self, user_id: &str) -> Result<Option<UserProfile>>;
}

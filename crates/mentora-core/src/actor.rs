//! Authenticated actor types.
//!
//! An actor is an already-authenticated participant resolved by the external
//! identity context. The core receives it by value with every operation and
//! holds no session-cookie state of its own.

use serde::{Deserialize, Serialize};

/// The role slot an actor occupies on a booking.
///
/// Every session has exactly one participant per role, fixed for its
/// lifetime. Guard checks match on this exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The participant who requested the session.
    Student,
    /// The participant who receives, confirms, and runs the session.
    Mentor,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Mentor => write!(f, "mentor"),
        }
    }
}

/// An authenticated participant: a stable user id plus its role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Stable identifier from the identity context.
    pub id: String,
    /// The actor's role.
    pub role: Role,
}

impl Actor {
    /// Creates a student actor.
    pub fn student(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::Student,
        }
    }

    /// Creates a mentor actor.
    pub fn mentor(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::Mentor,
        }
    }
}

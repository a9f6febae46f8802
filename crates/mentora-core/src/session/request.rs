//! Operation payload types.
//!
//! Each lifecycle operation takes its data fields as a small payload struct,
//! handed over by the (out-of-scope) view layer alongside the authenticated
//! actor.

use serde::{Deserialize, Serialize};

/// A student's booking request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    /// What the session should be about.
    pub subject: String,
    /// Requested calendar date (opaque).
    pub date: String,
    /// Requested clock time (opaque).
    pub time: String,
    /// Optional note to the mentor.
    #[serde(default)]
    pub notes: Option<String>,
}

/// A student's edit of a still-pending request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingEdit {
    pub subject: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A mentor's new slot for the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReschedulePlan {
    pub date: String,
    pub time: String,
    /// Why the session moved.
    #[serde(default)]
    pub reason: Option<String>,
}

/// A mentor's write-up when marking the session completed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionReport {
    #[serde(default)]
    pub notes: Option<String>,
    /// Actual duration in minutes.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub topics_covered: Option<String>,
    #[serde(default)]
    pub homework: Option<String>,
}

/// A student's feedback on a completed session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackForm {
    /// Rating in [1,5].
    pub rating: u8,
    #[serde(default)]
    pub feedback: Option<String>,
    /// Whether the student's goals were met.
    pub goals_met: bool,
}

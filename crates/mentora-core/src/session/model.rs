//! Session domain model.
//!
//! This module contains the core `Session` entity that represents a single
//! mentoring booking record, together with its status machine and the pure
//! predicates derived from it.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the current status of a booking record.
///
/// `Completed`, `Cancelled`, and `Rejected` are terminal: no further
/// transition is defined from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Requested by a student, awaiting the mentor's decision.
    Pending,
    /// Accepted by the mentor; scheduled to happen.
    Confirmed,
    /// Held and written up by the mentor.
    Completed,
    /// Withdrawn; retained for stored-data compatibility. No lifecycle
    /// operation produces it - pending requests are hard-deleted instead.
    Cancelled,
    /// Declined by the mentor.
    Rejected,
}

impl SessionStatus {
    /// Returns true if no further transition is defined from this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Rejected)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Rejected => "rejected",
        };
        write!(f, "{label}")
    }
}

/// A single mentoring booking record.
///
/// A session is created by a student's booking request and mutated
/// exclusively through the lifecycle operations. It has exactly one student
/// and one mentor, fixed for its lifetime. Timestamps are RFC 3339 strings;
/// `date` and `time` are opaque calendar strings combined only for the
/// nominal "upcoming" check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (UUID format), immutable.
    pub id: String,
    /// The requesting student's user id, immutable.
    pub student_id: String,
    /// The receiving mentor's user id, immutable.
    pub mentor_id: String,
    /// What the session is about. Non-empty, trimmed.
    pub subject: String,
    /// Opaque calendar date string (e.g. "2024-06-01").
    pub date: String,
    /// Opaque clock time string (e.g. "10:00").
    pub time: String,
    /// Current lifecycle status.
    pub status: SessionStatus,
    /// Free-form message attached to the record.
    #[serde(default)]
    pub message: Option<String>,
    /// Request/edit notes from the student, or the mentor's completion notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// What was covered, written at completion.
    #[serde(default)]
    pub topics_covered: Option<String>,
    /// Follow-up work assigned at completion.
    #[serde(default)]
    pub homework: Option<String>,
    /// The student's written feedback.
    #[serde(default)]
    pub student_feedback: Option<String>,
    /// Why the mentor moved the session.
    #[serde(default)]
    pub reschedule_reason: Option<String>,
    /// Actual duration in minutes, written at completion.
    #[serde(default)]
    pub duration: Option<u32>,
    /// Student rating in [1,5].
    #[serde(default)]
    pub rating: Option<u8>,
    /// Whether the student's goals were met.
    #[serde(default = "default_goals_met")]
    pub goals_met: bool,
    /// When the mentor accepted. Set exactly once, never cleared.
    #[serde(default)]
    pub accepted_at: Option<String>,
    /// When the mentor rejected. Set exactly once, never cleared.
    #[serde(default)]
    pub rejected_at: Option<String>,
    /// When the mentor completed. Set exactly once, never cleared.
    #[serde(default)]
    pub completed_at: Option<String>,
    /// When the mentor last rescheduled.
    #[serde(default)]
    pub rescheduled_at: Option<String>,
    /// Display fallback for the student, populated best-effort at creation.
    /// Never consulted for authorization.
    #[serde(default)]
    pub student_name: Option<String>,
    /// Display fallback for the mentor. Never consulted for authorization.
    #[serde(default)]
    pub mentor_name: Option<String>,
    /// Timestamp when the record was created (RFC 3339).
    pub created_at: String,
    /// Timestamp when the record was last updated (RFC 3339).
    pub updated_at: String,
}

fn default_goals_met() -> bool {
    true
}

impl Session {
    /// Creates a fresh pending session for a student's booking request.
    ///
    /// The caller is responsible for validating and trimming the required
    /// fields beforehand.
    pub fn new(
        student_id: impl Into<String>,
        mentor_id: impl Into<String>,
        subject: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        notes: Option<String>,
    ) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            student_id: student_id.into(),
            mentor_id: mentor_id.into(),
            subject: subject.into(),
            date: date.into(),
            time: time.into(),
            status: SessionStatus::Pending,
            message: None,
            notes,
            topics_covered: None,
            homework: None,
            student_feedback: None,
            reschedule_reason: None,
            duration: None,
            rating: None,
            goals_met: true,
            accepted_at: None,
            rejected_at: None,
            completed_at: None,
            rescheduled_at: None,
            student_name: None,
            mentor_name: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// The nominal scheduled instant, derived from `date` and `time`.
    ///
    /// Returns `None` when the opaque strings do not combine into a
    /// parseable local date-time. Used only for display and the "upcoming"
    /// check - never for authorization or guards.
    pub fn scheduled_at(&self) -> Option<NaiveDateTime> {
        let combined = format!("{}T{}", self.date, self.time);
        NaiveDateTime::parse_from_str(&combined, "%Y-%m-%dT%H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(&combined, "%Y-%m-%dT%H:%M"))
            .ok()
    }

    /// True iff the session is confirmed and its nominal scheduled instant
    /// is strictly in the future.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.status == SessionStatus::Confirmed
            && self
                .scheduled_at()
                .map(|at| at > now.naive_utc())
                .unwrap_or(false)
    }

    /// True iff the session can be marked completed.
    pub fn can_be_completed(&self) -> bool {
        self.status == SessionStatus::Confirmed && self.completed_at.is_none()
    }

    /// True iff the session can be rescheduled.
    pub fn can_be_rescheduled(&self) -> bool {
        matches!(
            self.status,
            SessionStatus::Confirmed | SessionStatus::Pending
        ) && self.completed_at.is_none()
    }
}

/// Trims optional free text, mapping whitespace-only input to `None`.
pub fn clean_optional(text: Option<String>) -> Option<String> {
    text.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

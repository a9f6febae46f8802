//! Booking lifecycle use case.
//!
//! `BookingUseCase` is the platform's lifecycle engine: it validates and
//! applies every state transition of a booking record, enforcing
//! role/ownership checks and field invariants. It holds no state of its own -
//! all state lives in the repository - and is safe to invoke concurrently
//! for different sessions.
//!
//! Every transition follows the same shape: load the record, check the
//! actor's role and slot ownership, check the status guard, mutate a copy,
//! and commit it through a conditional replace keyed on the expected prior
//! status. A transition either fully applies all its side-effect fields and
//! the status change, or none of them.

use chrono::Utc;
use mentora_core::actor::{Actor, Role};
use mentora_core::error::Result;
use mentora_core::identity::IdentityDirectory;
use mentora_core::session::{
    clean_optional, BookingEdit, BookingRequest, CompletionReport, FeedbackForm, ReschedulePlan,
    Session, SessionRepository, SessionStatus,
};
use mentora_core::MentoraError;
use std::sync::Arc;

/// Use case implementing the booking lifecycle state machine.
pub struct BookingUseCase {
    /// Repository for booking record persistence.
    sessions: Arc<dyn SessionRepository>,
    /// Best-effort source for display-name denormalization.
    directory: Arc<dyn IdentityDirectory>,
}

impl BookingUseCase {
    /// Creates a new `BookingUseCase` over the given ports.
    pub fn new(sessions: Arc<dyn SessionRepository>, directory: Arc<dyn IdentityDirectory>) -> Self {
        Self {
            sessions,
            directory,
        }
    }

    /// Creates a pending session request from a student to a mentor.
    ///
    /// Display names for both parties are looked up best-effort; a directory
    /// failure is logged and never blocks the booking.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the actor is not a student
    /// - `Validation` if subject, date, or time is missing
    pub async fn request(
        &self,
        actor: &Actor,
        mentor_id: &str,
        request: BookingRequest,
    ) -> Result<Session> {
        if actor.role != Role::Student {
            return Err(MentoraError::forbidden("only students can request sessions"));
        }

        let mentor_id = required(mentor_id, "mentor")?;
        let subject = required(&request.subject, "subject")?;
        let date = required(&request.date, "date")?;
        let time = required(&request.time, "time")?;

        let mut session = Session::new(
            &actor.id,
            mentor_id,
            subject,
            date,
            time,
            clean_optional(request.notes),
        );

        session.student_name = self.lookup_name(&session.student_id).await;
        session.mentor_name = self.lookup_name(&session.mentor_id).await;

        self.sessions.insert(&session).await?;

        tracing::info!(
            "[BookingUseCase] Session {} requested by student {} with mentor {}",
            session.id,
            session.student_id,
            session.mentor_id
        );

        Ok(session)
    }

    /// Mentor accepts a pending request; the session becomes confirmed.
    pub async fn accept(&self, actor: &Actor, session_id: &str) -> Result<Session> {
        let mut session = self.load_owned(session_id, actor, Role::Mentor).await?;

        if session.status != SessionStatus::Pending || session.accepted_at.is_some() {
            return Err(MentoraError::invalid_transition(session.status, "accept"));
        }

        let now = Utc::now().to_rfc3339();
        session.status = SessionStatus::Confirmed;
        session.accepted_at = Some(now.clone());
        session.updated_at = now;

        self.sessions
            .update_if_status(&session, SessionStatus::Pending, "accept")
            .await?;

        tracing::info!("[BookingUseCase] Session {} accepted", session.id);
        Ok(session)
    }

    /// Mentor rejects a pending request.
    pub async fn reject(&self, actor: &Actor, session_id: &str) -> Result<Session> {
        let mut session = self.load_owned(session_id, actor, Role::Mentor).await?;

        if session.status != SessionStatus::Pending || session.rejected_at.is_some() {
            return Err(MentoraError::invalid_transition(session.status, "reject"));
        }

        let now = Utc::now().to_rfc3339();
        session.status = SessionStatus::Rejected;
        session.rejected_at = Some(now.clone());
        session.updated_at = now;

        self.sessions
            .update_if_status(&session, SessionStatus::Pending, "reject")
            .await?;

        tracing::info!("[BookingUseCase] Session {} rejected", session.id);
        Ok(session)
    }

    /// Mentor moves a pending or confirmed session to a new slot.
    ///
    /// The session lands confirmed regardless of whether it was pending or
    /// confirmed before.
    pub async fn reschedule(
        &self,
        actor: &Actor,
        session_id: &str,
        plan: ReschedulePlan,
    ) -> Result<Session> {
        let mut session = self.load_owned(session_id, actor, Role::Mentor).await?;

        if !session.can_be_rescheduled() {
            return Err(MentoraError::invalid_transition(session.status, "reschedule"));
        }

        let date = required(&plan.date, "date")?;
        let time = required(&plan.time, "time")?;

        let expected = session.status;
        let now = Utc::now().to_rfc3339();
        session.date = date;
        session.time = time;
        session.rescheduled_at = Some(now.clone());
        session.reschedule_reason = clean_optional(plan.reason);
        session.status = SessionStatus::Confirmed;
        session.updated_at = now;

        self.sessions
            .update_if_status(&session, expected, "reschedule")
            .await?;

        tracing::info!(
            "[BookingUseCase] Session {} rescheduled to {} {}",
            session.id,
            session.date,
            session.time
        );
        Ok(session)
    }

    /// Mentor marks a confirmed session as held and records the write-up.
    pub async fn complete(
        &self,
        actor: &Actor,
        session_id: &str,
        report: CompletionReport,
    ) -> Result<Session> {
        let mut session = self.load_owned(session_id, actor, Role::Mentor).await?;

        if !session.can_be_completed() {
            return Err(MentoraError::invalid_transition(session.status, "complete"));
        }

        let now = Utc::now().to_rfc3339();
        session.status = SessionStatus::Completed;
        session.completed_at = Some(now.clone());
        session.notes = clean_optional(report.notes);
        session.duration = report.duration;
        session.topics_covered = clean_optional(report.topics_covered);
        session.homework = clean_optional(report.homework);
        session.updated_at = now;

        self.sessions
            .update_if_status(&session, SessionStatus::Confirmed, "complete")
            .await?;

        tracing::info!("[BookingUseCase] Session {} completed", session.id);
        Ok(session)
    }

    /// Student edits a still-pending request; status is unchanged.
    pub async fn edit_request(
        &self,
        actor: &Actor,
        session_id: &str,
        edit: BookingEdit,
    ) -> Result<Session> {
        let mut session = self.load_owned(session_id, actor, Role::Student).await?;

        if session.status != SessionStatus::Pending {
            return Err(MentoraError::invalid_transition(session.status, "edit"));
        }

        session.subject = required(&edit.subject, "subject")?;
        session.date = required(&edit.date, "date")?;
        session.time = required(&edit.time, "time")?;
        session.notes = clean_optional(edit.notes);
        session.updated_at = Utc::now().to_rfc3339();

        self.sessions
            .update_if_status(&session, SessionStatus::Pending, "edit")
            .await?;

        Ok(session)
    }

    /// Student withdraws a pending request. Hard delete: completed,
    /// confirmed, and rejected sessions are retained as an audit trail.
    pub async fn cancel_request(&self, actor: &Actor, session_id: &str) -> Result<()> {
        let session = self.load_owned(session_id, actor, Role::Student).await?;

        if session.status != SessionStatus::Pending {
            return Err(MentoraError::invalid_transition(session.status, "cancel"));
        }

        self.sessions
            .delete_if_status(session_id, SessionStatus::Pending, "cancel")
            .await?;

        tracing::info!("[BookingUseCase] Session {} cancelled by student", session_id);
        Ok(())
    }

    /// Student rates a completed session; status is unchanged.
    ///
    /// # Errors
    ///
    /// `Validation` if the rating is outside [1,5].
    pub async fn submit_feedback(
        &self,
        actor: &Actor,
        session_id: &str,
        form: FeedbackForm,
    ) -> Result<Session> {
        let mut session = self.load_owned(session_id, actor, Role::Student).await?;

        if session.status != SessionStatus::Completed {
            return Err(MentoraError::invalid_transition(session.status, "feedback"));
        }

        if !(1..=5).contains(&form.rating) {
            return Err(MentoraError::validation("rating must be between 1 and 5"));
        }

        session.rating = Some(form.rating);
        session.student_feedback = clean_optional(form.feedback);
        session.goals_met = form.goals_met;
        session.updated_at = Utc::now().to_rfc3339();

        self.sessions
            .update_if_status(&session, SessionStatus::Completed, "feedback")
            .await?;

        Ok(session)
    }

    /// Loads a session and verifies the actor occupies the required role
    /// slot on it.
    async fn load_owned(&self, session_id: &str, actor: &Actor, slot: Role) -> Result<Session> {
        if actor.role != slot {
            return Err(MentoraError::forbidden(format!(
                "operation requires the {slot} role"
            )));
        }

        let session = self
            .sessions
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| MentoraError::not_found("session", session_id))?;

        let owns = match slot {
            Role::Student => session.student_id == actor.id,
            Role::Mentor => session.mentor_id == actor.id,
        };
        if !owns {
            return Err(MentoraError::forbidden(format!(
                "actor '{}' is not this session's {}",
                actor.id, slot
            )));
        }

        Ok(session)
    }

    async fn lookup_name(&self, user_id: &str) -> Option<String> {
        match self.directory.find_profile(user_id).await {
            Ok(Some(profile)) => Some(profile.name),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(
                    "[BookingUseCase] Display name lookup failed for {}: {}",
                    user_id,
                    e
                );
                None
            }
        }
    }
}

/// Validates a required text field, returning its trimmed value.
fn required(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(MentoraError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingDirectory, MockIdentityDirectory, MockSessionRepository};
    use mentora_core::identity::UserProfile;

    fn fixture() -> (BookingUseCase, Arc<MockSessionRepository>) {
        let repository = Arc::new(MockSessionRepository::new());
        let directory = Arc::new(MockIdentityDirectory::with_profiles(vec![
            UserProfile {
                id: "student-a".to_string(),
                name: "Alice".to_string(),
                role: Role::Student,
            },
            UserProfile {
                id: "mentor-m".to_string(),
                name: "Marcus".to_string(),
                role: Role::Mentor,
            },
        ]));
        let usecase = BookingUseCase::new(repository.clone(), directory);
        (usecase, repository)
    }

    fn algebra_request() -> BookingRequest {
        BookingRequest {
            subject: "Algebra".to_string(),
            date: "2024-06-01".to_string(),
            time: "10:00".to_string(),
            notes: None,
        }
    }

    async fn booked(usecase: &BookingUseCase) -> Session {
        usecase
            .request(&Actor::student("student-a"), "mentor-m", algebra_request())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn full_lifecycle_scenario() {
        let (usecase, _repo) = fixture();
        let student = Actor::student("student-a");
        let mentor = Actor::mentor("mentor-m");

        let session = booked(&usecase).await;
        assert_eq!(session.status, SessionStatus::Pending);
        assert!(session.accepted_at.is_none());

        let session = usecase.accept(&mentor, &session.id).await.unwrap();
        assert_eq!(session.status, SessionStatus::Confirmed);
        assert!(session.accepted_at.is_some());

        let session = usecase
            .complete(
                &mentor,
                &session.id,
                CompletionReport {
                    notes: Some("Covered quadratics".to_string()),
                    duration: Some(60),
                    topics_covered: Some("quadratics".to_string()),
                    homework: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(session.status, SessionStatus::Completed);
        assert!(session.completed_at.is_some());
        assert_eq!(session.duration, Some(60));
        assert_eq!(session.notes.as_deref(), Some("Covered quadratics"));

        let session = usecase
            .submit_feedback(
                &student,
                &session.id,
                FeedbackForm {
                    rating: 5,
                    feedback: Some("Great!".to_string()),
                    goals_met: true,
                },
            )
            .await
            .unwrap();
        assert_eq!(session.rating, Some(5));
        assert_eq!(session.student_feedback.as_deref(), Some("Great!"));
        assert!(session.goals_met);
        // feedback leaves the session completed
        assert_eq!(session.status, SessionStatus::Completed);
        assert!(session.completed_at.is_some());
    }

    #[tokio::test]
    async fn request_populates_display_names_best_effort() {
        let (usecase, _repo) = fixture();

        let session = booked(&usecase).await;
        assert_eq!(session.student_name.as_deref(), Some("Alice"));
        assert_eq!(session.mentor_name.as_deref(), Some("Marcus"));
    }

    #[tokio::test]
    async fn directory_failure_never_blocks_the_booking() {
        let repository = Arc::new(MockSessionRepository::new());
        let usecase = BookingUseCase::new(repository.clone(), Arc::new(FailingDirectory));

        let session = usecase
            .request(&Actor::student("student-a"), "mentor-m", algebra_request())
            .await
            .unwrap();
        assert!(session.student_name.is_none());
        assert!(session.mentor_name.is_none());
        assert!(repository.contains(&session.id));
    }

    #[tokio::test]
    async fn request_requires_student_role() {
        let (usecase, _repo) = fixture();

        let err = usecase
            .request(&Actor::mentor("mentor-m"), "mentor-m", algebra_request())
            .await
            .unwrap_err();
        assert!(err.is_forbidden());
    }

    #[tokio::test]
    async fn request_rejects_blank_subject() {
        let (usecase, _repo) = fixture();

        let mut request = algebra_request();
        request.subject = "   ".to_string();
        let err = usecase
            .request(&Actor::student("student-a"), "mentor-m", request)
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn accept_twice_fails_with_invalid_transition() {
        let (usecase, _repo) = fixture();
        let mentor = Actor::mentor("mentor-m");

        let session = booked(&usecase).await;
        usecase.accept(&mentor, &session.id).await.unwrap();

        let err = usecase.accept(&mentor, &session.id).await.unwrap_err();
        assert!(err.is_invalid_transition());
    }

    #[tokio::test]
    async fn accept_by_non_owning_mentor_is_forbidden() {
        let (usecase, _repo) = fixture();

        let session = booked(&usecase).await;
        let err = usecase
            .accept(&Actor::mentor("mentor-z"), &session.id)
            .await
            .unwrap_err();
        assert!(err.is_forbidden());
    }

    #[tokio::test]
    async fn accept_by_student_is_forbidden() {
        let (usecase, _repo) = fixture();

        let session = booked(&usecase).await;
        let err = usecase
            .accept(&Actor::student("student-a"), &session.id)
            .await
            .unwrap_err();
        assert!(err.is_forbidden());
    }

    #[tokio::test]
    async fn accept_unknown_session_is_not_found() {
        let (usecase, _repo) = fixture();

        let err = usecase
            .accept(&Actor::mentor("mentor-m"), "no-such-id")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn reject_sets_rejected_at_and_is_terminal() {
        let (usecase, _repo) = fixture();
        let mentor = Actor::mentor("mentor-m");

        let session = booked(&usecase).await;
        let session = usecase.reject(&mentor, &session.id).await.unwrap();
        assert_eq!(session.status, SessionStatus::Rejected);
        assert!(session.rejected_at.is_some());
        assert!(session.completed_at.is_none());

        let err = usecase.accept(&mentor, &session.id).await.unwrap_err();
        assert!(err.is_invalid_transition());
    }

    #[tokio::test]
    async fn reschedule_confirms_from_pending_and_from_confirmed() {
        let (usecase, _repo) = fixture();
        let mentor = Actor::mentor("mentor-m");

        let plan = ReschedulePlan {
            date: "2024-06-08".to_string(),
            time: "14:00".to_string(),
            reason: Some("conflict".to_string()),
        };

        // from pending
        let session = booked(&usecase).await;
        let session = usecase
            .reschedule(&mentor, &session.id, plan.clone())
            .await
            .unwrap();
        assert_eq!(session.status, SessionStatus::Confirmed);
        assert_eq!(session.date, "2024-06-08");
        assert_eq!(session.time, "14:00");
        assert_eq!(session.reschedule_reason.as_deref(), Some("conflict"));
        assert!(session.rescheduled_at.is_some());

        // from confirmed (again)
        let session = usecase
            .reschedule(
                &mentor,
                &session.id,
                ReschedulePlan {
                    date: "2024-06-09".to_string(),
                    time: "09:00".to_string(),
                    reason: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(session.status, SessionStatus::Confirmed);
        assert_eq!(session.date, "2024-06-09");
    }

    #[tokio::test]
    async fn reschedule_completed_session_fails() {
        let (usecase, _repo) = fixture();
        let mentor = Actor::mentor("mentor-m");

        let session = booked(&usecase).await;
        usecase.accept(&mentor, &session.id).await.unwrap();
        usecase
            .complete(&mentor, &session.id, CompletionReport::default())
            .await
            .unwrap();

        let err = usecase
            .reschedule(
                &mentor,
                &session.id,
                ReschedulePlan {
                    date: "2024-06-08".to_string(),
                    time: "14:00".to_string(),
                    reason: None,
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_invalid_transition());
    }

    #[tokio::test]
    async fn complete_is_idempotent_rejecting() {
        let (usecase, _repo) = fixture();
        let mentor = Actor::mentor("mentor-m");

        let session = booked(&usecase).await;
        usecase.accept(&mentor, &session.id).await.unwrap();

        usecase
            .complete(&mentor, &session.id, CompletionReport::default())
            .await
            .unwrap();
        let err = usecase
            .complete(&mentor, &session.id, CompletionReport::default())
            .await
            .unwrap_err();
        assert!(err.is_invalid_transition());
    }

    #[tokio::test]
    async fn complete_requires_confirmation_first() {
        let (usecase, _repo) = fixture();

        let session = booked(&usecase).await;
        let err = usecase
            .complete(
                &Actor::mentor("mentor-m"),
                &session.id,
                CompletionReport::default(),
            )
            .await
            .unwrap_err();
        assert!(err.is_invalid_transition());
    }

    #[tokio::test]
    async fn edit_updates_fields_and_keeps_pending() {
        let (usecase, _repo) = fixture();

        let session = booked(&usecase).await;
        let session = usecase
            .edit_request(
                &Actor::student("student-a"),
                &session.id,
                BookingEdit {
                    subject: "Geometry".to_string(),
                    date: "2024-06-02".to_string(),
                    time: "11:00".to_string(),
                    notes: Some("  switched topics  ".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(session.status, SessionStatus::Pending);
        assert_eq!(session.subject, "Geometry");
        assert_eq!(session.notes.as_deref(), Some("switched topics"));
    }

    #[tokio::test]
    async fn edit_after_acceptance_fails() {
        let (usecase, _repo) = fixture();

        let session = booked(&usecase).await;
        usecase
            .accept(&Actor::mentor("mentor-m"), &session.id)
            .await
            .unwrap();

        let err = usecase
            .edit_request(
                &Actor::student("student-a"),
                &session.id,
                BookingEdit {
                    subject: "Geometry".to_string(),
                    date: "2024-06-02".to_string(),
                    time: "11:00".to_string(),
                    notes: None,
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_invalid_transition());
    }

    #[tokio::test]
    async fn cancel_removes_only_pending_requests() {
        let (usecase, repo) = fixture();
        let student = Actor::student("student-a");

        let session = booked(&usecase).await;
        usecase.cancel_request(&student, &session.id).await.unwrap();
        assert!(!repo.contains(&session.id));

        let session = booked(&usecase).await;
        usecase
            .accept(&Actor::mentor("mentor-m"), &session.id)
            .await
            .unwrap();
        let err = usecase
            .cancel_request(&student, &session.id)
            .await
            .unwrap_err();
        assert!(err.is_invalid_transition());
        assert!(repo.contains(&session.id));
    }

    #[tokio::test]
    async fn cancel_by_another_student_is_forbidden() {
        let (usecase, repo) = fixture();

        let session = booked(&usecase).await;
        let err = usecase
            .cancel_request(&Actor::student("student-b"), &session.id)
            .await
            .unwrap_err();
        assert!(err.is_forbidden());
        assert!(repo.contains(&session.id));
    }

    #[tokio::test]
    async fn feedback_rating_must_be_in_range() {
        let (usecase, _repo) = fixture();
        let student = Actor::student("student-a");
        let mentor = Actor::mentor("mentor-m");

        let session = booked(&usecase).await;
        usecase.accept(&mentor, &session.id).await.unwrap();
        usecase
            .complete(&mentor, &session.id, CompletionReport::default())
            .await
            .unwrap();

        for rating in [0, 6] {
            let err = usecase
                .submit_feedback(
                    &student,
                    &session.id,
                    FeedbackForm {
                        rating,
                        feedback: None,
                        goals_met: true,
                    },
                )
                .await
                .unwrap_err();
            assert!(err.is_validation(), "rating {rating} should be rejected");
        }
    }

    #[tokio::test]
    async fn feedback_before_completion_fails() {
        let (usecase, _repo) = fixture();

        let session = booked(&usecase).await;
        let err = usecase
            .submit_feedback(
                &Actor::student("student-a"),
                &session.id,
                FeedbackForm {
                    rating: 5,
                    feedback: None,
                    goals_met: true,
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_invalid_transition());
    }
}

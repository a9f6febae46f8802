//! Session domain module.
//!
//! This module contains the booking record domain model, the operation
//! payload types, and the repository interface.
//!
//! # Module Structure
//!
//! - `model`: Core session domain model (`Session`, `SessionStatus`)
//! - `request`: Operation payload types (`BookingRequest`, ...)
//! - `repository`: Repository trait for session persistence

mod model;
mod repository;
mod request;

// Re-export public API
pub use model::{clean_optional, Session, SessionStatus};
pub use repository::SessionRepository;
pub use request::{BookingEdit, BookingRequest, CompletionReport, FeedbackForm, ReschedulePlan};

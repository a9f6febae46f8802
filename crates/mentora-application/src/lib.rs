//! Application layer for Mentora.
//!
//! This crate provides the use cases that the (out-of-scope) view layer
//! calls with an authenticated actor: the booking lifecycle engine and the
//! read-only query service.

pub mod booking_usecase;
pub mod query_service;

#[cfg(test)]
mod test_support;

pub use booking_usecase::BookingUseCase;
pub use query_service::{DashboardPartitions, SessionQueryService};

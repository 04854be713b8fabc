//! # DomainError
//!
//! Centralized error handling for the Rusty-Stay ecosystem.
//! Every facade operation resolves to one of three caller-visible outcomes
//! (not-found, validation, conflict); anything else is an internal fault
//! that must propagate loudly instead of masquerading as bad input.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Referenced id does not resolve to a live entity (User, Place, Booking, ...)
    #[error("{0} not found with ID {1}")]
    NotFound(&'static str, String),

    /// A field failed its type/range/format constraint (e.g., rating outside 1–5)
    #[error("validation error: {0}")]
    Validation(String),

    /// A cross-entity business rule is violated (duplicate email, overlapping dates)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Infrastructure or invariant failure; a defect, not bad input
    #[error("internal service error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl DomainError {
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound(kind, id.to_string())
    }

    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict(reason.into())
    }
}

/// A specialized Result type for Rusty-Stay logic.
pub type Result<T> = std::result::Result<T, DomainError>;

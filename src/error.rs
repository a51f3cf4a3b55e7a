//! Error types.
//!
//! Business input never produces an error: unknown labels degrade to safe
//! defaults and "no admissible action" is itself an action. Only
//! configuration and raw action labels are fallible.

use thiserror::Error;

/// A [`CascadeConfig`](crate::cascade::CascadeConfig) threshold outside its
/// valid domain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a non-negative number, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be a percentage within [0, 100], got {value}")]
    NotAPercentage { field: &'static str, value: f64 },

    #[error("large_ticket_sp must be at least 1")]
    ZeroTicketSize,
}

/// An action label that names none of the known actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized action label {0:?}")]
pub struct ParseActionError(pub String);

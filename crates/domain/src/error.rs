//! Domain error type.
//!
//! Every fallible domain operation returns [`DomainError`]. Allocation rule
//! failures keep their own type and convert into it, so callers can still
//! match on the exact rule that rejected a change.

use thiserror::Error;

use crate::generation::AllocationError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input broke a record rule, e.g. an empty character name.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A string did not name a known ability or method.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The command does not apply to the screen's current method.
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Allocation rejected: {0}")]
    Allocation(#[from] AllocationError),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn invalid_state_transition(msg: impl Into<String>) -> Self {
        Self::InvalidStateTransition(msg.into())
    }
}

//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
///
/// None of these are retried automatically; callers decide retry policy.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A session was not found.
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    /// A participant was not found.
    #[error("participant not found: {0}")]
    ParticipantNotFound(Uuid),

    /// A redemption attempt against an unknown unlock code.
    #[error("invalid code")]
    InvalidCode,

    /// An explicit empty target set on event creation is ambiguous with
    /// broadcast and is rejected at the boundary.
    #[error("explicit target set must not be empty; omit targets to broadcast")]
    EmptyTargetSet,

    /// The AI content provider errored or returned non-conforming data.
    /// Generation is not persisted and the session keeps its prior status.
    #[error("content provider failure: {0}")]
    Provider(String),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

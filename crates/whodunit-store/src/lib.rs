//! PostgreSQL implementations of the core datastore traits.
//!
//! Generated-content shapes (victim, physical clues, solution metadata,
//! relationships) are stored as JSONB; scalar fields get real columns so the
//! hot queries stay indexable.

pub mod event_store;
pub mod participant_store;
pub mod role_store;
pub mod session_store;
pub mod unlock_store;

pub use event_store::PgEventStore;
pub use participant_store::PgParticipantStore;
pub use role_store::PgRoleStore;
pub use session_store::PgSessionStore;
pub use unlock_store::PgUnlockStore;

use whodunit_core::error::DomainError;

pub(crate) fn infra(err: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(err.to_string())
}

pub(crate) fn to_jsonb<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(value).map_err(|err| DomainError::Infrastructure(err.to_string()))
}

pub(crate) fn from_jsonb<T: serde::de::DeserializeOwned>(
    value: serde_json::Value,
) -> Result<T, DomainError> {
    serde_json::from_value(value).map_err(|err| DomainError::Infrastructure(err.to_string()))
}

//! Datastore abstractions.
//!
//! The orchestration engine reads and writes through these traits only; the
//! Postgres implementations live in `whodunit-store` and the in-memory test
//! doubles in `whodunit-test-support`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DomainError;
use crate::model::{NarrativeEvent, Participant, Role, Session, UnlockCode, UnlockRecord};

/// Read/write session records by id.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, session: &Session) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// Returns [`DomainError::SessionNotFound`] when no such session exists.
    async fn get(&self, id: Uuid) -> Result<Session, DomainError>;

    /// Full-row update. Last write wins; the status transition and the
    /// generated package are persisted in the same write so a regeneration
    /// and a host "start game" cannot interleave partially.
    async fn update(&self, session: &Session) -> Result<(), DomainError>;
}

/// Read/write participant records scoped to a session.
#[async_trait]
pub trait ParticipantStore: Send + Sync {
    async fn insert(&self, participant: &Participant) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// Returns [`DomainError::ParticipantNotFound`] when no such participant
    /// exists.
    async fn get(&self, id: Uuid) -> Result<Participant, DomainError>;

    /// Roster in join order.
    async fn list_for_session(&self, session_id: Uuid) -> Result<Vec<Participant>, DomainError>;
}

/// Read/write role records keyed by participant.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Drops all roles for the session's participants and inserts the given
    /// set, so regeneration replaces the cast wholesale.
    async fn replace_for_session(
        &self,
        session_id: Uuid,
        roles: &[Role],
    ) -> Result<(), DomainError>;

    async fn list_for_session(&self, session_id: Uuid) -> Result<Vec<Role>, DomainError>;

    /// Host review edit of a single role.
    async fn update(&self, role: &Role) -> Result<(), DomainError>;
}

/// Append/read narrative events scoped to a session, ordered by creation.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn append(&self, event: &NarrativeEvent) -> Result<(), DomainError>;

    async fn list_for_session(&self, session_id: Uuid) -> Result<Vec<NarrativeEvent>, DomainError>;
}

/// Unlock codes and per-participant redemption records.
#[async_trait]
pub trait UnlockStore: Send + Sync {
    /// Clears existing codes for the session and inserts the given set
    /// (wholesale regeneration).
    async fn replace_codes(
        &self,
        session_id: Uuid,
        codes: &[UnlockCode],
    ) -> Result<(), DomainError>;

    async fn find_code(
        &self,
        session_id: Uuid,
        code: &str,
    ) -> Result<Option<UnlockCode>, DomainError>;

    /// Conditional insert of a redemption record. Returns `true` when the
    /// record was created, `false` when the (code, participant) pair already
    /// had one. Implementations must make the check-then-insert atomic (a
    /// unique constraint plus conditional insert, never an unguarded
    /// read-then-write).
    async fn try_record_unlock(&self, record: &UnlockRecord) -> Result<bool, DomainError>;

    async fn list_unlocks(&self, session_id: Uuid) -> Result<Vec<UnlockRecord>, DomainError>;
}

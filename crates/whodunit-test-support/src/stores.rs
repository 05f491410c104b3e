//! In-memory store implementations.
//!
//! Mutex-guarded maps that honor the same contracts as the Postgres stores,
//! including the conditional-insert semantics of unlock redemption.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use whodunit_core::error::DomainError;
use whodunit_core::model::{NarrativeEvent, Participant, Role, Session, UnlockCode, UnlockRecord};
use whodunit_core::store::{EventStore, ParticipantStore, RoleStore, SessionStore, UnlockStore};

/// Session store over a mutex-guarded map.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<Uuid, Session>>,
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: &Session) -> Result<(), DomainError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.id, session.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Session, DomainError> {
        self.sessions
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(DomainError::SessionNotFound(id))
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions.lock().unwrap();
        if !sessions.contains_key(&session.id) {
            return Err(DomainError::SessionNotFound(session.id));
        }
        sessions.insert(session.id, session.clone());
        Ok(())
    }
}

/// Participant store preserving join order.
#[derive(Debug, Default)]
pub struct InMemoryParticipantStore {
    participants: Mutex<Vec<Participant>>,
}

#[async_trait]
impl ParticipantStore for InMemoryParticipantStore {
    async fn insert(&self, participant: &Participant) -> Result<(), DomainError> {
        self.participants.lock().unwrap().push(participant.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Participant, DomainError> {
        self.participants
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(DomainError::ParticipantNotFound(id))
    }

    async fn list_for_session(&self, session_id: Uuid) -> Result<Vec<Participant>, DomainError> {
        Ok(self
            .participants
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.session_id == session_id)
            .cloned()
            .collect())
    }
}

/// Role store keyed by participant, scoped via the participant store's data.
#[derive(Debug, Default)]
pub struct InMemoryRoleStore {
    /// session_id -> roles. The in-memory double keeps the session scoping
    /// directly instead of joining through participants.
    roles: Mutex<HashMap<Uuid, Vec<Role>>>,
}

#[async_trait]
impl RoleStore for InMemoryRoleStore {
    async fn replace_for_session(
        &self,
        session_id: Uuid,
        roles: &[Role],
    ) -> Result<(), DomainError> {
        self.roles
            .lock()
            .unwrap()
            .insert(session_id, roles.to_vec());
        Ok(())
    }

    async fn list_for_session(&self, session_id: Uuid) -> Result<Vec<Role>, DomainError> {
        Ok(self
            .roles
            .lock()
            .unwrap()
            .get(&session_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn update(&self, role: &Role) -> Result<(), DomainError> {
        let mut all = self.roles.lock().unwrap();
        for roles in all.values_mut() {
            if let Some(existing) = roles.iter_mut().find(|r| r.id == role.id) {
                *existing = role.clone();
                return Ok(());
            }
        }
        Err(DomainError::Validation(format!(
            "role {} not found",
            role.id
        )))
    }
}

/// Append-only event store preserving creation order.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: Mutex<Vec<NarrativeEvent>>,
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append(&self, event: &NarrativeEvent) -> Result<(), DomainError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn list_for_session(&self, session_id: Uuid) -> Result<Vec<NarrativeEvent>, DomainError> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.session_id == session_id)
            .cloned()
            .collect())
    }
}

/// Unlock store enforcing the (code, participant) uniqueness with a set,
/// mirroring the database unique constraint.
#[derive(Debug, Default)]
pub struct InMemoryUnlockStore {
    codes: Mutex<HashMap<Uuid, Vec<UnlockCode>>>,
    records: Mutex<Vec<UnlockRecord>>,
    claimed: Mutex<HashSet<(Uuid, Uuid)>>,
}

#[async_trait]
impl UnlockStore for InMemoryUnlockStore {
    async fn replace_codes(
        &self,
        session_id: Uuid,
        codes: &[UnlockCode],
    ) -> Result<(), DomainError> {
        self.codes
            .lock()
            .unwrap()
            .insert(session_id, codes.to_vec());
        Ok(())
    }

    async fn find_code(
        &self,
        session_id: Uuid,
        code: &str,
    ) -> Result<Option<UnlockCode>, DomainError> {
        Ok(self
            .codes
            .lock()
            .unwrap()
            .get(&session_id)
            .and_then(|codes| codes.iter().find(|c| c.code == code))
            .cloned())
    }

    async fn try_record_unlock(&self, record: &UnlockRecord) -> Result<bool, DomainError> {
        let key = (record.unlock_code_id, record.participant_id);
        // The claim set makes check-then-insert a single guarded step.
        let mut claimed = self.claimed.lock().unwrap();
        if !claimed.insert(key) {
            return Ok(false);
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(true)
    }

    async fn list_unlocks(&self, session_id: Uuid) -> Result<Vec<UnlockRecord>, DomainError> {
        let codes = self.codes.lock().unwrap();
        let code_ids: HashSet<Uuid> = codes
            .get(&session_id)
            .map(|codes| codes.iter().map(|c| c.id).collect())
            .unwrap_or_default();
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| code_ids.contains(&r.unlock_code_id))
            .cloned()
            .collect())
    }
}

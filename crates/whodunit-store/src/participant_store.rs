//! PostgreSQL implementation of `ParticipantStore`.

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use whodunit_core::error::DomainError;
use whodunit_core::model::Participant;
use whodunit_core::store::ParticipantStore;

use crate::infra;

/// PostgreSQL-backed participant store.
#[derive(Debug, Clone)]
pub struct PgParticipantStore {
    pool: PgPool,
}

impl PgParticipantStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_participant(row: &PgRow) -> Result<Participant, DomainError> {
    Ok(Participant {
        id: row.try_get("id").map_err(infra)?,
        session_id: row.try_get("session_id").map_err(infra)?,
        name: row.try_get("name").map_err(infra)?,
        personality_notes: row.try_get("personality_notes").map_err(infra)?,
        access_pin: row.try_get("access_pin").map_err(infra)?,
    })
}

#[async_trait]
impl ParticipantStore for PgParticipantStore {
    async fn insert(&self, participant: &Participant) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO participants (id, session_id, name, personality_notes, access_pin) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(participant.id)
        .bind(participant.session_id)
        .bind(&participant.name)
        .bind(&participant.personality_notes)
        .bind(&participant.access_pin)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Participant, DomainError> {
        let row = sqlx::query(
            "SELECT id, session_id, name, personality_notes, access_pin \
             FROM participants WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infra)?
        .ok_or(DomainError::ParticipantNotFound(id))?;
        row_to_participant(&row)
    }

    async fn list_for_session(&self, session_id: Uuid) -> Result<Vec<Participant>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, session_id, name, personality_notes, access_pin \
             FROM participants WHERE session_id = $1 ORDER BY position",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;

        rows.iter().map(row_to_participant).collect()
    }
}

//! PostgreSQL implementation of `EventStore`.

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use whodunit_core::error::DomainError;
use whodunit_core::model::{Audience, NarrativeEvent};
use whodunit_core::store::EventStore;

use crate::{from_jsonb, infra, to_jsonb};

/// PostgreSQL-backed, append-only narrative event store. Per-session order
/// comes from a sequence column, not timestamps, so same-instant events keep
/// their insertion order.
#[derive(Debug, Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_event(row: &PgRow) -> Result<NarrativeEvent, DomainError> {
    // Audience round-trips through its nullable-list wire form.
    let targets: Option<serde_json::Value> =
        row.try_get("target_participant_ids").map_err(infra)?;
    let audience: Audience = match targets {
        None => Audience::Broadcast,
        Some(value) => from_jsonb(value)?,
    };

    Ok(NarrativeEvent {
        id: row.try_get("id").map_err(infra)?,
        session_id: row.try_get("session_id").map_err(infra)?,
        content: row.try_get("content").map_err(infra)?,
        created_at: row.try_get("created_at").map_err(infra)?,
        trigger_time: row.try_get("trigger_time").map_err(infra)?,
        audience,
    })
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn append(&self, event: &NarrativeEvent) -> Result<(), DomainError> {
        let targets: Option<Vec<Uuid>> = event.audience.clone().into();
        sqlx::query(
            "INSERT INTO game_events \
                 (id, session_id, content, created_at, trigger_time, target_participant_ids) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(event.id)
        .bind(event.session_id)
        .bind(&event.content)
        .bind(event.created_at)
        .bind(event.trigger_time)
        .bind(targets.as_ref().map(to_jsonb).transpose()?)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }

    async fn list_for_session(
        &self,
        session_id: Uuid,
    ) -> Result<Vec<NarrativeEvent>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, session_id, content, created_at, trigger_time, \
                    target_participant_ids \
             FROM game_events WHERE session_id = $1 ORDER BY seq",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;

        rows.iter().map(row_to_event).collect()
    }
}

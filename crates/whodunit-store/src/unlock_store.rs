//! PostgreSQL implementation of `UnlockStore`.

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use whodunit_core::error::DomainError;
use whodunit_core::model::{UnlockCode, UnlockRecord};
use whodunit_core::store::UnlockStore;

use crate::{from_jsonb, infra, to_jsonb};

/// PostgreSQL-backed unlock store. The (code, participant) uniqueness lives
/// in the primary key of `clue_unlocks`; `try_record_unlock` is a single
/// conditional insert, so concurrent redemptions race at the database and
/// exactly one wins.
#[derive(Debug, Clone)]
pub struct PgUnlockStore {
    pool: PgPool,
}

impl PgUnlockStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_code(row: &PgRow) -> Result<UnlockCode, DomainError> {
    let content: serde_json::Value = row.try_get("unlocked_content").map_err(infra)?;
    Ok(UnlockCode {
        id: row.try_get("id").map_err(infra)?,
        session_id: row.try_get("session_id").map_err(infra)?,
        clue_index: row.try_get("clue_index").map_err(infra)?,
        code: row.try_get("code").map_err(infra)?,
        unlocked_content: from_jsonb(content)?,
        broadcast_to_all: row.try_get("broadcast_to_all").map_err(infra)?,
    })
}

#[async_trait]
impl UnlockStore for PgUnlockStore {
    async fn replace_codes(
        &self,
        session_id: Uuid,
        codes: &[UnlockCode],
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(infra)?;

        sqlx::query("DELETE FROM unlock_codes WHERE session_id = $1")
            .bind(session_id)
            .execute(&mut *tx)
            .await
            .map_err(infra)?;

        for code in codes {
            sqlx::query(
                "INSERT INTO unlock_codes \
                     (id, session_id, clue_index, code, unlocked_content, broadcast_to_all) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(code.id)
            .bind(code.session_id)
            .bind(code.clue_index)
            .bind(&code.code)
            .bind(to_jsonb(&code.unlocked_content)?)
            .bind(code.broadcast_to_all)
            .execute(&mut *tx)
            .await
            .map_err(infra)?;
        }

        tx.commit().await.map_err(infra)
    }

    async fn find_code(
        &self,
        session_id: Uuid,
        code: &str,
    ) -> Result<Option<UnlockCode>, DomainError> {
        let row = sqlx::query(
            "SELECT id, session_id, clue_index, code, unlocked_content, broadcast_to_all \
             FROM unlock_codes WHERE session_id = $1 AND code = $2 \
             ORDER BY clue_index LIMIT 1",
        )
        .bind(session_id)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(infra)?;

        row.as_ref().map(row_to_code).transpose()
    }

    async fn try_record_unlock(&self, record: &UnlockRecord) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "INSERT INTO clue_unlocks (unlock_code_id, participant_id, unlocked_at) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (unlock_code_id, participant_id) DO NOTHING",
        )
        .bind(record.unlock_code_id)
        .bind(record.participant_id)
        .bind(record.unlocked_at)
        .execute(&self.pool)
        .await
        .map_err(infra)?;

        Ok(result.rows_affected() == 1)
    }

    async fn list_unlocks(&self, session_id: Uuid) -> Result<Vec<UnlockRecord>, DomainError> {
        let rows = sqlx::query(
            "SELECT u.unlock_code_id, u.participant_id, u.unlocked_at \
             FROM clue_unlocks u \
             JOIN unlock_codes c ON c.id = u.unlock_code_id \
             WHERE c.session_id = $1 ORDER BY u.unlocked_at",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;

        rows.iter()
            .map(|row| {
                Ok(UnlockRecord {
                    unlock_code_id: row.try_get("unlock_code_id").map_err(infra)?,
                    participant_id: row.try_get("participant_id").map_err(infra)?,
                    unlocked_at: row.try_get("unlocked_at").map_err(infra)?,
                })
            })
            .collect()
    }
}

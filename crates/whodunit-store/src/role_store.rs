//! PostgreSQL implementation of `RoleStore`.

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use whodunit_core::error::DomainError;
use whodunit_core::model::Role;
use whodunit_core::store::RoleStore;

use crate::{from_jsonb, infra, to_jsonb};

/// PostgreSQL-backed role store.
#[derive(Debug, Clone)]
pub struct PgRoleStore {
    pool: PgPool,
}

impl PgRoleStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, participant_id, name, description, backstory, \
     secret_objective, is_murderer, relationships, quirks, opening_action, \
     portrait_url";

fn row_to_role(row: &PgRow) -> Result<Role, DomainError> {
    let relationships: serde_json::Value = row.try_get("relationships").map_err(infra)?;
    let quirks: serde_json::Value = row.try_get("quirks").map_err(infra)?;
    Ok(Role {
        id: row.try_get("id").map_err(infra)?,
        participant_id: row.try_get("participant_id").map_err(infra)?,
        name: row.try_get("name").map_err(infra)?,
        description: row.try_get("description").map_err(infra)?,
        backstory: row.try_get("backstory").map_err(infra)?,
        secret_objective: row.try_get("secret_objective").map_err(infra)?,
        is_murderer: row.try_get("is_murderer").map_err(infra)?,
        relationships: from_jsonb(relationships)?,
        quirks: from_jsonb(quirks)?,
        opening_action: row.try_get("opening_action").map_err(infra)?,
        portrait_url: row.try_get("portrait_url").map_err(infra)?,
    })
}

#[async_trait]
impl RoleStore for PgRoleStore {
    async fn replace_for_session(
        &self,
        session_id: Uuid,
        roles: &[Role],
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(infra)?;

        sqlx::query("DELETE FROM roles WHERE session_id = $1")
            .bind(session_id)
            .execute(&mut *tx)
            .await
            .map_err(infra)?;

        for role in roles {
            sqlx::query(
                "INSERT INTO roles (id, session_id, participant_id, name, description, \
                     backstory, secret_objective, is_murderer, relationships, quirks, \
                     opening_action, portrait_url) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
            )
            .bind(role.id)
            .bind(session_id)
            .bind(role.participant_id)
            .bind(&role.name)
            .bind(&role.description)
            .bind(&role.backstory)
            .bind(&role.secret_objective)
            .bind(role.is_murderer)
            .bind(to_jsonb(&role.relationships)?)
            .bind(to_jsonb(&role.quirks)?)
            .bind(&role.opening_action)
            .bind(&role.portrait_url)
            .execute(&mut *tx)
            .await
            .map_err(infra)?;
        }

        tx.commit().await.map_err(infra)
    }

    async fn list_for_session(&self, session_id: Uuid) -> Result<Vec<Role>, DomainError> {
        let sql = format!("SELECT {COLUMNS} FROM roles WHERE session_id = $1 ORDER BY name");
        let rows = sqlx::query(&sql)
            .bind(session_id)
            .fetch_all(&self.pool)
            .await
            .map_err(infra)?;

        rows.iter().map(row_to_role).collect()
    }

    async fn update(&self, role: &Role) -> Result<(), DomainError> {
        sqlx::query(
            "UPDATE roles SET \
                 name = $2, description = $3, backstory = $4, \
                 secret_objective = $5, is_murderer = $6, relationships = $7, \
                 quirks = $8, opening_action = $9, portrait_url = $10 \
             WHERE id = $1",
        )
        .bind(role.id)
        .bind(&role.name)
        .bind(&role.description)
        .bind(&role.backstory)
        .bind(&role.secret_objective)
        .bind(role.is_murderer)
        .bind(to_jsonb(&role.relationships)?)
        .bind(to_jsonb(&role.quirks)?)
        .bind(&role.opening_action)
        .bind(&role.portrait_url)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }
}

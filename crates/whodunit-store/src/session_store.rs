//! PostgreSQL implementation of `SessionStore`.

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use whodunit_core::error::DomainError;
use whodunit_core::model::{Session, SessionStatus};
use whodunit_core::store::SessionStore;

use crate::{from_jsonb, infra, to_jsonb};

/// PostgreSQL-backed session store.
#[derive(Debug, Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, name, status, host_pin, theme, venue_description, \
     available_props, target_duration, complexity, min_solution_paths, \
     venue_analysis, intro, victim, physical_clues, solution_metadata, \
     created_at";

fn row_to_session(row: &PgRow) -> Result<Session, DomainError> {
    let status: String = row.try_get("status").map_err(infra)?;
    let status = match status.as_str() {
        "planning" => SessionStatus::Planning,
        "reviewing" => SessionStatus::Reviewing,
        "active" => SessionStatus::Active,
        "completed" => SessionStatus::Completed,
        other => {
            return Err(DomainError::Infrastructure(format!(
                "unknown session status {other:?}"
            )));
        }
    };

    let victim: Option<serde_json::Value> = row.try_get("victim").map_err(infra)?;
    let physical_clues: serde_json::Value = row.try_get("physical_clues").map_err(infra)?;
    let solution_metadata: Option<serde_json::Value> =
        row.try_get("solution_metadata").map_err(infra)?;

    Ok(Session {
        id: row.try_get("id").map_err(infra)?,
        name: row.try_get("name").map_err(infra)?,
        status,
        host_pin: row.try_get("host_pin").map_err(infra)?,
        theme: row.try_get("theme").map_err(infra)?,
        venue_description: row.try_get("venue_description").map_err(infra)?,
        available_props: row.try_get("available_props").map_err(infra)?,
        target_duration: row.try_get("target_duration").map_err(infra)?,
        complexity: row.try_get("complexity").map_err(infra)?,
        min_solution_paths: row.try_get("min_solution_paths").map_err(infra)?,
        venue_analysis: row.try_get("venue_analysis").map_err(infra)?,
        intro: row.try_get("intro").map_err(infra)?,
        victim: victim.map(from_jsonb).transpose()?,
        physical_clues: from_jsonb(physical_clues)?,
        solution_metadata: solution_metadata.map(from_jsonb).transpose()?,
        created_at: row.try_get("created_at").map_err(infra)?,
    })
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn insert(&self, session: &Session) -> Result<(), DomainError> {
        let sql = format!(
            "INSERT INTO sessions ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)"
        );
        sqlx::query(&sql)
            .bind(session.id)
            .bind(&session.name)
            .bind(session.status.as_str())
            .bind(&session.host_pin)
            .bind(&session.theme)
            .bind(&session.venue_description)
            .bind(&session.available_props)
            .bind(&session.target_duration)
            .bind(&session.complexity)
            .bind(session.min_solution_paths)
            .bind(&session.venue_analysis)
            .bind(&session.intro)
            .bind(session.victim.as_ref().map(to_jsonb).transpose()?)
            .bind(to_jsonb(&session.physical_clues)?)
            .bind(session.solution_metadata.as_ref().map(to_jsonb).transpose()?)
            .bind(session.created_at)
            .execute(&self.pool)
            .await
            .map_err(infra)?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Session, DomainError> {
        let sql = format!("SELECT {COLUMNS} FROM sessions WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra)?
            .ok_or(DomainError::SessionNotFound(id))?;
        row_to_session(&row)
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE sessions SET \
                 name = $2, status = $3, host_pin = $4, theme = $5, \
                 venue_description = $6, available_props = $7, \
                 target_duration = $8, complexity = $9, \
                 min_solution_paths = $10, venue_analysis = $11, intro = $12, \
                 victim = $13, physical_clues = $14, solution_metadata = $15 \
             WHERE id = $1",
        )
        .bind(session.id)
        .bind(&session.name)
        .bind(session.status.as_str())
        .bind(&session.host_pin)
        .bind(&session.theme)
        .bind(&session.venue_description)
        .bind(&session.available_props)
        .bind(&session.target_duration)
        .bind(&session.complexity)
        .bind(session.min_solution_paths)
        .bind(&session.venue_analysis)
        .bind(&session.intro)
        .bind(session.victim.as_ref().map(to_jsonb).transpose()?)
        .bind(to_jsonb(&session.physical_clues)?)
        .bind(session.solution_metadata.as_ref().map(to_jsonb).transpose()?)
        .execute(&self.pool)
        .await
        .map_err(infra)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::SessionNotFound(session.id));
        }
        Ok(())
    }
}

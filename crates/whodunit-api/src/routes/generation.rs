//! Generation, revision, and analysis routes.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use whodunit_analysis::{DurationEstimate, ValidationReport};
use whodunit_session::GenerationOutcome;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /{session_id}/revise.
#[derive(Debug, Deserialize)]
pub struct ReviseRequest {
    /// The host's free-text edit instruction.
    pub instruction: String,
}

/// POST /{session_id}/generate
#[instrument(skip(state))]
async fn generate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<GenerationOutcome>, ApiError> {
    info!("mystery generation requested");
    let outcome = state.service.request_generation(session_id).await?;
    Ok(Json(outcome))
}

/// POST /{session_id}/revise
#[instrument(skip(state, request))]
async fn revise(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ReviseRequest>,
) -> Result<Json<GenerationOutcome>, ApiError> {
    info!("mystery revision requested");
    let outcome = state
        .service
        .revise_generation(session_id, &request.instruction)
        .await?;
    Ok(Json(outcome))
}

/// GET /{session_id}/estimate
#[instrument(skip(state))]
async fn estimate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<DurationEstimate>, ApiError> {
    Ok(Json(state.service.estimate_duration(session_id).await?))
}

/// GET /{session_id}/validate
#[instrument(skip(state))]
async fn validate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ValidationReport>, ApiError> {
    Ok(Json(state.service.validate_solvability(session_id).await?))
}

/// Returns the router for generation and analysis.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{session_id}/generate", post(generate))
        .route("/{session_id}/revise", post(revise))
        .route("/{session_id}/estimate", get(estimate))
        .route("/{session_id}/validate", get(validate))
}

//! Session lifecycle and roster routes.

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use whodunit_core::model::{Participant, Role, Session, SessionStatus};
use whodunit_core::mystery::PhysicalClue;
use whodunit_session::SessionDetails;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub name: String,
    pub host_pin: String,
}

/// Request body for PATCH /{session_id}. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateSessionRequest {
    pub theme: Option<String>,
    pub venue_description: Option<String>,
    pub available_props: Option<String>,
    pub target_duration: Option<String>,
    pub complexity: Option<String>,
    pub min_solution_paths: Option<i32>,
}

/// Request body for POST /{session_id}/status.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: SessionStatus,
}

/// Request body for POST /{session_id}/participants.
#[derive(Debug, Deserialize)]
pub struct AddParticipantRequest {
    pub name: String,
    pub personality_notes: Option<String>,
    /// Host-assigned PIN; generated when absent.
    pub access_pin: Option<String>,
}

/// POST /
#[instrument(skip(state, request), fields(name = %request.name))]
async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<Json<Session>, ApiError> {
    let session = state
        .service
        .create_session(request.name, request.host_pin)
        .await?;
    Ok(Json(session))
}

/// GET /{session_id}
#[instrument(skip(state))]
async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Session>, ApiError> {
    Ok(Json(state.service.get_session(session_id).await?))
}

/// PATCH /{session_id}
#[instrument(skip(state, request))]
async fn update_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<UpdateSessionRequest>,
) -> Result<Json<Session>, ApiError> {
    let details = SessionDetails {
        theme: request.theme,
        venue_description: request.venue_description,
        available_props: request.available_props,
        target_duration: request.target_duration,
        complexity: request.complexity,
        min_solution_paths: request.min_solution_paths,
    };
    let session = state
        .service
        .update_session_details(session_id, details)
        .await?;
    Ok(Json(session))
}

/// POST /{session_id}/status
#[instrument(skip(state, request), fields(status = request.status.as_str()))]
async fn set_status(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SetStatusRequest>,
) -> Result<Json<Session>, ApiError> {
    let session = state.service.set_status(session_id, request.status).await?;
    Ok(Json(session))
}

/// POST /{session_id}/participants
#[instrument(skip(state, request), fields(name = %request.name))]
async fn add_participant(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AddParticipantRequest>,
) -> Result<Json<Participant>, ApiError> {
    let participant = state
        .service
        .add_participant(
            session_id,
            request.name,
            request.personality_notes,
            request.access_pin,
        )
        .await?;
    info!(participant_id = %participant.id, "participant joined");
    Ok(Json(participant))
}

/// GET /{session_id}/participants
#[instrument(skip(state))]
async fn list_participants(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Vec<Participant>>, ApiError> {
    Ok(Json(state.service.roster(session_id).await?))
}

/// GET /{session_id}/roles
#[instrument(skip(state))]
async fn list_roles(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Vec<Role>>, ApiError> {
    Ok(Json(state.service.list_roles(session_id).await?))
}

/// PUT /{session_id}/roles/{role_id}
#[instrument(skip(state, role))]
async fn update_role(
    State(state): State<AppState>,
    Path((_session_id, role_id)): Path<(Uuid, Uuid)>,
    Json(mut role): Json<Role>,
) -> Result<Json<Role>, ApiError> {
    role.id = role_id;
    state.service.update_role(role.clone()).await?;
    Ok(Json(role))
}

/// PUT /{session_id}/clues/{index}
#[instrument(skip(state, clue))]
async fn update_physical_clue(
    State(state): State<AppState>,
    Path((session_id, index)): Path<(Uuid, usize)>,
    Json(clue): Json<PhysicalClue>,
) -> Result<Json<PhysicalClue>, ApiError> {
    state
        .service
        .update_physical_clue(session_id, index, clue.clone())
        .await?;
    Ok(Json(clue))
}

/// Returns the router for session lifecycle and roster.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_session))
        .route("/{session_id}", get(get_session).patch(update_session))
        .route("/{session_id}/status", post(set_status))
        .route(
            "/{session_id}/participants",
            post(add_participant).get(list_participants),
        )
        .route("/{session_id}/roles", get(list_roles))
        .route("/{session_id}/roles/{role_id}", put(update_role))
        .route("/{session_id}/clues/{index}", put(update_physical_clue))
}

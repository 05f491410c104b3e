//! Unlock code redemption route.

use axum::extract::{Path, State};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use whodunit_unlock::Redemption;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /{session_id}/redeem.
#[derive(Debug, Deserialize)]
pub struct RedeemRequest {
    pub participant_id: Uuid,
    pub code: String,
}

/// POST /{session_id}/redeem
#[instrument(skip(state, request), fields(participant_id = %request.participant_id))]
async fn redeem(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<RedeemRequest>,
) -> Result<Json<Redemption>, ApiError> {
    let redemption = state
        .service
        .redeem_code(session_id, request.participant_id, &request.code)
        .await?;
    Ok(Json(redemption))
}

/// Returns the router for unlock redemption.
pub fn router() -> Router<AppState> {
    Router::new().route("/{session_id}/redeem", post(redeem))
}

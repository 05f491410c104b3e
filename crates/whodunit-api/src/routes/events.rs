//! Narrative event routes: host sends, history reads, websocket stream.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tokio::sync::broadcast;
use tracing::{debug, instrument};
use uuid::Uuid;

use whodunit_core::model::NarrativeEvent;
use whodunit_events::PhaseAnnouncement;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /{session_id}/events.
#[derive(Debug, Deserialize)]
pub struct SendEventRequest {
    pub content: String,
    /// `null` or absent means broadcast; an empty list is rejected.
    pub target_participant_ids: Option<Vec<Uuid>>,
}

/// Request body for POST /{session_id}/events/announce.
#[derive(Debug, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum AnnouncePhaseRequest {
    DinnerService,
    MurderReveal { victim_name: String },
    AccusationCall,
}

/// Query parameters for event reads and the stream.
#[derive(Debug, Deserialize)]
pub struct ViewerQuery {
    /// Absent means the host view (everything).
    pub participant_id: Option<Uuid>,
}

/// POST /{session_id}/events
#[instrument(skip(state, request))]
async fn send_event(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SendEventRequest>,
) -> Result<Json<NarrativeEvent>, ApiError> {
    let event = state
        .service
        .send_event(session_id, request.content, request.target_participant_ids)
        .await?;
    Ok(Json(event))
}

/// POST /{session_id}/events/announce
#[instrument(skip(state, request))]
async fn announce_phase(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AnnouncePhaseRequest>,
) -> Result<Json<NarrativeEvent>, ApiError> {
    let announcement = match request {
        AnnouncePhaseRequest::DinnerService => PhaseAnnouncement::DinnerService,
        AnnouncePhaseRequest::MurderReveal { victim_name } => {
            PhaseAnnouncement::MurderReveal { victim_name }
        }
        AnnouncePhaseRequest::AccusationCall => PhaseAnnouncement::AccusationCall,
    };
    let event = state.service.announce_phase(session_id, announcement).await?;
    Ok(Json(event))
}

/// GET /{session_id}/events
#[instrument(skip(state))]
async fn list_events(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(viewer): Query<ViewerQuery>,
) -> Result<Json<Vec<NarrativeEvent>>, ApiError> {
    let events = state
        .service
        .events_for(session_id, viewer.participant_id)
        .await?;
    Ok(Json(events))
}

/// GET /{session_id}/events/stream
///
/// Websocket upgrade. Each released event for this session that the viewer
/// is a recipient of arrives as one JSON text frame.
#[instrument(skip(state, ws))]
async fn stream_events(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(viewer): Query<ViewerQuery>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, ApiError> {
    // Reject unknown sessions before the upgrade.
    state.service.get_session(session_id).await?;
    let rx = state.channel.subscribe(session_id);
    Ok(ws.on_upgrade(move |socket| stream_socket(socket, rx, viewer.participant_id)))
}

async fn stream_socket(
    mut socket: WebSocket,
    mut rx: broadcast::Receiver<NarrativeEvent>,
    viewer: Option<Uuid>,
) {
    loop {
        tokio::select! {
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Ping(payload))) => {
                        if socket.send(Message::Pong(payload)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None | Some(Err(_)) => {
                        break;
                    }
                    _ => {}
                }
            }
            outgoing = rx.recv() => {
                match outgoing {
                    Ok(event) => {
                        if let Some(participant_id) = viewer {
                            if !event.is_recipient(participant_id) {
                                continue;
                            }
                        }
                        if send_event_frame(&mut socket, &event).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // The client fell behind; tell it to refetch history.
                        debug!(skipped, "stream client lagged");
                        let warning = serde_json::json!({
                            "type": "lagged",
                            "skipped": skipped,
                        });
                        let Ok(payload) = serde_json::to_string(&warning) else {
                            break;
                        };
                        if socket.send(Message::Text(payload.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        break;
                    }
                }
            }
        }
    }
}

async fn send_event_frame(
    socket: &mut WebSocket,
    event: &NarrativeEvent,
) -> Result<(), axum::Error> {
    let payload = serde_json::to_string(event).map_err(axum::Error::new)?;
    socket.send(Message::Text(payload.into())).await
}

/// Returns the router for narrative events.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{session_id}/events", post(send_event).get(list_events))
        .route("/{session_id}/events/announce", post(announce_phase))
        .route("/{session_id}/events/stream", get(stream_events))
}

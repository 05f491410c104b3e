//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use whodunit_api::routes;
use whodunit_api::state::AppState;
use whodunit_content::provider::MysteryProvider;
use whodunit_events::{BroadcastChannel, EventDistributor};
use whodunit_session::{SessionDeps, SessionService};
use whodunit_test_support::{
    CannedProvider, FixedClock, InMemoryEventStore, InMemoryParticipantStore, InMemoryRoleStore,
    InMemorySessionStore, InMemoryUnlockStore, SequenceRng, sample_package,
};
use whodunit_unlock::ClueUnlock;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 19, 0, 0).unwrap(),
    ))
}

/// Build the full app router over in-memory stores and a canned provider
/// that generates for the guests "Ann", "Bob", and "Cleo". Uses the same
/// route structure as `main.rs`.
pub fn build_test_app() -> Router {
    build_test_app_with_provider(Arc::new(CannedProvider::new(sample_package(&[
        "Ann", "Bob", "Cleo",
    ]))))
}

/// Build the full app router with a custom provider, for failure-path tests.
pub fn build_test_app_with_provider(provider: Arc<dyn MysteryProvider>) -> Router {
    let clock = fixed_clock();
    let channel = Arc::new(BroadcastChannel::new());
    let events = Arc::new(InMemoryEventStore::default());
    let unlocks = Arc::new(InMemoryUnlockStore::default());
    let distributor = EventDistributor::new(events, channel.clone(), clock.clone());
    let unlock = ClueUnlock::new(unlocks.clone(), distributor.clone(), clock.clone());

    let service = Arc::new(SessionService::new(SessionDeps {
        sessions: Arc::new(InMemorySessionStore::default()),
        participants: Arc::new(InMemoryParticipantStore::default()),
        roles: Arc::new(InMemoryRoleStore::default()),
        unlocks,
        provider,
        distributor,
        unlock,
        clock,
        rng: Arc::new(Mutex::new(SequenceRng::new(vec![
            1234, 5678, 9012, 3456, 7890, 2345,
        ]))),
    }));

    routes::app_router().with_state(AppState::new(service, channel))
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send_json(app, "POST", uri, body).await
}

/// Send a PATCH request with a JSON body and return the response.
pub async fn patch_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send_json(app, "PATCH", uri, body).await
}

/// Send a PUT request with a JSON body and return the response.
pub async fn put_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send_json(app, "PUT", uri, body).await
}

async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Creates a session and returns its identifier.
pub async fn create_session(app: Router, name: &str) -> uuid::Uuid {
    let (status, json) = post_json(
        app,
        "/api/v1/sessions",
        &serde_json::json!({ "name": name, "host_pin": "9911" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["id"].as_str().unwrap().parse().unwrap()
}

/// Adds a participant and returns its identifier.
pub async fn add_participant(app: Router, session_id: uuid::Uuid, name: &str) -> uuid::Uuid {
    let (status, json) = post_json(
        app,
        &format!("/api/v1/sessions/{session_id}/participants"),
        &serde_json::json!({ "name": name }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["id"].as_str().unwrap().parse().unwrap()
}

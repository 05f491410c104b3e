//! Integration tests for generation, revision, and analysis routes.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use whodunit_test_support::FailingProvider;

#[tokio::test]
async fn test_generate_returns_outcome_and_moves_session_to_reviewing() {
    let app = common::build_test_app();
    let session_id = common::create_session(app.clone(), "Manor Night").await;
    for name in ["Ann", "Bob", "Cleo"] {
        common::add_participant(app.clone(), session_id, name).await;
    }

    let (status, json) = common::post_json(
        app.clone(),
        &format!("/api/v1/sessions/{session_id}/generate"),
        &serde_json::json!({}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["roles_assigned"], 3);
    assert_eq!(json["validation"]["is_valid"], true);
    assert!(json["estimate"]["typical_time"].as_u64().unwrap() > 0);

    let (status, json) =
        common::get_json(app.clone(), &format!("/api/v1/sessions/{session_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "reviewing");
    assert_eq!(json["victim"]["name"], "Colonel Hargrove");
    assert_eq!(json["physical_clues"].as_array().unwrap().len(), 3);

    let (status, json) =
        common::get_json(app, &format!("/api/v1/sessions/{session_id}/roles")).await;
    assert_eq!(status, StatusCode::OK);
    let roles = json.as_array().unwrap();
    assert_eq!(roles.len(), 3);
    let murderers = roles
        .iter()
        .filter(|r| r["is_murderer"].as_bool().unwrap())
        .count();
    assert_eq!(murderers, 1);
}

#[tokio::test]
async fn test_generate_without_participants_is_rejected() {
    let app = common::build_test_app();
    let session_id = common::create_session(app.clone(), "Manor Night").await;

    let (status, json) = common::post_json(
        app,
        &format!("/api/v1/sessions/{session_id}/generate"),
        &serde_json::json!({}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn test_provider_failure_surfaces_as_bad_gateway() {
    let app = common::build_test_app_with_provider(Arc::new(FailingProvider));
    let session_id = common::create_session(app.clone(), "Manor Night").await;
    common::add_participant(app.clone(), session_id, "Ann").await;

    let (status, json) = common::post_json(
        app.clone(),
        &format!("/api/v1/sessions/{session_id}/generate"),
        &serde_json::json!({}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "provider_error");

    // Session state is untouched.
    let (_, json) = common::get_json(app, &format!("/api/v1/sessions/{session_id}")).await;
    assert_eq!(json["status"], "planning");
    assert!(json["victim"].is_null());
}

#[tokio::test]
async fn test_revise_before_any_generation_is_rejected() {
    let app = common::build_test_app();
    let session_id = common::create_session(app.clone(), "Manor Night").await;
    common::add_participant(app.clone(), session_id, "Ann").await;

    let (status, json) = common::post_json(
        app,
        &format!("/api/v1/sessions/{session_id}/revise"),
        &serde_json::json!({ "instruction": "more drama" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn test_revise_after_generation_succeeds() {
    let app = common::build_test_app();
    let session_id = common::create_session(app.clone(), "Manor Night").await;
    for name in ["Ann", "Bob", "Cleo"] {
        common::add_participant(app.clone(), session_id, name).await;
    }
    common::post_json(
        app.clone(),
        &format!("/api/v1/sessions/{session_id}/generate"),
        &serde_json::json!({}),
    )
    .await;

    let (status, json) = common::post_json(
        app,
        &format!("/api/v1/sessions/{session_id}/revise"),
        &serde_json::json!({ "instruction": "make the butler more suspicious" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["roles_assigned"], 3);
}

#[tokio::test]
async fn test_estimate_and_validate_over_stored_state() {
    let app = common::build_test_app();
    let session_id = common::create_session(app.clone(), "Manor Night").await;
    for name in ["Ann", "Bob", "Cleo"] {
        common::add_participant(app.clone(), session_id, name).await;
    }
    common::post_json(
        app.clone(),
        &format!("/api/v1/sessions/{session_id}/generate"),
        &serde_json::json!({}),
    )
    .await;

    let (status, json) =
        common::get_json(app.clone(), &format!("/api/v1/sessions/{session_id}/estimate")).await;
    assert_eq!(status, StatusCode::OK);
    // 3 players, 3 physical, 2 digital, medium:
    // 10 + 6 + 15 + 4 + (15 * 1.2 * 4 / 4) + 10 = 63.
    assert_eq!(json["typical_time"], 63);

    let (status, json) =
        common::get_json(app, &format!("/api/v1/sessions/{session_id}/validate")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["is_valid"], true);
    assert_eq!(json["score"], 100);
}

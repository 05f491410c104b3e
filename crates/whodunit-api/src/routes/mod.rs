//! Route modules organized by concern.

pub mod events;
pub mod generation;
pub mod health;
pub mod sessions;
pub mod unlock;

use axum::Router;

use crate::state::AppState;

/// The full application router, shared between `main` and integration tests.
pub fn app_router() -> Router<AppState> {
    Router::new().merge(health::router()).nest(
        "/api/v1/sessions",
        sessions::router()
            .merge(generation::router())
            .merge(events::router())
            .merge(unlock::router()),
    )
}

//! Shared application state.

use std::sync::Arc;

use whodunit_events::BroadcastChannel;
use whodunit_session::SessionService;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The orchestration service behind every operation.
    pub service: Arc<SessionService>,
    /// Realtime fan-out, subscribed to by the websocket stream route.
    pub channel: Arc<BroadcastChannel>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(service: Arc<SessionService>, channel: Arc<BroadcastChannel>) -> Self {
        Self { service, channel }
    }
}

//! Whodunit API server entry point.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use whodunit_api::error::AppError;
use whodunit_api::routes;
use whodunit_api::state::AppState;
use whodunit_core::clock::SystemClock;
use whodunit_core::rng::{DeterministicRng, ThreadRngSource};
use whodunit_events::{BroadcastChannel, EventDistributor};
use whodunit_openai::OpenAiProvider;
use whodunit_session::{SessionDeps, SessionService};
use whodunit_store::{
    PgEventStore, PgParticipantStore, PgRoleStore, PgSessionStore, PgUnlockStore,
};
use whodunit_unlock::ClueUnlock;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Whodunit API server");

    // Read configuration from environment.
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| AppError::Config("DATABASE_URL environment variable must be set".into()))?;
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;

    // Create database connection pool and apply migrations.
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let provider = OpenAiProvider::try_from_env()
        .map_err(|e| AppError::Config(format!("content provider: {e}")))?;

    // Build the orchestrator and its collaborators.
    let clock = Arc::new(SystemClock);
    let rng: Arc<Mutex<dyn DeterministicRng>> = Arc::new(Mutex::new(ThreadRngSource));
    let channel = Arc::new(BroadcastChannel::new());
    let events = Arc::new(PgEventStore::new(pool.clone()));
    let unlocks = Arc::new(PgUnlockStore::new(pool.clone()));
    let distributor = EventDistributor::new(events, channel.clone(), clock.clone());
    let unlock = ClueUnlock::new(unlocks.clone(), distributor.clone(), clock.clone());

    let service = Arc::new(SessionService::new(SessionDeps {
        sessions: Arc::new(PgSessionStore::new(pool.clone())),
        participants: Arc::new(PgParticipantStore::new(pool.clone())),
        roles: Arc::new(PgRoleStore::new(pool.clone())),
        unlocks,
        provider: Arc::new(provider),
        distributor,
        unlock,
        clock,
        rng,
    }));

    let app_state = AppState::new(service, channel);

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = routes::app_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}

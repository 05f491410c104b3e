//! API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use whodunit_core::error::DomainError;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection, pool, or migration error.
    #[error("database error: {0}")]
    Database(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            DomainError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "session_not_found"),
            DomainError::ParticipantNotFound(_) => {
                (StatusCode::NOT_FOUND, "participant_not_found")
            }
            DomainError::InvalidCode => (StatusCode::NOT_FOUND, "invalid_code"),
            DomainError::EmptyTargetSet => (StatusCode::BAD_REQUEST, "empty_target_set"),
            DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            DomainError::Provider(_) => (StatusCode::BAD_GATEWAY, "provider_error"),
            DomainError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn status_of(err: DomainError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn test_not_found_family_maps_to_404() {
        assert_eq!(
            status_of(DomainError::SessionNotFound(Uuid::new_v4())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(DomainError::ParticipantNotFound(Uuid::new_v4())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status_of(DomainError::InvalidCode), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bad_request_family_maps_to_400() {
        assert_eq!(
            status_of(DomainError::Validation("bad input".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DomainError::EmptyTargetSet),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_provider_failure_maps_to_502() {
        assert_eq!(
            status_of(DomainError::Provider("timeout".into())),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_infrastructure_maps_to_500() {
        assert_eq!(
            status_of(DomainError::Infrastructure("db down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

//! Unified error handling for the server.
//!
//! Every failure leaves the process over HTTP as a JSON envelope:
//! `{"status": "error", "message": ..., "details": ...}` (the diagnostic
//! insert uses `"conflict"` on a duplicate key). Upstream rejections keep
//! the source's status and body verbatim in `details`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::shopify::SourceError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Upstream source operation failed.
    #[error("Upstream source error: {0}")]
    Source(#[from] SourceError),

    /// Authentication failed.
    #[error("Unauthorized: {0}")]
    Auth(#[from] AuthError),

    /// Missing or malformed date bounds on a range query.
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error envelope returned to clients.
#[derive(Debug, Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Database(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Source(_) => StatusCode::BAD_GATEWAY,
            Self::Auth(AuthError::Crypto(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::InvalidRange(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            Self::Database(RepositoryError::Conflict(message)) => ErrorBody {
                status: "conflict",
                message: message.clone(),
                details: None,
            },
            // Don't expose internal error details to clients
            Self::Database(_) | Self::Internal(_) | Self::Auth(AuthError::Crypto(_)) => ErrorBody {
                status: "error",
                message: "Internal server error".to_owned(),
                details: None,
            },
            Self::Source(SourceError::Rejected { status, body }) => ErrorBody {
                status: "error",
                message: "Upstream source rejected the request".to_owned(),
                details: Some(serde_json::json!({
                    "upstreamStatus": status,
                    "upstreamBody": body,
                })),
            },
            other => ErrorBody {
                status: "error",
                message: other.to_string(),
                details: None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(
            self,
            Self::Database(_) | Self::Internal(_) | Self::Source(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        (self.status_code(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("order-123".to_string());
        assert_eq!(err.to_string(), "Not found: order-123");

        let err = AppError::InvalidRange("missing 'from'".to_string());
        assert_eq!(err.to_string(), "Invalid range: missing 'from'");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::InvalidRange("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Auth(AuthError::MissingToken).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Auth(AuthError::InvalidToken).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Database(RepositoryError::Conflict("dup".into())).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Database(RepositoryError::NotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Source(SourceError::Malformed("bad".into())).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_rejected_source_error_preserves_status_and_body() {
        let err = AppError::Source(SourceError::Rejected {
            status: 429,
            body: "{\"errors\":\"throttled\"}".to_owned(),
        });

        let body = err.body();
        assert_eq!(body.status, "error");
        let details = body.details.expect("details must carry upstream response");
        assert_eq!(details["upstreamStatus"], 429);
        assert_eq!(details["upstreamBody"], "{\"errors\":\"throttled\"}");
    }

    #[test]
    fn test_internal_errors_are_not_leaked() {
        let err = AppError::Internal("connection string was postgres://secret".to_owned());
        assert_eq!(err.body().message, "Internal server error");
    }

    #[test]
    fn test_conflict_body_label() {
        let err = AppError::Database(RepositoryError::Conflict("duplicate key".into()));
        let body = err.body();
        assert_eq!(body.status, "conflict");
        assert_eq!(body.message, "duplicate key");
    }
}

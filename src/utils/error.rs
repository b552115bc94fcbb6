//! Unified error handling
//!
//! [`AppError`] is the single error type handlers return; its
//! `IntoResponse` impl maps every failure onto the wire contract
//! `{ "ok": false, "error": … }`, where `error` is either a message or
//! the field-keyed validation detail.
//!
//! # Status mapping
//!
//! | Variant | Status |
//! |---------|--------|
//! | Validation / InvalidPayload / SchemaNotAllowed | 400 |
//! | NotFound | 404 |
//! | Processing / Database / Internal | 500 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;
use validator::ValidationErrors;

use crate::db::repository::RepoError;

/// Application-level Result type used in HTTP handlers.
pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input, single message (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Payload validation failure carrying every violated field (400)
    #[error("Payload validation failed")]
    InvalidPayload(#[from] ValidationErrors),

    /// Requested schema is not on the allow-list (400)
    #[error("Schema no permitido: {0}")]
    SchemaNotAllowed(String),

    /// Resource not found (404)
    #[error("{0}")]
    NotFound(String),

    /// Failure inside the transactional write path, already rolled
    /// back (500)
    #[error("{0}")]
    Processing(String),

    /// Storage-layer failure (500)
    #[error("Database error: {0}")]
    Database(String),

    /// Anything unexpected (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// `{ok:false, error:…}` response body
#[derive(Serialize)]
struct ErrorBody {
    ok: bool,
    error: ErrorDetail,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ErrorDetail {
    Message(String),
    Fields(ValidationErrors),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorDetail::Message(msg)),

            AppError::InvalidPayload(errors) => {
                (StatusCode::BAD_REQUEST, ErrorDetail::Fields(errors))
            }

            AppError::SchemaNotAllowed(name) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::Message(format!("Schema no permitido: {name}")),
            ),

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorDetail::Message(msg)),

            AppError::Processing(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorDetail::Message(msg))
            }

            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorDetail::Message(msg))
            }

            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorDetail::Message("Internal server error".to_string()),
                )
            }
        };

        (status, Json(ErrorBody { ok: false, error: detail })).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            missing @ RepoError::SkusNotFound { .. } => AppError::Processing(missing.to_string()),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn schema_not_allowed(name: impl Into<String>) -> Self {
        Self::SchemaNotAllowed(name.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let response = AppError::validation("bad input").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_schema_not_allowed_maps_to_400() {
        let response = AppError::schema_not_allowed("pg_catalog").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = AppError::not_found("SKU no encontrado").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_repo_errors_map_to_500() {
        let missing = RepoError::SkusNotFound {
            schema: "public".to_string(),
            missing: vec!["ZZZ".to_string()],
        };
        let response = AppError::from(missing).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let db = AppError::from(RepoError::Database("boom".to_string())).into_response();
        assert_eq!(db.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

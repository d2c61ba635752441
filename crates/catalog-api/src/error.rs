//! Catalog API: error types and the JSON error envelope.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog_core::error::{DomainError, FieldViolation};
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Fixture data for the in-memory store was rejected.
    #[error("seed data error: {0}")]
    Seed(#[from] DomainError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub code: &'static str,
    /// Human-readable error message.
    pub message: String,
    /// Field-level failures, omitted when there are none.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldViolation>,
}

/// Message returned for every infrastructure failure.
pub const INTERNAL_MESSAGE: &str = "internal server error";

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(DomainError::validation(format!(
            "invalid path parameter: {}",
            rejection.body_text()
        )))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(DomainError::validation(format!(
            "invalid query string: {}",
            rejection.body_text()
        )))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(DomainError::validation(format!(
            "invalid request body: {}",
            rejection.body_text()
        )))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0 {
            DomainError::Validation { message, details } => {
                tracing::warn!(%message, "request rejected");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorBody {
                        code: "VALIDATION",
                        message,
                        details,
                    },
                )
            }
            err @ DomainError::NotFound { .. } => {
                tracing::warn!(error = %err, "resource not found");
                (
                    StatusCode::NOT_FOUND,
                    ErrorBody {
                        code: "NOT_FOUND",
                        message: err.to_string(),
                        details: Vec::new(),
                    },
                )
            }
            DomainError::Forbidden(reason) => {
                tracing::warn!(%reason, "request forbidden");
                (
                    StatusCode::FORBIDDEN,
                    ErrorBody {
                        code: "FORBIDDEN",
                        message: reason,
                        details: Vec::new(),
                    },
                )
            }
            DomainError::Infrastructure(detail) => {
                tracing::error!(error = %detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL",
                        message: INTERNAL_MESSAGE.to_owned(),
                        details: Vec::new(),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

//! Domain error types.

use serde::Serialize;
use thiserror::Error;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// The offending field, if the failure is tied to one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Why the field was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Top-level domain error type.
///
/// The set of variants is closed so adapters classify errors with a single
/// exhaustive `match`.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed input or a violated invariant.
    #[error("validation error: {message}")]
    Validation {
        /// The specific reason.
        message: String,
        /// Field-level failures; empty unless a caller attached some.
        details: Vec<FieldViolation>,
    },

    /// A referenced aggregate does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Aggregate kind, e.g. `"product"`.
        entity: &'static str,
        /// The identifier that was looked up.
        id: i64,
    },

    /// The caller is known but may not perform the action.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Builds a `Validation` error without field details.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Builds a `Validation` error that names the offending field.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self::Validation {
            message: reason.clone(),
            details: vec![FieldViolation {
                field: Some(field.into()),
                reason: Some(reason),
            }],
        }
    }

    /// Builds a `NotFound` error for the given aggregate kind and id.
    #[must_use]
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    /// Returns `true` for `NotFound`.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

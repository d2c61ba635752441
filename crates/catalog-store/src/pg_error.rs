//! Translation of `sqlx` failures into domain errors.

use catalog_core::error::DomainError;

/// Logs a database failure and converts it into an opaque
/// `DomainError::Infrastructure`. Driver detail stays in the log.
pub(crate) fn storage_error(operation: &'static str, err: &sqlx::Error) -> DomainError {
    tracing::error!(operation, error = %err, "database operation failed");
    DomainError::Infrastructure(format!("{operation} failed"))
}

/// Converts a persisted row that no longer satisfies domain invariants.
pub(crate) fn corrupt_row(entity: &'static str, id: i64, err: &DomainError) -> DomainError {
    tracing::error!(entity, id, error = %err, "stored row violates domain invariants");
    DomainError::Infrastructure(format!("stored {entity} {id} is invalid"))
}

/// Clamps an unsigned page bound into the `BIGINT` range.
pub(crate) fn to_bigint(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

//! Route modules, one per resource.

pub mod comments;
pub mod health;
pub mod products;
pub mod users;

use crate::error::ApiError;
use catalog_core::error::DomainError;

/// Rejects identifiers that cannot name a stored row.
pub(crate) fn positive_id(field: &str, value: i64) -> Result<i64, ApiError> {
    if value <= 0 {
        return Err(DomainError::invalid_field(field, format!("{field} must be a positive integer")).into());
    }
    Ok(value)
}

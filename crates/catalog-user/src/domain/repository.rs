//! Persistence port for user aggregates.

use async_trait::async_trait;
use catalog_core::error::DomainError;

use super::aggregates::User;

/// Repository trait for looking up users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Loads a user by id.
    ///
    /// Returns `DomainError::NotFound` if no user has this id.
    async fn find_by_id(&self, id: i64) -> Result<User, DomainError>;
}

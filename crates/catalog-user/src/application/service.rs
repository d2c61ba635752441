//! User query use cases.

use std::sync::Arc;

use async_trait::async_trait;
use catalog_core::error::DomainError;

use crate::domain::aggregates::User;
use crate::domain::repository::UserRepository;

/// Inbound port for user lookups.
#[async_trait]
pub trait UserQueries: Send + Sync {
    /// Returns the user with the given id.
    async fn fetch_by_id(&self, id: i64) -> Result<User, DomainError>;
}

/// Default implementation of [`UserQueries`].
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    /// Creates a new `UserService`.
    #[must_use]
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UserQueries for UserService {
    #[tracing::instrument(skip(self))]
    async fn fetch_by_id(&self, id: i64) -> Result<User, DomainError> {
        if id <= 0 {
            return Err(DomainError::invalid_field(
                "id",
                "id must be a positive integer",
            ));
        }
        self.repository.find_by_id(id).await
    }
}

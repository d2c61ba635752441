//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use catalog_core::error::DomainError;
use catalog_user::domain::aggregates::User;
use catalog_user::domain::repository::UserRepository;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::pg_error::{corrupt_row, storage_error};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
}

/// Read-only user repository over a `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Creates a new `PgUserRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<User, DomainError> {
        let row: UserRow =
            sqlx::query_as("SELECT id, name, email, created_at FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|err| storage_error("fetch user", &err))?
                .ok_or(DomainError::not_found("user", id))?;

        User::new(row.id, &row.name, &row.email, row.created_at)
            .map_err(|err| corrupt_row("user", row.id, &err))
    }
}

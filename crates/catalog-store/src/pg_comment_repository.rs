//! PostgreSQL-backed `CommentRepository`.

use async_trait::async_trait;
use catalog_comment::domain::aggregates::Comment;
use catalog_comment::domain::repository::CommentRepository;
use catalog_core::error::DomainError;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::pg_error::{corrupt_row, storage_error};

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    product_id: i64,
    user_id: i64,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Result<Comment, DomainError> {
        Comment::restore(
            self.id,
            self.product_id,
            self.user_id,
            &self.content,
            self.created_at,
            self.updated_at,
        )
        .map_err(|err| corrupt_row("comment", self.id, &err))
    }
}

/// A foreign-key violation on insert means the product or user was deleted
/// after the service checked for it.
fn insert_error(comment: &Comment, err: &sqlx::Error) -> DomainError {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            match db_err.constraint() {
                Some("comments_user_id_fkey") => DomainError::not_found("user", comment.user_id()),
                _ => DomainError::not_found("product", comment.product_id()),
            }
        }
        _ => storage_error("insert comment", err),
    }
}

/// Comment repository over a `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Creates a new `PgCommentRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn create_comment(&self, comment: &Comment) -> Result<i64, DomainError> {
        sqlx::query_scalar(
            "INSERT INTO comments (product_id, user_id, content, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(comment.product_id())
        .bind(comment.user_id())
        .bind(comment.content())
        .bind(comment.created_at())
        .bind(comment.updated_at())
        .fetch_one(&self.pool)
        .await
        .map_err(|err| insert_error(comment, &err))
    }

    async fn get_comment_by_id(&self, id: i64) -> Result<Comment, DomainError> {
        let row: Option<CommentRow> = sqlx::query_as(
            "SELECT id, product_id, user_id, content, created_at, updated_at \
             FROM comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| storage_error("fetch comment", &err))?;

        row.ok_or(DomainError::not_found("comment", id))?
            .into_comment()
    }

    async fn list_comments_by_product(&self, product_id: i64) -> Result<Vec<Comment>, DomainError> {
        let rows: Vec<CommentRow> = sqlx::query_as(
            "SELECT id, product_id, user_id, content, created_at, updated_at \
             FROM comments WHERE product_id = $1 \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| storage_error("list comments", &err))?;

        rows.into_iter().map(CommentRow::into_comment).collect()
    }

    async fn update_comment(&self, comment: &Comment) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE comments SET content = $1, updated_at = $2 WHERE id = $3")
            .bind(comment.content())
            .bind(comment.updated_at())
            .bind(comment.id())
            .execute(&self.pool)
            .await
            .map_err(|err| storage_error("update comment", &err))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("comment", comment.id()));
        }
        Ok(())
    }

    async fn delete_comment(&self, id: i64) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| storage_error("delete comment", &err))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("comment", id));
        }
        Ok(())
    }
}

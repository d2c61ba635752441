//! Persistence port for comment aggregates.

use async_trait::async_trait;
use catalog_core::error::DomainError;

use super::aggregates::Comment;

/// Repository trait for storing and querying comments.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Persists a new comment and returns its assigned id.
    async fn create_comment(&self, comment: &Comment) -> Result<i64, DomainError>;

    /// Loads a comment by id.
    ///
    /// Returns `DomainError::NotFound` if no comment has this id.
    async fn get_comment_by_id(&self, id: i64) -> Result<Comment, DomainError>;

    /// Lists a product's comments, newest first (`created_at` descending,
    /// then id descending).
    async fn list_comments_by_product(&self, product_id: i64)
    -> Result<Vec<Comment>, DomainError>;

    /// Overwrites the content and update timestamp of an existing comment.
    ///
    /// Returns `DomainError::NotFound` if no comment has this id.
    async fn update_comment(&self, comment: &Comment) -> Result<(), DomainError>;

    /// Deletes a comment.
    ///
    /// Returns `DomainError::NotFound` if no comment has this id.
    async fn delete_comment(&self, id: i64) -> Result<(), DomainError>;
}

//! Aggregate root for the Comment context.

use catalog_core::clock::Clock;
use catalog_core::error::DomainError;
use chrono::{DateTime, Utc};

/// Maximum comment length, in Unicode scalar values, after trimming.
pub const MAX_COMMENT_LENGTH: usize = 2048;

/// A user-authored note attached to a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    id: i64,
    product_id: i64,
    user_id: i64,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a validated, not-yet-persisted comment (id `0`) stamped with
    /// the clock's current time.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if either reference is not positive
    /// or the trimmed content is empty or too long.
    pub fn new(
        product_id: i64,
        user_id: i64,
        content: &str,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        let now = clock.now();
        Self::restore(0, product_id, user_id, content, now, now)
    }

    /// Rebuilds a comment from persisted state, re-checking invariants.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the stored values break an
    /// invariant.
    pub fn restore(
        id: i64,
        product_id: i64,
        user_id: i64,
        content: &str,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let comment = Self {
            id,
            product_id,
            user_id,
            content: checked_content(content)?,
            created_at,
            updated_at,
        };
        comment.validate()?;
        Ok(comment)
    }

    /// Re-checks every invariant.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` naming the violated invariant.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.product_id <= 0 {
            return Err(DomainError::invalid_field(
                "productId",
                "product id must be positive",
            ));
        }
        if self.user_id <= 0 {
            return Err(DomainError::invalid_field(
                "userId",
                "user id must be positive",
            ));
        }
        checked_content(&self.content).map(|_| ())
    }

    /// Replaces the content and bumps `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the trimmed content is empty or
    /// too long; the comment is left untouched.
    pub fn update_content(&mut self, content: &str, clock: &dyn Clock) -> Result<(), DomainError> {
        self.content = checked_content(content)?;
        self.updated_at = clock.now();
        Ok(())
    }

    /// Returns the comment with its identifier set.
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// The identifier, `0` until persisted.
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The product this comment belongs to.
    #[must_use]
    pub fn product_id(&self) -> i64 {
        self.product_id
    }

    /// The authoring user.
    #[must_use]
    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Trimmed comment body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Creation time (UTC).
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification time (UTC).
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

fn checked_content(content: &str) -> Result<String, DomainError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid_field("content", "content required"));
    }
    if trimmed.chars().count() > MAX_COMMENT_LENGTH {
        return Err(DomainError::invalid_field("content", "content too long"));
    }
    Ok(trimmed.to_owned())
}

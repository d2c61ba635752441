//! Comment use cases.
//!
//! Every write path re-checks that the referenced product and user exist
//! before touching comment state. Edits and deletes are restricted to the
//! comment's author.

use std::sync::Arc;

use async_trait::async_trait;
use catalog_core::clock::Clock;
use catalog_core::error::DomainError;
use catalog_product::domain::repository::ProductRepository;
use catalog_user::domain::repository::UserRepository;

use crate::domain::aggregates::Comment;
use crate::domain::repository::CommentRepository;

/// Inbound port for comment operations.
#[async_trait]
pub trait CommentUseCases: Send + Sync {
    /// Lists a product's comments, newest first.
    async fn list_by_product(&self, product_id: i64) -> Result<Vec<Comment>, DomainError>;

    /// Adds a comment to a product on behalf of a user.
    async fn create(
        &self,
        product_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<Comment, DomainError>;

    /// Replaces the content of a comment owned by `user_id`.
    async fn update(
        &self,
        product_id: i64,
        comment_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<Comment, DomainError>;

    /// Deletes a comment owned by `user_id`.
    async fn delete(&self, product_id: i64, comment_id: i64, user_id: i64)
    -> Result<(), DomainError>;
}

/// Default implementation of [`CommentUseCases`].
#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    products: Arc<dyn ProductRepository>,
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl CommentService {
    /// Creates a new `CommentService`.
    #[must_use]
    pub fn new(
        comments: Arc<dyn CommentRepository>,
        products: Arc<dyn ProductRepository>,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            comments,
            products,
            users,
            clock,
        }
    }

    async fn ensure_product_and_user(
        &self,
        product_id: i64,
        user_id: i64,
    ) -> Result<(), DomainError> {
        self.products.get_by_id(product_id).await?;
        self.users.find_by_id(user_id).await?;
        Ok(())
    }

    /// Loads a comment and checks it belongs to `product_id` and was written
    /// by `user_id`.
    async fn load_owned(
        &self,
        product_id: i64,
        comment_id: i64,
        user_id: i64,
        action: &str,
    ) -> Result<Comment, DomainError> {
        let comment = self.comments.get_comment_by_id(comment_id).await?;
        if comment.product_id() != product_id {
            return Err(DomainError::not_found("comment", comment_id));
        }
        if comment.user_id() != user_id {
            tracing::warn!(
                comment_id,
                user_id,
                author = comment.user_id(),
                "comment ownership mismatch"
            );
            return Err(DomainError::Forbidden(format!(
                "cannot {action} another user's comment"
            )));
        }
        Ok(comment)
    }
}

fn positive(field: &str, label: &str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::invalid_field(
            field,
            format!("{label} must be a positive integer"),
        ));
    }
    Ok(())
}

fn non_blank(content: &str) -> Result<(), DomainError> {
    if content.trim().is_empty() {
        return Err(DomainError::invalid_field("content", "content required"));
    }
    Ok(())
}

#[async_trait]
impl CommentUseCases for CommentService {
    #[tracing::instrument(skip(self))]
    async fn list_by_product(&self, product_id: i64) -> Result<Vec<Comment>, DomainError> {
        positive("productId", "product id", product_id)?;
        self.products.get_by_id(product_id).await?;
        self.comments.list_comments_by_product(product_id).await
    }

    #[tracing::instrument(skip(self, content))]
    async fn create(
        &self,
        product_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<Comment, DomainError> {
        positive("productId", "product id", product_id)?;
        positive("userId", "user id", user_id)?;
        non_blank(content)?;
        self.ensure_product_and_user(product_id, user_id).await?;

        let comment = Comment::new(product_id, user_id, content, self.clock.as_ref())?;
        let id = self.comments.create_comment(&comment).await?;
        tracing::info!(comment_id = id, "comment created");
        Ok(comment.with_id(id))
    }

    #[tracing::instrument(skip(self, content))]
    async fn update(
        &self,
        product_id: i64,
        comment_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<Comment, DomainError> {
        positive("productId", "product id", product_id)?;
        positive("commentId", "comment id", comment_id)?;
        positive("userId", "user id", user_id)?;
        non_blank(content)?;
        self.ensure_product_and_user(product_id, user_id).await?;

        let mut comment = self
            .load_owned(product_id, comment_id, user_id, "modify")
            .await?;
        comment.update_content(content, self.clock.as_ref())?;
        self.comments.update_comment(&comment).await?;
        tracing::info!("comment updated");
        Ok(comment)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(
        &self,
        product_id: i64,
        comment_id: i64,
        user_id: i64,
    ) -> Result<(), DomainError> {
        positive("productId", "product id", product_id)?;
        positive("commentId", "comment id", comment_id)?;
        positive("userId", "user id", user_id)?;
        self.ensure_product_and_user(product_id, user_id).await?;

        self.load_owned(product_id, comment_id, user_id, "delete")
            .await?;
        self.comments.delete_comment(comment_id).await?;
        tracing::info!("comment deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use catalog_core::pagination::{Page, PageRequest};
    use catalog_product::domain::aggregates::Product;
    use catalog_test_support::{FixedClock, SteppingClock};
    use catalog_user::domain::aggregates::User;
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    /// One product (id 1), two users (ids 1 and 2) and a map of comments.
    #[derive(Default)]
    struct StubStore {
        comments: Mutex<BTreeMap<i64, Comment>>,
    }

    #[async_trait]
    impl ProductRepository for StubStore {
        async fn get_by_id(&self, id: i64) -> Result<Product, DomainError> {
            if id == 1 {
                Ok(Product::create("Blue Widget", 1999, ["blue"])?.with_id(1))
            } else {
                Err(DomainError::not_found("product", id))
            }
        }

        async fn search(&self, _: &str, _: PageRequest) -> Result<Page<Product>, DomainError> {
            Ok(Page::new(Vec::new(), 0))
        }

        async fn create(&self, _: &Product) -> Result<i64, DomainError> {
            Err(DomainError::Infrastructure("read-only stub".into()))
        }

        async fn update(&self, _: &Product) -> Result<(), DomainError> {
            Err(DomainError::Infrastructure("read-only stub".into()))
        }

        async fn delete(&self, _: i64) -> Result<(), DomainError> {
            Err(DomainError::Infrastructure("read-only stub".into()))
        }
    }

    #[async_trait]
    impl UserRepository for StubStore {
        async fn find_by_id(&self, id: i64) -> Result<User, DomainError> {
            let created = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
            match id {
                1 => User::new(1, "Alice", "alice@example.com", created),
                2 => User::new(2, "Bob", "bob@example.com", created),
                _ => Err(DomainError::not_found("user", id)),
            }
        }
    }

    #[async_trait]
    impl CommentRepository for StubStore {
        async fn create_comment(&self, comment: &Comment) -> Result<i64, DomainError> {
            let mut map = self.comments.lock().unwrap();
            let id = map.keys().last().copied().unwrap_or(0) + 1;
            map.insert(id, comment.clone().with_id(id));
            Ok(id)
        }

        async fn get_comment_by_id(&self, id: i64) -> Result<Comment, DomainError> {
            self.comments
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or(DomainError::not_found("comment", id))
        }

        async fn list_comments_by_product(
            &self,
            product_id: i64,
        ) -> Result<Vec<Comment>, DomainError> {
            let mut out: Vec<Comment> = self
                .comments
                .lock()
                .unwrap()
                .values()
                .filter(|c| c.product_id() == product_id)
                .cloned()
                .collect();
            out.sort_by(|a, b| {
                b.created_at()
                    .cmp(&a.created_at())
                    .then(b.id().cmp(&a.id()))
            });
            Ok(out)
        }

        async fn update_comment(&self, comment: &Comment) -> Result<(), DomainError> {
            self.comments
                .lock()
                .unwrap()
                .insert(comment.id(), comment.clone());
            Ok(())
        }

        async fn delete_comment(&self, id: i64) -> Result<(), DomainError> {
            self.comments.lock().unwrap().remove(&id);
            Ok(())
        }
    }

    fn service_with_clock(store: &Arc<StubStore>, clock: Arc<dyn Clock>) -> CommentService {
        CommentService::new(store.clone(), store.clone(), store.clone(), clock)
    }

    fn service(store: &Arc<StubStore>) -> CommentService {
        let fixed = FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap());
        service_with_clock(store, Arc::new(fixed))
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_trims_content() {
        // Arrange
        let store = Arc::new(StubStore::default());
        let service = service(&store);

        // Act
        let comment = service.create(1, 1, "  nice  ").await.unwrap();

        // Assert
        assert_eq!(comment.id(), 1);
        assert_eq!(comment.content(), "nice");
        assert_eq!(store.get_comment_by_id(1).await.unwrap(), comment);
    }

    #[tokio::test]
    async fn test_create_requires_existing_product_and_user() {
        let store = Arc::new(StubStore::default());
        let service = service(&store);

        let missing_product = service.create(42, 1, "hi").await.unwrap_err();
        let missing_user = service.create(1, 42, "hi").await.unwrap_err();

        assert!(matches!(missing_product, DomainError::NotFound { entity: "product", id: 42 }));
        assert!(matches!(missing_user, DomainError::NotFound { entity: "user", id: 42 }));
        assert!(store.comments.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_blank_content_and_bad_ids() {
        let store = Arc::new(StubStore::default());
        let service = service(&store);

        for (product_id, user_id, content) in [(1, 1, "   "), (0, 1, "hi"), (1, -2, "hi")] {
            let result = service.create(product_id, user_id, content).await;
            assert!(matches!(result, Err(DomainError::Validation { .. })));
        }
    }

    #[tokio::test]
    async fn test_update_by_other_user_is_forbidden_and_leaves_content() {
        // Arrange
        let store = Arc::new(StubStore::default());
        let service = service(&store);
        let comment = service.create(1, 1, "original").await.unwrap();

        // Act
        let result = service.update(1, comment.id(), 2, "hijacked").await;

        // Assert
        assert!(matches!(result, Err(DomainError::Forbidden(_))));
        let stored = store.get_comment_by_id(comment.id()).await.unwrap();
        assert_eq!(stored.content(), "original");
    }

    #[tokio::test]
    async fn test_delete_by_other_user_is_forbidden() {
        let store = Arc::new(StubStore::default());
        let service = service(&store);
        let comment = service.create(1, 1, "original").await.unwrap();

        let result = service.delete(1, comment.id(), 2).await;

        assert!(matches!(result, Err(DomainError::Forbidden(_))));
        assert!(store.get_comment_by_id(comment.id()).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_by_author_changes_content_and_timestamp() {
        // Arrange
        let store = Arc::new(StubStore::default());
        let start = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let clock = Arc::new(SteppingClock::new(start, Duration::minutes(5)));
        let service = service_with_clock(&store, clock);
        let comment = service.create(1, 1, "first").await.unwrap();

        // Act
        let updated = service.update(1, comment.id(), 1, "second").await.unwrap();

        // Assert
        assert_eq!(updated.content(), "second");
        assert_eq!(updated.created_at(), start);
        assert_eq!(updated.updated_at(), start + Duration::minutes(5));
    }

    #[tokio::test]
    async fn test_update_comment_of_other_product_is_not_found() {
        let store = Arc::new(StubStore::default());
        let service = service(&store);
        let comment = service.create(1, 1, "first").await.unwrap();
        // Reattach the stored comment to a product the stub does not know.
        store.comments.lock().unwrap().insert(
            comment.id(),
            Comment::restore(
                comment.id(),
                7,
                1,
                "first",
                comment.created_at(),
                comment.updated_at(),
            )
            .unwrap(),
        );

        let result = service.update(1, comment.id(), 1, "second").await;

        assert!(matches!(result, Err(DomainError::NotFound { entity: "comment", .. })));
    }

    #[tokio::test]
    async fn test_delete_missing_comment_is_not_found() {
        let store = Arc::new(StubStore::default());
        let service = service(&store);

        let result = service.delete(1, 99, 1).await;

        assert!(matches!(result, Err(DomainError::NotFound { entity: "comment", id: 99 })));
    }

    #[tokio::test]
    async fn test_list_by_product_is_newest_first() {
        // Arrange
        let store = Arc::new(StubStore::default());
        let start = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let clock = Arc::new(SteppingClock::new(start, Duration::seconds(1)));
        let service = service_with_clock(&store, clock);
        for text in ["one", "two", "three"] {
            service.create(1, 1, text).await.unwrap();
        }

        // Act
        let comments = service.list_by_product(1).await.unwrap();

        // Assert
        let contents: Vec<&str> = comments.iter().map(Comment::content).collect();
        assert_eq!(contents, ["three", "two", "one"]);
    }

    #[tokio::test]
    async fn test_list_by_unknown_product_is_not_found() {
        let store = Arc::new(StubStore::default());

        let result = service(&store).list_by_product(5).await;

        assert!(matches!(result, Err(DomainError::NotFound { entity: "product", id: 5 })));
    }
}

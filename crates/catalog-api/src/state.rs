//! Shared application state.

use std::sync::Arc;

use catalog_comment::application::service::{CommentService, CommentUseCases};
use catalog_core::clock::Clock;
use catalog_product::application::service::{ProductService, ProductUseCases};
use catalog_store::memory::InMemoryStore;
use catalog_store::pg_comment_repository::PgCommentRepository;
use catalog_store::pg_product_repository::PgProductRepository;
use catalog_store::pg_user_repository::PgUserRepository;
use catalog_user::application::service::{UserQueries, UserService};
use sqlx::PgPool;

/// Application state shared across all request handlers.
///
/// Handlers only see the inbound ports, never a concrete backend.
#[derive(Clone)]
pub struct AppState {
    /// Product use cases.
    pub products: Arc<dyn ProductUseCases>,
    /// User lookups.
    pub users: Arc<dyn UserQueries>,
    /// Comment use cases.
    pub comments: Arc<dyn CommentUseCases>,
}

impl AppState {
    /// Create new application state from already-wired services.
    #[must_use]
    pub fn new(
        products: Arc<dyn ProductUseCases>,
        users: Arc<dyn UserQueries>,
        comments: Arc<dyn CommentUseCases>,
    ) -> Self {
        Self {
            products,
            users,
            comments,
        }
    }

    /// Wires every service to one in-memory store.
    #[must_use]
    pub fn in_memory(store: Arc<InMemoryStore>, clock: Arc<dyn Clock>) -> Self {
        Self::new(
            Arc::new(ProductService::new(store.clone())),
            Arc::new(UserService::new(store.clone())),
            Arc::new(CommentService::new(store.clone(), store.clone(), store, clock)),
        )
    }

    /// Wires every service to PostgreSQL repositories sharing `pool`.
    #[must_use]
    pub fn postgres(pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        let products = Arc::new(PgProductRepository::new(pool.clone()));
        let users = Arc::new(PgUserRepository::new(pool.clone()));
        let comments = Arc::new(PgCommentRepository::new(pool));
        Self::new(
            Arc::new(ProductService::new(products.clone())),
            Arc::new(UserService::new(users.clone())),
            Arc::new(CommentService::new(comments, products, users, clock)),
        )
    }
}

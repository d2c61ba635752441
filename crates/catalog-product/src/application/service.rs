//! Product use cases.
//!
//! `ProductService` is a stateless orchestrator: it validates aggregates
//! and delegates every read and write to the injected repository.

use std::sync::Arc;

use async_trait::async_trait;
use catalog_core::error::DomainError;
use catalog_core::pagination::{Page, PageRequest};

use crate::domain::aggregates::Product;
use crate::domain::repository::ProductRepository;

/// Inbound port for product operations.
#[async_trait]
pub trait ProductUseCases: Send + Sync {
    /// Returns the product with the given id.
    async fn fetch_by_id(&self, id: i64) -> Result<Product, DomainError>;

    /// Returns one page of products whose name contains `query`.
    async fn search(&self, query: &str, page: PageRequest) -> Result<Page<Product>, DomainError>;

    /// Deletes the product with the given id.
    async fn remove(&self, id: i64) -> Result<(), DomainError>;

    /// Validates and persists a new product, returning its id.
    async fn create(&self, product: Product) -> Result<i64, DomainError>;

    /// Validates and overwrites an existing product, returning the
    /// committed state.
    async fn update(&self, product: Product) -> Result<Product, DomainError>;
}

/// Default implementation of [`ProductUseCases`].
#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    /// Creates a new `ProductService`.
    #[must_use]
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ProductUseCases for ProductService {
    #[tracing::instrument(skip(self))]
    async fn fetch_by_id(&self, id: i64) -> Result<Product, DomainError> {
        self.repository.get_by_id(id).await
    }

    #[tracing::instrument(skip(self))]
    async fn search(&self, query: &str, page: PageRequest) -> Result<Page<Product>, DomainError> {
        self.repository.search(query, page).await
    }

    #[tracing::instrument(skip(self))]
    async fn remove(&self, id: i64) -> Result<(), DomainError> {
        self.repository.delete(id).await?;
        tracing::info!(product_id = id, "product removed");
        Ok(())
    }

    #[tracing::instrument(skip(self, product), fields(name = product.name()))]
    async fn create(&self, product: Product) -> Result<i64, DomainError> {
        product.validate()?;
        let id = self.repository.create(&product).await?;
        tracing::info!(product_id = id, "product created");
        Ok(id)
    }

    #[tracing::instrument(skip(self, product), fields(product_id = product.id()))]
    async fn update(&self, product: Product) -> Result<Product, DomainError> {
        if product.id() <= 0 {
            return Err(DomainError::invalid_field(
                "id",
                "id must be a positive integer",
            ));
        }
        product.validate()?;
        self.repository.update(&product).await?;
        tracing::info!("product updated");
        self.repository.get_by_id(product.id()).await
    }
}

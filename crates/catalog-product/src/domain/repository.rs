//! Persistence port for product aggregates.

use async_trait::async_trait;
use catalog_core::error::DomainError;
use catalog_core::pagination::{Page, PageRequest};

use super::aggregates::Product;

/// Repository trait for storing and querying products.
///
/// Implementations must order search results by identifier ascending and
/// report the unpaginated match count in [`Page::total`].
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Loads a product by id.
    ///
    /// Returns `DomainError::NotFound` if no product has this id.
    async fn get_by_id(&self, id: i64) -> Result<Product, DomainError>;

    /// Case-insensitive substring search over product names.
    ///
    /// The query is trimmed and lower-cased by the implementation; an empty
    /// query matches every product. A page past the last match yields no
    /// items but still reports the full total.
    async fn search(&self, query: &str, page: PageRequest) -> Result<Page<Product>, DomainError>;

    /// Persists a new product and returns its assigned id.
    async fn create(&self, product: &Product) -> Result<i64, DomainError>;

    /// Overwrites an existing product.
    ///
    /// Returns `DomainError::NotFound` if no product has this id.
    async fn update(&self, product: &Product) -> Result<(), DomainError>;

    /// Deletes a product.
    ///
    /// Returns `DomainError::NotFound` if no product has this id.
    async fn delete(&self, id: i64) -> Result<(), DomainError>;
}

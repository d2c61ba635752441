//! PostgreSQL-backed `ProductRepository`.

use async_trait::async_trait;
use catalog_core::error::DomainError;
use catalog_core::pagination::{Page, PageRequest};
use catalog_product::domain::aggregates::Product;
use catalog_product::domain::repository::ProductRepository;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::pg_error::{corrupt_row, storage_error, to_bigint};

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: i64,
    tags: Vec<String>,
}

impl ProductRow {
    fn into_product(self) -> Result<Product, DomainError> {
        Product::create(&self.name, self.price, self.tags)
            .map(|product| product.with_id(self.id))
            .map_err(|err| corrupt_row("product", self.id, &err))
    }
}

/// Escapes `LIKE` metacharacters so the needle matches literally.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn push_name_filter(builder: &mut QueryBuilder<'_, Postgres>, needle: &str) {
    if !needle.is_empty() {
        builder
            .push(" WHERE name ILIKE ")
            .push_bind(like_pattern(needle))
            .push(" ESCAPE '\\'");
    }
}

/// Product repository over a `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    /// Creates a new `PgProductRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn get_by_id(&self, id: i64) -> Result<Product, DomainError> {
        let row: Option<ProductRow> =
            sqlx::query_as("SELECT id, name, price, tags FROM products WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|err| storage_error("fetch product", &err))?;

        row.ok_or(DomainError::not_found("product", id))?
            .into_product()
    }

    // The page and the count are two statements; a concurrent write can
    // make `total` disagree with the items by the rows it touched.
    async fn search(&self, query: &str, page: PageRequest) -> Result<Page<Product>, DomainError> {
        let needle = query.trim().to_lowercase();

        let mut select = QueryBuilder::<Postgres>::new("SELECT id, name, price, tags FROM products");
        push_name_filter(&mut select, &needle);
        select
            .push(" ORDER BY id LIMIT ")
            .push_bind(to_bigint(page.page_size()))
            .push(" OFFSET ")
            .push_bind(to_bigint(page.offset()));
        let rows: Vec<ProductRow> = select
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|err| storage_error("search products", &err))?;

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
        push_name_filter(&mut count, &needle);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|err| storage_error("count products", &err))?;

        let items = rows
            .into_iter()
            .map(ProductRow::into_product)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, u64::try_from(total).unwrap_or(0)))
    }

    async fn create(&self, product: &Product) -> Result<i64, DomainError> {
        sqlx::query_scalar("INSERT INTO products (name, price, tags) VALUES ($1, $2, $3) RETURNING id")
            .bind(product.name())
            .bind(product.price())
            .bind(product.tags())
            .fetch_one(&self.pool)
            .await
            .map_err(|err| storage_error("insert product", &err))
    }

    async fn update(&self, product: &Product) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE products SET name = $1, price = $2, tags = $3 WHERE id = $4")
            .bind(product.name())
            .bind(product.price())
            .bind(product.tags())
            .bind(product.id())
            .execute(&self.pool)
            .await
            .map_err(|err| storage_error("update product", &err))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("product", product.id()));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| storage_error("delete product", &err))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("product", id));
        }
        Ok(())
    }
}

//! Routes for products: lookup, search, create, update and delete.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use catalog_core::error::DomainError;
use catalog_core::money::{amount_to_minor_units, minor_units_to_amount};
use catalog_core::pagination::PageRequest;
use catalog_product::domain::aggregates::Product;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::routes::positive_id;
use crate::state::AppState;

/// Shortest non-empty search query accepted, in characters.
pub const MIN_QUERY_LENGTH: usize = 3;

/// Product as rendered on the wire; `price` is in major units.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    /// Identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Price in major units, e.g. `19.99`.
    pub price: f64,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id(),
            name: product.name().to_owned(),
            price: minor_units_to_amount(product.price()),
        }
    }
}

/// One page of search results.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    /// Products on this page.
    pub items: Vec<ProductResponse>,
    /// Normalized page number.
    pub page: u64,
    /// Normalized page size.
    pub page_size: u64,
    /// Matches across all pages.
    pub total: u64,
}

/// Query string for GET /products/search.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Case-insensitive name fragment.
    pub q: Option<String>,
    /// 1-based page number.
    pub page: Option<i64>,
    /// Items per page.
    pub page_size: Option<i64>,
}

/// Request body for POST /products and PUT /products/{id}.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    /// Display name.
    pub name: String,
    /// Price in major units.
    pub price: f64,
    /// Optional tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ProductRequest {
    fn into_product(self) -> Result<Product, DomainError> {
        let price = amount_to_minor_units(self.price)?;
        Product::create(&self.name, price, self.tags)
    }
}

fn check_query(q: &str) -> Result<(), ApiError> {
    let length = q.trim().chars().count();
    if length > 0 && length < MIN_QUERY_LENGTH {
        return Err(DomainError::invalid_field(
            "q",
            format!("q must be at least {MIN_QUERY_LENGTH} characters"),
        )
        .into());
    }
    Ok(())
}

/// GET /products/{id}
#[instrument(skip(state, path))]
async fn get_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ProductResponse>, ApiError> {
    let Path(id) = path?;
    let product = state.products.fetch_by_id(positive_id("id", id)?).await?;
    Ok(Json(ProductResponse::from(&product)))
}

/// GET /products/search
#[instrument(skip(state, params))]
async fn search_products(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<ProductListResponse>, ApiError> {
    let Query(params) = params?;
    let q = params.q.unwrap_or_default();
    check_query(&q)?;

    let request = PageRequest::from_parts(params.page, params.page_size);
    let page = state.products.search(&q, request).await?;

    Ok(Json(ProductListResponse {
        items: page.items.iter().map(ProductResponse::from).collect(),
        page: request.page(),
        page_size: request.page_size(),
        total: page.total,
    }))
}

/// POST /products
#[instrument(skip(state, body))]
async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let Json(request) = body?;
    let product = request.into_product()?;

    let id = state.products.create(product).await?;
    let created = state.products.fetch_by_id(id).await?;
    info!(product_id = id, "product created via API");

    Ok((StatusCode::CREATED, Json(ProductResponse::from(&created))))
}

/// PUT /products/{id}
#[instrument(skip(state, path, body))]
async fn update_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<Json<ProductResponse>, ApiError> {
    let Path(id) = path?;
    let id = positive_id("id", id)?;
    let Json(request) = body?;
    let product = request.into_product()?.with_id(id);

    let updated = state.products.update(product).await?;
    Ok(Json(ProductResponse::from(&updated)))
}

/// DELETE /products/{id}
#[instrument(skip(state, path))]
async fn delete_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    state.products.remove(positive_id("id", id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Returns the product router, mounted under `/products`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_product))
        .route("/search", get(search_products))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

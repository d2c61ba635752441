//! Routes for comments nested under a product.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::put};
use catalog_comment::domain::aggregates::Comment;
use catalog_core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::routes::positive_id;
use crate::state::AppState;

/// Comment as rendered on the wire.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    /// Identifier.
    pub id: i64,
    /// Owning product.
    pub product_id: i64,
    /// Author.
    pub user_id: i64,
    /// Trimmed body.
    pub content: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last edit time.
    pub updated_at: DateTime<Utc>,
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id(),
            product_id: comment.product_id(),
            user_id: comment.user_id(),
            content: comment.content().to_owned(),
            created_at: comment.created_at(),
            updated_at: comment.updated_at(),
        }
    }
}

/// A product's comments, newest first.
#[derive(Debug, Serialize)]
pub struct CommentListResponse {
    /// The comments.
    pub items: Vec<CommentResponse>,
}

/// Request body for creating or editing a comment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    /// Acting user.
    pub user_id: i64,
    /// New body.
    pub content: String,
}

/// `?userId=` on edit and delete.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActingUser {
    /// Acting user.
    pub user_id: Option<i64>,
}

/// GET /products/{id}/comments
#[instrument(skip(state, path))]
async fn list_comments(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<CommentListResponse>, ApiError> {
    let Path(product_id) = path?;
    let comments = state
        .comments
        .list_by_product(positive_id("id", product_id)?)
        .await?;

    Ok(Json(CommentListResponse {
        items: comments.iter().map(CommentResponse::from).collect(),
    }))
}

/// POST /products/{id}/comments
#[instrument(skip(state, path, body))]
async fn create_comment(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<CommentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let Path(product_id) = path?;
    let product_id = positive_id("id", product_id)?;
    let Json(request) = body?;

    let comment = state
        .comments
        .create(product_id, request.user_id, &request.content)
        .await?;
    info!(comment_id = comment.id(), product_id, "comment created via API");

    Ok((StatusCode::CREATED, Json(CommentResponse::from(&comment))))
}

/// PUT /products/{id}/comments/{commentId}
#[instrument(skip(state, path, query, body))]
async fn update_comment(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
    query: Result<Query<ActingUser>, QueryRejection>,
    body: Result<Json<CommentRequest>, JsonRejection>,
) -> Result<Json<CommentResponse>, ApiError> {
    let Path((product_id, comment_id)) = path?;
    let product_id = positive_id("id", product_id)?;
    let comment_id = positive_id("commentId", comment_id)?;
    let Query(acting) = query?;
    let Json(request) = body?;

    if acting.user_id.is_some_and(|user_id| user_id != request.user_id) {
        return Err(DomainError::invalid_field("userId", "user id mismatch").into());
    }

    let comment = state
        .comments
        .update(product_id, comment_id, request.user_id, &request.content)
        .await?;
    Ok(Json(CommentResponse::from(&comment)))
}

/// DELETE /products/{id}/comments/{commentId}
#[instrument(skip(state, path, query))]
async fn delete_comment(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
    query: Result<Query<ActingUser>, QueryRejection>,
) -> Result<StatusCode, ApiError> {
    let Path((product_id, comment_id)) = path?;
    let product_id = positive_id("id", product_id)?;
    let comment_id = positive_id("commentId", comment_id)?;
    let Query(acting) = query?;
    let user_id = acting
        .user_id
        .ok_or_else(|| DomainError::invalid_field("userId", "userId query parameter required"))?;

    state
        .comments
        .delete(product_id, comment_id, user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Returns the comment router, merged into the `/products` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/comments", get(list_comments).post(create_comment))
        .route(
            "/{id}/comments/{comment_id}",
            put(update_comment).delete(delete_comment),
        )
}

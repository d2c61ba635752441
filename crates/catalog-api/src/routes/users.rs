//! Read-only user lookup.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use catalog_user::domain::aggregates::User;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

use crate::error::ApiError;
use crate::routes::positive_id;
use crate::state::AppState;

/// User as rendered on the wire.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Account creation time, RFC 3339.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_owned(),
            email: user.email().to_owned(),
            created_at: user.created_at(),
        }
    }
}

/// GET /users/{id}
#[instrument(skip(state, path))]
async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Path(id) = path?;
    let user = state.users.fetch_by_id(positive_id("id", id)?).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// Returns the user router, mounted under `/users`.
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(get_user))
}

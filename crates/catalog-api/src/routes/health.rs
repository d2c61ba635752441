//! Liveness endpoint.

use axum::{Router, routing::get};

use crate::state::AppState;

/// GET /healthz
async fn healthz() -> &'static str {
    "ok"
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/healthz", get(healthz))
}

//! Catalog API: HTTP adapter over the catalog use cases.
//!
//! [`router`] assembles every route against an [`state::AppState`]; the
//! binary in `main.rs` adds the cross-cutting layers and serves it.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Builds the application router with all routes bound to `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest(
            "/products",
            routes::products::router().merge(routes::comments::router()),
        )
        .nest("/users", routes::users::router())
        .with_state(state)
}

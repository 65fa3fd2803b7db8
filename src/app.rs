//! Router assembly: mounts the pizza resource under its fixed prefix.

use crate::routes::{common_routes, pizza_routes};
use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

/// Oversized bodies are rejected with 413 before reaching a handler.
const BODY_LIMIT_BYTES: usize = 1024 * 1024;

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api/v1/pizza", pizza_routes(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
}

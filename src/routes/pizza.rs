//! Pizza resource routes under the fixed prefix chosen by app assembly.

use crate::handlers::pizza::{create, delete as delete_handler, get_one, list, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn pizza_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).patch(update).delete(delete_handler))
        .with_state(state)
}

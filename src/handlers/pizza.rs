//! Pizza CRUD handlers: create, list, get-one, update, delete.

use crate::error::{AppError, NOT_EXISTS_MSG, NO_PIZZAS_MSG};
use crate::response;
use crate::schema;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

/// The id segment is parsed by hand so that an unparseable segment maps to
/// the same 404 envelope as a missing row.
fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::NotFound(NOT_EXISTS_MSG.into()))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let draft = schema::load(&body)?;
    let pizza = state.store.create(&draft).await?;
    tracing::info!(id = pizza.id, "pizza created");
    Ok(response::created("Pizza created", pizza.id))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let pizzas = state.store.list_all().await?;
    if pizzas.is_empty() {
        return Err(AppError::NotFound(NO_PIZZAS_MSG.into()));
    }
    Ok(Json(schema::dump_many(pizzas)))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let pizza = state
        .store
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_EXISTS_MSG.into()))?;
    Ok(Json(schema::dump(pizza)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let patch = schema::load_partial(&body)?;
    let id = parse_id(&id_str)?;
    let pizza = state
        .store
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_EXISTS_MSG.into()))?;
    let updated = state.store.update(&pizza, &patch).await?;
    tracing::info!(id = updated.id, "pizza updated");
    Ok(response::ok("Pizza updated", updated.id))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let pizza = state
        .store
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_EXISTS_MSG.into()))?;
    state.store.delete(&pizza).await?;
    tracing::info!(id = pizza.id, "pizza deleted");
    Ok(response::ok("Pizza deleted", pizza.id))
}

//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Fixed success envelope for mutations: a message plus the affected id.
#[derive(Serialize)]
pub struct MessageBody {
    pub message: &'static str,
    pub id: i64,
}

pub fn created(message: &'static str, id: i64) -> (StatusCode, Json<MessageBody>) {
    (StatusCode::CREATED, Json(MessageBody { message, id }))
}

pub fn ok(message: &'static str, id: i64) -> (StatusCode, Json<MessageBody>) {
    (StatusCode::OK, Json(MessageBody { message, id }))
}

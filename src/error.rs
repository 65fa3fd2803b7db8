//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

pub const ALREADY_EXISTS_MSG: &str = "Pizza with this name already exists";
pub const NOT_EXISTS_MSG: &str = "Pizza with this id does not exists";
pub const BLANK_FIELD_MSG: &str = "Name and/or price can't be blank";
pub const NO_PIZZAS_MSG: &str = "No pizzas were found";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown profile '{given}'; possible profiles: {known}")]
    UnknownProfile { given: String, known: &'static str },
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid listen address: {0}")]
    InvalidListenAddr(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

/// Fixed error envelope: a single `error` key, always.
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Db(e) => {
                tracing::error!(error = %e, "database failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "database error".into())
            }
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

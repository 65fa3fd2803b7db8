//! Common routes: index, health, readiness, version.

use crate::config::Profile;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct Endpoint {
    path: &'static str,
    methods: &'static [&'static str],
}

/// Mirrors what app assembly mounts under /api.
const API_ENDPOINTS: &[Endpoint] = &[
    Endpoint {
        path: "/api/v1/pizza/",
        methods: &["GET", "POST"],
    },
    Endpoint {
        path: "/api/v1/pizza/{id}",
        methods: &["GET", "PATCH", "DELETE"],
    },
];

#[derive(Serialize)]
struct IndexBody {
    title: &'static str,
    endpoints: &'static [Endpoint],
    #[serde(skip_serializing_if = "Option::is_none")]
    environment: Option<&'static str>,
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

async fn index(State(state): State<AppState>) -> Json<IndexBody> {
    let environment = (state.profile != Profile::Production).then(|| state.profile.as_str());
    Json(IndexBody {
        title: "Welcome page",
        endpoints: API_ENDPOINTS,
        environment,
    })
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn ready(
    State(state): State<AppState>,
) -> Result<Json<ReadyBody>, (axum::http::StatusCode, Json<ReadyBody>)> {
    if sqlx::query("SELECT 1")
        .fetch_optional(state.store.pool())
        .await
        .is_err()
    {
        return Err((
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded",
                database: Some("unavailable"),
            }),
        ));
    }
    Ok(Json(ReadyBody {
        status: "ok",
        database: Some("ok"),
    }))
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Index plus health/readiness/version. Requires AppState.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}

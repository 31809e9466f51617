use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use where2tattoo_core::availability::taken::FailMode;

use crate::ApiState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    availability_fail_mode: &'static str,
}

#[derive(Serialize)]
struct VersionResponse {
    name: &'static str,
    version: &'static str,
}

async fn health_check(State(state): State<Arc<ApiState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        availability_fail_mode: match state.fail_mode {
            FailMode::Open => "open",
            FailMode::Closed => "closed",
        },
    })
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
}

//! Health check handler

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::super::state::AppState;

/// Health check response data
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    #[schema(example = "UP")]
    pub status: &'static str,
    /// Store backend in use
    #[schema(example = "memory")]
    pub store: &'static str,
    #[schema(example = "0.1.0")]
    pub version: &'static str,
    /// Short git hash of the build
    pub build: &'static str,
    pub uptime_secs: u64,
    pub timestamp: DateTime<Utc>,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse)
    ),
    tag = "System"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP",
        store: state.store_backend,
        version: env!("CARGO_PKG_VERSION"),
        build: env!("BUILD_GIT_HASH"),
        uptime_secs: state.uptime_secs(),
        timestamp: Utc::now(),
    })
}

//! HTTP Gateway
//!
//! `axum` router over [`AppState`]. All benefit routes live under
//! `/api/benefits`; errors share the `{status, message, timestamp}` body.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, patch, post},
};
use tokio::net::TcpListener;
use tracing::info;

// OpenAPI / Swagger UI
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Build the complete router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health_check))
        // Benefit routes (static segments win over `{id}`)
        .route(
            "/api/benefits",
            get(handlers::list_benefits).post(handlers::create_benefit),
        )
        .route("/api/benefits/active", get(handlers::list_active_benefits))
        .route("/api/benefits/search", get(handlers::search_benefits))
        .route("/api/benefits/transfer", post(handlers::create_transfer))
        .route(
            "/api/benefits/{id}",
            get(handlers::get_benefit)
                .put(handlers::update_benefit)
                .delete(handlers::delete_benefit),
        )
        .route(
            "/api/benefits/{id}/deactivate",
            patch(handlers::deactivate_benefit),
        )
        .with_state(state)
        // Stateless, added after with_state
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

/// Start HTTP Gateway server
pub async fn run_server(host: &str, port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let store = state.store_backend;
    let app = router(state);

    // Bind address
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await.with_context(|| {
        format!(
            "Failed to bind to {} (port {} may already be in use, check with: lsof -i :{})",
            addr, port, port
        )
    })?;

    info!(%addr, store, "Gateway listening");
    info!("API Docs: http://{}/docs", addr);
    info!("Benefits API: http://{}/api/benefits", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

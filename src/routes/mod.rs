use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::{Config, Theme},
    error::{AppError, AppResult},
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::SeriesCatalog,
};

pub mod recommendations;
pub mod series;

/// Shared application state
pub struct AppState {
    pub catalog: Arc<dyn SeriesCatalog>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn SeriesCatalog>, config: Config) -> Self {
        Self {
            catalog,
            config: Arc::new(config),
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/series/search", get(series::search))
        .route(
            "/series/:address/recommendations",
            get(recommendations::recommend),
        )
        .route("/theme", get(theme))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Colours for the presentation layer
async fn theme(State(state): State<Arc<AppState>>) -> Json<Theme> {
    Json(state.config.theme())
}

/// Runs index work on the blocking pool under the configured deadline
///
/// On timeout the response is sent immediately; the blocking task is left
/// to finish on its own.
pub(crate) async fn run_blocking<T, F>(config: &Config, work: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::time::timeout(config.query_timeout(), tokio::task::spawn_blocking(work)).await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => Err(AppError::Internal(e.to_string())),
        Err(_) => {
            tracing::warn!(
                timeout_ms = config.query_timeout_ms,
                "Index request exceeded deadline"
            );
            Err(AppError::Timeout(config.query_timeout_ms))
        }
    }
}

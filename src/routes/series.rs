use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::SearchResponse,
    routes::{run_blocking, AppState},
    services::title_search,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

/// Handler for series title search
pub async fn search(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<SearchResponse>> {
    tracing::info!(request_id = %request_id, query = %params.q, "Processing title search");

    let catalog = state.catalog.clone();
    let config = state.config.clone();
    let results = run_blocking(&state.config, move || {
        title_search::search_series(
            catalog.as_ref(),
            &params.q,
            config.search_limit,
            &config.poster_base_url,
        )
    })
    .await?;

    Ok(Json(SearchResponse { results }))
}

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{RecommendationsResponse, SeriesAddress},
    routes::{run_blocking, AppState},
    services::recommendations,
};

/// Handler for the recommendations of one selected series
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(address): Path<String>,
) -> AppResult<Json<RecommendationsResponse>> {
    let seed: SeriesAddress = address.parse().map_err(AppError::InvalidInput)?;

    tracing::info!(
        request_id = %request_id,
        seed = %seed,
        "Processing recommendation request"
    );

    let catalog = state.catalog.clone();
    let config = state.config.clone();
    let response = run_blocking(&state.config, move || {
        let mut rng = rand::thread_rng();
        recommendations::recommend(catalog.as_ref(), &config, seed, &mut rng)
    })
    .await?;

    tracing::info!(
        request_id = %request_id,
        views = response.views.len(),
        "Recommendations completed"
    );

    Ok(Json(response))
}

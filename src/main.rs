use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use series_recs::{
    config::Config,
    index::SeriesIndex,
    routes::{create_router, AppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // Without the index there is nothing to serve
    let index = SeriesIndex::open(&config.index_path)
        .with_context(|| format!("Failed to open series index at {}", config.index_path))?;

    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState::new(Arc::new(index), config));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}

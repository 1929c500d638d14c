use std::sync::Arc;

use server::config;
use server::progress::ProgressBook;
use server::store::OpeningStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env();

    tracing::info!("Loading openings from {}...", config.openings_file.display());
    let store = Arc::new(OpeningStore::load(&config.openings_file)?);
    if store.is_empty() {
        tracing::warn!("No openings loaded - random practice will return 404");
    }

    let progress = ProgressBook::load(&config.progress_file)?.shared();

    let cors = server::cors_layer(config.cors_origin.as_deref());
    let app = server::build_router(store, progress, cors);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub mod config;
pub mod error;
pub mod progress;
pub mod routes;
pub mod store;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::progress::SharedProgress;
use crate::store::OpeningStore;

/// CORS for the browser front-end: a single origin when configured,
/// otherwise any.
pub fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin.map(HeaderValue::from_str) {
        Some(Ok(value)) => cors.allow_origin(value),
        Some(Err(e)) => {
            tracing::warn!("Ignoring invalid CORS_ORIGIN: {e}");
            cors.allow_origin(Any)
        }
        None => cors.allow_origin(Any),
    }
}

pub fn build_router(store: Arc<OpeningStore>, progress: SharedProgress, cors: CorsLayer) -> Router {
    Router::new()
        // Health
        .route("/health", get(routes::health::health_check))
        // Catalogue
        .route("/api/openings", get(routes::openings::list_openings))
        .route("/api/openings/{opening_id}", get(routes::openings::get_opening_detail))
        .route(
            "/api/openings/{opening_id}/{variation_name}",
            get(routes::openings::get_variation_moves),
        )
        // Practice
        .route("/api/practice/random", get(routes::practice::random_variation))
        .route("/api/practice/checkMove", post(routes::practice::check_move))
        // Shared state
        .layer(Extension(store))
        .layer(Extension(progress))
        .layer(cors)
}

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    Extension, Json,
};
use opening_core::model::{Opening, OpeningSummary};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::error::AppError;
use crate::store::OpeningStore;

/// Path parameters led by an opening id. An id that does not parse names
/// no opening, so it is answered like an unknown one.
pub struct OpeningPath<T>(pub T);

impl<S, T> FromRequestParts<S> for OpeningPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!("Rejected opening path: {rejection}");
                Err(AppError::NotFound("Opening not found".into()))
            }
        }
    }
}

/// GET /api/openings
/// Every opening with its variation names.
pub async fn list_openings(Extension(store): Extension<Arc<OpeningStore>>) -> Json<Vec<OpeningSummary>> {
    Json(store.summaries())
}

/// GET /api/openings/{opening_id}
/// Full record: description, strategic ideas, famous games and variations.
pub async fn get_opening_detail(
    Extension(store): Extension<Arc<OpeningStore>>,
    OpeningPath(opening_id): OpeningPath<u32>,
) -> Result<Json<Opening>, AppError> {
    store
        .get(opening_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Opening not found".into()))
}

/// GET /api/openings/{opening_id}/{variation_name}
/// Ordered SAN moves of one variation.
pub async fn get_variation_moves(
    Extension(store): Extension<Arc<OpeningStore>>,
    OpeningPath((opening_id, variation_name)): OpeningPath<(u32, String)>,
) -> Result<Json<Vec<String>>, AppError> {
    store
        .variation(opening_id, &variation_name)
        .map(|v| Json(v.moves.clone()))
        .ok_or_else(|| AppError::NotFound("Variation not found".into()))
}

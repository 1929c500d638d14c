use axum::{Extension, Json};
use opening_core::model::{CheckMoveRequest, CheckMoveResponse, RandomPick};
use opening_core::notation::san_matches;
use std::sync::Arc;

use crate::error::AppError;
use crate::progress::SharedProgress;
use crate::store::OpeningStore;

/// GET /api/practice/random
/// A random opening, then a random variation of it.
pub async fn random_variation(
    Extension(store): Extension<Arc<OpeningStore>>,
) -> Result<Json<RandomPick>, AppError> {
    let pick = store.random_pick(&mut rand::rng());
    pick.map(Json)
        .ok_or_else(|| AppError::NotFound("No openings available".into()))
}

/// POST /api/practice/checkMove
/// Grade one move against the stored line and record the attempt.
/// A wrong answer sends the caller back one move.
pub async fn check_move(
    Extension(store): Extension<Arc<OpeningStore>>,
    Extension(progress): Extension<SharedProgress>,
    Json(body): Json<CheckMoveRequest>,
) -> Result<Json<CheckMoveResponse>, AppError> {
    let variation = store
        .variation(body.opening_id, &body.variation_name)
        .ok_or_else(|| AppError::BadRequest("Invalid opening/variation".into()))?;

    let index = body.current_index;
    let Some(correct_move) = variation.moves.get(index) else {
        return Err(AppError::BadRequest("Already at the end".into()));
    };

    let mut book = progress.lock().await;
    let response = if san_matches(&body.user_move, correct_move) {
        let next_index = index + 1;
        book.record(body.opening_id, &body.variation_name, next_index, index, true);
        CheckMoveResponse::Correct { next_index }
    } else {
        let next_index = index.saturating_sub(1);
        book.record(body.opening_id, &body.variation_name, next_index, index, false);
        CheckMoveResponse::Incorrect {
            correct_move: correct_move.clone(),
            next_index,
        }
    };
    book.save().await?;

    tracing::debug!(
        opening_id = body.opening_id,
        variation = %body.variation_name,
        index,
        "Checked move: {response:?}"
    );
    Ok(Json(response))
}

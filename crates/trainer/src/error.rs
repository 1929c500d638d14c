//! Trainer error types. The `Display` text doubles as user feedback.

use thiserror::Error;

use crate::client::FetchError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrainerError {
    #[error("Illegal move: {from}-{to}")]
    IllegalMove { from: String, to: String },

    #[error("Wrong move: {played}. Try again.")]
    WrongVariationMove { played: String, expected: String },

    #[error("No more moves in this variation.")]
    NoMovesRemaining,

    #[error("Could not reach the opening service: {0}")]
    DataFetchFailure(String),

    #[error("Opening service sent unexpected data: {0}")]
    MalformedPayload(String),

    #[error("Stored move '{san}' at index {index} cannot be played")]
    CorruptSequence { index: usize, san: String },

    #[error("Invalid position: {0}")]
    InvalidPosition(String),
}

impl From<FetchError> for TrainerError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Malformed(msg) => TrainerError::MalformedPayload(msg),
            other => TrainerError::DataFetchFailure(other.to_string()),
        }
    }
}

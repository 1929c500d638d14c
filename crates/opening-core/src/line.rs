//! Replay a SAN line from the starting position.

use shakmaty::{fen::Fen, san::SanPlus, Chess, EnPassantMode, Position};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineError {
    #[error("Invalid SAN '{san}' at ply {ply}")]
    InvalidSan { ply: usize, san: String },

    #[error("Illegal move '{san}' at ply {ply}")]
    IllegalMove { ply: usize, san: String },
}

impl LineError {
    pub fn ply(&self) -> usize {
        match self {
            LineError::InvalidSan { ply, .. } | LineError::IllegalMove { ply, .. } => *ply,
        }
    }
}

/// Play every move of `moves` from the initial position.
/// Returns the FEN after each ply; stops at the first move that cannot be played.
pub fn replay_line(moves: &[String]) -> Result<Vec<String>, LineError> {
    let mut pos = Chess::default();
    let mut fens = Vec::with_capacity(moves.len());

    for (ply, move_san) in moves.iter().enumerate() {
        let san: SanPlus = move_san.trim().parse().map_err(|_| LineError::InvalidSan {
            ply,
            san: move_san.clone(),
        })?;

        let mv = san.san.to_move(&pos).map_err(|_| LineError::IllegalMove {
            ply,
            san: move_san.clone(),
        })?;

        pos.play_unchecked(mv);
        fens.push(Fen::from_position(&pos, EnPassantMode::Legal).to_string());
    }

    Ok(fens)
}

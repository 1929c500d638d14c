//! Move legality oracle: legality, SAN, undo and reset on top of `shakmaty`.

use shakmaty::{
    fen::Fen, san::SanPlus, uci::UciMove, CastlingMode, Chess, EnPassantMode, Move,
    Role, Square,
};
use std::fmt;

use crate::error::TrainerError;

/// A captured board state. Equality is FEN equality.
#[derive(Clone, Debug)]
pub struct Position {
    board: Chess,
    fen: String,
}

impl Position {
    pub fn initial() -> Self {
        Self::new(Chess::default())
    }

    pub fn new(board: Chess) -> Self {
        let fen = Fen::from_position(&board, EnPassantMode::Legal).to_string();
        Self { board, fen }
    }

    pub fn from_fen(text: &str) -> Result<Self, TrainerError> {
        let fen: Fen = text
            .trim()
            .parse()
            .map_err(|e| TrainerError::InvalidPosition(format!("{e}")))?;
        let board: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e| TrainerError::InvalidPosition(format!("{e}")))?;
        Ok(Self::new(board))
    }

    pub fn fen(&self) -> &str {
        &self.fen
    }

    pub fn board(&self) -> &Chess {
        &self.board
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.fen == other.fen
    }
}

impl Eq for Position {}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fen)
    }
}

/// Result of a successfully applied move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedMove {
    pub san: String,
    pub position: Position,
}

pub trait MoveOracle {
    /// Play `from -> to` from the live position. When the plain move is not
    /// legal and a promotion hint is given, the promoting move is tried.
    /// `None` means illegal; the live position is unchanged.
    fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Option<AppliedMove>;

    /// Play a SAN move from the live position.
    fn apply_san(&mut self, san: &str) -> Option<AppliedMove>;

    /// Take back the most recent move. Without history this is a no-op.
    fn undo_last_move(&mut self) -> Position;

    fn reset_to_initial(&mut self) -> Position;

    fn current_position(&self) -> Position;

    fn load_position(&mut self, position: &Position);
}

/// Oracle backed by a live `shakmaty::Chess` and a stack of prior positions.
#[derive(Debug, Default)]
pub struct ShakmatyOracle {
    pos: Chess,
    history: Vec<Chess>,
}

impl ShakmatyOracle {
    pub fn new() -> Self {
        Self::default()
    }

    fn find_move(&self, from: Square, to: Square, promotion: Option<Role>) -> Option<Move> {
        UciMove::Normal {
            from,
            to,
            promotion,
        }
        .to_move(&self.pos)
        .ok()
    }

    fn play(&mut self, mv: Move) -> AppliedMove {
        self.history.push(self.pos.clone());
        let san = SanPlus::from_move_and_play_unchecked(&mut self.pos, mv);
        AppliedMove {
            san: san.to_string(),
            position: self.current_position(),
        }
    }
}

impl MoveOracle for ShakmatyOracle {
    fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Option<AppliedMove> {
        let mv = self
            .find_move(from, to, None)
            .or_else(|| promotion.and_then(|role| self.find_move(from, to, Some(role))))?;
        Some(self.play(mv))
    }

    fn apply_san(&mut self, san: &str) -> Option<AppliedMove> {
        let parsed: SanPlus = san.trim().parse().ok()?;
        let mv = parsed.san.to_move(&self.pos).ok()?;
        Some(self.play(mv))
    }

    fn undo_last_move(&mut self) -> Position {
        if let Some(previous) = self.history.pop() {
            self.pos = previous;
        }
        self.current_position()
    }

    fn reset_to_initial(&mut self) -> Position {
        self.pos = Chess::default();
        self.history.clear();
        self.current_position()
    }

    fn current_position(&self) -> Position {
        Position::new(self.pos.clone())
    }

    fn load_position(&mut self, position: &Position) {
        if self.current_position() == *position {
            return;
        }

        // Rewinding to a position on the stack keeps earlier moves undoable.
        let on_stack = self
            .history
            .iter()
            .rposition(|p| Fen::from_position(p, EnPassantMode::Legal).to_string() == position.fen());

        match on_stack {
            Some(i) => {
                self.pos = self.history[i].clone();
                self.history.truncate(i);
            }
            None => {
                self.pos = position.board().clone();
                self.history.clear();
            }
        }
    }
}

//! Practice session state: the single source of truth the view observes.

use std::fmt;

use crate::oracle::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    FreePlay,
    Practicing,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::FreePlay => f.write_str("Free play"),
            Mode::Practicing => f.write_str("Practicing"),
        }
    }
}

/// Session fields are written only by the practice controller.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) mode: Mode,
    pub(crate) opening_id: Option<u32>,
    pub(crate) variation_name: Option<String>,
    pub(crate) moves: Vec<String>,
    /// Moves matched so far; also the index of the next expected move.
    pub(crate) progress_index: usize,
    pub(crate) last_good_position: Position,
    pub(crate) last_good_index: usize,
    pub(crate) wrong_move_flag: bool,
    pub(crate) feedback: String,
}

impl Session {
    pub fn free_play(feedback: impl Into<String>) -> Self {
        Self {
            mode: Mode::FreePlay,
            opening_id: None,
            variation_name: None,
            moves: Vec::new(),
            progress_index: 0,
            last_good_position: Position::initial(),
            last_good_index: 0,
            wrong_move_flag: false,
            feedback: feedback.into(),
        }
    }

    pub fn practicing(
        opening_id: u32,
        variation_name: String,
        moves: Vec<String>,
        feedback: impl Into<String>,
    ) -> Self {
        Self {
            mode: Mode::Practicing,
            opening_id: Some(opening_id),
            variation_name: Some(variation_name),
            moves,
            progress_index: 0,
            last_good_position: Position::initial(),
            last_good_index: 0,
            wrong_move_flag: false,
            feedback: feedback.into(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn opening_id(&self) -> Option<u32> {
        self.opening_id
    }

    pub fn variation_name(&self) -> Option<&str> {
        self.variation_name.as_deref()
    }

    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    pub fn progress_index(&self) -> usize {
        self.progress_index
    }

    pub fn last_good_index(&self) -> usize {
        self.last_good_index
    }

    pub fn last_good_position(&self) -> &Position {
        &self.last_good_position
    }

    pub fn wrong_move_flag(&self) -> bool {
        self.wrong_move_flag
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    /// Next move the variation expects, if any.
    pub fn expected_move(&self) -> Option<&str> {
        self.moves.get(self.progress_index).map(String::as_str)
    }

    pub fn is_complete(&self) -> bool {
        self.mode == Mode::Practicing && self.progress_index == self.moves.len()
    }

    /// Record a newly matched move and its resulting position.
    pub(crate) fn advance(&mut self, position: Position) {
        self.progress_index += 1;
        self.mark_good(position);
    }

    /// Capture `position` as the last good one for the current index.
    pub(crate) fn mark_good(&mut self, position: Position) {
        self.last_good_position = position;
        self.last_good_index = self.progress_index;
        self.wrong_move_flag = false;
    }

    pub(crate) fn set_feedback(&mut self, feedback: impl Into<String>) {
        self.feedback = feedback.into();
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::free_play("Free play: make any legal move.")
    }
}

//! Practice controller: owns the session and the oracle, validates drops and
//! drives navigation through a loaded variation.
//!
//! Fetch-backed operations come in two halves. `begin_*` issues a request
//! token and leaves the session untouched; `finish_*` applies the fetched
//! result in one step, unless a newer request has been issued in between.

use opening_core::line::replay_line;
use opening_core::model::RandomPick;
use opening_core::notation::san_matches;
use shakmaty::{Role, Square};
use tracing::{debug, info, warn};

use crate::client::{FetchError, OpeningSource};
use crate::error::TrainerError;
use crate::oracle::{MoveOracle, Position, ShakmatyOracle};
use crate::session::{Mode, Session};

/// What the board should do with the dragged piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Accept,
    Snapback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropOutcome {
    pub directive: Directive,
    pub feedback: String,
}

/// A pending move-list fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariationRequest {
    token: u64,
    pub opening_id: u32,
    pub variation_name: String,
}

/// A pending random-pick fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomRequest {
    token: u64,
}

pub struct PracticeController<O = ShakmatyOracle> {
    session: Session,
    oracle: O,
    latest_request: u64,
}

impl PracticeController<ShakmatyOracle> {
    pub fn new() -> Self {
        Self::with_oracle(ShakmatyOracle::new())
    }
}

impl Default for PracticeController<ShakmatyOracle> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: MoveOracle> PracticeController<O> {
    pub fn with_oracle(mut oracle: O) -> Self {
        oracle.reset_to_initial();
        Self {
            session: Session::default(),
            oracle,
            latest_request: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_position(&self) -> Position {
        self.oracle.current_position()
    }

    fn next_token(&mut self) -> u64 {
        self.latest_request += 1;
        self.latest_request
    }

    // ---- bootstrap / mode switch ----

    pub fn begin_variation(
        &mut self,
        opening_id: u32,
        variation_name: impl Into<String>,
    ) -> VariationRequest {
        let request = VariationRequest {
            token: self.next_token(),
            opening_id,
            variation_name: variation_name.into(),
        };
        debug!(token = request.token, opening_id, variation = %request.variation_name, "Variation requested");
        request
    }

    /// Apply a fetched move list. Returns `false` when the request was
    /// superseded and the result was discarded.
    pub fn finish_variation(
        &mut self,
        request: VariationRequest,
        result: Result<Vec<String>, FetchError>,
    ) -> bool {
        if request.token != self.latest_request {
            debug!(
                token = request.token,
                latest = self.latest_request,
                variation = %request.variation_name,
                "Discarding stale variation fetch"
            );
            return false;
        }

        self.oracle.reset_to_initial();

        let VariationRequest {
            opening_id,
            variation_name,
            ..
        } = request;

        self.session = match result {
            Ok(moves) => {
                if let Err(e) = replay_line(&moves) {
                    warn!(opening_id, variation = %variation_name, "Loaded line is not fully playable: {e}");
                }
                let feedback = if moves.is_empty() {
                    format!("{variation_name} has no moves to practice.")
                } else {
                    format!("{variation_name}: {} moves. Your move.", moves.len())
                };
                info!(opening_id, variation = %variation_name, moves = moves.len(), "Practicing variation");
                Session::practicing(opening_id, variation_name, moves, feedback)
            }
            Err(e) => {
                warn!(opening_id, variation = %variation_name, "Failed to load variation: {e}");
                let err = TrainerError::from(e);
                let feedback = format!("Could not load {variation_name}. {err}");
                Session::practicing(opening_id, variation_name, Vec::new(), feedback)
            }
        };
        true
    }

    pub async fn start_variation_practice<C: OpeningSource>(
        &mut self,
        client: &C,
        opening_id: u32,
        variation_name: &str,
    ) {
        let request = self.begin_variation(opening_id, variation_name);
        let result = client.variation_moves(opening_id, variation_name).await;
        self.finish_variation(request, result);
    }

    pub fn begin_random(&mut self) -> RandomRequest {
        let request = RandomRequest {
            token: self.next_token(),
        };
        debug!(token = request.token, "Random variation requested");
        request
    }

    /// Apply a random pick. On success the follow-up move-list request is
    /// returned; on failure only the feedback changes.
    pub fn finish_random(
        &mut self,
        request: RandomRequest,
        result: Result<RandomPick, FetchError>,
    ) -> Option<VariationRequest> {
        if request.token != self.latest_request {
            debug!(token = request.token, latest = self.latest_request, "Discarding stale random pick");
            return None;
        }

        match result {
            Ok(pick) => Some(self.begin_variation(pick.opening_id, pick.variation_name)),
            Err(e) => {
                warn!("Failed to pick a random variation: {e}");
                let err = TrainerError::from(e);
                self.session
                    .set_feedback(format!("Could not pick a random variation. {err}"));
                None
            }
        }
    }

    pub async fn load_random_variation<C: OpeningSource>(&mut self, client: &C) {
        let request = self.begin_random();
        let result = client.random_variation().await;
        if let Some(follow_up) = self.finish_random(request, result) {
            let result = client
                .variation_moves(follow_up.opening_id, &follow_up.variation_name)
                .await;
            self.finish_variation(follow_up, result);
        }
    }

    pub fn enter_freeplay_mode(&mut self) {
        // Supersedes any fetch still in flight.
        self.next_token();
        self.oracle.reset_to_initial();
        self.session = Session::free_play("Free play: make any legal move.");
        debug!("Entered free play");
    }

    // ---- navigation ----

    /// Re-home the current session. A variation load still in flight is
    /// left to complete.
    pub fn reset_board(&mut self) {
        self.oracle.reset_to_initial();
        self.session.progress_index = 0;
        self.session.mark_good(Position::initial());

        if self.session.moves.is_empty() {
            self.session.set_feedback("Board reset.");
        } else {
            self.session
                .set_feedback("Board reset. Start the variation again.");
        }
        debug!(mode = %self.session.mode, "Board reset");
    }

    /// Undo an unresolved wrong attempt. Returns `false` when there was none.
    pub fn reset_to_last_good_position(&mut self) -> bool {
        if !self.session.wrong_move_flag {
            return false;
        }

        if self.session.last_good_index == 0 {
            self.reset_board();
            return true;
        }

        self.oracle.load_position(&self.session.last_good_position);
        self.session.progress_index = self.session.last_good_index;
        self.session.wrong_move_flag = false;
        self.session.set_feedback("Back to your last correct move.");
        debug!(index = self.session.progress_index, "Reset to last good position");
        true
    }

    /// Play the next move of the line. Returns `true` if the board moved.
    pub fn step_forward(&mut self) -> bool {
        let index = self.session.progress_index;
        let Some(san) = self.session.moves.get(index).cloned() else {
            self.session.set_feedback("Nothing to do.");
            return false;
        };

        match self.oracle.apply_san(&san) {
            Some(applied) => {
                self.session.advance(applied.position);
                self.session.set_feedback(format!("Played {}.", applied.san));
                true
            }
            None => {
                let err = TrainerError::CorruptSequence { index, san };
                warn!("{err}");
                self.session.set_feedback(err.to_string());
                false
            }
        }
    }

    /// Take back the last move of the line. Returns `true` if the board moved.
    pub fn step_backward(&mut self) -> bool {
        if self.session.moves.is_empty() || self.session.progress_index == 0 {
            self.session.set_feedback("Nothing to do.");
            return false;
        }

        let position = self.oracle.undo_last_move();
        self.session.progress_index -= 1;
        self.session.mark_good(position);
        let feedback = format!("Took back {}.", self.session.moves[self.session.progress_index]);
        self.session.set_feedback(feedback);
        true
    }

    // ---- drop gate ----

    /// Decide what happens to a piece dropped from `source` onto `target`.
    pub fn attempt_move(&mut self, source: Square, target: Square) -> DropOutcome {
        let Some(applied) = self.oracle.apply_move(source, target, Some(Role::Queen)) else {
            let err = TrainerError::IllegalMove {
                from: source.to_string(),
                to: target.to_string(),
            };
            return self.snapback(err.to_string());
        };

        if self.session.mode == Mode::FreePlay {
            return self.accept(format!("Move recorded: {}", applied.san));
        }

        let Some(expected) = self.session.expected_move().map(str::to_owned) else {
            self.oracle.undo_last_move();
            return self.snapback(TrainerError::NoMovesRemaining.to_string());
        };

        if san_matches(&applied.san, &expected) {
            self.session.advance(applied.position);
            let feedback = if self.session.is_complete() {
                format!("Correct! {} Variation complete.", applied.san)
            } else {
                format!("Correct! {}", applied.san)
            };
            debug!(index = self.session.progress_index, san = %applied.san, "Correct move");
            self.accept(feedback)
        } else {
            // Revert only this attempt; earlier correct moves stay on the board.
            self.oracle.undo_last_move();
            self.session.wrong_move_flag = true;
            let err = TrainerError::WrongVariationMove {
                played: applied.san,
                expected,
            };
            debug!(index = self.session.progress_index, "{err:?}");
            self.snapback(err.to_string())
        }
    }

    fn accept(&mut self, feedback: String) -> DropOutcome {
        self.session.set_feedback(feedback.clone());
        DropOutcome {
            directive: Directive::Accept,
            feedback,
        }
    }

    fn snapback(&mut self, feedback: String) -> DropOutcome {
        self.session.set_feedback(feedback.clone());
        DropOutcome {
            directive: Directive::Snapback,
            feedback,
        }
    }
}

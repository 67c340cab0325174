//! High-level game management

use serde::{Deserialize, Serialize};

use super::board::{Action, Board, Outcome, Player};
use crate::{Error, Result};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub action: Action,
    pub player: Player,
}

/// A complete game with history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub initial: Board,
    pub moves: Vec<Move>,
    pub outcome: Outcome,
}

impl Game {
    /// Create a new game from the empty board
    pub fn new() -> Self {
        Self::from_board(Board::new())
    }

    /// Create a game starting from an arbitrary position
    pub fn from_board(initial: Board) -> Self {
        Game {
            initial,
            moves: Vec::new(),
            outcome: initial.outcome(),
        }
    }

    /// Play an action for the side to move and return the resulting outcome
    ///
    /// # Errors
    ///
    /// - [`Error::GameOver`] once the game has been decided
    /// - [`Error::InvalidMove`] / [`Error::OutOfBounds`] for illegal targets
    pub fn play(&mut self, action: Action) -> Result<Outcome> {
        if self.outcome.is_finished() {
            return Err(Error::GameOver);
        }

        let current = self.current_board()?;
        let next = current.apply(action)?;

        self.moves.push(Move {
            action,
            player: current.current_player(),
        });
        self.outcome = next.outcome();

        Ok(self.outcome)
    }

    /// Replay moves up to a given index (exclusive)
    ///
    /// # Errors
    ///
    /// Returns error if any move in the history is illegal for the board it
    /// was played on. This indicates corrupted game data.
    fn replay_moves_until(&self, end_index: usize) -> Result<Board> {
        let mut board = self.initial;
        for m in self.moves.iter().take(end_index) {
            board = board.apply(m.action)?;
        }
        Ok(board)
    }

    /// Get the current board
    ///
    /// # Errors
    ///
    /// Returns error if the recorded history is corrupted.
    pub fn current_board(&self) -> Result<Board> {
        self.replay_moves_until(self.moves.len())
    }

    /// Get the sequence of boards, starting with the initial one
    ///
    /// # Errors
    ///
    /// Returns error if the recorded history is corrupted.
    pub fn boards(&self) -> Result<Vec<Board>> {
        let mut boards = Vec::with_capacity(self.moves.len() + 1);
        let mut board = self.initial;
        boards.push(board);

        for m in &self.moves {
            board = board.apply(m.action)?;
            boards.push(board);
        }

        Ok(boards)
    }

    /// Actions played so far
    pub fn actions(&self) -> Vec<Action> {
        self.moves.iter().map(|m| m.action).collect()
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_finished()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

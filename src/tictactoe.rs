//! Tic-Tac-Toe game implementation

pub mod board;
pub mod game;
pub mod lines;
pub mod validation;

pub use board::{Action, Board, Cell, Cells, Outcome, Player, SIZE, initial_state};
pub use game::{Game, Move};
pub use lines::{LineAnalyzer, WINNING_LINES};

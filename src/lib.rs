//! Optimal Tic-Tac-Toe via exhaustive minimax search
//!
//! This crate provides:
//! - Board representation, legal moves, terminal and outcome detection
//! - Minimax search with the win-value short-circuit
//! - Agents (engine, random baseline, human) and a match runner
//! - A small CLI for analysis, interactive play and evaluation
//!
//! ```
//! use noughts::search::best_action;
//! use noughts::tictactoe::{Outcome, initial_state};
//!
//! let mut board = initial_state();
//! while !board.is_terminal() {
//!     let action = best_action(&board).unwrap();
//!     board = board.apply(action).unwrap();
//! }
//! assert_eq!(board.outcome(), Outcome::Draw);
//! ```

pub mod agents;
pub mod arena;
pub mod cli;
pub mod config;
pub mod error;
pub mod search;
pub mod tictactoe;

pub use error::{Error, Result};
pub use search::{Minimax, best_action};
pub use tictactoe::{Action, Board, Cell, Outcome, Player, initial_state};

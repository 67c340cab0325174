//! Error types for the noughts crate

use thiserror::Error;

/// Main error type for the noughts crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: cell ({row}, {col}) is already occupied")]
    InvalidMove { row: usize, col: usize },

    #[error("cell ({row}, {col}) is out of bounds (rows and columns must be 0-2)")]
    OutOfBounds { row: usize, col: usize },

    #[error("board is terminal: no legal action exists")]
    TerminalBoard,

    #[error("malformed board: X={x_count}, O={o_count} (X must equal O or lead by exactly 1)")]
    MalformedBoard { x_count: usize, o_count: usize },

    #[error("game already over")]
    GameOver,

    #[error("board string has wrong length: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid action '{input}' (expected 'row,col' with values 0-2)")]
    InvalidAction { input: String },

    #[error("invalid player '{input}' (expected 'x' or 'o')")]
    InvalidPlayer { input: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("input closed before {agent} chose an action")]
    InputClosed { agent: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

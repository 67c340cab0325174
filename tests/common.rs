//! Shared helpers for the integration tests.

use std::collections::HashSet;

use noughts::tictactoe::Board;

/// Every board reachable from the empty board by legal play, including
/// terminal ones.
pub fn reachable_boards() -> Vec<Board> {
    let mut stack = vec![Board::new()];
    let mut seen = HashSet::new();
    let mut boards = Vec::new();

    while let Some(board) = stack.pop() {
        if !seen.insert(board) {
            continue;
        }
        boards.push(board);

        if !board.is_terminal() {
            for action in board.legal_actions() {
                stack.push(board.apply(action).unwrap());
            }
        }
    }

    boards
}

/// Parse a board written as `"XO./.X./..O"`.
pub fn board(s: &str) -> Board {
    Board::from_string(s).unwrap_or_else(|err| panic!("bad test board {s:?}: {err}"))
}

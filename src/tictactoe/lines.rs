//! Winning line analysis for Tic-Tac-Toe

use super::{Action, Cell, Cells, Player};

/// The 8 winning lines on the 3x3 board
pub const WINNING_LINES: [[Action; 3]; 8] = [
    // rows
    [Action::new(0, 0), Action::new(0, 1), Action::new(0, 2)],
    [Action::new(1, 0), Action::new(1, 1), Action::new(1, 2)],
    [Action::new(2, 0), Action::new(2, 1), Action::new(2, 2)],
    // columns
    [Action::new(0, 0), Action::new(1, 0), Action::new(2, 0)],
    [Action::new(0, 1), Action::new(1, 1), Action::new(2, 1)],
    [Action::new(0, 2), Action::new(1, 2), Action::new(2, 2)],
    // diagonals
    [Action::new(0, 0), Action::new(1, 1), Action::new(2, 2)],
    [Action::new(0, 2), Action::new(1, 1), Action::new(2, 0)],
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    fn cell(cells: &Cells, action: Action) -> Cell {
        cells[action.row][action.col]
    }

    /// The mark filling every cell of `line`, if the line is uniform and not empty
    pub fn line_owner(cells: &Cells, line: &[Action; 3]) -> Option<Player> {
        let first = Self::cell(cells, line[0]);
        let uniform = line.iter().all(|&action| Self::cell(cells, action) == first);
        // A row of three empty cells is uniform too; to_player rules it out.
        if uniform { first.to_player() } else { None }
    }

    /// The winner of the first completed line in scan order, if any
    pub fn winner(cells: &Cells) -> Option<Player> {
        WINNING_LINES
            .iter()
            .find_map(|line| Self::line_owner(cells, line))
    }

    /// Check if a player has won by having three in a row
    pub fn has_won(cells: &Cells, player: Player) -> bool {
        !Self::winning_lines(cells, player).is_empty()
    }

    /// All lines completed by `player`
    pub fn winning_lines(cells: &Cells, player: Player) -> Vec<[Action; 3]> {
        WINNING_LINES
            .iter()
            .filter(|line| Self::line_owner(cells, line) == Some(player))
            .copied()
            .collect()
    }
}

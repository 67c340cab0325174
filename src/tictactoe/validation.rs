//! Board reachability checks

use std::collections::HashSet;

use super::{
    Action,
    board::{Board, Player},
    lines::LineAnalyzer,
};

impl Board {
    /// Check if the board can arise from legal play starting on the empty board.
    ///
    /// Piece counts are already guaranteed by construction; this adds the
    /// checks that need the winning lines.
    pub fn is_valid(&self) -> bool {
        let x_count = self.count_marks(Player::X);
        let o_count = self.count_marks(Player::O);

        let x_wins = self.has_won(Player::X);
        let o_wins = self.has_won(Player::O);

        if x_wins && o_wins {
            return false; // Both can't win
        }

        // The winner must have moved last
        if x_wins && x_count != o_count + 1 {
            return false;
        }
        if o_wins && x_count != o_count {
            return false;
        }

        // Several completed lines are only possible when one move finished them all
        if x_wins && !self.winning_lines_share_cell(Player::X) {
            return false;
        }
        if o_wins && !self.winning_lines_share_cell(Player::O) {
            return false;
        }

        true
    }

    /// Check if all winning lines for a player share at least one cell
    pub fn winning_lines_share_cell(&self, player: Player) -> bool {
        let lines = LineAnalyzer::winning_lines(self.cells(), player);

        // If fewer than 2 lines, trivially true
        if lines.len() < 2 {
            return true;
        }

        Action::ALL
            .iter()
            .any(|cell| lines.iter().all(|line| line.contains(cell)))
    }

    fn count_marks(&self, player: Player) -> usize {
        let mark = player.to_cell();
        self.cells()
            .iter()
            .flatten()
            .filter(|&&cell| cell == mark)
            .count()
    }

    /// Count distinct boards reachable from the empty board.
    ///
    /// Terminal boards are counted but not expanded.
    pub fn count_reachable_boards() -> usize {
        let mut stack = vec![Board::new()];
        let mut seen = HashSet::new();

        while let Some(board) = stack.pop() {
            if !seen.insert(board) {
                continue;
            }

            if !board.is_terminal() {
                for action in board.legal_actions() {
                    if let Ok(next) = board.apply(action) {
                        stack.push(next);
                    }
                }
            }
        }

        seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reachable_board_count() {
        assert_eq!(Board::count_reachable_boards(), 5478);
    }

    #[test]
    fn test_double_line_requires_shared_cell() {
        // XXX
        // XOO
        // XOO
        // Both lines were finished by the move at (0, 0)
        let board = Board::from_string("XXX/XOO/XOO").unwrap();
        assert!(board.winning_lines_share_cell(Player::X));
        assert!(board.is_valid());
    }

    #[test]
    fn test_invalid_double_win_without_shared_cell() {
        // XXX
        // OO.
        // XXX  six X marks against two O marks is rejected outright
        assert!(Board::from_string("XXX/OO./XXX").is_err());

        // Parallel lines with legal counts
        // XXX
        // OOO
        // X..
        let board = Board::from_string("XXX/OOO/X..").unwrap();
        assert!(!board.is_valid(), "both players cannot have won");
    }

    #[test]
    fn test_winner_must_move_last() {
        // X completed a row but O has already replied
        let board = Board::from_string("XXX/OO./O..").unwrap();
        assert!(board.has_won(Player::X));
        assert!(!board.is_valid());

        // O completed a row but X has moved since
        let board = Board::from_string("OOO/XX./XX.").unwrap();
        assert!(!board.is_valid());
    }

    #[test]
    fn test_regular_positions_are_valid() {
        assert!(Board::new().is_valid());
        assert!(Board::from_string("XX./OO./...").unwrap().is_valid());
        assert!(Board::from_string("XOX/XOO/OXX").unwrap().is_valid());
    }
}

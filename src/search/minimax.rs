//! Exhaustive minimax search
//!
//! Values are always from X's point of view: `1` is an X win, `-1` an O win,
//! `0` a draw. X maximizes, O minimizes. The only pruning is the win-value
//! short-circuit: a side stops scanning its moves as soon as it has found one
//! that reaches the best value it could ever get.
//!
//! Moves are scanned in row-major order, so among equally valued moves the
//! first in that order is chosen.

use std::ops::AddAssign;

use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::{
    Error, Result,
    tictactoe::{Action, Board, Player},
};

const X_WIN: i8 = 1;
const O_WIN: i8 = -1;

/// Bounds lying outside every reachable value
const BELOW_ANY: i8 = -2;
const ABOVE_ANY: i8 = 2;

/// Work done by a searcher
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Boards visited by `max_value`/`min_value`
    pub nodes: u64,
    /// Terminal boards scored
    pub leaves: u64,
    /// Scans cut short by the win-value short-circuit
    pub cutoffs: u64,
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, rhs: Self) {
        self.nodes += rhs.nodes;
        self.leaves += rhs.leaves;
        self.cutoffs += rhs.cutoffs;
    }
}

/// Chosen action together with its minimax value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub action: Action,
    pub value: i8,
}

/// Best value `player` can hope for
fn ideal_value(player: Player) -> i8 {
    match player {
        Player::X => X_WIN,
        Player::O => O_WIN,
    }
}

/// Whether `candidate` is strictly better than `incumbent` for `player`
fn improves(player: Player, candidate: i8, incumbent: i8) -> bool {
    match player {
        Player::X => candidate > incumbent,
        Player::O => candidate < incumbent,
    }
}

/// Minimax searcher.
///
/// Holds nothing but running statistics; boards are passed by value and each
/// recursive call owns the boards it derives.
///
/// # Examples
///
/// ```
/// use noughts::search::Minimax;
/// use noughts::tictactoe::{Action, Board};
///
/// let board = Board::from_string("XX./OO./...").unwrap();
/// let mut minimax = Minimax::new();
/// assert_eq!(minimax.best_action(&board).unwrap(), Action::new(0, 2));
/// assert!(minimax.stats().nodes > 0);
/// ```
#[derive(Debug, Default)]
pub struct Minimax {
    stats: SearchStats,
}

impl Minimax {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics accumulated since creation or the last reset
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }

    /// Return the optimal action for the side to move.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TerminalBoard`] if the game on `board` is already over.
    pub fn best_action(&mut self, board: &Board) -> Result<Action> {
        self.search(board).map(|decision| decision.action)
    }

    /// Return the optimal action for the side to move and its value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TerminalBoard`] if the game on `board` is already over.
    #[instrument(level = "debug", skip(self, board), fields(position = %board.encode()))]
    pub fn search(&mut self, board: &Board) -> Result<Decision> {
        if board.is_terminal() {
            return Err(Error::TerminalBoard);
        }

        let before = self.stats;
        let player = board.current_player();
        let mut best: Option<Decision> = None;

        for action in board.legal_actions() {
            let value = self.child_value(board, action, player)?;
            trace!(%action, value, "root action evaluated");

            if value == ideal_value(player) {
                self.stats.cutoffs += 1;
                best = Some(Decision { action, value });
                break;
            }

            if best.is_none_or(|incumbent| improves(player, value, incumbent.value)) {
                best = Some(Decision { action, value });
            }
        }

        let decision = best.ok_or(Error::TerminalBoard)?;
        debug!(
            %player,
            action = %decision.action,
            value = decision.value,
            nodes = self.stats.nodes - before.nodes,
            cutoffs = self.stats.cutoffs - before.cutoffs,
            "search complete"
        );
        Ok(decision)
    }

    /// Game-theoretic value of `board` with optimal play from both sides
    pub fn value(&mut self, board: &Board) -> i8 {
        match board.current_player() {
            Player::X => self.max_value(*board),
            Player::O => self.min_value(*board),
        }
    }

    /// Every legal action with its exact value, in row-major order.
    ///
    /// Unlike [`Minimax::search`], no root action is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TerminalBoard`] if the game on `board` is already over.
    pub fn ranked_actions(&mut self, board: &Board) -> Result<Vec<(Action, i8)>> {
        if board.is_terminal() {
            return Err(Error::TerminalBoard);
        }

        let player = board.current_player();
        board
            .legal_actions()
            .into_iter()
            .map(|action| Ok((action, self.child_value(board, action, player)?)))
            .collect()
    }

    /// All actions achieving the best value for the side to move.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TerminalBoard`] if the game on `board` is already over.
    pub fn optimal_actions(&mut self, board: &Board) -> Result<Vec<Action>> {
        let player = board.current_player();
        let ranked = self.ranked_actions(board)?;

        let best = ranked
            .iter()
            .map(|&(_, value)| value)
            .reduce(|a, b| if improves(player, b, a) { b } else { a })
            .ok_or(Error::TerminalBoard)?;

        Ok(ranked
            .into_iter()
            .filter(|&(_, value)| value == best)
            .map(|(action, _)| action)
            .collect())
    }

    /// Value of the board reached by `player` playing `action`
    fn child_value(&mut self, board: &Board, action: Action, player: Player) -> Result<i8> {
        let next = board.apply(action)?;
        Ok(match player {
            Player::X => self.min_value(next),
            Player::O => self.max_value(next),
        })
    }

    /// Value of a board where X is to move
    pub fn max_value(&mut self, board: Board) -> i8 {
        self.stats.nodes += 1;
        if board.is_terminal() {
            self.stats.leaves += 1;
            return board.utility();
        }

        let mut best = BELOW_ANY;
        for action in board.legal_actions() {
            if let Ok(next) = board.apply(action) {
                best = best.max(self.min_value(next));
            }
            if best == X_WIN {
                self.stats.cutoffs += 1;
                return best;
            }
        }
        best
    }

    /// Value of a board where O is to move
    pub fn min_value(&mut self, board: Board) -> i8 {
        self.stats.nodes += 1;
        if board.is_terminal() {
            self.stats.leaves += 1;
            return board.utility();
        }

        let mut best = ABOVE_ANY;
        for action in board.legal_actions() {
            if let Ok(next) = board.apply(action) {
                best = best.min(self.max_value(next));
            }
            if best == O_WIN {
                self.stats.cutoffs += 1;
                return best;
            }
        }
        best
    }
}

/// Return the optimal action for the side to move.
///
/// # Errors
///
/// Returns [`Error::TerminalBoard`] if the game on `board` is already over.
///
/// # Examples
///
/// ```
/// use noughts::search::best_action;
/// use noughts::tictactoe::{Action, Board};
///
/// // X to move while O threatens the middle column: X wins first on the left one
/// let board = Board::from_string("XOX/XOO/...").unwrap();
/// assert_eq!(best_action(&board).unwrap(), Action::new(2, 0));
///
/// let finished = Board::from_string("XXX/OO./...").unwrap();
/// assert!(best_action(&finished).is_err());
/// ```
pub fn best_action(board: &Board) -> Result<Action> {
    Minimax::new().best_action(board)
}

/// Value of `board` assuming X is to move
pub fn max_value(board: Board) -> i8 {
    Minimax::new().max_value(board)
}

/// Value of `board` assuming O is to move
pub fn min_value(board: Board) -> i8 {
    Minimax::new().min_value(board)
}

/// All equally optimal actions for the side to move, row-major
///
/// # Errors
///
/// Returns [`Error::TerminalBoard`] if the game on `board` is already over.
pub fn optimal_actions(board: &Board) -> Result<Vec<Action>> {
    Minimax::new().optimal_actions(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        Board::from_string(s).unwrap()
    }

    #[test]
    fn terminal_boards_score_their_utility() {
        assert_eq!(max_value(board("XXX/OO./...")), 1);
        assert_eq!(min_value(board("XXX/OO./...")), 1);
        assert_eq!(max_value(board("OOO/XX./X..")), -1);
        assert_eq!(min_value(board("XOX/XOO/OXX")), 0);
    }

    #[test]
    fn empty_board_is_a_draw() {
        let mut minimax = Minimax::new();
        assert_eq!(minimax.value(&Board::new()), 0);
        let stats = minimax.stats();
        assert!(stats.nodes > stats.leaves);
        assert!(stats.cutoffs > 0);
    }

    #[test]
    fn immediate_win_is_taken() {
        let decision = Minimax::new().search(&board("XX./OO./...")).unwrap();
        assert_eq!(
            decision,
            Decision {
                action: Action::new(0, 2),
                value: 1
            }
        );
    }

    #[test]
    fn o_blocks_the_only_threat() {
        // X threatens (0, 2); anything else loses for O
        let decision = Minimax::new().search(&board("XX./.O./...")).unwrap();
        assert_eq!(decision.action, Action::new(0, 2));
        assert_eq!(decision.value, 0);
    }

    #[test]
    fn o_takes_its_own_win() {
        // O to move, both sides threaten; O wins on the middle row
        let decision = Minimax::new().search(&board("XX./OO./X..")).unwrap();
        assert_eq!(decision.action, Action::new(1, 2));
        assert_eq!(decision.value, -1);
    }

    #[test]
    fn root_short_circuit_counts_a_cutoff() {
        let mut minimax = Minimax::new();
        minimax.search(&board("XX./OO./...")).unwrap();
        assert_eq!(minimax.stats().cutoffs, 1);
        // Only the winning child was visited
        assert_eq!(minimax.stats().nodes, 1);
    }

    #[test]
    fn ties_break_row_major() {
        // Every opening move draws, so the first cell wins the tie
        assert_eq!(best_action(&Board::new()).unwrap(), Action::new(0, 0));
    }

    #[test]
    fn terminal_board_is_rejected() {
        for s in ["XXX/OO./...", "XOX/XOO/OXX"] {
            assert!(matches!(best_action(&board(s)), Err(Error::TerminalBoard)));
            assert!(matches!(
                Minimax::new().ranked_actions(&board(s)),
                Err(Error::TerminalBoard)
            ));
            assert!(optimal_actions(&board(s)).is_err());
        }
    }

    #[test]
    fn ranked_actions_cover_every_move() {
        let ranked = Minimax::new().ranked_actions(&board("XX./OO./...")).unwrap();
        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0], (Action::new(0, 2), 1));
        // Giving O the middle row loses
        assert!(ranked.iter().any(|&(_, value)| value == -1));
    }

    #[test]
    fn optimal_openings_are_every_cell() {
        // All nine openings draw under perfect play
        let actions = optimal_actions(&Board::new()).unwrap();
        assert_eq!(actions.len(), 9);
    }

    #[test]
    fn optimal_replies_to_a_corner_are_the_center() {
        let actions = optimal_actions(&board("X........")).unwrap();
        assert_eq!(actions, vec![Action::new(1, 1)]);
    }

    #[test]
    fn stats_accumulate_until_reset() {
        let mut minimax = Minimax::new();
        minimax.best_action(&board("X...O....")).unwrap();
        let first = minimax.stats();
        minimax.best_action(&board("X...O....")).unwrap();
        assert_eq!(minimax.stats().nodes, first.nodes * 2);

        minimax.reset_stats();
        assert_eq!(minimax.stats(), SearchStats::default());

        let mut total = SearchStats::default();
        total += first;
        total += first;
        assert_eq!(total.nodes, first.nodes * 2);
    }
}

//! Board state representation and basic operations

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;
use crate::{Error, Result};

/// Side length of the board
pub const SIZE: usize = 3;

/// Raw cell grid, indexed `[row][col]`
pub type Cells = [[Cell; SIZE]; SIZE];

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// The player owning this mark, if any
    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

impl FromStr for Player {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "x" | "X" => Ok(Player::X),
            "o" | "O" => Ok(Player::O),
            other => Err(Error::InvalidPlayer {
                input: other.to_string(),
            }),
        }
    }
}

/// Result of a board, from the perspective of the game as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    XWins,
    OWins,
    Draw,
    InProgress,
}

impl Outcome {
    /// Whether the game has ended
    pub fn is_finished(self) -> bool {
        self != Outcome::InProgress
    }

    /// The winning player, if any
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::XWins => Some(Player::X),
            Outcome::OWins => Some(Player::O),
            Outcome::Draw | Outcome::InProgress => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Outcome::XWins => "X wins",
            Outcome::OWins => "O wins",
            Outcome::Draw => "draw",
            Outcome::InProgress => "in progress",
        };
        f.write_str(text)
    }
}

/// A move: zero-based `(row, col)` coordinates of the cell to mark.
///
/// Actions order row-major, which is also the order in which
/// [`Board::legal_actions`] yields them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action {
    pub row: usize,
    pub col: usize,
}

impl Action {
    /// Every cell on the board, row-major
    pub const ALL: [Action; 9] = [
        Action::new(0, 0),
        Action::new(0, 1),
        Action::new(0, 2),
        Action::new(1, 0),
        Action::new(1, 1),
        Action::new(1, 2),
        Action::new(2, 0),
        Action::new(2, 1),
        Action::new(2, 2),
    ];

    /// Create an action without checking bounds
    pub const fn new(row: usize, col: usize) -> Self {
        Action { row, col }
    }

    /// Create an action, rejecting coordinates outside the board
    pub fn try_new(row: usize, col: usize) -> Result<Self> {
        let action = Action::new(row, col);
        if action.in_bounds() {
            Ok(action)
        } else {
            Err(Error::OutOfBounds { row, col })
        }
    }

    pub fn in_bounds(&self) -> bool {
        self.row < SIZE && self.col < SIZE
    }

    /// Corner cells
    pub fn is_corner(&self) -> bool {
        (self.row == 0 || self.row == SIZE - 1) && (self.col == 0 || self.col == SIZE - 1)
    }

    pub fn is_center(&self) -> bool {
        self.row == 1 && self.col == 1
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl FromStr for Action {
    type Err = Error;

    /// Parse `"row,col"`, `"row col"` or `"(row, col)"`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidAction {
            input: s.trim().to_string(),
        };

        let cleaned = s.trim().trim_start_matches('(').trim_end_matches(')');
        let parts: Vec<&str> = cleaned
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();

        let [row, col] = parts.as_slice() else {
            return Err(invalid());
        };
        let row: usize = row.parse().map_err(|_| invalid())?;
        let col: usize = col.parse().map_err(|_| invalid())?;

        Action::try_new(row, col)
    }
}

/// A Tic-Tac-Toe position.
///
/// `Board` is a plain `Copy` value: every transition returns a fresh board and
/// leaves its input untouched. The cells are private so that every board in
/// circulation satisfies the turn invariant (X has as many marks as O, or
/// exactly one more), which lets [`Board::current_player`] be infallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Board {
    cells: Cells,
}

/// Count of each piece type on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PieceCount {
    x: usize,
    o: usize,
    empty: usize,
}

/// Returns the starting position: an empty board with X to move.
pub fn initial_state() -> Board {
    Board::new()
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; SIZE]; SIZE],
        }
    }

    /// Create a board from raw cells.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedBoard`] unless X has as many marks as O or
    /// exactly one more.
    ///
    /// # Examples
    ///
    /// ```
    /// use noughts::tictactoe::{Board, Cell, Player};
    ///
    /// let board = Board::from_cells([
    ///     [Cell::X, Cell::Empty, Cell::Empty],
    ///     [Cell::Empty, Cell::O, Cell::Empty],
    ///     [Cell::Empty, Cell::Empty, Cell::Empty],
    /// ])
    /// .unwrap();
    /// assert_eq!(board.current_player(), Player::X);
    ///
    /// let lopsided = [[Cell::O, Cell::Empty, Cell::Empty]; 3];
    /// assert!(Board::from_cells(lopsided).is_err());
    /// ```
    pub fn from_cells(cells: Cells) -> Result<Self> {
        let count = Self::count_pieces(&cells);
        if count.x == count.o || count.x == count.o + 1 {
            Ok(Board { cells })
        } else {
            Err(Error::MalformedBoard {
                x_count: count.x,
                o_count: count.o,
            })
        }
    }

    /// Create a board from a string representation.
    ///
    /// Cells are read row-major. Whitespace and the row separators `/` and `|`
    /// are ignored, so `"XX./OO./..."` and `"XX.OO...."` describe the same
    /// board.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The string does not hold exactly 9 cells
    /// - Any character is not a valid cell representation
    /// - The piece counts break the turn invariant
    pub fn from_string(s: &str) -> Result<Self> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/' && *c != '|')
            .collect();

        if chars.len() != SIZE * SIZE {
            return Err(Error::InvalidBoardLength {
                expected: SIZE * SIZE,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [[Cell::Empty; SIZE]; SIZE];
        for (i, &c) in chars.iter().enumerate() {
            cells[i / SIZE][i % SIZE] =
                Cell::from_char(c).ok_or_else(|| Error::InvalidCellCharacter {
                    character: c,
                    position: i,
                    context: s.to_string(),
                })?;
        }

        Self::from_cells(cells)
    }

    /// Row-major string encoding, e.g. `"XX.OO...."`
    pub fn encode(&self) -> String {
        self.cells.iter().flatten().map(|c| c.to_char()).collect()
    }

    /// Helper: Count pieces on the board.
    fn count_pieces(cells: &Cells) -> PieceCount {
        let mut count = PieceCount {
            x: 0,
            o: 0,
            empty: 0,
        };
        for cell in cells.iter().flatten() {
            match cell {
                Cell::X => count.x += 1,
                Cell::O => count.o += 1,
                Cell::Empty => count.empty += 1,
            }
        }
        count
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    /// Get the cell at an action's coordinates, or `None` when out of bounds
    pub fn get(&self, action: Action) -> Option<Cell> {
        self.cells
            .get(action.row)
            .and_then(|row| row.get(action.col))
            .copied()
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        let count = Self::count_pieces(&self.cells);
        count.x + count.o
    }

    /// The player whose turn it is: O when X has more marks, X otherwise.
    pub fn current_player(&self) -> Player {
        let count = Self::count_pieces(&self.cells);
        if count.x > count.o {
            Player::O
        } else {
            Player::X
        }
    }

    /// Every empty cell, in row-major order.
    ///
    /// Unlike a "moves available in a live game" query this does not look at
    /// whether the game is already decided; it is empty only on a full board.
    pub fn legal_actions(&self) -> BTreeSet<Action> {
        Action::ALL
            .into_iter()
            .filter(|&action| self.get(action) == Some(Cell::Empty))
            .collect()
    }

    /// Mark the cell at `action` for the player to move and return the new board.
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfBounds`] if either coordinate is outside `0..3`
    /// - [`Error::InvalidMove`] if the cell is already occupied
    ///
    /// # Examples
    ///
    /// ```
    /// use noughts::tictactoe::{Action, Board, Cell, Player};
    ///
    /// let board = Board::new();
    /// let next = board.apply(Action::new(1, 1)).unwrap();
    /// assert_eq!(next.get(Action::new(1, 1)), Some(Cell::X));
    /// assert_eq!(next.current_player(), Player::O);
    ///
    /// // The original board is untouched
    /// assert_eq!(board, Board::new());
    /// assert!(next.apply(Action::new(1, 1)).is_err());
    /// ```
    #[must_use = "apply returns a new board; the original is unchanged"]
    pub fn apply(&self, action: Action) -> Result<Board> {
        let Action { row, col } = action;
        match self.get(action) {
            None => Err(Error::OutOfBounds { row, col }),
            Some(Cell::Empty) => {
                let mut next = *self;
                next.cells[row][col] = self.current_player().to_cell();
                Ok(next)
            }
            Some(_) => Err(Error::InvalidMove { row, col }),
        }
    }

    /// Check if a player has three in a row
    pub fn has_won(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, player)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        LineAnalyzer::winner(&self.cells)
    }

    /// Check if no empty cell remains
    pub fn is_full(&self) -> bool {
        Self::count_pieces(&self.cells).empty == 0
    }

    /// Check if the game is over (win or full board)
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Check if the position is a draw (all cells filled, no winner)
    pub fn is_draw(&self) -> bool {
        self.is_full() && self.winner().is_none()
    }

    /// Outcome value: `1` if X has won, `-1` if O has won, `0` otherwise.
    ///
    /// Only meaningful as a final score on terminal boards; an undecided board
    /// also scores `0`.
    pub fn utility(&self) -> i8 {
        match self.winner() {
            Some(Player::X) => 1,
            Some(Player::O) => -1,
            None => 0,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self.winner() {
            Some(Player::X) => Outcome::XWins,
            Some(Player::O) => Outcome::OWins,
            None if self.is_full() => Outcome::Draw,
            None => Outcome::InProgress,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Board::from_string(s)
    }
}

impl TryFrom<String> for Board {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Board::from_string(&value)
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.encode()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
            if i < SIZE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

//! Agents - anything that can pick an action on a board
//!
//! The engine, a random baseline and a human at a terminal all sit behind
//! the same [`Agent`] trait so the arena can pit any two against each other.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use rand::{SeedableRng, random, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    search::{Minimax, SearchStats},
    tictactoe::{Action, Board},
};

/// Unified interface for move selection
pub trait Agent {
    /// Select an action for the side to move on `board`.
    ///
    /// # Errors
    ///
    /// Returns an error if no action can be chosen (terminal board, closed
    /// input, ...).
    fn select_action(&mut self, board: &Board) -> Result<Action>;

    /// Get the agent's name.
    fn name(&self) -> &str;
}

/// Available non-interactive agent kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// Perfect play via minimax
    Minimax,
    /// Uniformly random legal moves
    #[default]
    Random,
}

impl AgentKind {
    /// Creates a boxed agent from the kind
    pub fn into_boxed_agent(self, seed: Option<u64>) -> Box<dyn Agent> {
        match self {
            AgentKind::Minimax => Box::new(MinimaxAgent::new()),
            AgentKind::Random => match seed {
                Some(seed) => Box::new(RandomAgent::with_seed("Random", seed)),
                None => Box::new(RandomAgent::new("Random")),
            },
        }
    }
}

/// Agent playing the minimax-optimal action
#[derive(Debug)]
pub struct MinimaxAgent {
    name: String,
    minimax: Minimax,
}

impl MinimaxAgent {
    pub fn new() -> Self {
        Self::with_name("Minimax")
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            minimax: Minimax::new(),
        }
    }

    /// Search statistics accumulated over every action selected so far
    pub fn stats(&self) -> SearchStats {
        self.minimax.stats()
    }
}

impl Default for MinimaxAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for MinimaxAgent {
    fn select_action(&mut self, board: &Board) -> Result<Action> {
        self.minimax.best_action(board)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Random policy agent (baseline)
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    /// Create a new random agent
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_seed(name, random())
    }

    /// Create a new random agent with a deterministic seed
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn select_action(&mut self, board: &Board) -> Result<Action> {
        if board.is_terminal() {
            return Err(Error::TerminalBoard);
        }
        let actions: Vec<Action> = board.legal_actions().into_iter().collect();
        actions
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::TerminalBoard)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Agent reading actions typed as `row,col` from a line-oriented input
pub struct HumanAgent<R, W> {
    name: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanAgent<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }

    fn prompt(&mut self, board: &Board) -> Result<()> {
        write!(
            self.output,
            "{} to move, enter row,col (0-2): ",
            board.current_player()
        )?;
        self.output.flush()?;
        Ok(())
    }
}

impl HumanAgent<StdinLock<'static>, Stdout> {
    /// Human playing on the process's stdin/stdout
    pub fn stdio(name: impl Into<String>) -> Self {
        Self::new(name, io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Agent for HumanAgent<R, W> {
    fn select_action(&mut self, board: &Board) -> Result<Action> {
        if board.is_terminal() {
            return Err(Error::TerminalBoard);
        }

        let legal = board.legal_actions();
        let mut line = String::new();
        loop {
            self.prompt(board)?;

            line.clear();
            let read = self.input.read_line(&mut line).map_err(|source| Error::Io {
                operation: "read move".to_string(),
                source,
            })?;
            if read == 0 {
                return Err(Error::InputClosed {
                    agent: self.name.clone(),
                });
            }

            match line.parse::<Action>() {
                Ok(action) if legal.contains(&action) => return Ok(action),
                Ok(action) => writeln!(self.output, "Cell {action} is already taken.")?,
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn minimax_agent_takes_the_win() {
        let board = Board::from_string("XX./OO./...").unwrap();
        let mut agent = MinimaxAgent::new();
        assert_eq!(agent.select_action(&board).unwrap(), Action::new(0, 2));
        assert_eq!(agent.name(), "Minimax");
        assert!(agent.stats().nodes > 0);
    }

    #[test]
    fn random_agent_is_deterministic_with_seed() {
        let board = Board::new();
        let mut a = RandomAgent::with_seed("a", 7);
        let mut b = RandomAgent::with_seed("b", 7);
        for _ in 0..10 {
            assert_eq!(
                a.select_action(&board).unwrap(),
                b.select_action(&board).unwrap()
            );
        }
    }

    #[test]
    fn random_agent_only_plays_legal_moves() {
        let board = Board::from_string("XOX/OX./O..").unwrap();
        let legal = board.legal_actions();
        let mut agent = RandomAgent::with_seed("r", 3);
        for _ in 0..50 {
            assert!(legal.contains(&agent.select_action(&board).unwrap()));
        }
    }

    #[test]
    fn random_agent_rejects_finished_games() {
        let board = Board::from_string("XXX/OO./...").unwrap();
        let mut agent = RandomAgent::with_seed("r", 1);
        assert!(matches!(
            agent.select_action(&board),
            Err(Error::TerminalBoard)
        ));
    }

    #[test]
    fn human_agent_reprompts_until_legal() {
        let board = Board::from_string("X........").unwrap();
        let input = Cursor::new("nonsense\n0,0\n5,5\n1 1\n");
        let mut output = Vec::new();
        let action = {
            let mut agent = HumanAgent::new("human", input, &mut output);
            agent.select_action(&board).unwrap()
        };
        assert_eq!(action, Action::new(1, 1));

        let transcript = String::from_utf8(output).unwrap();
        assert_eq!(transcript.matches("O to move").count(), 4);
        assert!(transcript.contains("invalid action 'nonsense'"));
        assert!(transcript.contains("Cell (0, 0) is already taken."));
        assert!(transcript.contains("out of bounds"));
    }

    #[test]
    fn human_agent_reports_closed_input() {
        let mut agent = HumanAgent::new("human", Cursor::new(""), Vec::new());
        assert!(matches!(
            agent.select_action(&Board::new()),
            Err(Error::InputClosed { .. })
        ));
    }

    #[test]
    fn agent_kinds_build_matching_agents() {
        let mut minimax = AgentKind::Minimax.into_boxed_agent(None);
        assert_eq!(minimax.name(), "Minimax");
        let board = Board::from_string("XX./OO./...").unwrap();
        assert_eq!(minimax.select_action(&board).unwrap(), Action::new(0, 2));

        let random = AgentKind::Random.into_boxed_agent(Some(1));
        assert_eq!(random.name(), "Random");
    }
}

//! Configuration for engine evaluation series

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, agents::AgentKind, tictactoe::Player};

/// Configuration for a series of games between the engine and an opponent.
///
/// Missing fields in a config file fall back to their defaults.
///
/// # Examples
///
/// ```
/// use noughts::config::ArenaConfig;
/// use noughts::tictactoe::Player;
///
/// let config = ArenaConfig::default()
///     .with_games(20)
///     .with_seed(42)
///     .with_engine_side(Player::O);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Number of games to play
    pub games: usize,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    /// Side the engine plays
    pub engine_side: Player,
    /// Opponent type
    pub opponent: AgentKind,
    /// Whether to show a progress bar
    pub progress: bool,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            games: 100,
            seed: None,
            engine_side: Player::X,
            opponent: AgentKind::Random,
            progress: true,
        }
    }
}

impl ArenaConfig {
    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, is not valid JSON, or fails
    /// [`ArenaConfig::validate`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config {}", path.display()),
            source,
        })?;
        let config: ArenaConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration describes a playable series.
    pub fn validate(&self) -> Result<()> {
        if self.games == 0 {
            return Err(Error::InvalidConfiguration {
                message: "games must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_engine_side(mut self, side: Player) -> Self {
        self.engine_side = side;
        self
    }

    pub fn with_opponent(mut self, opponent: AgentKind) -> Self {
        self.opponent = opponent;
        self
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }
}

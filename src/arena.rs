//! Playing games between agents
//!
//! [`play_game`] drives two agents from the empty board to a finished game;
//! [`run_series`] repeats that with the engine on a fixed side and tallies
//! the results.

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    Error, Result,
    agents::{Agent, MinimaxAgent},
    config::ArenaConfig,
    search::SearchStats,
    tictactoe::{Game, Outcome, Player},
};

/// Play one game from the empty board, `x` moving first.
///
/// # Errors
///
/// Propagates any agent failure and rejects illegal actions.
pub fn play_game(x: &mut dyn Agent, o: &mut dyn Agent) -> Result<Game> {
    let mut game = Game::new();

    while !game.is_over() {
        let board = game.current_board()?;
        let agent: &mut dyn Agent = match board.current_player() {
            Player::X => &mut *x,
            Player::O => &mut *o,
        };
        let action = agent.select_action(&board)?;
        game.play(action)?;
    }

    debug!(
        x = x.name(),
        o = o.name(),
        outcome = %game.outcome,
        plies = game.moves.len(),
        "game finished"
    );
    Ok(game)
}

/// Counts of finished games from X's and O's point of view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
}

impl Tally {
    /// Count a finished game; unfinished outcomes are ignored
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::XWins => self.x_wins += 1,
            Outcome::OWins => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => {}
        }
    }

    pub fn total(&self) -> usize {
        self.x_wins + self.o_wins + self.draws
    }

    pub fn wins_for(&self, player: Player) -> usize {
        match player {
            Player::X => self.x_wins,
            Player::O => self.o_wins,
        }
    }

    pub fn losses_for(&self, player: Player) -> usize {
        self.wins_for(player.opponent())
    }

    fn rate(&self, count: usize) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            count as f64 / self.total() as f64
        }
    }

    fn summary_for(&self, player: Player) -> String {
        format!(
            "W:{} D:{} L:{}",
            self.wins_for(player),
            self.draws,
            self.losses_for(player)
        )
    }
}

/// Result of a series, from the engine's point of view
#[derive(Debug, Clone, Serialize)]
pub struct SeriesReport {
    pub engine: String,
    pub opponent: String,
    pub engine_side: Player,
    pub seed: Option<u64>,
    pub total_games: usize,
    pub engine_wins: usize,
    pub draws: usize,
    pub engine_losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
    pub tally: Tally,
    pub search: SearchStats,
}

impl SeriesReport {
    fn new(
        config: &ArenaConfig,
        engine: &MinimaxAgent,
        opponent: &dyn Agent,
        tally: Tally,
    ) -> Self {
        let side = config.engine_side;
        Self {
            engine: engine.name().to_string(),
            opponent: opponent.name().to_string(),
            engine_side: side,
            seed: config.seed,
            total_games: tally.total(),
            engine_wins: tally.wins_for(side),
            draws: tally.draws,
            engine_losses: tally.losses_for(side),
            win_rate: tally.rate(tally.wins_for(side)),
            draw_rate: tally.rate(tally.draws),
            loss_rate: tally.rate(tally.losses_for(side)),
            tally,
            search: engine.stats(),
        }
    }
}

fn create_progress(total_games: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new(total_games as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
            .map_err(|e| Error::ProgressBarTemplate {
                message: e.to_string(),
            })?
            .progress_chars("=>-"),
    );
    Ok(pb)
}

/// Play `config.games` games between the engine and `opponent`.
///
/// # Errors
///
/// Returns error if the configuration is invalid or any game fails.
pub fn run_series(
    config: &ArenaConfig,
    engine: &mut MinimaxAgent,
    opponent: &mut dyn Agent,
) -> Result<SeriesReport> {
    config.validate()?;

    let progress = if config.progress {
        Some(create_progress(config.games)?)
    } else {
        None
    };

    let side = config.engine_side;
    let mut tally = Tally::default();
    for _ in 0..config.games {
        let game = match side {
            Player::X => play_game(&mut *engine, &mut *opponent)?,
            Player::O => play_game(&mut *opponent, &mut *engine)?,
        };
        tally.record(game.outcome);

        if let Some(pb) = &progress {
            pb.inc(1);
            pb.set_message(tally.summary_for(side));
        }
    }

    if let Some(pb) = &progress {
        pb.finish_with_message(tally.summary_for(side));
    }

    let report = SeriesReport::new(config, engine, opponent, tally);
    info!(
        engine_side = %side,
        opponent = %report.opponent,
        games = report.total_games,
        wins = report.engine_wins,
        draws = report.draws,
        losses = report.engine_losses,
        "series complete"
    );
    Ok(report)
}

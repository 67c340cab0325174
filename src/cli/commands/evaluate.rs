//! Evaluate command - play the engine against a baseline opponent

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    agents::{AgentKind, MinimaxAgent},
    arena::{SeriesReport, run_series},
    cli::output::{format_number, print_kv, print_section},
    config::ArenaConfig,
    tictactoe::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate the engine against an opponent")]
pub struct EvaluateArgs {
    /// JSON config file; flags below override its values
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Number of games
    #[arg(long, short = 'g')]
    pub games: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Side the engine plays (`x` or `o`)
    #[arg(long)]
    pub engine_side: Option<Player>,

    /// Opponent to play against
    #[arg(long, short = 'o', value_enum)]
    pub opponent: Option<AgentKind>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Export results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl EvaluateArgs {
    /// Merge the optional config file with command-line overrides
    pub fn resolve_config(&self) -> Result<ArenaConfig> {
        let mut config = match &self.config {
            Some(path) => ArenaConfig::from_path(path)?,
            None => ArenaConfig::default(),
        };

        if let Some(games) = self.games {
            config = config.with_games(games);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(side) = self.engine_side {
            config = config.with_engine_side(side);
        }
        if let Some(opponent) = self.opponent {
            config = config.with_opponent(opponent);
        }
        if self.no_progress {
            config = config.with_progress(false);
        }

        config.validate()?;
        Ok(config)
    }
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let config = args.resolve_config()?;

    print_section("Evaluation Configuration");
    print_kv("Opponent", &format!("{:?}", config.opponent));
    print_kv("Engine plays", &config.engine_side.to_string());
    print_kv("Games", &config.games.to_string());
    if let Some(seed) = config.seed {
        print_kv("Seed", &seed.to_string());
    }

    let mut engine = MinimaxAgent::new();
    let mut opponent = config.opponent.into_boxed_agent(config.seed);
    let report = run_series(&config, &mut engine, opponent.as_mut())?;

    print_results(&report);

    if let Some(path) = &args.export {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &report)?;
        println!("\nResults exported to: {}", path.display());
    }

    Ok(())
}

fn print_results(report: &SeriesReport) {
    print_section("Evaluation Results");
    print_kv("Total games", &report.total_games.to_string());
    print_kv(
        "Wins",
        &format!("{} ({:.1}%)", report.engine_wins, report.win_rate * 100.0),
    );
    print_kv(
        "Draws",
        &format!("{} ({:.1}%)", report.draws, report.draw_rate * 100.0),
    );
    print_kv(
        "Losses",
        &format!("{} ({:.1}%)", report.engine_losses, report.loss_rate * 100.0),
    );
    print_kv("Nodes searched", &format_number(report.search.nodes));
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::{NamedTempFile, tempdir};

    use super::*;

    fn args() -> EvaluateArgs {
        EvaluateArgs {
            config: None,
            games: None,
            seed: None,
            engine_side: None,
            opponent: None,
            no_progress: false,
            export: None,
        }
    }

    #[test]
    fn flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "games": 40, "seed": 1, "engine_side": "O" }}"#).unwrap();

        let config = EvaluateArgs {
            config: Some(file.path().to_path_buf()),
            games: Some(5),
            no_progress: true,
            ..args()
        }
        .resolve_config()
        .unwrap();

        assert_eq!(config.games, 5);
        assert_eq!(config.seed, Some(1));
        assert_eq!(config.engine_side, Player::O);
        assert!(!config.progress);
    }

    #[test]
    fn zero_games_flag_is_rejected() {
        let result = EvaluateArgs {
            games: Some(0),
            ..args()
        }
        .resolve_config();
        assert!(result.is_err());
    }

    #[test]
    fn export_writes_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");

        execute(EvaluateArgs {
            games: Some(4),
            seed: Some(3),
            engine_side: Some(Player::O),
            no_progress: true,
            export: Some(path.clone()),
            ..args()
        })
        .unwrap();

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(report["total_games"], 4);
        assert_eq!(report["engine_losses"], 0);
        assert_eq!(report["engine_side"], "O");
        assert_eq!(report["opponent"], "Random");
    }
}

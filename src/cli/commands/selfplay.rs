//! Selfplay command - the engine against itself

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    agents::{Agent, MinimaxAgent},
    cli::output::{format_number, print_kv, print_section, render_board},
    tictactoe::{Board, Game},
};

#[derive(Parser, Debug)]
#[command(about = "Let the engine play both sides")]
pub struct SelfplayArgs {
    /// Starting position (defaults to the empty board)
    #[arg(long)]
    pub board: Option<String>,

    /// Export the finished game as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: SelfplayArgs) -> Result<()> {
    let initial = match &args.board {
        Some(s) => Board::from_string(s)?,
        None => Board::new(),
    };
    let mut game = Game::from_board(initial);
    let mut engine = MinimaxAgent::new();

    print_section("Self-play");
    println!("{}", render_board(&initial));

    while !game.is_over() {
        let board = game.current_board()?;
        let action = engine.select_action(&board)?;
        game.play(action)?;
        println!("\n{} plays {action}", board.current_player());
        println!("{}", render_board(&game.current_board()?));
    }

    println!();
    print_kv("Outcome", &game.outcome.to_string());
    print_kv("Plies", &game.moves.len().to_string());
    print_kv("Nodes searched", &format_number(engine.stats().nodes));

    if let Some(path) = &args.export {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &game)?;
        println!("\nGame exported to: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::tictactoe::Outcome;

    #[test]
    fn exported_game_is_a_draw() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("game.json");
        execute(SelfplayArgs {
            board: Some("X...O....".to_string()),
            export: Some(path.clone()),
        })
        .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let game: Game = serde_json::from_str(&text).unwrap();
        assert_eq!(game.outcome, Outcome::Draw);
        assert_eq!(game.initial.encode(), "X...O....");
        assert_eq!(game.moves.len(), 7);
    }
}

//! Play command - an interactive game against the engine

use anyhow::Result;
use clap::Parser;

use crate::{
    agents::{Agent, HumanAgent, MinimaxAgent},
    cli::output::render_board,
    tictactoe::{Game, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Play against the engine in the terminal")]
pub struct PlayArgs {
    /// Which side you play (`x` moves first)
    #[arg(long, default_value = "x")]
    pub human: Player,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let mut human = HumanAgent::stdio("You");
    let mut engine = MinimaxAgent::new();
    let mut game = Game::new();

    println!("You are {}. Enter moves as row,col.", args.human);

    while !game.is_over() {
        let board = game.current_board()?;
        println!("\n{}\n", render_board(&board));

        let action = if board.current_player() == args.human {
            human.select_action(&board)?
        } else {
            let action = engine.select_action(&board)?;
            println!("Engine plays {action}");
            action
        };
        game.play(action)?;
    }

    println!("\n{}\n", render_board(&game.current_board()?));
    let verdict = match game.outcome.winner() {
        Some(winner) if winner == args.human => "You win!",
        Some(_) => "The engine wins.",
        None => "Draw.",
    };
    println!("{verdict}");

    Ok(())
}

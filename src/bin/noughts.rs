//! noughts CLI - optimal Tic-Tac-Toe from the command line
//!
//! This CLI provides:
//! - Optimal move analysis for any position
//! - Interactive play against the engine
//! - Engine self-play
//! - Evaluation series against baseline opponents

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "noughts")]
#[command(version, about = "Optimal Tic-Tac-Toe via minimax search", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the optimal action on a position
    Best(noughts::cli::commands::best::BestArgs),

    /// Play against the engine
    Play(noughts::cli::commands::play::PlayArgs),

    /// Let the engine play itself
    Selfplay(noughts::cli::commands::selfplay::SelfplayArgs),

    /// Evaluate the engine against an opponent
    Evaluate(noughts::cli::commands::evaluate::EvaluateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    noughts::cli::init_logging(cli.verbose);

    match cli.command {
        Commands::Best(args) => noughts::cli::commands::best::execute(args),
        Commands::Play(args) => noughts::cli::commands::play::execute(args),
        Commands::Selfplay(args) => noughts::cli::commands::selfplay::execute(args),
        Commands::Evaluate(args) => noughts::cli::commands::evaluate::execute(args),
    }
}

//! Best command - find the optimal action on a position

use anyhow::{Result, bail};
use clap::Parser;
use serde::Serialize;
use tracing::warn;

use crate::{
    cli::output::{format_number, print_kv, print_section, render_board},
    search::{Minimax, SearchStats},
    tictactoe::{Action, Board, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Find the optimal action on a position")]
pub struct BestArgs {
    /// Board in row-major order, e.g. "XX./OO./..." ('.' for empty)
    pub board: String,

    /// Also list every equally optimal action
    #[arg(long)]
    pub all: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct BestReport {
    board: Board,
    to_move: Player,
    action: Action,
    value: i8,
    #[serde(skip_serializing_if = "Option::is_none")]
    optimal_actions: Option<Vec<Action>>,
    stats: SearchStats,
}

pub fn execute(args: BestArgs) -> Result<()> {
    let board = Board::from_string(&args.board)?;
    if !board.is_valid() {
        warn!(board = %board.encode(), "position cannot arise from legal play");
    }
    if board.is_terminal() {
        bail!("position is already decided ({})", board.outcome());
    }

    let mut minimax = Minimax::new();
    let decision = minimax.search(&board)?;
    let stats = minimax.stats();
    let optimal_actions = if args.all {
        Some(minimax.optimal_actions(&board)?)
    } else {
        None
    };

    let report = BestReport {
        board,
        to_move: board.current_player(),
        action: decision.action,
        value: decision.value,
        optimal_actions,
        stats,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_section("Optimal Action");
    println!("{}\n", render_board(&board));
    print_kv("To move", &report.to_move.to_string());
    print_kv("Best action", &report.action.to_string());
    print_kv("Value", &describe_value(report.value));
    if let Some(actions) = &report.optimal_actions {
        let listed: Vec<String> = actions.iter().map(Action::to_string).collect();
        print_kv("All optimal", &listed.join(" "));
    }
    print_kv("Nodes", &format_number(stats.nodes));
    print_kv("Cutoffs", &format_number(stats.cutoffs));

    Ok(())
}

fn describe_value(value: i8) -> String {
    let meaning = match value {
        1 => "X wins",
        -1 => "O wins",
        _ => "draw",
    };
    format!("{value:+} ({meaning} with best play)")
}

//! CLI subcommands

pub mod best;
pub mod evaluate;
pub mod play;
pub mod selfplay;

//! CLI infrastructure for the noughts engine
//!
//! This module provides the command-line interface for analysing positions,
//! playing against the engine, and evaluating it against baselines.

use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod output;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug
/// output under `--verbose`. Logs go to stderr so reports on stdout stay clean.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A second initialisation (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

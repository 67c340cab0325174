//! Game-tree search

pub mod minimax;

pub use minimax::{
    Decision, Minimax, SearchStats, best_action, max_value, min_value, optimal_actions,
};

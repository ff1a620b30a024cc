pub mod agent;
pub mod alpha_beta;
pub mod greedy;
pub mod minimax;

pub use agent::{Agent, Algorithm};
pub use alpha_beta::AlphaBeta;
pub use greedy::Greedy;
pub use minimax::Minimax;

use crate::state::StateRef;

/// Outcome of one search: the value steered toward and the state path
/// from the searched node down to the leaf realising that value.
///
/// All engines share the same leaf rule: a node with no materialized
/// children is scored by the heuristic evaluator. On a terminal node the
/// heuristic collapses to the exact score difference, so a search over a
/// fully materialized game returns exact values.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub score: f64,
    pub path: Vec<StateRef>,
}

#![forbid(unsafe_code)]
#![deny(clippy::all)]

pub mod types;
pub mod sequence;
pub mod rng;
pub mod state;

pub mod engine {
    pub mod merge;
    pub mod heuristic;
}

pub mod tree;
pub mod search;
pub mod report;

// Re-exports: stable minimal API surface for external callers
pub use crate::engine::heuristic::{heuristic_score, PATTERN_SCALE};
pub use crate::engine::merge::{merge_pair, merge_rule, MergeOutcome};
pub use crate::rng::{random_sequence, sequence_rng};
pub use crate::search::{Agent, Algorithm, AlphaBeta, Greedy, Minimax, SearchResult};
pub use crate::sequence::Sequence;
pub use crate::state::{GameState, StateKey, StateRef};
pub use crate::tree::{dynamic_depth_limit, DepthPolicy, GameTree, MIN_DYNAMIC_DEPTH};
pub use crate::types::Player;

use std::str::FromStr;

use crate::state::StateRef;

use super::{AlphaBeta, Greedy, Minimax, SearchResult};

/// Engine selection by name, as accepted from CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Minimax,
    AlphaBeta,
    Heuristic,
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Minimax => "minimax",
            Algorithm::AlphaBeta => "alpha_beta",
            Algorithm::Heuristic => "heuristic",
        }
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimax" => Ok(Algorithm::Minimax),
            "alpha_beta" => Ok(Algorithm::AlphaBeta),
            "heuristic" => Ok(Algorithm::Heuristic),
            other => Err(format!(
                "unsupported algorithm '{other}': choose minimax, alpha_beta or heuristic"
            )),
        }
    }
}

/// Computer player facade: one named engine plus its visited-node
/// counter. Construction fails on unknown names, so a live `Agent`
/// always dispatches to a real engine.
#[derive(Debug)]
pub struct Agent {
    engine: Engine,
}

#[derive(Debug)]
enum Engine {
    Minimax(Minimax),
    AlphaBeta(AlphaBeta),
    Greedy(Greedy),
}

impl Agent {
    pub fn new(algorithm: &str) -> Result<Self, String> {
        let engine = match Algorithm::from_str(algorithm)? {
            Algorithm::Minimax => Engine::Minimax(Minimax::new()),
            Algorithm::AlphaBeta => Engine::AlphaBeta(AlphaBeta::new()),
            Algorithm::Heuristic => Engine::Greedy(Greedy::new()),
        };
        Ok(Self { engine })
    }

    pub fn algorithm(&self) -> Algorithm {
        match &self.engine {
            Engine::Minimax(_) => Algorithm::Minimax,
            Engine::AlphaBeta(_) => Algorithm::AlphaBeta,
            Engine::Greedy(_) => Algorithm::Heuristic,
        }
    }

    /// Path from `state` to the leaf the engine steers toward, plus the
    /// leaf's score. The visited-node counter accumulates across calls
    /// until [`reset_counter`] is invoked.
    ///
    /// [`reset_counter`]: Agent::reset_counter
    pub fn get_path(&mut self, state: &StateRef, maximizing: bool) -> (Vec<StateRef>, f64) {
        let SearchResult { score, path } = match &mut self.engine {
            Engine::Minimax(m) => m.search_with_cache(state, maximizing),
            Engine::AlphaBeta(ab) => ab.search(state, maximizing),
            Engine::Greedy(g) => g.search(state, maximizing),
        };
        (path, score)
    }

    pub fn nodes_visited(&self) -> u64 {
        match &self.engine {
            Engine::Minimax(m) => m.nodes_visited(),
            Engine::AlphaBeta(ab) => ab.nodes_visited(),
            Engine::Greedy(g) => g.nodes_visited(),
        }
    }

    pub fn reset_counter(&mut self) {
        match &mut self.engine {
            Engine::Minimax(m) => m.reset_counter(),
            Engine::AlphaBeta(ab) => ab.reset_counter(),
            Engine::Greedy(g) => g.reset_counter(),
        }
    }
}

use std::rc::Rc;

use crate::engine::heuristic::heuristic_score;
use crate::state::StateRef;

use super::minimax::{improves, prepend};
use super::SearchResult;

/// Depth-first minimax with alpha-beta pruning over the materialized
/// graph. Returns the same optimal score as plain [`Minimax`] on the
/// same graph; only the number of visited nodes differs.
///
/// [`Minimax`]: super::Minimax
#[derive(Debug, Default)]
pub struct AlphaBeta {
    nodes_visited: u64,
}

impl AlphaBeta {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn nodes_visited(&self) -> u64 {
        self.nodes_visited
    }

    pub fn reset_counter(&mut self) {
        self.nodes_visited = 0;
    }

    pub fn search(&mut self, state: &StateRef, maximizing: bool) -> SearchResult {
        self.search_window(state, maximizing, f64::NEG_INFINITY, f64::INFINITY)
    }

    fn search_window(
        &mut self,
        state: &StateRef,
        maximizing: bool,
        mut alpha: f64,
        mut beta: f64,
    ) -> SearchResult {
        self.nodes_visited += 1;
        let node = state.borrow();
        let Some(children) = node.children.clone() else {
            return SearchResult {
                score: heuristic_score(&node),
                path: vec![Rc::clone(state)],
            };
        };
        drop(node);

        let mut best: Option<SearchResult> = None;
        for child in &children {
            let result = self.search_window(child, !maximizing, alpha, beta);
            if improves(&best, result.score, maximizing) {
                best = Some(prepend(state, result));
            }
            if let Some(b) = &best {
                if maximizing {
                    alpha = alpha.max(b.score);
                } else {
                    beta = beta.min(b.score);
                }
            }
            if beta <= alpha {
                break;
            }
        }
        best.unwrap_or_else(|| SearchResult {
            score: heuristic_score(&state.borrow()),
            path: vec![Rc::clone(state)],
        })
    }
}

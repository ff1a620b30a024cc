use std::rc::Rc;

use crate::engine::heuristic::heuristic_score;
use crate::state::StateRef;

use super::minimax::prepend;
use super::SearchResult;

/// One-ply greedy descent: scores the immediate children with the
/// heuristic, follows the extremal one for the player on turn, flips the
/// flag, repeats. Linear in the path length; makes no optimality claim.
/// The returned score is the heuristic value of the reached leaf.
#[derive(Debug, Default)]
pub struct Greedy {
    nodes_visited: u64,
}

impl Greedy {
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
        self.nodes_visited += 1;
        let node = state.borrow();
        let Some(children) = node.children.clone() else {
            return SearchResult {
                score: heuristic_score(&node),
                path: vec![Rc::clone(state)],
            };
        };
        drop(node);

        let mut best: Option<(f64, StateRef)> = None;
        for child in &children {
            let score = heuristic_score(&child.borrow());
            let better = match &best {
                None => true,
                Some((b, _)) => {
                    if maximizing {
                        score > *b
                    } else {
                        score < *b
                    }
                }
            };
            if better {
                best = Some((score, Rc::clone(child)));
            }
        }
        let Some((_, chosen)) = best else {
            return SearchResult {
                score: heuristic_score(&state.borrow()),
                path: vec![Rc::clone(state)],
            };
        };
        let tail = self.search(&chosen, !maximizing);
        prepend(state, tail)
    }
}

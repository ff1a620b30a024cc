use std::hash::BuildHasherDefault;
use std::rc::Rc;

use hashbrown::HashMap as HbHashMap;

use crate::engine::heuristic::heuristic_score;
use crate::state::{StateKey, StateRef};

use super::SearchResult;

type FastHasher = BuildHasherDefault<ahash::AHasher>;
type Cache = HbHashMap<(StateKey, bool), SearchResult, FastHasher>;

/// Exhaustive minimax over the materialized graph.
///
/// Ties break toward the first child encountered, which together with
/// the builder's deterministic child ordering makes results reproducible.
#[derive(Debug, Default)]
pub struct Minimax {
    nodes_visited: u64,
}

impl Minimax {
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

    /// Plain recursion: every reachable (node, flag) pair is walked, so
    /// shared subgraphs are re-visited once per referencing path.
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

        let mut best: Option<SearchResult> = None;
        for child in &children {
            let result = self.search(child, !maximizing);
            if improves(&best, result.score, maximizing) {
                best = Some(prepend(state, result));
            }
        }
        best.unwrap_or_else(|| SearchResult {
            score: heuristic_score(&state.borrow()),
            path: vec![Rc::clone(state)],
        })
    }

    /// Memoised variant: the cache lives only for this call and is keyed
    /// by (state triple, flag). Within one rooted graph all layers have
    /// distinct sequence lengths, so the triple identifies the node.
    pub fn search_with_cache(&mut self, state: &StateRef, maximizing: bool) -> SearchResult {
        let mut cache = Cache::with_hasher(FastHasher::default());
        self.search_cached(state, maximizing, &mut cache)
    }

    fn search_cached(
        &mut self,
        state: &StateRef,
        maximizing: bool,
        cache: &mut Cache,
    ) -> SearchResult {
        let key = (state.borrow().key(), maximizing);
        if let Some(hit) = cache.get(&key) {
            return hit.clone();
        }
        self.nodes_visited += 1;

        let node = state.borrow();
        let Some(children) = node.children.clone() else {
            let result = SearchResult {
                score: heuristic_score(&node),
                path: vec![Rc::clone(state)],
            };
            drop(node);
            cache.insert(key, result.clone());
            return result;
        };
        drop(node);

        let mut best: Option<SearchResult> = None;
        for child in &children {
            let result = self.search_cached(child, !maximizing, cache);
            if improves(&best, result.score, maximizing) {
                best = Some(prepend(state, result));
            }
        }
        let result = best.unwrap_or_else(|| SearchResult {
            score: heuristic_score(&state.borrow()),
            path: vec![Rc::clone(state)],
        });
        cache.insert(key, result.clone());
        result
    }
}

#[inline]
pub(super) fn improves(best: &Option<SearchResult>, score: f64, maximizing: bool) -> bool {
    match best {
        None => true,
        Some(b) => {
            if maximizing {
                score > b.score
            } else {
                score < b.score
            }
        }
    }
}

#[inline]
pub(super) fn prepend(state: &StateRef, result: SearchResult) -> SearchResult {
    let mut path = Vec::with_capacity(result.path.len() + 1);
    path.push(Rc::clone(state));
    path.extend(result.path);
    SearchResult {
        score: result.score,
        path,
    }
}

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::sequence::Sequence;

/// Shared handle to a node in the materialized game graph. Several
/// parents within one layer may point at the same canonical child.
pub type StateRef = Rc<RefCell<GameState>>;

/// Value identity of a state: the triple that layer canonicalization and
/// the search memo caches key on. Object identity stays `Rc::ptr_eq`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey {
    pub sequence: Sequence,
    pub score_player1: i32,
    pub score_player2: i32,
}

/// One position of the merge game.
///
/// `children` is `None` until the tree builder expands the node; a
/// terminal state (single remaining digit) never acquires children. An
/// expanded non-terminal state always holds at least one child.
#[derive(Debug, Clone)]
pub struct GameState {
    pub sequence: Sequence,
    pub score_player1: i32,
    pub score_player2: i32,
    pub children: Option<Vec<StateRef>>,
}

impl GameState {
    #[inline]
    pub fn new(sequence: Sequence, score_player1: i32, score_player2: i32) -> Self {
        Self {
            sequence,
            score_player1,
            score_player2,
            children: None,
        }
    }

    pub fn into_shared(self) -> StateRef {
        Rc::new(RefCell::new(self))
    }

    /// Terminal once a single digit remains. Distinct from "children not
    /// yet expanded", which is a builder concern.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.sequence.len() == 1
    }

    #[inline]
    pub fn score_diff(&self) -> i32 {
        self.score_player1 - self.score_player2
    }

    pub fn key(&self) -> StateKey {
        StateKey {
            sequence: self.sequence.clone(),
            score_player1: self.score_player1,
            score_player2: self.score_player2,
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Seq: {} | Score (P1:P2): {}:{}",
            self.sequence, self.score_player1, self.score_player2
        )
    }
}

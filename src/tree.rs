use std::hash::BuildHasherDefault;
use std::rc::Rc;

use hashbrown::{HashMap as HbHashMap, HashSet as HbHashSet};

use crate::engine::merge::merge_pair;
use crate::rng::random_sequence;
use crate::sequence::Sequence;
use crate::state::{GameState, StateKey, StateRef};
use crate::types::Player;

type FastHasher = BuildHasherDefault<ahash::AHasher>;
type LayerMap = HbHashMap<StateKey, StateRef, FastHasher>;
type KeySet = HbHashSet<StateKey, FastHasher>;

/// Floor of the dynamic lookahead schedule.
pub const MIN_DYNAMIC_DEPTH: usize = 3;

/// Lookahead horizon for a position with `remaining` digits left: half
/// the remaining length plus two, clamped to `[3, remaining]`.
/// Non-decreasing in `remaining` and never past the end of the game.
#[inline]
pub fn dynamic_depth_limit(remaining: usize) -> usize {
    (remaining / 2 + 2).max(MIN_DYNAMIC_DEPTH).min(remaining)
}

/// How far ahead of the current state the graph is materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthPolicy {
    /// Same horizon for the whole game.
    Fixed(usize),
    /// Recomputed from the remaining length before every expansion.
    Dynamic,
}

impl DepthPolicy {
    #[inline]
    pub fn limit_for(self, remaining: usize) -> usize {
        match self {
            DepthPolicy::Fixed(limit) => limit,
            DepthPolicy::Dynamic => dynamic_depth_limit(remaining),
        }
    }
}

/// Layered, deduplicated game graph with a movable current pointer.
///
/// The builder keeps a lookahead window of expanded layers ahead of
/// `current_state`. Within one layer, distinct node objects always carry
/// distinct (sequence, score, score) triples: children produced by
/// different parents are rewritten to one canonical object per triple.
/// Advancing prunes the abandoned siblings, which frees their subtrees.
pub struct GameTree {
    root: StateRef,
    current_state: StateRef,
    current_depth: usize,
    policy: DepthPolicy,
}

impl GameTree {
    /// Build from an explicit starting sequence of `'0'`/`'1'` digits.
    pub fn from_sequence(sequence: &str, policy: DepthPolicy) -> Result<Self, String> {
        let seq = Sequence::parse(sequence)?;
        Self::with_root(seq, policy)
    }

    /// Build from a seeded random sequence of the given length.
    pub fn random(length: usize, seed: u64, policy: DepthPolicy) -> Result<Self, String> {
        if length == 0 {
            return Err("sequence length must be positive".to_string());
        }
        Self::with_root(random_sequence(length, seed), policy)
    }

    fn with_root(sequence: Sequence, policy: DepthPolicy) -> Result<Self, String> {
        if policy == DepthPolicy::Fixed(0) {
            return Err("depth limit must be at least 1".to_string());
        }
        let root = GameState::new(sequence, 0, 0).into_shared();
        let mut tree = Self {
            current_state: Rc::clone(&root),
            root,
            current_depth: 0,
            policy,
        };
        tree.build_lookahead();
        Ok(tree)
    }

    #[inline]
    pub fn root(&self) -> &StateRef {
        &self.root
    }

    #[inline]
    pub fn current_state(&self) -> &StateRef {
        &self.current_state
    }

    #[inline]
    pub fn current_depth(&self) -> usize {
        self.current_depth
    }

    #[inline]
    pub fn policy(&self) -> DepthPolicy {
        self.policy
    }

    /// Player on turn at the current state.
    #[inline]
    pub fn current_player(&self) -> Player {
        Player::from_depth(self.current_depth)
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.current_state.borrow().is_terminal()
    }

    /// Advance to a node that must already be among the current state's
    /// children (object identity, not value equality). The abandoned
    /// siblings are pruned and the lookahead window is rebuilt.
    /// On error nothing is mutated.
    pub fn advance_by_child(&mut self, node: &StateRef) -> Result<(), String> {
        let is_child = self
            .current_state
            .borrow()
            .children
            .as_ref()
            .is_some_and(|kids| kids.iter().any(|c| Rc::ptr_eq(c, node)));
        if !is_child {
            return Err("given node is not a child of the current state".to_string());
        }
        self.current_state.borrow_mut().children = Some(vec![Rc::clone(node)]);
        self.current_state = Rc::clone(node);
        self.current_depth += 1;
        self.build_lookahead();
        Ok(())
    }

    /// Advance by a merge index into the current sequence. The resulting
    /// state is matched against the materialized children so the shared
    /// canonical object is taken, then delegates to [`advance_by_child`].
    ///
    /// [`advance_by_child`]: GameTree::advance_by_child
    pub fn advance_by_index(&mut self, index: usize) -> Result<(), String> {
        let computed = merge_pair(&self.current_state.borrow(), index, self.current_player())?;
        let key = computed.key();
        let existing = self
            .current_state
            .borrow()
            .children
            .as_ref()
            .and_then(|kids| kids.iter().find(|c| c.borrow().key() == key).cloned());
        let node = existing.unwrap_or_else(|| computed.into_shared());
        self.advance_by_child(&node)
    }

    /// Materialize the lookahead window ahead of the current state.
    ///
    /// Breadth-first over layers: expand every pending node of the layer
    /// (per-parent dedup, first seen wins), then canonicalize across
    /// parents so each triple maps to one shared object. Already-expanded
    /// nodes are skipped, so re-running after an advance only grows the
    /// new frontier.
    fn build_lookahead(&mut self) {
        let limit = self
            .policy
            .limit_for(self.current_state.borrow().sequence.len());
        let mut layer: Vec<StateRef> = vec![Rc::clone(&self.current_state)];
        for ply in 0..limit {
            let player = Player::from_depth(self.current_depth + ply);
            for node in &layer {
                let pending = {
                    let n = node.borrow();
                    !n.is_terminal() && n.children.is_none()
                };
                if pending {
                    let kids = expand(node, player);
                    node.borrow_mut().children = Some(kids);
                }
            }
            layer = dedup_layer(&layer);
            if layer.is_empty() {
                break;
            }
        }
    }
}

/// Ordered children of one parent, one candidate per merge index,
/// dropping duplicate triples within the parent (first seen wins).
fn expand(parent: &StateRef, player: Player) -> Vec<StateRef> {
    let parent = parent.borrow();
    let upper = parent.sequence.len().saturating_sub(1);
    let mut seen: KeySet = KeySet::with_hasher(FastHasher::default());
    let mut children = Vec::with_capacity(upper);
    for index in 0..upper {
        if let Ok(child) = merge_pair(&parent, index, player) {
            if seen.insert(child.key()) {
                children.push(child.into_shared());
            }
        }
    }
    children
}

/// Canonicalize one child layer across all parents: the first object
/// seen for a triple becomes canonical, and later duplicates in other
/// parents' child lists are rewritten to it. Returns the canonical nodes
/// of the next layer in first-seen order.
fn dedup_layer(layer: &[StateRef]) -> Vec<StateRef> {
    let mut canon: LayerMap = LayerMap::with_hasher(FastHasher::default());
    let mut order: Vec<StateRef> = Vec::new();
    for parent in layer {
        let child_list = match parent.borrow().children.clone() {
            Some(kids) => kids,
            None => continue,
        };
        let mut rewrites: Vec<(usize, StateRef)> = Vec::new();
        for (i, child) in child_list.iter().enumerate() {
            let key = child.borrow().key();
            match canon.get(&key) {
                None => {
                    canon.insert(key, Rc::clone(child));
                    order.push(Rc::clone(child));
                }
                Some(canonical) => {
                    if !Rc::ptr_eq(canonical, child) {
                        rewrites.push((i, Rc::clone(canonical)));
                    }
                }
            }
        }
        if !rewrites.is_empty() {
            let mut parent_mut = parent.borrow_mut();
            if let Some(kids) = parent_mut.children.as_mut() {
                for (i, canonical) in rewrites {
                    kids[i] = canonical;
                }
            }
        }
    }
    order
}

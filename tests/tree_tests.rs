use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use bitmerge::{
    dynamic_depth_limit, merge_pair, random_sequence, DepthPolicy, GameState, GameTree, Player,
    Sequence, StateRef,
};

type NodeId = *const RefCell<GameState>;

/// Distinct node objects per level, breadth-first from `root`.
fn levels(root: &StateRef) -> Vec<Vec<StateRef>> {
    let mut out = Vec::new();
    let mut level: Vec<StateRef> = vec![Rc::clone(root)];
    while !level.is_empty() {
        out.push(level.clone());
        let mut next: Vec<StateRef> = Vec::new();
        let mut seen: HashSet<NodeId> = HashSet::new();
        for node in &level {
            if let Some(kids) = node.borrow().children.as_ref() {
                for child in kids {
                    if seen.insert(Rc::as_ptr(child)) {
                        next.push(Rc::clone(child));
                    }
                }
            }
        }
        level = next;
    }
    out
}

#[test]
fn expansion_of_0000_yields_three_deduped_children() {
    let tree = GameTree::from_sequence("0000", DepthPolicy::Fixed(1)).expect("tree builds");
    let root = tree.root().borrow();
    let kids = root.children.as_ref().expect("root expanded");
    // Three merge indices, all producing (0,0) pairs, but the triples
    // differ by merge position: 100, 010, 001, each at score 1:0.
    assert_eq!(kids.len(), 3);
    let seqs: Vec<String> = kids
        .iter()
        .map(|c| c.borrow().sequence.to_string())
        .collect();
    assert_eq!(seqs, vec!["100", "010", "001"]);
    for child in kids {
        let c = child.borrow();
        assert_eq!(c.sequence.len(), 3);
        assert_eq!((c.score_player1, c.score_player2), (1, 0));
    }
}

#[test]
fn children_are_ordered_by_merge_index() {
    let tree = GameTree::from_sequence("011010", DepthPolicy::Fixed(1)).expect("tree builds");
    let root = tree.root().borrow();
    let kids = root.children.as_ref().expect("root expanded");
    // One candidate per merge index, in index order.
    assert_eq!(kids.len(), 5);
    for (index, child) in kids.iter().enumerate() {
        let expected = merge_pair(&root, index, Player::One).expect("legal index");
        assert_eq!(child.borrow().key(), expected.key());
    }
}

#[test]
fn layer_dedup_shares_one_object_across_parents() {
    let tree = GameTree::from_sequence("0000", DepthPolicy::Fixed(4)).expect("tree builds");
    let kids = tree
        .root()
        .borrow()
        .children
        .clone()
        .expect("root expanded");
    // "11" at 1:1 is reachable from both "100" (index 1) and "001"
    // (index 0); canonicalization must make that a single shared object.
    let find_11 = |parent: &StateRef| -> StateRef {
        parent
            .borrow()
            .children
            .as_ref()
            .expect("expanded")
            .iter()
            .find(|c| c.borrow().sequence.to_string() == "11")
            .cloned()
            .expect("child 11 present")
    };
    let from_100 = find_11(&kids[0]);
    let from_001 = find_11(&kids[2]);
    assert!(Rc::ptr_eq(&from_100, &from_001));
}

#[test]
fn no_duplicate_triples_within_any_layer() {
    let tree = GameTree::from_sequence("0101101", DepthPolicy::Fixed(6)).expect("tree builds");
    for level in levels(tree.root()) {
        let mut keys = HashSet::new();
        for node in &level {
            assert!(
                keys.insert(node.borrow().key()),
                "two distinct objects share a triple within one layer"
            );
        }
    }
}

#[test]
fn terminal_states_never_acquire_children() {
    let tree = GameTree::from_sequence("1", DepthPolicy::Fixed(5)).expect("tree builds");
    assert!(tree.is_finished());
    assert!(tree.current_state().borrow().children.is_none());

    let deep = GameTree::from_sequence("0110", DepthPolicy::Fixed(4)).expect("tree builds");
    for level in levels(deep.root()) {
        for node in level {
            let n = node.borrow();
            if n.is_terminal() {
                assert!(n.children.is_none());
            } else {
                assert!(n.children.as_ref().is_some_and(|k| !k.is_empty()));
            }
        }
    }
}

#[test]
fn advance_by_child_rejects_foreign_node() {
    let mut tree = GameTree::from_sequence("0101", DepthPolicy::Fixed(3)).expect("tree builds");
    // Value-equal copy of a real child, but a different object.
    let real = tree.root().borrow().children.as_ref().expect("expanded")[0].clone();
    let copy = real.borrow().clone().into_shared();
    assert!(tree.advance_by_child(&copy).is_err());
    // No partial mutation on failure.
    assert_eq!(tree.current_depth(), 0);
    assert_eq!(
        tree.root().borrow().children.as_ref().map(Vec::len),
        Some(3)
    );
}

#[test]
fn advance_by_child_prunes_siblings_and_rebuilds_lookahead() {
    let mut tree = GameTree::from_sequence("010110", DepthPolicy::Fixed(2)).expect("tree builds");
    let chosen = tree.root().borrow().children.as_ref().expect("expanded")[1].clone();
    tree.advance_by_child(&chosen).expect("advance succeeds");

    assert_eq!(tree.current_depth(), 1);
    assert_eq!(tree.current_player(), Player::Two);
    assert!(Rc::ptr_eq(tree.current_state(), &chosen));

    // Root now holds the taken branch only.
    let root_kids = tree.root().borrow().children.clone().expect("expanded");
    assert_eq!(root_kids.len(), 1);
    assert!(Rc::ptr_eq(&root_kids[0], &chosen));

    // Window rebuilt two plies ahead of the new current state.
    let grandkids = chosen.borrow().children.clone().expect("expanded");
    assert!(grandkids
        .iter()
        .all(|g| g.borrow().children.as_ref().is_some_and(|k| !k.is_empty())));
}

#[test]
fn advance_by_index_reuses_the_canonical_child() {
    let mut tree = GameTree::from_sequence("0110101", DepthPolicy::Fixed(3)).expect("tree builds");
    let before = tree.current_state().borrow().clone();
    let kids = tree.current_state().borrow().children.clone().expect("expanded");
    let expected = merge_pair(&before, 2, Player::One).expect("legal index");

    tree.advance_by_index(2).expect("advance succeeds");

    let current = tree.current_state().borrow();
    assert_eq!(current.key(), expected.key());
    drop(current);
    assert_eq!(tree.current_depth(), 1);
    // The advanced-to node is one of the previously materialized
    // children, not a fresh object.
    assert!(kids.iter().any(|c| Rc::ptr_eq(c, tree.current_state())));
}

#[test]
fn advance_by_index_out_of_range_fails_cleanly() {
    let mut tree = GameTree::from_sequence("0101", DepthPolicy::Fixed(3)).expect("tree builds");
    assert!(tree.advance_by_index(3).is_err());
    assert_eq!(tree.current_depth(), 0);
    assert_eq!(
        tree.root().borrow().children.as_ref().map(Vec::len),
        Some(3)
    );
}

#[test]
fn playout_length_equals_sequence_shrink() {
    let mut tree = GameTree::random(9, 7, DepthPolicy::Fixed(8)).expect("tree builds");
    let mut moves = 0usize;
    while !tree.is_finished() {
        let len_before = tree.current_state().borrow().sequence.len();
        tree.advance_by_index(0).expect("index 0 always legal");
        moves += 1;
        assert_eq!(tree.current_state().borrow().sequence.len(), len_before - 1);
    }
    assert_eq!(moves, 8);
    assert_eq!(tree.current_depth(), 8);
    assert_eq!(tree.current_state().borrow().sequence.len(), 1);
}

#[test]
fn dynamic_depth_schedule_is_clamped_and_monotone() {
    assert_eq!(dynamic_depth_limit(1), 1);
    assert_eq!(dynamic_depth_limit(2), 2);
    assert_eq!(dynamic_depth_limit(3), 3);
    assert_eq!(dynamic_depth_limit(4), 4);
    assert_eq!(dynamic_depth_limit(6), 5);
    assert_eq!(dynamic_depth_limit(15), 9);

    let mut prev = 0;
    for remaining in 1..=40 {
        let limit = dynamic_depth_limit(remaining);
        assert!(limit >= prev, "schedule must be non-decreasing");
        assert!(limit <= remaining, "never past the end of the game");
        if remaining >= 3 {
            assert!(limit >= 3, "floor of three while the game allows it");
        }
        prev = limit;
    }
}

#[test]
fn dynamic_policy_plays_to_the_end() {
    let mut tree = GameTree::random(12, 3, DepthPolicy::Dynamic).expect("tree builds");
    while !tree.is_finished() {
        assert!(tree.current_state().borrow().children.is_some());
        tree.advance_by_index(0).expect("index 0 always legal");
    }
    assert_eq!(tree.current_depth(), 11);
}

#[test]
fn random_sequences_are_seeded_and_reproducible() {
    assert_eq!(
        random_sequence(20, 7).to_string(),
        random_sequence(20, 7).to_string()
    );
    assert_ne!(
        random_sequence(24, 7).to_string(),
        random_sequence(24, 8).to_string()
    );
    assert_eq!(random_sequence(5, 1).len(), 5);
    assert!(Sequence::parse(&random_sequence(16, 2).to_string()).is_ok());
}

#[test]
fn construction_rejects_bad_input() {
    assert!(GameTree::from_sequence("", DepthPolicy::Fixed(3)).is_err());
    assert!(GameTree::from_sequence("01a1", DepthPolicy::Fixed(3)).is_err());
    assert!(GameTree::random(0, 1, DepthPolicy::Fixed(3)).is_err());
    assert!(GameTree::from_sequence("0101", DepthPolicy::Fixed(0)).is_err());
}

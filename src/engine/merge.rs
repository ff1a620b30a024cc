use crate::state::GameState;
use crate::types::Player;

/// Result of merging one adjacent pair: the replacement digit and the
/// score delta credited to the player on turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    pub digit: u8,
    pub delta: i32,
}

/// Fixed transition table:
/// 00 -> 1 (+1), 01 -> 0 (-1), 10 -> 1 (-1), 11 -> 0 (+1).
#[inline]
pub fn merge_rule(pair: (u8, u8)) -> MergeOutcome {
    match pair {
        (0, 0) => MergeOutcome { digit: 1, delta: 1 },
        (0, 1) => MergeOutcome { digit: 0, delta: -1 },
        (1, 0) => MergeOutcome { digit: 1, delta: -1 },
        // (1, 1)
        _ => MergeOutcome { digit: 0, delta: 1 },
    }
}

/// Apply one merge as a pure transform: validates the index, then
/// returns the child state with exactly one score changed by the rule's
/// delta. The parent is never mutated.
pub fn merge_pair(parent: &GameState, index: usize, player: Player) -> Result<GameState, String> {
    let Some(pair) = parent.sequence.pair_at(index) else {
        return Err(format!(
            "invalid merge index {index} for sequence {}",
            parent.sequence
        ));
    };
    let outcome = merge_rule(pair);
    let sequence = parent.sequence.merged(index, outcome.digit);
    let (score_player1, score_player2) = match player {
        Player::One => (parent.score_player1 + outcome.delta, parent.score_player2),
        Player::Two => (parent.score_player1, parent.score_player2 + outcome.delta),
    };
    Ok(GameState::new(sequence, score_player1, score_player2))
}

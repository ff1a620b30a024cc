use crate::state::GameState;

/// Weight of the pattern correction relative to the raw score
/// difference. Small enough that the correction only orders states whose
/// base scores tie.
pub const PATTERN_SCALE: f64 = 0.1;

/// Position evaluation from player one's perspective.
///
/// Base is the signed score difference; the correction counts length-3
/// patterns that tend to produce favourable merges, minus a penalty when
/// the sequence holds exactly one mergeable double ("00" or "11").
/// On a terminal state the correction vanishes and the value equals the
/// exact score difference.
pub fn heuristic_score(state: &GameState) -> f64 {
    let seq = &state.sequence;
    let p001 = seq.count_pattern(&[0, 0, 1]) as i64;
    let p010 = seq.count_pattern(&[0, 1, 0]) as i64;
    let p011 = seq.count_pattern(&[0, 1, 1]) as i64;
    let p100 = seq.count_pattern(&[1, 0, 0]) as i64;
    let p101 = seq.count_pattern(&[1, 0, 1]) as i64;
    let p110 = seq.count_pattern(&[1, 1, 0]) as i64;

    let p00 = seq.count_pattern(&[0, 0]) as i64;
    let p11 = seq.count_pattern(&[1, 1]) as i64;
    let lone_pair = i64::from(p00 + p11 == 1);

    let correction = p001 - p010 + p011 + p100 - p101 + p110 - lone_pair;
    f64::from(state.score_diff()) + PATTERN_SCALE * correction as f64
}

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg64;

use crate::sequence::Sequence;

/// Deterministic RNG factory for initial-sequence generation.
///
/// Uses the PCG 64-bit generator (rand_pcg::Pcg64); the returned RNG is
/// reproducible across runs when seeds are equal.
#[inline]
pub fn sequence_rng(seed: u64) -> impl Rng {
    Pcg64::seed_from_u64(seed)
}

/// Uniform random binary sequence of the given length. Equal
/// `(length, seed)` inputs always produce the same sequence.
pub fn random_sequence(length: usize, seed: u64) -> Sequence {
    let mut rng = sequence_rng(seed);
    Sequence::from_digits((0..length).map(|_| u8::from(rng.random_bool(0.5))).collect())
}

//! Deterministic seed derivation.
//!
//! Every random choice in the planner (synthetic fares, synthetic weather,
//! tip shuffling) draws from a `ChaCha8Rng` seeded from an explicit base
//! seed plus the inputs the choice depends on. The same inputs always give
//! the same stream, whatever order work happens to run in.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Mix a base seed with a sequence of byte strings (FNV-1a).
pub fn derive_seed(base: u64, parts: &[&[u8]]) -> u64 {
    let mut hash = FNV_OFFSET ^ base;
    for part in parts {
        for &byte in *part {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        // Separator so ["AB", "C"] and ["A", "BC"] differ.
        hash ^= 0xff;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// An RNG seeded from `base` and `parts`.
pub fn rng_for(base: u64, parts: &[&[u8]]) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_seed(base, parts))
}

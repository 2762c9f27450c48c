//! Per-replicate random number streams.
//!
//! Every replicate `i` gets its own generator seeded from
//! `counter_rng_seed(seed, i)`. Replicate values therefore depend only on the
//! master seed and the replicate index, never on which worker ran them or in
//! what order.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::constants::SPLITMIX_GAMMA;

/// Derive an independent 64-bit seed for replicate `counter`.
///
/// SplitMix64 finaliser applied to `seed + (counter + 1)·γ`, so consecutive
/// counters land far apart and counter 0 does not reproduce the master seed.
pub fn counter_rng_seed(seed: u64, counter: u64) -> u64 {
    let mut z = seed.wrapping_add(counter.wrapping_add(1).wrapping_mul(SPLITMIX_GAMMA));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Generator for replicate `index` under master `seed`.
pub fn replicate_rng(seed: u64, index: usize) -> Xoshiro256PlusPlus {
    Xoshiro256PlusPlus::seed_from_u64(counter_rng_seed(seed, index as u64))
}

/// Fresh master seed from OS entropy, used when the caller does not supply
/// one.
pub fn entropy_seed() -> u64 {
    rand::random()
}

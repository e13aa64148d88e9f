//! World seed selection and derived sub-seeds.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::ops::Range;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Range random world seeds are drawn from.
pub const SEED_RANGE: Range<u32> = 10_000..100_000;

/// Returns `configured` if set, otherwise draws a fresh seed from
/// [`SEED_RANGE`].
pub fn resolve_seed<R: Rng + ?Sized>(configured: Option<u32>, rng: &mut R) -> u32 {
    configured.unwrap_or_else(|| rng.random_range(SEED_RANGE))
}

/// Derive a u64 seed for a named consumer (placement, scripted input, ...)
/// from the world seed.
///
/// Uses SipHash (via std's `DefaultHasher`) so each stream is well
/// distributed yet reproducible for the same world seed.
pub fn derive_seed(world_seed: u32, stream: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    world_seed.hash(&mut hasher);
    stream.hash(&mut hasher);
    hasher.finish()
}

/// Deterministic RNG for a named stream of a world.
pub fn stream_rng(world_seed: u32, stream: &str) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_seed(world_seed, stream))
}

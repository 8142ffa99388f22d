//! Seedable RNG construction shared by all runners.
//!
//! Every run owns exactly one sequential-access random stream. Callbacks
//! receive it as a `&mut dyn RngCore` trailing argument and must not be
//! invoked concurrently against the same stream.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic RNG from a seed.
///
/// Runs configured with the same seed replay the same random stream.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

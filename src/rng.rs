//! The world's single named RNG stream. Seeded through `construct`/`reset`
//! only; its state is part of the world's identity for hashing (§5).
//!
//! `ChaCha8Rng` is used rather than `rand::thread_rng`/the platform RNG
//! because it is a pure, portable PRNG: the same seed produces the same
//! stream on every platform and architecture, which bit-identical replay
//! requires.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub struct WorldRng {
    seed: u64,
    draws: u64,
    inner: ChaCha8Rng,
}

impl WorldRng {
    pub fn new(seed: u64) -> Self {
        WorldRng {
            seed,
            draws: 0,
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Rebuilds a stream that has drawn exactly `draws` u64s from `seed`.
    /// Used to restore RNG identity from a snapshot.
    pub fn from_fingerprint(seed: u64, draws: u64) -> Self {
        let mut rng = WorldRng::new(seed);
        for _ in 0..draws {
            rng.inner.next_u64();
        }
        rng.draws = draws;
        rng
    }

    /// Draws the next 64 bits from the stream. Reserved for future
    /// stochastic phases; the current kernel draws nothing (all tie-breaks
    /// in §4.4/§4.5 are deterministic, not random).
    pub fn next_u64(&mut self) -> u64 {
        self.draws += 1;
        self.inner.next_u64()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Compact fingerprint of RNG identity, folded into `state_hash`.
    pub fn fingerprint(&self) -> (u64, u64) {
        (self.seed, self.draws)
    }
}

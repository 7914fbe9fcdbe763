// crates/sv_core/src/rng.rs
//
// Deterministic, integer-only RNG for synthetic game generation.
// The simulation engine itself never draws randomness; only the generator
// that produces preference profiles does.
//
// • Explicit seeding: `seed.to_le_bytes()` into the first 8 bytes of the
//   ChaCha20 seed, remaining 24 bytes zero. Stable across platforms.
// • Unbiased ranges via rejection sampling; no floating point.
// • Word accounting so callers can log how much of the stream was consumed.

use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};

/// Seeded RNG used to shuffle candidate lists into preference rankings.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha20Rng,
    words_consumed: u128,
}

impl GameRng {
    /// Construct from a 64-bit seed.
    #[inline]
    pub fn from_seed_u64(seed: u64) -> Self {
        let mut seed32 = [0u8; 32];
        seed32[..8].copy_from_slice(&seed.to_le_bytes());
        Self {
            rng: ChaCha20Rng::from_seed(seed32),
            words_consumed: 0,
        }
    }

    /// Total number of 64-bit words drawn so far (saturating).
    #[inline]
    pub fn words_consumed(&self) -> u128 {
        self.words_consumed
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.words_consumed = self.words_consumed.saturating_add(1);
        self.rng.next_u64()
    }

    /// Unbiased integer in [0, n); `None` if `n == 0`.
    ///
    /// Let `threshold = 2^64 mod n` (computed via `wrapping_neg() % n`).
    /// Accept `x` if `x >= threshold`; then `x % n` is uniformly distributed.
    #[inline]
    pub fn gen_range(&mut self, n: u64) -> Option<u64> {
        if n == 0 {
            return None;
        }
        let threshold = n.wrapping_neg() % n;
        loop {
            let x = self.next_u64();
            if x >= threshold {
                return Some(x % n);
            }
        }
    }

    /// In-place Fisher–Yates shuffle:
    /// for i in (1..len).rev() { j ~ U{0..=i}; swap(i, j) }
    pub fn shuffle_in_place<T>(&mut self, slice: &mut [T]) {
        let len = slice.len();
        if len <= 1 {
            return;
        }
        for i in (1..len).rev() {
            let j = match self.gen_range(i as u64 + 1) {
                Some(v) => v as usize,
                None => unreachable!("gen_range(>0) must return Some"),
            };
            slice.swap(i, j);
        }
    }

    /// A uniformly random permutation of `1..=m` (wire candidate ids).
    pub fn permutation(&mut self, m: u32) -> Vec<u32> {
        let mut out: Vec<u32> = (1..=m).collect();
        self.shuffle_in_place(&mut out);
        out
    }
}

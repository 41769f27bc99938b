//! RNG module - uniform random piece selection
//!
//! Every draw picks one of the seven kinds uniformly and independently; there
//! is no bag or history. A small LCG keeps sessions reproducible from a seed.

use crate::types::{PieceKind, NUM_PIECE_KINDS};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle with a
    /// short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        assert!(max > 0, "next_range needs a non-empty range");
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Draw a piece kind uniformly
    pub fn next_kind(&mut self) -> PieceKind {
        PieceKind::from_index(self.next_range(NUM_PIECE_KINDS as u32) as usize)
    }

    /// Current internal state (re-seeding with it continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_zero_seed_is_not_degenerate() {
        let mut rng = SimpleRng::new(0);
        assert_eq!(rng.state(), 1);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_range_stays_in_range() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_next_kind_covers_all_kinds() {
        let mut rng = SimpleRng::new(42);
        let mut seen = [0u32; NUM_PIECE_KINDS];
        for _ in 0..7000 {
            seen[rng.next_kind().index()] += 1;
        }
        // Roughly uniform: every kind within 30% of the 1000 expectation.
        for (i, &n) in seen.iter().enumerate() {
            assert!((700..=1300).contains(&n), "kind {} drawn {} times", i, n);
        }
    }

    #[test]
    fn test_state_resumes_sequence() {
        let mut a = SimpleRng::new(99);
        a.next_u32();
        let mut b = SimpleRng::new(a.state());
        assert_eq!(a.next_u32(), b.next_u32());
    }
}

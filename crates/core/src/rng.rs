//! Small seeded RNG backing the shuffle walk.
//!
//! A linear congruential generator is plenty here: shuffle quality rests on
//! the 100-step random walk, not on the generator, and a tiny deterministic
//! source keeps the core crate dependency-free and the tests reproducible.

/// LCG with the Numerical Recipes constants.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG. A zero seed is remapped to avoid the all-zero orbit.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x9e3779b9 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform-ish value in `[0, max)`. `max` must be non-zero.
    pub fn next_index(&mut self, max: usize) -> usize {
        debug_assert!(max > 0);
        // High bits of an LCG are much better distributed than the low bits.
        ((self.next_u32() >> 16) as usize) % max
    }

    /// Current internal state, usable to reproduce a run.
    pub fn state(&self) -> u32 {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SimpleRng::new(42);
        let mut b = SimpleRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        let first = rng.next_u32();
        assert_ne!(first, rng.next_u32());
    }

    #[test]
    fn test_next_index_in_range() {
        let mut rng = SimpleRng::new(7);
        for max in 1..=4 {
            for _ in 0..200 {
                assert!(rng.next_index(max) < max);
            }
        }
    }

    #[test]
    fn test_next_index_hits_all_values() {
        let mut rng = SimpleRng::new(3);
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[rng.next_index(4)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}

//! Seedable uniform randomness.
//!
//! Generators draw through the small [`RandomSource`] capability so that
//! tests and callers can substitute their own source. [`Random`] is the
//! default implementation, backed by [`rand::rngs::StdRng`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform random draws over closed ranges.
pub trait RandomSource {
    /// Uniform real in `[min, max]`. Returns `min` when `min == max`.
    fn uniform(&mut self, min: f64, max: f64) -> f64;

    /// Uniform integer in `[min, max]`, both bounds inclusive.
    fn uniform_int(&mut self, min: u32, max: u32) -> u32;
}

/// Restorable snapshot of a [`Random`] generator.
///
/// Two generators created from the same state produce identical sequences.
#[derive(Debug, Clone)]
pub struct RandomState {
    rng: StdRng,
}

impl RandomState {
    /// State of a generator freshly seeded with `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomState {
    fn default() -> Self {
        Self::from_seed(0)
    }
}

/// Pseudo-random generator with snapshot and restore.
#[derive(Debug, Clone)]
pub struct Random {
    rng: StdRng,
}

impl Random {
    pub fn new(seed: u64) -> Self {
        Self::from_state(&RandomState::from_seed(seed))
    }

    /// Generator continuing from `state`.
    pub fn from_state(state: &RandomState) -> Self {
        Self {
            rng: state.rng.clone(),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> RandomState {
        RandomState {
            rng: self.rng.clone(),
        }
    }

    /// Rewinds (or forwards) the generator to `state`.
    pub fn reset_to_state(&mut self, state: &RandomState) {
        self.rng = state.rng.clone();
    }
}

impl RandomSource for Random {
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        debug_assert!(min <= max, "uniform({min}, {max})");
        if min == max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    fn uniform_int(&mut self, min: u32, max: u32) -> u32 {
        debug_assert!(min <= max, "uniform_int({min}, {max})");
        if min == max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        (**self).uniform(min, max)
    }

    fn uniform_int(&mut self, min: u32, max: u32) -> u32 {
        (**self).uniform_int(min, max)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Random::new(42);
        let mut b = Random::new(42);
        for _ in 0..100 {
            assert_eq!(a.uniform(-3.0, 7.0), b.uniform(-3.0, 7.0));
            assert_eq!(a.uniform_int(0, 10), b.uniform_int(0, 10));
        }
    }

    #[test]
    fn test_different_seed_different_sequence() {
        let mut a = Random::new(1);
        let mut b = Random::new(2);
        let xs: Vec<f64> = (0..8).map(|_| a.uniform(0.0, 1.0)).collect();
        let ys: Vec<f64> = (0..8).map(|_| b.uniform(0.0, 1.0)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn test_ranges() {
        let mut r = Random::new(7);
        for _ in 0..1000 {
            let x = r.uniform(2.0, 5.0);
            assert!((2.0..=5.0).contains(&x));
            let n = r.uniform_int(3, 6);
            assert!((3..=6).contains(&n));
        }
    }

    #[test]
    fn test_uniform_draws_the_inclusive_range() {
        let mut r = Random::new(5);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            assert_eq!(r.uniform(-2.0, 3.0), rng.gen_range(-2.0..=3.0));
        }
    }

    #[test]
    fn test_degenerate_ranges() {
        let mut r = Random::new(7);
        assert_eq!(r.uniform(1.5, 1.5), 1.5);
        assert_eq!(r.uniform_int(4, 4), 4);
        assert_eq!(r.uniform_int(0, 0), 0);
    }

    #[test]
    fn test_uniform_int_reaches_both_bounds() {
        let mut r = Random::new(3);
        let draws: Vec<u32> = (0..200).map(|_| r.uniform_int(0, 1)).collect();
        assert!(draws.contains(&0));
        assert!(draws.contains(&1));
    }

    #[test]
    fn test_snapshot_and_restore() {
        let mut r = Random::new(11);
        r.uniform(0.0, 1.0);
        let state = r.state();
        let first: Vec<f64> = (0..5).map(|_| r.uniform(0.0, 1.0)).collect();

        r.reset_to_state(&state);
        let again: Vec<f64> = (0..5).map(|_| r.uniform(0.0, 1.0)).collect();
        assert_eq!(first, again);

        let mut other = Random::from_state(&state);
        let third: Vec<f64> = (0..5).map(|_| other.uniform(0.0, 1.0)).collect();
        assert_eq!(first, third);
    }

    #[test]
    fn test_default_state_matches_seed_zero() {
        let mut a = Random::from_state(&RandomState::default());
        let mut b = Random::new(0);
        assert_eq!(a.uniform(0.0, 1.0), b.uniform(0.0, 1.0));
    }
}

//! Random number seam for the simulated data sources

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex, PoisonError};

/// Source of uniform draws used by every generator
pub trait RandomSource: Send + Sync {
    /// Uniform draw in `[0, 1)`
    fn unit(&self) -> f64;

    /// Uniform index in `0..len`; `len` must be non-zero
    fn index(&self, len: usize) -> usize {
        let i = (self.unit() * len as f64) as usize;
        i.min(len.saturating_sub(1))
    }

    /// Uniform draw in `[-half_width, half_width)`
    fn symmetric(&self, half_width: f64) -> f64 {
        (self.unit() - 0.5) * 2.0 * half_width
    }
}

/// Draws from the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn unit(&self) -> f64 {
        rand::rng().random::<f64>()
    }
}

/// Reproducible draws from a seeded `StdRng`
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn unit(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random::<f64>()
    }
}

/// Always returns the same draw; useful to pin generated values
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub f64);

impl RandomSource for FixedRandom {
    fn unit(&self) -> f64 {
        self.0
    }
}

/// Seeded source when a seed is configured, thread RNG otherwise
pub fn from_seed(seed: Option<u64>) -> Arc<dyn RandomSource> {
    match seed {
        Some(seed) => Arc::new(SeededRandom::new(seed)),
        None => Arc::new(ThreadRandom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_random_in_range() {
        let rng = ThreadRandom;
        for _ in 0..1000 {
            let x = rng.unit();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = SeededRandom::new(42);
        let b = SeededRandom::new(42);
        let xs: Vec<f64> = (0..10).map(|_| a.unit()).collect();
        let ys: Vec<f64> = (0..10).map(|_| b.unit()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_index_stays_in_bounds() {
        assert_eq!(FixedRandom(0.0).index(5), 0);
        assert_eq!(FixedRandom(0.999_999).index(5), 4);
        assert_eq!(FixedRandom(0.5).index(3), 1);
    }

    #[test]
    fn test_symmetric_range() {
        assert_eq!(FixedRandom(0.5).symmetric(3.0), 0.0);
        assert_eq!(FixedRandom(0.0).symmetric(3.0), -3.0);
        assert!(FixedRandom(0.75).symmetric(1.0) > 0.0);
    }
}

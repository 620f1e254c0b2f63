//! Thread-local RNG backed random source.

use rand::Rng;

use crate::domain::RandomSource;

/// Draws indices from `rand`'s thread-local generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn index(&self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        rand::rng().random_range(0..upper)
    }
}

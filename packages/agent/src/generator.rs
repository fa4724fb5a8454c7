//! Cryptographically secure random values.
//!
//! The [`Generator`] trait is the seam through which the [`Sorter`](crate::Sorter)
//! shuffles. [`SecureGenerator`] draws from the operating system's CSPRNG.

use std::num::NonZeroUsize;

use rand::rngs::OsRng;
use rand::{Rng, RngCore};

/// Source of random values.
pub trait Generator: Send + Sync {
    /// A fair coin flip.
    fn random_boolean(&self) -> bool;

    /// A uniformly distributed ordinal in `1..=maximum`.
    fn random_ordinal(&self, maximum: NonZeroUsize) -> usize;

    /// A probability in `(0.0, 1.0]` with 53 bits of resolution.
    ///
    /// Zero is excluded since an event with zero probability never occurs.
    fn random_probability(&self) -> f64;

    /// `size` random bytes.
    fn random_bytes(&self, size: usize) -> Vec<u8>;
}

/// A [`Generator`] backed by the operating system's secure random source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureGenerator;

const PROBABILITY_RESOLUTION: u64 = 1 << 53;

impl SecureGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Generator for SecureGenerator {
    fn random_boolean(&self) -> bool {
        OsRng.gen_bool(0.5)
    }

    fn random_ordinal(&self, maximum: NonZeroUsize) -> usize {
        OsRng.gen_range(1..=maximum.get())
    }

    fn random_probability(&self) -> f64 {
        let numerator = OsRng.gen_range(1..=PROBABILITY_RESOLUTION);
        numerator as f64 / PROBABILITY_RESOLUTION as f64
    }

    fn random_bytes(&self, size: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; size];
        OsRng.fill_bytes(&mut bytes);
        bytes
    }
}

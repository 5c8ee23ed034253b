//! Deterministic randomness for dealing shares and generating keys.

use num_bigint::{BigUint, RandBigInt};
use num_traits::Zero;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// The randomness stream used everywhere the crate needs random values.
///
/// Seeding is explicit: equal seeds yield equal streams, which is what
/// makes dealt sharings reproducible. There is no process-global state;
/// every dealing owns its stream.
#[derive(Debug, Clone)]
pub struct Prng {
    rng: ChaCha20Rng,
}

impl Prng {
    /// Creates a stream from an optional seed, falling back to OS entropy
    /// when no seed is given.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Prng {
                rng: ChaCha20Rng::seed_from_u64(seed),
            },
            None => Prng {
                rng: ChaCha20Rng::from_entropy(),
            },
        }
    }

    /// A uniform element of `[0, bound)`.
    pub fn below(&mut self, bound: &BigUint) -> BigUint {
        self.rng.gen_biguint_below(bound)
    }

    /// A uniform element of `[1, bound)`, for scalars where zero is
    /// degenerate. The bound must be at least 2.
    pub fn nonzero_below(&mut self, bound: &BigUint) -> BigUint {
        loop {
            let candidate = self.rng.gen_biguint_below(bound);
            if !candidate.is_zero() {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_seeds_give_equal_streams() {
        let bound = BigUint::from(1u8) << 128;
        let mut first = Prng::new(Some(42));
        let mut second = Prng::new(Some(42));
        for _ in 0..16 {
            assert_eq!(first.below(&bound), second.below(&bound));
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let bound = BigUint::from(1u8) << 128;
        let mut first = Prng::new(Some(1));
        let mut second = Prng::new(Some(2));
        let drawn: Vec<BigUint> = (0..4).map(|_| first.below(&bound)).collect();
        let other: Vec<BigUint> = (0..4).map(|_| second.below(&bound)).collect();
        assert_ne!(drawn, other);
    }

    #[test]
    fn test_below_stays_below_the_bound() {
        let bound = BigUint::from(97u8);
        let mut prng = Prng::new(Some(7));
        for _ in 0..200 {
            assert!(prng.below(&bound) < bound);
        }
    }

    #[test]
    fn test_nonzero_below_never_returns_zero() {
        let bound = BigUint::from(2u8);
        let mut prng = Prng::new(Some(11));
        for _ in 0..50 {
            let drawn = prng.nonzero_below(&bound);
            assert_eq!(drawn, BigUint::from(1u8));
        }
    }
}

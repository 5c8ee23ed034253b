//! Arithmetic over the prime field Z/pZ that carries the sharing polynomials.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

use crate::error::SharingError;

/// A prime field fixed to its modulus at construction.
///
/// Every operation returns a value normalized into `[0, p)`. The modulus is
/// assumed prime; primality is the caller's contract and is not verified
/// here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    prime: BigUint,
}

impl Field {
    /// Creates a field with the given modulus.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` for a modulus below 2, where no field
    /// exists.
    pub fn new(prime: BigUint) -> Result<Self, SharingError> {
        if prime < BigUint::from(2u32) {
            return Err(SharingError::InvalidParameters(format!(
                "field modulus must be at least 2, got {}",
                prime
            )));
        }
        Ok(Field { prime })
    }

    /// The field modulus.
    pub fn prime(&self) -> &BigUint {
        &self.prime
    }

    /// Reduces an arbitrary integer into the field.
    pub fn element(&self, value: &BigUint) -> BigUint {
        value % &self.prime
    }

    /// `(a + b) mod p`.
    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.prime
    }

    /// `(a - b) mod p`.
    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        // lift by p before subtracting so the difference never goes negative
        ((a % &self.prime) + &self.prime - (b % &self.prime)) % &self.prime
    }

    /// `(a * b) mod p`.
    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.prime
    }

    /// `base^exponent mod p` by square and multiply.
    pub fn pow(&self, base: &BigUint, exponent: &BigUint) -> BigUint {
        base.modpow(exponent, &self.prime)
    }

    /// The additive inverse `-a mod p`.
    pub fn neg(&self, a: &BigUint) -> BigUint {
        let reduced = a % &self.prime;
        if reduced.is_zero() {
            reduced
        } else {
            &self.prime - reduced
        }
    }

    /// The multiplicative inverse of `a`, via the extended Euclidean
    /// algorithm.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperand` when `a` reduces to zero, which has no
    /// inverse.
    pub fn inv(&self, a: &BigUint) -> Result<BigUint, SharingError> {
        mod_inverse(a, &self.prime).ok_or_else(|| {
            SharingError::InvalidOperand(format!(
                "{} has no inverse modulo {}",
                a, self.prime
            ))
        })
    }
}

/// Modular inverse by the extended Euclidean algorithm, `None` when the
/// value and the modulus are not coprime.
pub(crate) fn mod_inverse(value: &BigUint, modulus: &BigUint) -> Option<BigUint> {
    let modulus_int = BigInt::from(modulus.clone());
    let mut old_r = BigInt::from(value % modulus);
    let mut r = modulus_int.clone();
    let mut old_s = BigInt::one();
    let mut s = BigInt::zero();

    while !r.is_zero() {
        let quotient = &old_r / &r;
        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }

    if !old_r.is_one() {
        return None;
    }

    let inverse = ((old_s % &modulus_int) + &modulus_int) % &modulus_int;
    inverse.to_biguint()
}

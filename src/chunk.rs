//! Base-B decomposition of field values into discrete-log sized chunks.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::error::SharingError;

/// Splits values below a modulus into little-endian base-`bound` chunks
/// and puts them back together.
///
/// The chunk count is fixed at construction to the smallest `k` with
/// `bound^k >= modulus`, so every field value fits and every split
/// produces the same number of chunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkCodec {
    bound: BigUint,
    modulus: BigUint,
    num_chunks: usize,
}

impl ChunkCodec {
    /// Creates a codec for values below `modulus`, chunked below `bound`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` when the bound is below 2 (a base-1
    /// decomposition never terminates) or the modulus is below 2.
    pub fn new(bound: &BigUint, modulus: &BigUint) -> Result<Self, SharingError> {
        if bound < &BigUint::from(2u32) {
            return Err(SharingError::InvalidParameters(format!(
                "chunk bound must be at least 2, got {}",
                bound
            )));
        }
        if modulus < &BigUint::from(2u32) {
            return Err(SharingError::InvalidParameters(format!(
                "chunk modulus must be at least 2, got {}",
                modulus
            )));
        }

        // smallest k with bound^k >= modulus, found without float logarithms
        let mut num_chunks = 0;
        let mut capacity = BigUint::one();
        while &capacity < modulus {
            capacity *= bound;
            num_chunks += 1;
        }

        Ok(ChunkCodec {
            bound: bound.clone(),
            modulus: modulus.clone(),
            num_chunks,
        })
    }

    /// The number of chunks every split produces.
    pub fn num_chunks(&self) -> usize {
        self.num_chunks
    }

    /// The exclusive upper bound on each chunk.
    pub fn bound(&self) -> &BigUint {
        &self.bound
    }

    /// The little-endian base-`bound` digits of `value`, padded with zero
    /// digits up to the fixed chunk count.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperand` when `value` is not below the modulus.
    pub fn split(&self, value: &BigUint) -> Result<Vec<BigUint>, SharingError> {
        if value >= &self.modulus {
            return Err(SharingError::InvalidOperand(format!(
                "value {} is not below the chunk modulus {}",
                value, self.modulus
            )));
        }

        let mut chunks = Vec::with_capacity(self.num_chunks);
        let mut remaining = value.clone();
        for _ in 0..self.num_chunks {
            chunks.push(&remaining % &self.bound);
            remaining /= &self.bound;
        }
        Ok(chunks)
    }

    /// Reassembles little-endian chunks by Horner evaluation in base
    /// `bound`, reduced into the modulus.
    ///
    /// # Errors
    ///
    /// Returns `ChunkOverflow` when any chunk is not below the bound.
    /// Decryption relies on this check: a chunk recovered from a garbled
    /// ciphertext must never silently alias a different value.
    pub fn assemble(&self, chunks: &[BigUint]) -> Result<BigUint, SharingError> {
        let mut value = BigUint::zero();
        for chunk in chunks.iter().rev() {
            if chunk >= &self.bound {
                return Err(SharingError::ChunkOverflow {
                    chunk: chunk.clone(),
                    bound: self.bound.clone(),
                });
            }
            value = value * &self.bound + chunk;
        }
        Ok(value % &self.modulus)
    }
}

//! Baby-step giant-step discrete logarithm, restricted to chunk range.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::SharingError;
use crate::group::CyclicGroup;

lazy_static! {
    /// Process-wide baby-step tables, keyed by a digest of the group
    /// parameters and the bound. Populated once, shared by every solver.
    static ref TABLE_CACHE: RwLock<HashMap<[u8; 32], Arc<BabyTable>>> =
        RwLock::new(HashMap::new());
}

/// Precomputed baby steps `g^j -> j` for `j` in `[0, m)`.
///
/// Elements are stored as digests of their canonical encoding, so the
/// table size depends on `m` alone, not on the element size.
#[derive(Debug)]
struct BabyTable {
    steps: HashMap<[u8; 32], u64>,
}

impl BabyTable {
    fn build<G: CyclicGroup>(group: &G, m: u64) -> Self {
        let mut steps = HashMap::with_capacity(m as usize);
        let generator = group.generator();
        let mut current = group.identity();
        for j in 0..m {
            steps.insert(element_digest(group, &current), j);
            current = group.compose(&current, &generator);
        }
        BabyTable { steps }
    }

    fn lookup(&self, digest: &[u8; 32]) -> Option<u64> {
        self.steps.get(digest).copied()
    }
}

/// Discrete-log solver for exponents in `[0, bound)`.
///
/// Decryption calls this once per chunk, so the baby-step table is built
/// once per (group, bound) pair and then shared process-wide; only the
/// giant steps run per query.
pub struct BsgsSolver<G: CyclicGroup> {
    group: G,
    bound: u64,
    m: u64,
    table: Arc<BabyTable>,
    giant_stride: G::Element,
}

impl<G: CyclicGroup> BsgsSolver<G> {
    /// Creates a solver over the given group for exponents below `bound`,
    /// reusing a cached table when one exists.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` when the bound does not fit the solver
    /// range, is below 2, or exceeds the group order.
    pub fn new(group: G, bound: &BigUint) -> Result<Self, SharingError> {
        let bound = bound.to_u64().ok_or_else(|| {
            SharingError::InvalidParameters(format!(
                "chunk bound {} does not fit the solver range",
                bound
            ))
        })?;
        if bound < 2 {
            return Err(SharingError::InvalidParameters(format!(
                "chunk bound must be at least 2, got {}",
                bound
            )));
        }
        // exponents at or above the order alias smaller ones
        if BigUint::from(bound) > *group.order() {
            return Err(SharingError::InvalidParameters(format!(
                "chunk bound {} exceeds the group order {}",
                bound,
                group.order()
            )));
        }

        let m = ceil_sqrt(bound);
        let table = cached_table(&group, m, bound);

        // the giant stride g^{-m} walks the target back one table width
        let generator_inverse = group.invert(&group.generator());
        let giant_stride = group.exponentiate(&generator_inverse, &BigUint::from(m));

        Ok(BsgsSolver {
            group,
            bound,
            m,
            table,
            giant_stride,
        })
    }

    /// The exclusive upper bound on solvable exponents.
    pub fn bound(&self) -> u64 {
        self.bound
    }

    /// Finds `x` in `[0, bound)` with `generator^x == target`.
    ///
    /// A table hit alone is not an answer: the candidate must verify by
    /// exponentiation (digests can collide) and must lie below the bound
    /// (the table covers `[0, m^2)`, which overshoots any bound that is
    /// not a perfect square).
    ///
    /// # Errors
    ///
    /// Returns `ChunkNotFound` when no exponent below the bound matches.
    pub fn solve(&self, target: &G::Element) -> Result<BigUint, SharingError> {
        let mut current = target.clone();
        let mut giant = 0u64;
        while (giant as u128) * (self.m as u128) < self.bound as u128 {
            if let Some(baby) = self.table.lookup(&element_digest(&self.group, &current)) {
                let candidate = (giant as u128) * (self.m as u128) + baby as u128;
                if candidate < self.bound as u128 {
                    let exponent = BigUint::from(candidate as u64);
                    if self.group.exponentiate(&self.group.generator(), &exponent) == *target {
                        return Ok(exponent);
                    }
                }
            }
            current = self.group.compose(&current, &self.giant_stride);
            giant += 1;
        }
        Err(SharingError::ChunkNotFound { bound: self.bound })
    }
}

/// Fetches the baby-step table for (group, bound), building and publishing
/// it under the write lock when it is not cached yet.
fn cached_table<G: CyclicGroup>(group: &G, m: u64, bound: u64) -> Arc<BabyTable> {
    let key = cache_key(group, bound);
    if let Some(found) = TABLE_CACHE.read().unwrap().get(&key) {
        return Arc::clone(found);
    }

    let mut cache = TABLE_CACHE.write().unwrap();
    // a racing solver may have published the table between the locks
    if let Some(found) = cache.get(&key) {
        return Arc::clone(found);
    }

    debug!("populating baby-step table with {} entries", m);
    let table = Arc::new(BabyTable::build(group, m));
    cache.insert(key, Arc::clone(&table));
    table
}

fn element_digest<G: CyclicGroup>(group: &G, element: &G::Element) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(group.element_bytes(element));
    hasher.finalize().into()
}

/// Cache key over the group's full parameter encoding and the bound.
/// Order and generator alone are not enough: two coexisting groups can
/// agree on both and still assign different elements to each exponent.
fn cache_key<G: CyclicGroup>(group: &G, bound: u64) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(group.parameter_bytes());
    hasher.update(bound.to_be_bytes());
    hasher.finalize().into()
}

/// The smallest `m` with `m * m >= value`.
fn ceil_sqrt(value: u64) -> u64 {
    let mut root = (value as f64).sqrt().ceil() as u64;
    while (root as u128) * (root as u128) < value as u128 {
        root += 1;
    }
    while root > 0 && ((root - 1) as u128) * ((root - 1) as u128) >= value as u128 {
        root -= 1;
    }
    root
}

//! Shamir secret sharing over a prime field, with resharing.
//!
//! A secret `S` below the field prime `P` is hidden as the constant term
//! of a random degree `t - 1` polynomial; shares are evaluations at the
//! indices `1..=n`. Any `t` shares determine the polynomial and recover
//! `S` by Lagrange interpolation at zero, while `t - 1` shares carry no
//! information about it. Resharing moves an existing secret to new
//! parameters, either by rebuilding from the reconstructed secret or by
//! the share-redistribution protocol that never materializes it.

use core::fmt;
use std::collections::HashSet;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{
    de::{self, SeqAccess, Visitor},
    ser::SerializeSeq,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::error::SharingError;
use crate::field::Field;
use crate::prng::Prng;

/// A polynomial over the prime field, in ascending coefficient form.
///
/// The constant term is the shared secret. The threshold is carried as an
/// explicit field: a randomly drawn top coefficient may be zero, which
/// would make the nominal degree unrecoverable from the coefficients
/// alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    /// Coefficients in ascending order; `coefficients[0]` is the secret.
    pub coefficients: Vec<BigUint>,
    /// The threshold this polynomial was drawn for, nominally `degree + 1`.
    pub threshold: usize,
}

impl Polynomial {
    /// Draws a fresh polynomial of nominal degree `threshold - 1` with the
    /// given constant term.
    ///
    /// Coefficients come straight off the randomness stream. A drawn zero
    /// is kept rather than resampled: resampling would make the stream
    /// consumption depend on rejection history and break reproducibility
    /// across seeds.
    ///
    /// # Arguments
    ///
    /// * `secret` - The constant term, as a field element.
    /// * `threshold` - The number of shares needed to recover the secret.
    /// * `field` - The field the coefficients are drawn from.
    /// * `prng` - The randomness stream to draw from.
    pub fn generate(secret: BigUint, threshold: usize, field: &Field, prng: &mut Prng) -> Self {
        let mut coefficients = Vec::with_capacity(threshold);
        coefficients.push(secret);
        for _ in 1..threshold {
            coefficients.push(prng.below(field.prime()));
        }
        Polynomial {
            coefficients,
            threshold,
        }
    }

    /// Evaluates the polynomial at `x` by Horner's rule, in `O(t)` field
    /// operations.
    pub fn evaluate(&self, x: &BigUint, field: &Field) -> BigUint {
        let mut result = BigUint::zero();
        for coefficient in self.coefficients.iter().rev() {
            result = field.add(&field.mul(&result, x), coefficient);
        }
        result
    }

    /// The degree this polynomial was drawn for, regardless of trailing
    /// zero coefficients.
    pub fn nominal_degree(&self) -> usize {
        self.threshold.saturating_sub(1)
    }
}

/// One point `(index, value)` on a dealing polynomial.
///
/// Index 0 would evaluate the polynomial at the secret itself; it is
/// reserved and never issued. A holder only ever needs its own `Share`;
/// everything else in this module is the dealer's view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    /// The evaluation index, from `1..=n`.
    pub index: u32,
    /// The polynomial value at the index, as a field element.
    pub value: BigUint,
}

/// Serializes a share as an `[index, value]` pair with the value in
/// decimal, so arbitrary precision survives any transport exactly and no
/// reader is tempted into floating point.
impl Serialize for Share {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(&self.index)?;
        seq.serialize_element(&self.value.to_str_radix(10))?;
        seq.end()
    }
}

/// Deserializes a share from its `[index, value]` pair form.
impl<'de> Deserialize<'de> for Share {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ShareVisitor;

        impl<'de> Visitor<'de> for ShareVisitor {
            type Value = Share;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a share index followed by its decimal value")
            }

            fn visit_seq<V>(self, mut seq: V) -> Result<Share, V::Error>
            where
                V: SeqAccess<'de>,
            {
                let index: u32 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let digits: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let value = BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(|| {
                    de::Error::custom(format!("invalid decimal share value: {}", digits))
                })?;
                Ok(Share { index, value })
            }
        }

        deserializer.deserialize_seq(ShareVisitor)
    }
}

/// Collects dealing parameters and produces a [`SecretSharing`].
///
/// # Examples
///
/// ```rust
/// use num_bigint::BigUint;
/// use reshard::sss::SharingBuilder;
///
/// let sharing = SharingBuilder::new(BigUint::from(123u32), 3, 5, BigUint::from(257u32))
///     .with_seed(42)
///     .build()
///     .unwrap();
/// assert_eq!(sharing.shares().len(), 5);
/// assert_eq!(sharing.reconstruct_secret().unwrap(), BigUint::from(123u32));
/// ```
#[derive(Debug, Clone)]
pub struct SharingBuilder {
    secret: BigUint,
    threshold: usize,
    num_shares: usize,
    prime: BigUint,
    seed: Option<u64>,
}

impl SharingBuilder {
    /// Starts a dealing of `secret` with threshold `threshold` out of
    /// `num_shares` shares over the field modulo `prime`.
    pub fn new(secret: BigUint, threshold: usize, num_shares: usize, prime: BigUint) -> Self {
        SharingBuilder {
            secret,
            threshold,
            num_shares,
            prime,
            seed: None,
        }
    }

    /// Fixes the randomness seed, making the dealt shares reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the parameters, draws the polynomial and deals the
    /// shares at indices `1..=num_shares`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` when the threshold is zero or exceeds
    /// the share count, when no shares are requested, when the secret is
    /// not an element of the field, or when the field is too small to give
    /// every share a distinct index.
    pub fn build(self) -> Result<SecretSharing, SharingError> {
        if self.threshold < 1 {
            return Err(SharingError::InvalidParameters(
                "threshold must be at least 1".into(),
            ));
        }
        if self.num_shares < 1 {
            return Err(SharingError::InvalidParameters(
                "at least one share must be dealt".into(),
            ));
        }
        if self.threshold > self.num_shares {
            return Err(SharingError::InvalidParameters(format!(
                "threshold {} exceeds the number of shares {}",
                self.threshold, self.num_shares
            )));
        }

        let field = Field::new(self.prime)?;
        if &self.secret >= field.prime() {
            return Err(SharingError::InvalidParameters(format!(
                "secret is not an element of the field modulo {}",
                field.prime()
            )));
        }
        // indices are reduced into the field during interpolation, so they
        // must be distinct there as well, not just as integers
        let share_count = BigUint::from(self.num_shares as u64);
        if self.num_shares > u32::MAX as usize || share_count >= *field.prime() {
            return Err(SharingError::InvalidParameters(format!(
                "cannot deal {} distinct share indices in this field",
                self.num_shares
            )));
        }

        let mut prng = Prng::new(self.seed);
        let polynomial = Polynomial::generate(self.secret, self.threshold, &field, &mut prng);
        let shares = (1..=self.num_shares as u32)
            .map(|index| Share {
                index,
                value: polynomial.evaluate(&BigUint::from(index), &field),
            })
            .collect();

        Ok(SecretSharing {
            shares,
            threshold: self.threshold,
            num_shares: self.num_shares,
            field,
            seed: self.seed,
        })
    }
}

/// A dealt sharing: the shares together with the parameters they were
/// dealt under.
///
/// This is the dealer's context. Individual holders keep nothing but
/// their own [`Share`]; the aggregate exists to deal, reconstruct and
/// reshare, and the secret itself is never stored in it.
#[derive(Debug, Clone)]
pub struct SecretSharing {
    shares: Vec<Share>,
    threshold: usize,
    num_shares: usize,
    field: Field,
    seed: Option<u64>,
}

impl SecretSharing {
    /// Rebuilds a dealer context from collected shares.
    ///
    /// The aggregate may hold fewer shares than its threshold, as happens
    /// while shares are still being collected; reconstruction and
    /// resharing then fail until enough distinct shares are present.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` when the threshold is zero or the
    /// prime is smaller than 2.
    pub fn from_shares(
        shares: Vec<Share>,
        threshold: usize,
        prime: BigUint,
    ) -> Result<Self, SharingError> {
        if threshold < 1 {
            return Err(SharingError::InvalidParameters(
                "threshold must be at least 1".into(),
            ));
        }
        let field = Field::new(prime)?;
        let num_shares = shares.len();
        Ok(SecretSharing {
            shares,
            threshold,
            num_shares,
            field,
            seed: None,
        })
    }

    /// The shares of this aggregate.
    pub fn shares(&self) -> &[Share] {
        &self.shares
    }

    /// The number of shares needed to reconstruct.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// The number of shares held.
    pub fn num_shares(&self) -> usize {
        self.num_shares
    }

    /// The field prime the shares live in.
    pub fn prime(&self) -> &BigUint {
        self.field.prime()
    }

    /// The seed this aggregate was dealt under, when it was dealt here.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Recovers the secret by Lagrange interpolation at zero over all
    /// held shares.
    ///
    /// Any `threshold` of the originally dealt shares determine the same
    /// polynomial, so the result does not depend on which of them were
    /// collected.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientShares` when fewer shares than the threshold
    /// are held, and `DuplicateShareIndex` when an index appears twice.
    pub fn reconstruct_secret(&self) -> Result<BigUint, SharingError> {
        let weights = self.lagrange_weights_at_zero()?;
        let mut secret = BigUint::zero();
        for (share, weight) in self.shares.iter().zip(&weights) {
            secret = self.field.add(&secret, &self.field.mul(weight, &share.value));
        }
        Ok(secret)
    }

    /// Narrows the aggregate to exactly `threshold` shares, chosen
    /// deterministically as the lowest indices.
    ///
    /// Repeated runs over the same aggregate always keep the same subset,
    /// which keeps downstream operations reproducible.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientShares` when fewer shares than the threshold
    /// are held.
    pub fn select_threshold_shares(&self) -> Result<SecretSharing, SharingError> {
        if self.shares.len() < self.threshold {
            return Err(SharingError::InsufficientShares {
                got: self.shares.len(),
                need: self.threshold,
            });
        }
        let mut selected = self.shares.clone();
        selected.sort_by_key(|share| share.index);
        selected.truncate(self.threshold);
        Ok(SecretSharing {
            num_shares: selected.len(),
            shares: selected,
            threshold: self.threshold,
            field: self.field.clone(),
            seed: self.seed,
        })
    }

    /// Deals the same secret again under new parameters.
    ///
    /// The secret is reconstructed from the held shares, the new
    /// parameters are validated, and a completely fresh polynomial is
    /// drawn; old and new shares are unrelated beyond their common
    /// secret, so a reshare also revokes leaked sub-threshold share sets.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` when the new threshold exceeds the new
    /// share count or either is zero, plus every error reconstruction can
    /// raise.
    pub fn reshare_shares(
        &self,
        new_threshold: usize,
        new_num_shares: usize,
        seed: Option<u64>,
    ) -> Result<SecretSharing, SharingError> {
        let secret = self.reconstruct_secret()?;
        let mut builder = SharingBuilder::new(
            secret,
            new_threshold,
            new_num_shares,
            self.field.prime().clone(),
        );
        if let Some(seed) = seed {
            builder = builder.with_seed(seed);
        }
        builder.build()
    }

    /// Moves the sharing to new parameters without materializing the
    /// secret.
    ///
    /// Every current holder deals a sub-sharing of its own share value
    /// under the new parameters; the new share at index `j` is then the
    /// Lagrange-weighted combination, at zero over the current index set,
    /// of all sub-shares for `j`. The combined polynomial keeps the
    /// original secret as its constant term because the weights sum the
    /// holders' constant terms exactly as reconstruction would.
    ///
    /// A seed makes the whole redistribution reproducible; every holder's
    /// sub-dealing then draws from an identically seeded stream.
    ///
    /// # Errors
    ///
    /// The same errors as [`reshare_shares`](Self::reshare_shares).
    pub fn redistribute_shares(
        &self,
        new_threshold: usize,
        new_num_shares: usize,
        seed: Option<u64>,
    ) -> Result<SecretSharing, SharingError> {
        let weights = self.lagrange_weights_at_zero()?;

        let mut sub_sharings = Vec::with_capacity(self.shares.len());
        for share in &self.shares {
            let mut builder = SharingBuilder::new(
                share.value.clone(),
                new_threshold,
                new_num_shares,
                self.field.prime().clone(),
            );
            if let Some(seed) = seed {
                builder = builder.with_seed(seed);
            }
            sub_sharings.push(builder.build()?);
        }

        let shares = (0..new_num_shares)
            .map(|position| {
                let mut value = BigUint::zero();
                for (weight, sub) in weights.iter().zip(&sub_sharings) {
                    value = self
                        .field
                        .add(&value, &self.field.mul(weight, &sub.shares[position].value));
                }
                Share {
                    index: (position + 1) as u32,
                    value,
                }
            })
            .collect();

        Ok(SecretSharing {
            shares,
            threshold: new_threshold,
            num_shares: new_num_shares,
            field: self.field.clone(),
            seed,
        })
    }

    /// Lagrange basis values at `x = 0` for the current index set, in
    /// share order.
    ///
    /// For index `x_i` the weight is the product over the other indices
    /// `x_j` of `x_j / (x_j - x_i)`; multiplying each share value by its
    /// weight and summing evaluates the interpolated polynomial at zero.
    fn lagrange_weights_at_zero(&self) -> Result<Vec<BigUint>, SharingError> {
        if self.shares.len() < self.threshold {
            return Err(SharingError::InsufficientShares {
                got: self.shares.len(),
                need: self.threshold,
            });
        }
        let mut seen = HashSet::new();
        for share in &self.shares {
            if !seen.insert(share.index) {
                return Err(SharingError::DuplicateShareIndex { index: share.index });
            }
        }

        let field = &self.field;
        let mut weights = Vec::with_capacity(self.shares.len());
        for share in &self.shares {
            let x_i = BigUint::from(share.index);
            let mut numerator = BigUint::one();
            let mut denominator = BigUint::one();
            for other in &self.shares {
                if other.index == share.index {
                    continue;
                }
                let x_j = BigUint::from(other.index);
                numerator = field.mul(&numerator, &x_j);
                denominator = field.mul(&denominator, &field.sub(&x_j, &x_i));
            }
            weights.push(field.mul(&numerator, &field.inv(&denominator)?));
        }
        Ok(weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_PRIME;

    /// The worked example secret, below the default 257-bit prime.
    fn example_secret() -> BigUint {
        BigUint::parse_bytes(
            b"156402071732811106507596152138279689577457410967997136623970051482223809533794",
            10,
        )
        .unwrap()
    }

    fn example_sharing() -> SecretSharing {
        SharingBuilder::new(example_secret(), 5, 10, DEFAULT_PRIME.clone())
            .with_seed(42)
            .build()
            .unwrap()
    }

    #[test]
    fn test_dealing_issues_the_requested_shares() {
        let sharing = example_sharing();
        assert_eq!(sharing.shares().len(), 10);
        assert_eq!(sharing.threshold(), 5);
        let indices: Vec<u32> = sharing.shares().iter().map(|share| share.index).collect();
        assert_eq!(indices, (1..=10).collect::<Vec<u32>>());
        for share in sharing.shares() {
            assert!(share.value < *sharing.prime());
        }
    }

    #[test]
    fn test_all_shares_reconstruct_the_secret() {
        let sharing = example_sharing();
        assert_eq!(sharing.reconstruct_secret().unwrap(), example_secret());
    }

    #[test]
    fn test_any_threshold_subset_reconstructs_the_secret() {
        let sharing = example_sharing();
        let subsets: [&[usize]; 3] = [&[0, 1, 2, 3, 4], &[5, 6, 7, 8, 9], &[0, 2, 4, 6, 8]];
        for subset in subsets {
            let shares: Vec<Share> = subset
                .iter()
                .map(|&position| sharing.shares()[position].clone())
                .collect();
            let partial = SecretSharing::from_shares(shares, 5, DEFAULT_PRIME.clone()).unwrap();
            assert_eq!(partial.reconstruct_secret().unwrap(), example_secret());
        }
    }

    #[test]
    fn test_below_threshold_reconstruction_is_rejected() {
        let sharing = example_sharing();
        let shares: Vec<Share> = sharing.shares()[..4].to_vec();
        let partial = SecretSharing::from_shares(shares.clone(), 5, DEFAULT_PRIME.clone()).unwrap();
        let result = partial.reconstruct_secret();
        assert!(matches!(
            result,
            Err(SharingError::InsufficientShares { got: 4, need: 5 })
        ));

        // interpolating the same four shares at a lower declared threshold
        // succeeds, but cannot hit the secret
        let lowered = SecretSharing::from_shares(shares, 4, DEFAULT_PRIME.clone()).unwrap();
        assert_ne!(lowered.reconstruct_secret().unwrap(), example_secret());
    }

    #[test]
    fn test_duplicate_indices_are_rejected() {
        let sharing = example_sharing();
        let mut shares: Vec<Share> = sharing.shares()[..5].to_vec();
        shares[4] = shares[0].clone();
        let partial = SecretSharing::from_shares(shares, 5, DEFAULT_PRIME.clone()).unwrap();
        let result = partial.reconstruct_secret();
        assert!(matches!(
            result,
            Err(SharingError::DuplicateShareIndex { index: 1 })
        ));
    }

    #[test]
    fn test_equal_seeds_deal_identical_shares() {
        let first = example_sharing();
        let second = example_sharing();
        assert_eq!(first.shares(), second.shares());

        let third = SharingBuilder::new(example_secret(), 5, 10, DEFAULT_PRIME.clone())
            .with_seed(43)
            .build()
            .unwrap();
        assert_ne!(first.shares(), third.shares());
        // a different polynomial still hides the same secret
        assert_eq!(third.reconstruct_secret().unwrap(), example_secret());
    }

    #[test]
    fn test_invalid_dealing_parameters_are_rejected() {
        let prime = DEFAULT_PRIME.clone();
        let secret = example_secret();

        let zero_threshold = SharingBuilder::new(secret.clone(), 0, 5, prime.clone()).build();
        assert!(zero_threshold.is_err());

        let zero_shares = SharingBuilder::new(secret.clone(), 1, 0, prime.clone()).build();
        assert!(zero_shares.is_err());

        let threshold_above_count = SharingBuilder::new(secret, 6, 5, prime.clone()).build();
        assert!(matches!(
            threshold_above_count,
            Err(SharingError::InvalidParameters(_))
        ));

        let oversized_secret = SharingBuilder::new(prime.clone(), 2, 3, prime).build();
        assert!(oversized_secret.is_err());
    }

    #[test]
    fn test_small_fields_cannot_deal_more_shares_than_indices() {
        let result = SharingBuilder::new(BigUint::from(3u32), 2, 7, BigUint::from(7u32)).build();
        assert!(matches!(result, Err(SharingError::InvalidParameters(_))));

        let fits = SharingBuilder::new(BigUint::from(3u32), 2, 6, BigUint::from(7u32))
            .with_seed(1)
            .build()
            .unwrap();
        assert_eq!(fits.reconstruct_secret().unwrap(), BigUint::from(3u32));
    }

    #[test]
    fn test_select_threshold_shares_keeps_the_lowest_indices() {
        let sharing = example_sharing();
        let selected = sharing.select_threshold_shares().unwrap();
        assert_eq!(selected.shares().len(), 5);
        assert_eq!(selected.num_shares(), 5);
        assert_eq!(selected.threshold(), 5);
        let indices: Vec<u32> = selected.shares().iter().map(|share| share.index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4, 5]);
        assert_eq!(selected.reconstruct_secret().unwrap(), example_secret());
    }

    #[test]
    fn test_reshare_preserves_the_secret_under_new_parameters() {
        let sharing = example_sharing();
        let reshared = sharing.reshare_shares(3, 6, Some(53)).unwrap();
        assert_eq!(reshared.threshold(), 3);
        assert_eq!(reshared.num_shares(), 6);
        assert_eq!(reshared.reconstruct_secret().unwrap(), example_secret());
        // fresh polynomial: the share at index 1 changes
        assert_ne!(reshared.shares()[0].value, sharing.shares()[0].value);

        // keeping the parameters and changing only the seed also reshares
        let refreshed = sharing.reshare_shares(5, 10, Some(77)).unwrap();
        assert_ne!(refreshed.shares(), sharing.shares());
        assert_eq!(refreshed.reconstruct_secret().unwrap(), example_secret());
    }

    #[test]
    fn test_reshare_rejects_a_threshold_above_the_share_count() {
        let sharing = example_sharing();
        let result = sharing.reshare_shares(10, 5, Some(53));
        assert!(matches!(result, Err(SharingError::InvalidParameters(_))));
    }

    #[test]
    fn test_redistribute_preserves_the_secret_without_reconstructing() {
        let sharing = example_sharing();
        let redistributed = sharing.redistribute_shares(7, 12, Some(99)).unwrap();
        assert_eq!(redistributed.threshold(), 7);
        assert_eq!(redistributed.num_shares(), 12);
        let indices: Vec<u32> = redistributed
            .shares()
            .iter()
            .map(|share| share.index)
            .collect();
        assert_eq!(indices, (1..=12).collect::<Vec<u32>>());
        assert_eq!(redistributed.reconstruct_secret().unwrap(), example_secret());
    }

    #[test]
    fn test_redistribute_rejects_a_threshold_above_the_share_count() {
        let sharing = example_sharing();
        let result = sharing.redistribute_shares(10, 5, Some(53));
        assert!(matches!(result, Err(SharingError::InvalidParameters(_))));
    }

    #[test]
    fn test_redistributed_shares_can_be_reshared_again() {
        let sharing = example_sharing();
        let once = sharing.redistribute_shares(4, 8, Some(7)).unwrap();
        let twice = once.reshare_shares(2, 3, None).unwrap();
        assert_eq!(twice.reconstruct_secret().unwrap(), example_secret());
    }

    #[test]
    fn test_edge_secrets_survive_the_round_trip() {
        for secret in [BigUint::zero(), DEFAULT_PRIME.clone() - 1u32] {
            let sharing = SharingBuilder::new(secret.clone(), 3, 5, DEFAULT_PRIME.clone())
                .with_seed(2)
                .build()
                .unwrap();
            assert_eq!(sharing.reconstruct_secret().unwrap(), secret);
        }
    }

    #[test]
    fn test_share_serde_round_trip_is_exact() {
        let share = Share {
            index: 7,
            value: example_secret(),
        };
        let encoded = serde_json::to_string(&share).unwrap();
        // decimal string, not a float and not a byte blob
        assert!(encoded.contains(
            "\"156402071732811106507596152138279689577457410967997136623970051482223809533794\""
        ));
        let decoded: Share = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, share);
    }

    #[test]
    fn test_polynomial_keeps_its_nominal_degree() {
        let field = Field::new(BigUint::from(17u32)).unwrap();
        let mut prng = Prng::new(Some(4));
        let polynomial = Polynomial::generate(BigUint::from(5u32), 4, &field, &mut prng);
        assert_eq!(polynomial.coefficients.len(), 4);
        assert_eq!(polynomial.nominal_degree(), 3);
        assert_eq!(polynomial.coefficients[0], BigUint::from(5u32));
    }

    #[test]
    fn test_dealt_shares_encrypt_and_decrypt_end_to_end() {
        use crate::elgamal::{ElGamalChunkCipher, Keypair};
        use crate::group::ModpGroup;

        let sharing = example_sharing();
        let group = ModpGroup::demo();
        let bound = BigUint::one() << crate::constants::DEFAULT_CHUNK_BITS;
        let cipher = ElGamalChunkCipher::new(group, &bound, sharing.prime()).unwrap();

        let mut prng = Prng::new(Some(1234));
        let keypair = Keypair::generate(cipher.group(), &mut prng);
        let r = cipher.random_ephemeral(&mut prng);

        let share = &sharing.shares()[0];
        let ciphertext = cipher
            .encrypt_share(&keypair.public, &share.value, &r)
            .unwrap();
        let recovered = cipher.decrypt_share(&keypair.secret, &ciphertext).unwrap();
        assert_eq!(recovered, share.value);

        assert_eq!(sharing.reconstruct_secret().unwrap(), example_secret());
    }
}

//! Chunked ElGamal encryption of share values.
//!
//! Share values are field elements far too large for any discrete-log
//! recovery, so they are split into base-B chunks, each chunk is lifted
//! into the exponent and masked ElGamal style, and decryption brings the
//! chunks back with a baby-step giant-step search bounded by B.

use num_bigint::BigUint;
use num_traits::Zero;
use tracing::debug;

use crate::bsgs::BsgsSolver;
use crate::chunk::ChunkCodec;
use crate::error::SharingError;
use crate::group::CyclicGroup;
use crate::prng::Prng;

/// An ElGamal key pair over a cyclic group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypair<E> {
    /// Secret scalar in `[1, order)`.
    pub secret: BigUint,
    /// Public element `g^secret`.
    pub public: E,
}

impl<E> Keypair<E> {
    /// Draws a fresh key pair from the given randomness stream.
    ///
    /// The secret scalar is never zero; a seeded stream yields the same
    /// pair on every run.
    pub fn generate<G: CyclicGroup<Element = E>>(group: &G, prng: &mut Prng) -> Self {
        let secret = prng.nonzero_below(group.order());
        let public = group.exponentiate(&group.generator(), &secret);
        Keypair { secret, public }
    }

    /// Rebuilds a key pair from a stored secret scalar.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperand` when the scalar is zero or not below the
    /// group order.
    pub fn from_secret<G: CyclicGroup<Element = E>>(
        group: &G,
        secret: BigUint,
    ) -> Result<Self, SharingError> {
        if secret.is_zero() || &secret >= group.order() {
            return Err(SharingError::InvalidOperand(format!(
                "secret scalar must lie in [1, {})",
                group.order()
            )));
        }
        let public = group.exponentiate(&group.generator(), &secret);
        Ok(Keypair { secret, public })
    }
}

/// Ciphertext of one share value: a single ephemeral element plus one
/// masked element per chunk, in little-endian chunk order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareCiphertext<E> {
    /// `g^r`, shared by every chunk of this share.
    pub ephemeral: E,
    /// `g^chunk * pk^r` per chunk.
    pub masked: Vec<E>,
}

/// Encrypts and decrypts share values chunk by chunk.
///
/// The codec fixes the chunk layout, the solver recovers chunks on
/// decryption; both are tied to the same bound at construction.
pub struct ElGamalChunkCipher<G: CyclicGroup> {
    group: G,
    codec: ChunkCodec,
    solver: BsgsSolver<G>,
}

impl<G: CyclicGroup + Clone> ElGamalChunkCipher<G> {
    /// Builds a cipher for share values below `modulus`, chunked below
    /// `bound`.
    pub fn new(group: G, bound: &BigUint, modulus: &BigUint) -> Result<Self, SharingError> {
        let codec = ChunkCodec::new(bound, modulus)?;
        let solver = BsgsSolver::new(group.clone(), bound)?;
        Ok(ElGamalChunkCipher {
            group,
            codec,
            solver,
        })
    }

    /// The group this cipher operates in.
    pub fn group(&self) -> &G {
        &self.group
    }

    /// The chunk layout in use.
    pub fn codec(&self) -> &ChunkCodec {
        &self.codec
    }

    /// Samples a fresh nonzero ephemeral scalar below the group order.
    pub fn random_ephemeral(&self, prng: &mut Prng) -> BigUint {
        prng.nonzero_below(self.group.order())
    }

    /// Encrypts one share value for one receiver.
    ///
    /// The caller provides the ephemeral scalar `r` so that several
    /// encryptions can deliberately share it; it must lie in `[1, order)`.
    /// The receiver mask `pk^r` is computed once and reused across chunks.
    ///
    /// # Errors
    ///
    /// `InvalidOperand` for an out-of-range ephemeral, `InvalidOperand`
    /// when the value is not below the share modulus.
    pub fn encrypt_share(
        &self,
        public_key: &G::Element,
        value: &BigUint,
        r: &BigUint,
    ) -> Result<ShareCiphertext<G::Element>, SharingError> {
        self.check_ephemeral(r)?;
        let ephemeral = self.group.exponentiate(&self.group.generator(), r);
        self.encrypt_with_ephemeral(public_key, value, r, &ephemeral)
    }

    /// Encrypts one share per receiver under a single shared ephemeral.
    ///
    /// Every returned ciphertext carries the same `g^r`, computed once;
    /// only the receiver masks differ. Receivers and shares pair up by
    /// position and their counts must match.
    ///
    /// # Errors
    ///
    /// `InvalidParameters` on a count mismatch, plus everything
    /// [`encrypt_share`](Self::encrypt_share) can raise.
    pub fn encrypt_batch(
        &self,
        public_keys: &[G::Element],
        values: &[BigUint],
        r: &BigUint,
    ) -> Result<Vec<ShareCiphertext<G::Element>>, SharingError> {
        if public_keys.len() != values.len() {
            return Err(SharingError::InvalidParameters(format!(
                "receiver and share counts differ: {} public keys for {} shares",
                public_keys.len(),
                values.len()
            )));
        }
        self.check_ephemeral(r)?;

        let ephemeral = self.group.exponentiate(&self.group.generator(), r);
        debug!("encrypting {} shares under one shared ephemeral", values.len());
        public_keys
            .iter()
            .zip(values)
            .map(|(public_key, value)| {
                self.encrypt_with_ephemeral(public_key, value, r, &ephemeral)
            })
            .collect()
    }

    /// Decrypts a share ciphertext back to its field value.
    ///
    /// The unmasking element `(C1^sk)^-1` is computed once per share; each
    /// chunk then costs one composition and one discrete-log search.
    ///
    /// # Errors
    ///
    /// `ChunkNotFound` when a chunk does not decrypt below the bound, as
    /// happens under a wrong secret key.
    pub fn decrypt_share(
        &self,
        secret_key: &BigUint,
        ciphertext: &ShareCiphertext<G::Element>,
    ) -> Result<BigUint, SharingError> {
        let mask = self.group.exponentiate(&ciphertext.ephemeral, secret_key);
        let unmask = self.group.invert(&mask);
        let mut chunks = Vec::with_capacity(ciphertext.masked.len());
        for masked in &ciphertext.masked {
            let lifted = self.group.compose(masked, &unmask);
            chunks.push(self.solver.solve(&lifted)?);
        }
        self.codec.assemble(&chunks)
    }

    fn encrypt_with_ephemeral(
        &self,
        public_key: &G::Element,
        value: &BigUint,
        r: &BigUint,
        ephemeral: &G::Element,
    ) -> Result<ShareCiphertext<G::Element>, SharingError> {
        let chunks = self.codec.split(value)?;
        let mask = self.group.exponentiate(public_key, r);
        let masked = chunks
            .iter()
            .map(|chunk| {
                let lifted = self.group.exponentiate(&self.group.generator(), chunk);
                self.group.compose(&lifted, &mask)
            })
            .collect();
        Ok(ShareCiphertext {
            ephemeral: ephemeral.clone(),
            masked,
        })
    }

    fn check_ephemeral(&self, r: &BigUint) -> Result<(), SharingError> {
        if r.is_zero() || r >= self.group.order() {
            return Err(SharingError::InvalidOperand(format!(
                "ephemeral scalar must lie in [1, {})",
                self.group.order()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::ModpGroup;
    use num_traits::One;

    /// q = 113, p = 227; small enough that every test path runs in a blink.
    fn tiny_group() -> ModpGroup {
        ModpGroup::new(
            BigUint::from(227u32),
            BigUint::from(113u32),
            BigUint::from(4u32),
        )
        .unwrap()
    }

    /// Share values below 101, chunked in base 8 (three chunks).
    fn tiny_cipher() -> ElGamalChunkCipher<ModpGroup> {
        ElGamalChunkCipher::new(
            tiny_group(),
            &BigUint::from(8u32),
            &BigUint::from(101u32),
        )
        .unwrap()
    }

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let cipher = tiny_cipher();
        let mut prng = Prng::new(Some(42));
        let keypair = Keypair::generate(cipher.group(), &mut prng);
        let r = cipher.random_ephemeral(&mut prng);

        for value in [0u32, 1, 7, 8, 63, 100] {
            let value = BigUint::from(value);
            let ciphertext = cipher.encrypt_share(&keypair.public, &value, &r).unwrap();
            assert_eq!(ciphertext.masked.len(), cipher.codec().num_chunks());
            let recovered = cipher.decrypt_share(&keypair.secret, &ciphertext).unwrap();
            assert_eq!(recovered, value);
        }
    }

    #[test]
    fn test_round_trip_with_the_demo_group_and_default_parameters() {
        let group = ModpGroup::demo();
        let bound = BigUint::one() << crate::constants::DEFAULT_CHUNK_BITS;
        let cipher = ElGamalChunkCipher::new(group, &bound, &crate::constants::DEFAULT_PRIME).unwrap();

        let mut prng = Prng::new(Some(7));
        let keypair = Keypair::generate(cipher.group(), &mut prng);
        let r = cipher.random_ephemeral(&mut prng);

        let value = crate::constants::DEFAULT_PRIME.clone() - 12345u32;
        let ciphertext = cipher.encrypt_share(&keypair.public, &value, &r).unwrap();
        assert_eq!(ciphertext.masked.len(), 17);
        let recovered = cipher.decrypt_share(&keypair.secret, &ciphertext).unwrap();
        assert_eq!(recovered, value);
    }

    #[test]
    fn test_wrong_key_never_recovers_the_value() {
        let cipher = tiny_cipher();
        let mut prng = Prng::new(Some(3));
        let keypair = Keypair::generate(cipher.group(), &mut prng);
        let mut wrong = Keypair::generate(cipher.group(), &mut prng);
        if wrong.secret == keypair.secret {
            wrong.secret = if keypair.secret == BigUint::one() {
                BigUint::from(2u32)
            } else {
                BigUint::one()
            };
        }
        let r = cipher.random_ephemeral(&mut prng);

        let value = BigUint::from(77u32);
        let ciphertext = cipher.encrypt_share(&keypair.public, &value, &r).unwrap();
        match cipher.decrypt_share(&wrong.secret, &ciphertext) {
            Ok(recovered) => assert_ne!(recovered, value),
            Err(error) => assert!(matches!(error, SharingError::ChunkNotFound { .. })),
        }
    }

    #[test]
    fn test_batch_shares_one_ephemeral_across_receivers() {
        let cipher = tiny_cipher();
        let mut prng = Prng::new(Some(9));
        let keypairs: Vec<Keypair<BigUint>> = (0..3)
            .map(|_| Keypair::generate(cipher.group(), &mut prng))
            .collect();
        let public_keys: Vec<BigUint> = keypairs.iter().map(|kp| kp.public.clone()).collect();
        let values: Vec<BigUint> = [13u32, 55, 99].iter().map(|&v| BigUint::from(v)).collect();
        let r = cipher.random_ephemeral(&mut prng);

        let ciphertexts = cipher.encrypt_batch(&public_keys, &values, &r).unwrap();
        assert_eq!(ciphertexts.len(), 3);
        for ciphertext in &ciphertexts {
            assert_eq!(ciphertext.ephemeral, ciphertexts[0].ephemeral);
        }
        for (keypair, (ciphertext, value)) in
            keypairs.iter().zip(ciphertexts.iter().zip(&values))
        {
            let recovered = cipher.decrypt_share(&keypair.secret, ciphertext).unwrap();
            assert_eq!(recovered, *value);
        }
    }

    #[test]
    fn test_batch_rejects_mismatched_lengths() {
        let cipher = tiny_cipher();
        let mut prng = Prng::new(Some(5));
        let keypair = Keypair::generate(cipher.group(), &mut prng);
        let r = cipher.random_ephemeral(&mut prng);

        let result = cipher.encrypt_batch(
            &[keypair.public.clone()],
            &[BigUint::from(1u32), BigUint::from(2u32)],
            &r,
        );
        assert!(matches!(result, Err(SharingError::InvalidParameters(_))));
    }

    #[test]
    fn test_out_of_range_ephemerals_are_rejected() {
        let cipher = tiny_cipher();
        let mut prng = Prng::new(Some(6));
        let keypair = Keypair::generate(cipher.group(), &mut prng);
        let value = BigUint::from(42u32);

        let zero = BigUint::zero();
        assert!(cipher.encrypt_share(&keypair.public, &value, &zero).is_err());

        let order = cipher.group().order().clone();
        assert!(cipher.encrypt_share(&keypair.public, &value, &order).is_err());
    }

    #[test]
    fn test_values_outside_the_share_field_are_rejected() {
        let cipher = tiny_cipher();
        let mut prng = Prng::new(Some(8));
        let keypair = Keypair::generate(cipher.group(), &mut prng);
        let r = cipher.random_ephemeral(&mut prng);

        let result = cipher.encrypt_share(&keypair.public, &BigUint::from(101u32), &r);
        assert!(matches!(result, Err(SharingError::InvalidOperand(_))));
    }

    #[test]
    fn test_keypair_generation_is_seed_deterministic() {
        let group = ModpGroup::demo();
        let first = Keypair::generate(&group, &mut Prng::new(Some(21)));
        let second = Keypair::generate(&group, &mut Prng::new(Some(21)));
        assert_eq!(first, second);

        let third = Keypair::generate(&group, &mut Prng::new(Some(22)));
        assert_ne!(first.secret, third.secret);
    }

    #[test]
    fn test_keypair_from_secret_validates_the_scalar() {
        let group = tiny_group();
        let keypair = Keypair::from_secret(&group, BigUint::from(57u32)).unwrap();
        assert_eq!(
            keypair.public,
            group.exponentiate(&group.generator(), &BigUint::from(57u32))
        );

        assert!(Keypair::from_secret(&group, BigUint::zero()).is_err());
        assert!(Keypair::from_secret(&group, BigUint::from(113u32)).is_err());
    }
}

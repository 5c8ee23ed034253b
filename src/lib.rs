//! # Shamir Secret Sharing over a Prime Field, with Resharing and Share Encryption
//!
//! This library implements Shamir's Secret Sharing (SSS) over the integers modulo a large
//! prime. It provides functionality to split secrets into shares, reconstruct them at a
//! threshold, move a live sharing to new parameters, and encrypt individual shares for
//! transport with a chunked ElGamal scheme.
//!
//! ## Shamir's Secret Sharing (SSS)
//!
//! Shamir's Secret Sharing is a cryptographic algorithm created by Adi Shamir. It is a form of secret
//! sharing, where a secret is divided into parts, giving each participant its own unique part, with
//! the property that a certain number of these parts are needed to reconstruct the secret.
//!
//! ### The Mathematics Behind SSS
//!
//! The idea of SSS is based on polynomial interpolation in finite fields. Given a secret `S`
//! in the field of integers modulo a prime `P`, the algorithm chooses a random polynomial of
//! degree `t-1` (where `t` is the threshold number of shares needed to reconstruct the secret):
//!
//! ```ignore
//! f(x) = a0 + a1*x + a2*x^2 + ... + a(t-1)*x^(t-1)   (mod P)
//! ```
//!
//! where `a0 = S` (the secret), and `a1, ..., a(t-1)` are randomly chosen coefficients. Each share
//! corresponds to a point `(x, f(x))` on this polynomial, at the indices `x = 1..=n`. With at
//! least `t` points, the polynomial and hence the secret can be reconstructed using Lagrange
//! interpolation at zero. With fewer than `t` points every candidate secret remains equally
//! plausible.
//!
//! ### Resharing
//!
//! A live sharing can be moved to new parameters, for example from 5-of-10 to 7-of-12, without
//! changing the secret. The direct route reconstructs the secret and deals it again with a
//! fresh polynomial. The redistribution route never materializes the secret at all: each
//! current holder deals a sub-sharing of its own share value, and the new shares are
//! Lagrange-weighted combinations of the sub-shares. Either way the old and new shares are
//! unrelated beyond their common secret, so leaked sub-threshold share sets are revoked.
//!
//! ### Share Encryption
//!
//! Shares are field elements of a couple hundred bits, far beyond what any discrete-log
//! recovery could handle directly. The `chunk` module splits a share value into small base-B
//! digits, the `elgamal` module lifts each digit into the exponent of a cyclic-group generator
//! and masks it ElGamal style, and the `bsgs` module recovers the digits on decryption with a
//! baby-step giant-step search bounded by B.
//!
//! ## Usage in the Code
//!
//! ### Example: Splitting and Reconstructing a Secret
//!
//! ```rust
//! use num_bigint::BigUint;
//! use reshard::sss::SharingBuilder;
//!
//! let secret = BigUint::from(1234u32);
//! let sharing = SharingBuilder::new(secret.clone(), 3, 5, BigUint::from(7919u32))
//!     .with_seed(42)
//!     .build()
//!     .unwrap();
//!
//! // Any three of the five shares recover the secret; here we use all of them.
//! assert_eq!(sharing.reconstruct_secret().unwrap(), secret);
//!
//! // Move the same secret to a 2-of-4 sharing with a fresh polynomial.
//! let reshared = sharing.reshare_shares(2, 4, Some(7)).unwrap();
//! assert_eq!(reshared.reconstruct_secret().unwrap(), secret);
//! ```
//!
//! ### Example: Encrypting a Share
//!
//! ```rust
//! use num_bigint::BigUint;
//! use reshard::elgamal::{ElGamalChunkCipher, Keypair};
//! use reshard::group::ModpGroup;
//! use reshard::prng::Prng;
//!
//! // A toy group of order 113 and share values below 101, chunked in base 8.
//! let group = ModpGroup::new(
//!     BigUint::from(227u32),
//!     BigUint::from(113u32),
//!     BigUint::from(4u32),
//! )
//! .unwrap();
//! let cipher = ElGamalChunkCipher::new(group, &BigUint::from(8u32), &BigUint::from(101u32))
//!     .unwrap();
//!
//! let mut prng = Prng::new(Some(7));
//! let keypair = Keypair::generate(cipher.group(), &mut prng);
//! let r = cipher.random_ephemeral(&mut prng);
//!
//! let share_value = BigUint::from(77u32);
//! let ciphertext = cipher.encrypt_share(&keypair.public, &share_value, &r).unwrap();
//! assert_eq!(
//!     cipher.decrypt_share(&keypair.secret, &ciphertext).unwrap(),
//!     share_value
//! );
//! ```
//!
//! ## Modules
//!
//! - `field`: Modular arithmetic over the share field.
//! - `prng`: Seedable randomness for reproducible dealings.
//! - `sss`: Implements the dealing, reconstruction and resharing of secrets.
//! - `chunk`: Splits share values into bounded chunks and reassembles them.
//! - `group`: The cyclic-group abstraction share encryption runs over.
//! - `bsgs`: Baby-step giant-step discrete logarithms for bounded exponents.
//! - `elgamal`: Chunked ElGamal encryption of share values.
//! - `repository`: Manages storage and retrieval of dealt sharings.
//! - `config`: On-disk configuration and the stored encryption key.
//!
//! [More detailed documentation and examples are provided in each module.]

/// The `bsgs` module recovers bounded discrete logarithms with the baby-step giant-step
/// algorithm. Baby-step tables are built once per group and bound, then shared process-wide,
/// so decrypting many chunks pays the table cost only once.
pub mod bsgs;

/// The `chunk` module fixes the layout share values are split into before encryption: how
/// many base-B chunks a field element needs, and how chunks reassemble into the element.
pub mod chunk;

/// The `config` module manages the configuration directory, the stored ElGamal secret scalar
/// and the tunable parameters of the share field.
pub mod config;

/// The `constants` module defines the default field prime, chunk width and demonstration
/// group parameters.
pub mod constants;

/// The `elgamal` module encrypts and decrypts share values chunk by chunk over a cyclic
/// group, with support for batching several receivers under one ephemeral.
pub mod elgamal;

/// The `error` module defines the error type shared by every sharing and encryption
/// operation.
pub mod error;

/// The `field` module implements modular arithmetic over the prime field the shares live in.
pub mod field;

/// The `group` module defines the cyclic-group trait used by share encryption, together with
/// a multiplicative group of integers modulo a safe prime.
pub mod group;

/// The `prng` module wraps a seedable random number generator so that dealings can be made
/// reproducible on demand.
pub mod prng;

/// The `repository` module manages data storage and retrieval. It is responsible for
/// persisting dealt sharings, and provides interfaces for accessing and updating them.
pub mod repository;

/// The `sss` (Shamir's Secret Sharing) module is the heart of the library. It implements
/// dealing over a prime field, Lagrange reconstruction, and the two resharing protocols.
pub mod sss;

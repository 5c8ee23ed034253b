//! Default parameters shared by the binary, the benchmarks and the tests.

use lazy_static::lazy_static;
use num_bigint::BigUint;

/// Decimal form of the default 257-bit sharing prime.
pub const DEFAULT_PRIME_DECIMAL: &str =
    "208351617316091241234326746312124448251235562226470491514186331217050270460481";

/// Bit size of the default chunk bound; chunks live in `[0, 2^16)`.
pub const DEFAULT_CHUNK_BITS: u32 = 16;

/// Modulus `p = 2q + 1` of the demo Schnorr group, a 256-bit safe prime.
pub const DEMO_GROUP_MODULUS_DECIMAL: &str =
    "95097065756001590872943770993109992420939658776361967729339247065170696957699";

/// Prime order `q` of the demo group's quadratic-residue subgroup.
pub const DEMO_GROUP_ORDER_DECIMAL: &str =
    "47548532878000795436471885496554996210469829388180983864669623532585348478849";

/// Generator of the order-`q` subgroup (4 is a square, hence a residue).
pub const DEMO_GROUP_GENERATOR: u32 = 4;

lazy_static! {
    /// The default prime field modulus for dealing shares.
    pub static ref DEFAULT_PRIME: BigUint = parse_decimal(DEFAULT_PRIME_DECIMAL);

    /// Modulus of the demo Schnorr group.
    pub static ref DEMO_GROUP_MODULUS: BigUint = parse_decimal(DEMO_GROUP_MODULUS_DECIMAL);

    /// Order of the demo Schnorr group.
    pub static ref DEMO_GROUP_ORDER: BigUint = parse_decimal(DEMO_GROUP_ORDER_DECIMAL);
}

fn parse_decimal(digits: &str) -> BigUint {
    BigUint::parse_bytes(digits.as_bytes(), 10).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    #[test]
    fn test_default_prime_parses() {
        assert_eq!(DEFAULT_PRIME.bits(), 257);
    }

    #[test]
    fn test_demo_group_is_a_safe_prime_group() {
        // p = 2q + 1
        let doubled = &*DEMO_GROUP_ORDER * 2u32 + BigUint::one();
        assert_eq!(doubled, *DEMO_GROUP_MODULUS);
    }

    #[test]
    fn test_demo_generator_has_subgroup_order() {
        let generator = BigUint::from(DEMO_GROUP_GENERATOR);
        let lifted = generator.modpow(&DEMO_GROUP_ORDER, &DEMO_GROUP_MODULUS);
        assert!(lifted.is_one());
    }
}

//! Cyclic group abstraction behind the encryption layer.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::constants;
use crate::error::SharingError;

/// The group capability needed by ElGamal and discrete-log search.
///
/// Groups are prime-order and written multiplicatively. Only composition
/// and exponentiation are required of an implementation; inversion has a
/// default in terms of the group order. Sharing logic never touches this
/// trait, so a different instantiation (an elliptic curve, say) slots in
/// without disturbing the field arithmetic.
pub trait CyclicGroup {
    /// The element representation.
    type Element: Clone + PartialEq + Eq + std::fmt::Debug;

    /// A fixed generator of the group.
    fn generator(&self) -> Self::Element;

    /// The neutral element.
    fn identity(&self) -> Self::Element;

    /// The group operation.
    fn compose(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// `base` composed with itself `exponent` times.
    fn exponentiate(&self, base: &Self::Element, exponent: &BigUint) -> Self::Element;

    /// The number of elements in the group.
    fn order(&self) -> &BigUint;

    /// A canonical byte encoding of an element, used for hashing.
    fn element_bytes(&self, element: &Self::Element) -> Vec<u8>;

    /// A canonical byte encoding of every parameter defining the group,
    /// used to key cached per-group state.
    ///
    /// Groups that are not interchangeable must encode differently;
    /// agreeing on order and generator alone does not make two groups
    /// the same group.
    fn parameter_bytes(&self) -> Vec<u8>;

    /// The inverse of an element; `a^(order - 1)` by default.
    fn invert(&self, element: &Self::Element) -> Self::Element {
        self.exponentiate(element, &(self.order() - BigUint::one()))
    }
}

/// The prime-order subgroup of `(Z/pZ)*` for a safe prime `p = 2q + 1`,
/// also known as a Schnorr group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModpGroup {
    modulus: BigUint,
    order: BigUint,
    generator: BigUint,
}

impl ModpGroup {
    /// Builds a group from its modulus, subgroup order and generator.
    ///
    /// The order must be prime (the caller's contract, as with the field
    /// modulus). Under that contract a single exponentiation suffices to
    /// check the generator: `g^q = 1` with `g != 1` pins its order to
    /// exactly `q`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` for degenerate moduli or orders, or a
    /// generator that is not an order-`q` element.
    pub fn new(
        modulus: BigUint,
        order: BigUint,
        generator: BigUint,
    ) -> Result<Self, SharingError> {
        if modulus < BigUint::from(3u32) {
            return Err(SharingError::InvalidParameters(format!(
                "group modulus must be at least 3, got {}",
                modulus
            )));
        }
        if order < BigUint::from(2u32) {
            return Err(SharingError::InvalidParameters(format!(
                "group order must be at least 2, got {}",
                order
            )));
        }
        if generator.is_zero() || generator.is_one() || generator >= modulus {
            return Err(SharingError::InvalidParameters(format!(
                "generator {} is not a nontrivial residue modulo {}",
                generator, modulus
            )));
        }
        if !generator.modpow(&order, &modulus).is_one() {
            return Err(SharingError::InvalidParameters(format!(
                "generator {} does not have order {}",
                generator, order
            )));
        }
        Ok(ModpGroup {
            modulus,
            order,
            generator,
        })
    }

    /// The fixed 256-bit Schnorr group used by the binary, the benchmarks
    /// and the larger tests.
    pub fn demo() -> Self {
        ModpGroup {
            modulus: constants::DEMO_GROUP_MODULUS.clone(),
            order: constants::DEMO_GROUP_ORDER.clone(),
            generator: BigUint::from(constants::DEMO_GROUP_GENERATOR),
        }
    }

    /// The prime modulus `p`.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }
}

impl CyclicGroup for ModpGroup {
    type Element = BigUint;

    fn generator(&self) -> BigUint {
        self.generator.clone()
    }

    fn identity(&self) -> BigUint {
        BigUint::one()
    }

    fn compose(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    fn exponentiate(&self, base: &BigUint, exponent: &BigUint) -> BigUint {
        base.modpow(exponent, &self.modulus)
    }

    fn order(&self) -> &BigUint {
        &self.order
    }

    fn element_bytes(&self, element: &BigUint) -> Vec<u8> {
        element.to_bytes_be()
    }

    fn parameter_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        for part in [&self.modulus, &self.order, &self.generator] {
            let encoded = part.to_bytes_be();
            bytes.extend_from_slice(&(encoded.len() as u64).to_be_bytes());
            bytes.extend_from_slice(&encoded);
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// q = 113, p = 2 * 113 + 1 = 227, both prime; 4 generates the
    /// order-113 subgroup.
    fn tiny_group() -> ModpGroup {
        ModpGroup::new(
            BigUint::from(227u32),
            BigUint::from(113u32),
            BigUint::from(4u32),
        )
        .unwrap()
    }

    #[test]
    fn test_demo_group_generator_is_valid() {
        let group = ModpGroup::demo();
        let lifted = group.exponentiate(&group.generator(), group.order());
        assert_eq!(lifted, group.identity());
    }

    #[test]
    fn test_compose_agrees_with_exponentiate() {
        let group = tiny_group();
        let generator = group.generator();
        let squared = group.compose(&generator, &generator);
        assert_eq!(squared, group.exponentiate(&generator, &BigUint::from(2u32)));
    }

    #[test]
    fn test_invert_composes_to_the_identity() {
        let group = tiny_group();
        let element = group.exponentiate(&group.generator(), &BigUint::from(57u32));
        let inverse = group.invert(&element);
        assert_eq!(group.compose(&element, &inverse), group.identity());
    }

    #[test]
    fn test_identity_is_neutral() {
        let group = tiny_group();
        let element = group.exponentiate(&group.generator(), &BigUint::from(12u32));
        assert_eq!(group.compose(&element, &group.identity()), element);
    }

    #[test]
    fn test_wrong_order_generators_are_rejected() {
        // 5 is a non-residue modulo 227, so its order is 226, not 113
        let wrong = ModpGroup::new(
            BigUint::from(227u32),
            BigUint::from(113u32),
            BigUint::from(5u32),
        );
        assert!(wrong.is_err());

        let identity = ModpGroup::new(
            BigUint::from(227u32),
            BigUint::from(113u32),
            BigUint::one(),
        );
        assert!(identity.is_err());
    }

    #[test]
    fn test_element_bytes_are_canonical() {
        let group = tiny_group();
        let element = BigUint::from(200u32);
        assert_eq!(group.element_bytes(&element), vec![200u8]);
    }

    #[test]
    fn test_parameter_bytes_commit_to_the_modulus() {
        // 4 has order 5 both modulo 31 and modulo 11
        let first = ModpGroup::new(
            BigUint::from(31u32),
            BigUint::from(5u32),
            BigUint::from(4u32),
        )
        .unwrap();
        let second = ModpGroup::new(
            BigUint::from(11u32),
            BigUint::from(5u32),
            BigUint::from(4u32),
        )
        .unwrap();
        assert_ne!(first.parameter_bytes(), second.parameter_bytes());
    }
}

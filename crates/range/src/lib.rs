//! # Aggregated Range Proofs
//!
//! This crate implements Bulletproofs-style range proofs over secp256k1.
//! One proof attests that each of `M ∈ {1, 2, 4, 8}` Pedersen-committed values
//! lies in `[0, 2^64)` without revealing any of them.
//!
//! ## Mathematical Background
//!
//! For values `v_j` with masks `γ_j` and commitments `V_j = γ_j G + v_j H`:
//!
//! 1. **Bit Decomposition**: `aL` holds the 64 little-endian bits of every
//!    value back to back, `aR = aL - 1`.
//! 2. **Vector Commitments**: `A = <aL, Gi> + <aR, Hi> + α H` and
//!    `S = <sL, Gi> + <sR, Hi> + ρ H` for random `sL, sR`.
//! 3. **Challenges**: `y = Hs(V.. || A)`, `z = Hs(.. || S)`,
//!    `x = Hs(.. || T1 || T2)` over one running Keccak-256 transcript.
//! 4. **Polynomial**: `l(X) = aL - z·1 + sL X`,
//!    `r(X) = y^n ∘ (aR + z·1 + sR X) + zerotwos` with
//!    `zerotwos[64j + i] = z^(2+j) 2^i`, and `t(X) = <l(X), r(X)>`.
//! 5. **Inner Product**: `<l(x), r(x)> = t(x)` is proven with the inner
//!    product argument over `Gi` and `H'i = y^(-i) Hi`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use range::{RangeProver, RangeVerifier};
//! use privacy_core::{scalar::random_scalar, Scalar};
//! use rand::rngs::OsRng;
//!
//! let values = [Scalar::from(42u64)];
//! let masks = [random_scalar(&mut OsRng)];
//!
//! let proof = RangeProver::new().prove(&values, &masks, &mut OsRng).unwrap();
//! assert!(RangeVerifier::new().verify(&proof));
//! ```

pub mod proof;
pub mod prover;
pub mod verifier;

#[cfg(test)]
mod property_tests;

pub use proof::*;
pub use prover::*;
pub use verifier::*;

use privacy_core::{utils::scalar_powers, PrivacyError, PrivacyResult, Scalar, BITS_PER_VALUE};

/// Aggregation sizes a single proof may cover
pub const SUPPORTED_AGGREGATION: [usize; 4] = [1, 2, 4, 8];

/// Largest provable value, 2^64 - 1
pub const MAX_VALUE: u64 = u64::MAX;

/// Reject aggregation sizes outside {1, 2, 4, 8}
pub fn check_aggregation(m: usize) -> PrivacyResult<()> {
    if SUPPORTED_AGGREGATION.contains(&m) {
        Ok(())
    } else {
        Err(PrivacyError::UnsupportedAggregationSize(m))
    }
}

/// `zerotwos[64 j + i] = z^(2+j) 2^i`, the offset tying each value's bits to its commitment
pub(crate) fn zero_twos(z: &Scalar, m: usize) -> Vec<Scalar> {
    let twos = scalar_powers(&Scalar::from(2u64), BITS_PER_VALUE);
    let z_powers = scalar_powers(z, m + 2);

    z_powers[2..]
        .iter()
        .flat_map(|zj| twos.iter().map(move |two| zj * two))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_aggregation() {
        for m in SUPPORTED_AGGREGATION {
            assert!(check_aggregation(m).is_ok());
        }
        for m in [0, 3, 5, 6, 7, 9, 16] {
            assert_eq!(check_aggregation(m), Err(PrivacyError::UnsupportedAggregationSize(m)));
        }
    }

    #[test]
    fn test_zero_twos_layout() {
        let z = Scalar::from(3u64);
        let zt = zero_twos(&z, 2);

        assert_eq!(zt.len(), 128);
        assert_eq!(zt[0], Scalar::from(9u64));
        assert_eq!(zt[1], Scalar::from(18u64));
        assert_eq!(zt[64], Scalar::from(27u64));
        assert_eq!(zt[65], Scalar::from(54u64));
    }
}

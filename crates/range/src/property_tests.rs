//! Property-based tests for range proof soundness and completeness

use crate::{RangeProof, RangeProver, RangeVerifier};
use privacy_core::{scalar, PrivacyError, Scalar};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

fn arb_mask() -> impl Strategy<Value = Scalar> {
    any::<[u8; 32]>().prop_map(|bytes| scalar::from_bytes_reduced(&bytes))
}

fn arb_batch() -> impl Strategy<Value = Vec<(u64, Scalar)>> {
    prop_oneof![Just(1usize), Just(2usize), Just(4usize)]
        .prop_flat_map(|m| prop::collection::vec((any::<u64>(), arb_mask()), m))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    /// Test that valid range proofs always verify
    #[test]
    fn test_completeness(batch in arb_batch(), seed in any::<u64>()) {
        let values: Vec<Scalar> = batch.iter().map(|(v, _)| Scalar::from(*v)).collect();
        let masks: Vec<Scalar> = batch.iter().map(|(_, mask)| *mask).collect();

        let proof = RangeProver::new().prove(&values, &masks, &mut StdRng::seed_from_u64(seed))?;
        prop_assert!(RangeVerifier::new().verify(&proof));
    }

    /// Test that values at or above 2^64 cannot be proven
    #[test]
    fn test_soundness_out_of_range(excess in any::<u64>(), mask in arb_mask()) {
        let value = scalar::two_pow_64() + Scalar::from(excess);
        let result = RangeProver::new().prove(&[value], &[mask], &mut StdRng::seed_from_u64(excess));
        prop_assert_eq!(result, Err(PrivacyError::ValueOutOfRange { bits: 64 }));
    }
}

fn fixed_proof() -> RangeProof {
    let mut rng = StdRng::seed_from_u64(2024);
    let masks = [scalar::random_scalar(&mut rng), scalar::random_scalar(&mut rng)];
    RangeProver::new()
        .prove_amounts(&[u64::MAX, 0], &masks, &mut rng)
        .expect("valid inputs")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Flipping any single byte of the wire encoding breaks verification
    #[test]
    fn test_tamper_sensitivity(position in any::<prop::sample::Index>(), flip in 1u8..=255) {
        let mut bytes = fixed_proof().to_bytes();
        let i = position.index(bytes.len());
        bytes[i] ^= flip;
        prop_assert!(!RangeVerifier::new().verify_bytes(&bytes));
    }
}

#[test]
fn test_untampered_bytes_verify() {
    assert!(RangeVerifier::new().verify_bytes(&fixed_proof().to_bytes()));
}

#[test]
fn test_tamper_each_section() {
    let verifier = RangeVerifier::new();
    let original = fixed_proof().to_bytes();

    // length prefix, V_0, A, cy, Th, Mu, Ipp.L[0], Ipp.A, last challenge byte
    let positions = [3, 10, 4 + 2 * 33 + 5, 4 + 6 * 33, 4 + 6 * 33 + 3 * 32 + 1, 4 + 6 * 33 + 5 * 32 + 31];
    let ipp_start = 4 + 6 * 33 + 6 * 32;
    let rounds = 7;
    let ipp_positions = [ipp_start + 1, ipp_start + 2 * rounds * 33 + 4, original.len() - 1];

    for i in positions.iter().chain(ipp_positions.iter()) {
        let mut bytes = original.clone();
        bytes[*i] ^= 0x01;
        assert!(!verifier.verify_bytes(&bytes), "flip at byte {} verified", i);
    }
}

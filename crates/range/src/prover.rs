//! Range proof prover implementation

use crate::{check_aggregation, zero_twos, RangeProof};
use ipa::InnerProductProver;
use log::debug;
use privacy_core::{
    commit_with, scalar, scalar::random_scalar, utils::*, GeneratorSet, GroupElement, KeccakTranscript,
    PrivacyError, PrivacyResult, Scalar, BITS_PER_VALUE,
};
use rand_core::{CryptoRng, RngCore};

/// Prover for generating aggregated range proofs
#[derive(Debug, Clone, Copy)]
pub struct RangeProver<'a> {
    generators: &'a GeneratorSet,
}

impl RangeProver<'static> {
    /// Create a range prover over the process-wide generators
    pub fn new() -> Self {
        Self {
            generators: GeneratorSet::global(),
        }
    }
}

impl Default for RangeProver<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> RangeProver<'a> {
    /// Create a range prover with existing generators
    pub fn with_generators(generators: &'a GeneratorSet) -> Self {
        Self { generators }
    }

    /// Prove that every `values[j]` lies in [0, 2^64), committed under `masks[j]`
    ///
    /// Inputs are validated before anything is committed, so a rejected call
    /// leaks nothing.
    pub fn prove<R: RngCore + CryptoRng>(
        &self,
        values: &[Scalar],
        masks: &[Scalar],
        rng: &mut R,
    ) -> PrivacyResult<RangeProof> {
        if values.len() != masks.len() {
            return Err(PrivacyError::IncompatibleVectorLength {
                expected: values.len(),
                actual: masks.len(),
            });
        }
        check_aggregation(values.len())?;

        let amounts = values
            .iter()
            .map(|v| scalar::to_u64(v).ok_or(PrivacyError::ValueOutOfRange { bits: BITS_PER_VALUE }))
            .collect::<PrivacyResult<Vec<u64>>>()?;

        self.prove_amounts(&amounts, masks, rng)
    }

    /// Prove a batch of native `u64` amounts
    pub fn prove_amounts<R: RngCore + CryptoRng>(
        &self,
        amounts: &[u64],
        masks: &[Scalar],
        rng: &mut R,
    ) -> PrivacyResult<RangeProof> {
        if amounts.len() != masks.len() {
            return Err(PrivacyError::IncompatibleVectorLength {
                expected: amounts.len(),
                actual: masks.len(),
            });
        }
        let m = amounts.len();
        check_aggregation(m)?;

        let nm = BITS_PER_VALUE * m;
        let (g_vec, h_vec) = self.generators.vectors(nm)?;
        let h = self.generators.h_generator();
        debug!("Proving range of {m} aggregated values");

        let commitments: Vec<GroupElement> = amounts
            .iter()
            .zip(masks.iter())
            .map(|(v, mask)| commit_with(self.generators, &Scalar::from(*v), mask))
            .collect();

        // Bit vectors
        let a_l: Vec<Scalar> = amounts.iter().flat_map(|v| bit_decomposition(*v, BITS_PER_VALUE)).collect();
        let a_r = vector_add_scalar(&a_l, &-Scalar::ONE);

        let alpha = random_scalar(rng);
        let a_commit = self.generators.vector_commit(&a_l, &a_r)? + h * alpha;

        // Blinding vectors
        let s_l: Vec<Scalar> = (0..nm).map(|_| random_scalar(rng)).collect();
        let s_r: Vec<Scalar> = (0..nm).map(|_| random_scalar(rng)).collect();
        let rho = random_scalar(rng);
        let s_commit = self.generators.vector_commit(&s_l, &s_r)? + h * rho;

        let mut transcript = KeccakTranscript::new();
        for v in &commitments {
            transcript.append_point(v);
        }
        transcript.append_point(&a_commit);
        let y = transcript.challenge_scalar();
        transcript.append_point(&s_commit);
        let z = transcript.challenge_scalar();

        // l(X) = l0 + l1 X, r(X) = r0 + r1 X
        let y_powers = scalar_powers(&y, nm);
        let l0 = vector_add_scalar(&a_l, &-z);
        let l1 = s_l;
        let r0 = vector_add(&hadamard_product(&y_powers, &vector_add_scalar(&a_r, &z))?, &zero_twos(&z, m))?;
        let r1 = hadamard_product(&y_powers, &s_r)?;

        let t1 = inner_product(&l0, &r1)? + inner_product(&l1, &r0)?;
        let t2 = inner_product(&l1, &r1)?;

        let tau1 = random_scalar(rng);
        let tau2 = random_scalar(rng);
        let t1_commit = commit_with(self.generators, &t1, &tau1);
        let t2_commit = commit_with(self.generators, &t2, &tau2);

        transcript.append_point(&t1_commit);
        transcript.append_point(&t2_commit);
        let x = transcript.challenge_scalar();

        let l = vector_add(&l0, &vector_scale(&l1, &x))?;
        let r = vector_add(&r0, &vector_scale(&r1, &x))?;
        let t = inner_product(&l, &r)?;

        let z_powers = scalar_powers(&z, m + 2);
        let masked: Scalar = z_powers[2..].iter().zip(masks.iter()).map(|(zj, mask)| zj * mask).sum();
        let taux = tau1 * x + tau2 * x * x + masked;
        let mu = alpha + rho * x;

        // Rebase Hi by y^{-i} so <r, H'> cancels the y powers folded into r
        let y_inv = scalar::invert(&y)?;
        let h_prime = point_hadamard(h_vec, &scalar_powers(&y_inv, nm))?;

        let p = GroupElement::multiscalar_mul(
            l.iter().chain(r.iter()).cloned(),
            g_vec.iter().chain(h_prime.iter()).cloned(),
        );
        let ipp = InnerProductProver::new(g_vec, &h_prime, self.generators.u_generator()).prove(&l, &r, &t, &p)?;

        Ok(RangeProof {
            commitments,
            a: a_commit,
            s: s_commit,
            t1: t1_commit,
            t2: t2_commit,
            cy: y,
            cz: z,
            cx: x,
            th: t,
            taux,
            mu,
            ipp,
        })
    }

    /// Get the generator set used by this prover
    pub fn generators(&self) -> &GeneratorSet {
        self.generators
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RangeVerifier, MAX_VALUE};
    use privacy_core::gen_commitment;
    use rand::{rngs::StdRng, thread_rng, SeedableRng};

    fn random_masks(m: usize) -> Vec<Scalar> {
        (0..m).map(|_| random_scalar(&mut thread_rng())).collect()
    }

    #[test]
    fn test_range_proof_generation() {
        let masks = random_masks(1);
        let proof = RangeProver::new().prove(&[Scalar::from(42u64)], &masks, &mut thread_rng()).unwrap();

        assert_eq!(proof.aggregation(), 1);
        assert_eq!(proof.ipp.num_rounds(), 6);
        assert_eq!(proof.commitments[0], gen_commitment(42, &masks[0]));
    }

    #[test]
    fn test_aggregated_rounds() {
        let masks = random_masks(8);
        let values: Vec<Scalar> = (0..8u64).map(Scalar::from).collect();
        let proof = RangeProver::new().prove(&values, &masks, &mut thread_rng()).unwrap();

        assert_eq!(proof.ipp.num_rounds(), 9);
        assert!(RangeVerifier::new().verify(&proof));
    }

    #[test]
    fn test_edge_case_values() {
        let prover = RangeProver::new();
        let verifier = RangeVerifier::new();

        for value in [0u64, 1, MAX_VALUE] {
            let proof = prover.prove(&[Scalar::from(value)], &random_masks(1), &mut thread_rng()).unwrap();
            assert!(verifier.verify(&proof), "Failed for value {}", value);
        }
    }

    #[test]
    fn test_value_out_of_range() {
        let prover = RangeProver::new();
        let masks = random_masks(1);

        assert_eq!(Scalar::from(MAX_VALUE) + Scalar::ONE, scalar::two_pow_64());
        let result = prover.prove(&[scalar::two_pow_64()], &masks, &mut thread_rng());
        assert_eq!(result, Err(PrivacyError::ValueOutOfRange { bits: 64 }));

        let result = prover.prove(&[-Scalar::ONE], &masks, &mut thread_rng());
        assert_eq!(result, Err(PrivacyError::ValueOutOfRange { bits: 64 }));
    }

    #[test]
    fn test_unsupported_aggregation() {
        let prover = RangeProver::new();
        for m in [0usize, 3, 5, 16] {
            let values = vec![Scalar::ONE; m];
            let result = prover.prove(&values, &random_masks(m), &mut thread_rng());
            assert_eq!(result, Err(PrivacyError::UnsupportedAggregationSize(m)));
        }
    }

    #[test]
    fn test_mismatched_masks() {
        let result = RangeProver::new().prove(&[Scalar::ONE, Scalar::ONE], &random_masks(1), &mut thread_rng());
        assert!(matches!(result, Err(PrivacyError::IncompatibleVectorLength { .. })));
    }

    #[test]
    fn test_deterministic_given_randomness() {
        let masks = random_masks(2);
        let values = [Scalar::from(5u64), Scalar::from(6u64)];

        let proof1 = RangeProver::new().prove(&values, &masks, &mut StdRng::seed_from_u64(99)).unwrap();
        let proof2 = RangeProver::new().prove(&values, &masks, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(proof1.to_bytes(), proof2.to_bytes());

        let proof3 = RangeProver::new().prove(&values, &masks, &mut StdRng::seed_from_u64(100)).unwrap();
        assert_ne!(proof1.to_bytes(), proof3.to_bytes());
    }

    #[test]
    fn test_custom_generators() {
        let generators = GeneratorSet::new(128);
        let prover = RangeProver::with_generators(&generators);
        let verifier = RangeVerifier::with_generators(&generators);

        let proof = prover.prove_amounts(&[3, 4], &random_masks(2), &mut thread_rng()).unwrap();
        assert!(verifier.verify(&proof));

        // 4 values need 256 generators
        assert!(prover.prove_amounts(&[1, 2, 3, 4], &random_masks(4), &mut thread_rng()).is_err());
    }
}

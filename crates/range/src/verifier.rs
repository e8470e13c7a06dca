//! Range proof verifier implementation

use crate::{check_aggregation, zero_twos, RangeProof};
use ipa::InnerProductVerifier;
use log::debug;
use privacy_core::{
    commit_with, scalar, utils::*, GeneratorSet, GroupElement, KeccakTranscript, PrivacyError,
    PrivacyResult, Scalar, BITS_PER_VALUE,
};
use rayon::prelude::*;

/// Verifier for aggregated range proofs
#[derive(Debug, Clone, Copy)]
pub struct RangeVerifier<'a> {
    generators: &'a GeneratorSet,
}

impl RangeVerifier<'static> {
    /// Create a range verifier over the process-wide generators
    pub fn new() -> Self {
        Self {
            generators: GeneratorSet::global(),
        }
    }
}

impl Default for RangeVerifier<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> RangeVerifier<'a> {
    /// Create a range verifier with existing generators (must match prover's generators)
    pub fn with_generators(generators: &'a GeneratorSet) -> Self {
        Self { generators }
    }

    /// Verify a range proof
    ///
    /// Never panics or errors on malformed input; any inconsistency is `false`.
    pub fn verify(&self, proof: &RangeProof) -> bool {
        match self.check(proof) {
            Ok(()) => true,
            Err(e) => {
                debug!("Range proof rejected: {e}");
                false
            }
        }
    }

    /// Parse the wire encoding and verify
    pub fn verify_bytes(&self, bytes: &[u8]) -> bool {
        match RangeProof::from_bytes(bytes) {
            Ok(proof) => self.verify(&proof),
            Err(e) => {
                debug!("Range proof rejected while decoding: {e}");
                false
            }
        }
    }

    /// Verify independent proofs in parallel; true only if all verify
    ///
    /// An empty batch contains no invalid proof and verifies.
    pub fn batch_verify(&self, proofs: &[RangeProof]) -> bool {
        proofs.par_iter().all(|proof| self.verify(proof))
    }

    /// Verify and report why a proof was rejected
    pub fn check(&self, proof: &RangeProof) -> PrivacyResult<()> {
        let m = proof.aggregation();
        check_aggregation(m)?;

        let nm = BITS_PER_VALUE * m;
        let (g_vec, h_vec) = self.generators.vectors(nm)?;
        let h = self.generators.h_generator();
        debug!("Verifying range proof over {m} aggregated values");

        // Replay the transcript, failing on the first disagreement
        let mut transcript = KeccakTranscript::new();
        for v in &proof.commitments {
            transcript.append_point(v);
        }
        transcript.append_point(&proof.a);
        let y = transcript.challenge_scalar();
        if y != proof.cy {
            return Err(PrivacyError::ChallengeMismatch("y"));
        }

        transcript.append_point(&proof.s);
        let z = transcript.challenge_scalar();
        if z != proof.cz {
            return Err(PrivacyError::ChallengeMismatch("z"));
        }

        transcript.append_point(&proof.t1);
        transcript.append_point(&proof.t2);
        let x = transcript.challenge_scalar();
        if x != proof.cx {
            return Err(PrivacyError::ChallengeMismatch("x"));
        }

        // taux G + t H == sum(z^(j+2) V_j) + delta(y,z) H + x T1 + x^2 T2
        let z_powers = scalar_powers(&z, m + 2);
        let delta = delta(&y, &z, m);
        let lhs = commit_with(self.generators, &proof.th, &proof.taux);
        let rhs = GroupElement::multiscalar_mul(
            z_powers[2..].iter().cloned().chain([delta, x, x * x]),
            proof.commitments.iter().cloned().chain([h, proof.t1, proof.t2]),
        );
        if lhs != rhs {
            return Err(PrivacyError::InvalidProof("polynomial commitment mismatch".to_string()));
        }

        // P = A + x S - z <1, Gi> + <z y^i + zerotwos_i, H'i> - mu H
        let y_inv = scalar::invert(&y)?;
        let h_prime = point_hadamard(h_vec, &scalar_powers(&y_inv, nm))?;
        let h_exponents = vector_add(&vector_scale(&scalar_powers(&y, nm), &z), &zero_twos(&z, m))?;

        let minus_z = -z;
        let p = proof.a
            + proof.s * x
            + GroupElement::multiscalar_mul(
                std::iter::repeat(minus_z).take(nm).chain(h_exponents),
                g_vec.iter().chain(h_prime.iter()).cloned(),
            )
            - h * proof.mu;

        InnerProductVerifier::new(g_vec, &h_prime, self.generators.u_generator()).check(&proof.th, &p, &proof.ipp)
    }
}

/// `delta(y, z) = (z - z^2) <1, y^(nm)> - sum_j z^(j+3) <1, 2^n>`
fn delta(y: &Scalar, z: &Scalar, m: usize) -> Scalar {
    let nm = BITS_PER_VALUE * m;
    let z_sq = z * z;
    let sum_y = sum_of_powers(y, nm);
    let sum_2 = sum_of_powers(&Scalar::from(2u64), BITS_PER_VALUE);
    let sum_z: Scalar = scalar_powers(z, m + 3)[3..].iter().sum();

    (*z - z_sq) * sum_y - sum_z * sum_2
}

//! Inner Product Argument verifier implementation

use crate::InnerProductProof;
use log::debug;
use privacy_core::{
    hash_points_to_scalar, scalar, utils::*, GroupElement, PrivacyError, PrivacyResult, Scalar,
};

/// Inner Product Argument verifier over caller-supplied generators
#[derive(Debug, Clone, Copy)]
pub struct InnerProductVerifier<'a> {
    g_vec: &'a [GroupElement],
    h_vec: &'a [GroupElement],
    u: GroupElement,
}

impl<'a> InnerProductVerifier<'a> {
    /// Create a new IPA verifier with the given generators
    pub fn new(g_vec: &'a [GroupElement], h_vec: &'a [GroupElement], u: GroupElement) -> Self {
        Self { g_vec, h_vec, u }
    }

    /// Verify an inner product proof for commitment `p` and claimed product `c`
    ///
    /// Safe on adversarial input: every failure is reported as `false`.
    pub fn verify(&self, c: &Scalar, p: &GroupElement, proof: &InnerProductProof) -> bool {
        match self.check(c, p, proof) {
            Ok(()) => true,
            Err(e) => {
                debug!("Inner product proof rejected: {e}");
                false
            }
        }
    }

    /// Verify and report why a proof was rejected
    pub fn check(&self, c: &Scalar, p: &GroupElement, proof: &InnerProductProof) -> PrivacyResult<()> {
        proof.validate_structure()?;

        let n = self.g_vec.len();
        if self.h_vec.len() != n {
            return Err(PrivacyError::IncompatibleVectorLength {
                expected: n,
                actual: self.h_vec.len(),
            });
        }
        let rounds = log2_exact(n)?;
        if proof.num_rounds() != rounds {
            return Err(PrivacyError::InvalidProof(format!(
                "Expected {} rounds for vector length {}, got {}",
                rounds,
                n,
                proof.num_rounds()
            )));
        }

        // Replay challenges from the outermost round inwards
        let mut challenges = Vec::with_capacity(rounds);
        for idx in (0..rounds).rev() {
            let x = hash_points_to_scalar(&[proof.l_vec[idx], proof.r_vec[idx]]);
            if x != proof.challenges[idx] {
                return Err(PrivacyError::ChallengeMismatch("inner product round"));
            }
            challenges.push(x);
        }
        let challenges_inv = scalar::invert_all(&challenges)?;

        let (s_g, s_h) = compute_s_scalars(&challenges, &challenges_inv, n);

        // P + c U + sum(x_i^2 L_i + x_i^{-2} R_i)
        let mut left_side = *p + self.u * *c;
        for (outer, idx) in (0..rounds).rev().enumerate() {
            let x = challenges[outer];
            let x_inv = challenges_inv[outer];
            left_side = left_side + proof.l_vec[idx] * (x * x) + proof.r_vec[idx] * (x_inv * x_inv);
        }

        // G'[0] a + H'[0] b + a b U, with G'[0] = <s_g, G> and H'[0] = <s_h, H>
        let folded_g = GroupElement::multiscalar_mul(s_g, self.g_vec.iter().cloned());
        let folded_h = GroupElement::multiscalar_mul(s_h, self.h_vec.iter().cloned());
        let right_side = folded_g * proof.a + folded_h * proof.b + self.u * (proof.a * proof.b);

        if left_side != right_side {
            return Err(PrivacyError::InvalidProof("final commitment mismatch".to_string()));
        }
        Ok(())
    }
}

/// Coefficients expressing the fully folded generators in terms of the originals
///
/// `challenges` runs outermost round first. Round `j` halves on bit
/// `rounds - 1 - j` of the index: the left half of G is scaled by `x^{-1}`
/// and the right half by `x`, with the opposite for H.
fn compute_s_scalars(challenges: &[Scalar], challenges_inv: &[Scalar], n: usize) -> (Vec<Scalar>, Vec<Scalar>) {
    let mut s_g = vec![Scalar::ONE; n];
    let mut s_h = vec![Scalar::ONE; n];

    for (round, (x, x_inv)) in challenges.iter().zip(challenges_inv.iter()).enumerate() {
        let bit_position = challenges.len() - 1 - round;

        for i in 0..n {
            if (i >> bit_position) & 1 == 1 {
                s_g[i] *= x;
                s_h[i] *= x_inv;
            } else {
                s_g[i] *= x_inv;
                s_h[i] *= x;
            }
        }
    }

    (s_g, s_h)
}

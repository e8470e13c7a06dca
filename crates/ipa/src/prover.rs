//! Inner Product Argument prover implementation

use crate::InnerProductProof;
use log::trace;
use privacy_core::{
    hash_points_to_scalar, scalar, utils::*, GroupElement, PrivacyError, PrivacyResult, Scalar,
};

/// One folding round, recorded innermost-first as the recursion unwinds
struct Round {
    l: GroupElement,
    r: GroupElement,
    challenge: Scalar,
}

/// Inner Product Argument prover over caller-supplied generators
#[derive(Debug, Clone, Copy)]
pub struct InnerProductProver<'a> {
    g_vec: &'a [GroupElement],
    h_vec: &'a [GroupElement],
    u: GroupElement,
}

impl<'a> InnerProductProver<'a> {
    /// Create a new IPA prover with the given generators
    pub fn new(g_vec: &'a [GroupElement], h_vec: &'a [GroupElement], u: GroupElement) -> Self {
        Self { g_vec, h_vec, u }
    }

    /// Create an inner product proof
    ///
    /// Proves knowledge of vectors `a` and `b` with `c = <a,b>` such that
    /// `p = <a, G> + <b, H>`. All four vectors must share a power-of-two length.
    pub fn prove(
        &self,
        a: &[Scalar],
        b: &[Scalar],
        c: &Scalar,
        p: &GroupElement,
    ) -> PrivacyResult<InnerProductProof> {
        let n = a.len();
        for len in [b.len(), self.g_vec.len(), self.h_vec.len()] {
            if len != n {
                return Err(PrivacyError::IncompatibleVectorLength {
                    expected: n,
                    actual: len,
                });
            }
        }
        log2_exact(n)?;

        if inner_product(a, b)? != *c {
            return Err(PrivacyError::InvalidParameters(
                "claimed inner product does not match <a,b>".to_string(),
            ));
        }
        debug_assert_eq!(
            *p,
            GroupElement::multiscalar_mul(
                a.iter().chain(b.iter()).cloned(),
                self.g_vec.iter().chain(self.h_vec.iter()).cloned(),
            )
        );

        let (rounds, final_a, final_b) =
            self.fold(a.to_vec(), b.to_vec(), self.g_vec.to_vec(), self.h_vec.to_vec())?;

        let mut proof = InnerProductProof {
            l_vec: Vec::with_capacity(rounds.len()),
            r_vec: Vec::with_capacity(rounds.len()),
            a: final_a,
            b: final_b,
            challenges: Vec::with_capacity(rounds.len()),
        };
        for round in rounds {
            proof.l_vec.push(round.l);
            proof.r_vec.push(round.r);
            proof.challenges.push(round.challenge);
        }
        Ok(proof)
    }

    /// Halve the instance once and recurse; the base case returns the final scalars
    fn fold(
        &self,
        a: Vec<Scalar>,
        b: Vec<Scalar>,
        g: Vec<GroupElement>,
        h: Vec<GroupElement>,
    ) -> PrivacyResult<(Vec<Round>, Scalar, Scalar)> {
        if a.len() == 1 {
            return Ok((Vec::new(), a[0], b[0]));
        }

        let m = a.len() / 2;

        // Split vectors
        let (a_l, a_r) = a.split_at(m);
        let (b_l, b_r) = b.split_at(m);
        let (g_l, g_r) = g.split_at(m);
        let (h_l, h_r) = h.split_at(m);

        // Compute cross terms
        let c_l = inner_product(a_l, b_r)?;
        let c_r = inner_product(a_r, b_l)?;

        // L = <a_L, G_R> + <b_R, H_L> + c_L U
        let l = GroupElement::multiscalar_mul(
            a_l.iter().cloned().chain(b_r.iter().cloned()).chain(std::iter::once(c_l)),
            g_r.iter().cloned().chain(h_l.iter().cloned()).chain(std::iter::once(self.u)),
        );

        // R = <a_R, G_L> + <b_L, H_R> + c_R U
        let r = GroupElement::multiscalar_mul(
            a_r.iter().cloned().chain(b_l.iter().cloned()).chain(std::iter::once(c_r)),
            g_l.iter().cloned().chain(h_r.iter().cloned()).chain(std::iter::once(self.u)),
        );

        let x = hash_points_to_scalar(&[l, r]);
        let x_inv = scalar::invert(&x)?;
        trace!("IPA round at length {}", a.len());

        let mut folded_a = Vec::with_capacity(m);
        let mut folded_b = Vec::with_capacity(m);
        let mut folded_g = Vec::with_capacity(m);
        let mut folded_h = Vec::with_capacity(m);

        for i in 0..m {
            // a' = x a_L + x^{-1} a_R
            folded_a.push(a_l[i] * x + a_r[i] * x_inv);
            // b' = x^{-1} b_L + x b_R
            folded_b.push(b_l[i] * x_inv + b_r[i] * x);
            // G' = x^{-1} G_L + x G_R
            folded_g.push(g_l[i] * x_inv + g_r[i] * x);
            // H' = x H_L + x^{-1} H_R
            folded_h.push(h_l[i] * x + h_r[i] * x_inv);
        }

        let (mut rounds, final_a, final_b) = self.fold(folded_a, folded_b, folded_g, folded_h)?;
        rounds.push(Round { l, r, challenge: x });
        Ok((rounds, final_a, final_b))
    }
}

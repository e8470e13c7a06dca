//! Pedersen commitments `mask * G + amount * H`

use crate::{GeneratorSet, GroupElement};
use k256::Scalar;

/// Commit to `amount` under `mask` using the global generators
pub fn gen_commitment(amount: u64, mask: &Scalar) -> GroupElement {
    commit_with(GeneratorSet::global(), &Scalar::from(amount), mask)
}

/// Commit to a scalar amount under `mask`
///
/// Skips the addition when either term is zero.
pub fn commit_with(generators: &GeneratorSet, amount: &Scalar, mask: &Scalar) -> GroupElement {
    let amount_zero = bool::from(amount.is_zero());
    let mask_zero = bool::from(mask.is_zero());

    match (amount_zero, mask_zero) {
        (true, _) => generators.g_generator() * *mask,
        (false, true) => generators.h_generator() * *amount,
        (false, false) => GroupElement::multiscalar_mul(
            [*mask, *amount],
            [generators.g_generator(), generators.h_generator()],
        ),
    }
}

/// Encoded commitment, compressed (33 bytes) or uncompressed (65 bytes)
pub fn gen_commitment_bytes(amount: u64, mask: &Scalar, compressed: bool) -> Vec<u8> {
    gen_commitment(amount, mask).encode(compressed)
}

/// Homomorphic sum of commitments
pub fn sum_commitments<'a, I>(commitments: I) -> GroupElement
where
    I: IntoIterator<Item = &'a GroupElement>,
{
    commitments.into_iter().copied().sum()
}

/// Recompute a commitment and compare encodings
///
/// The width of `commitment` selects compressed or uncompressed comparison;
/// any other width is simply a mismatch.
pub fn verify_commitment(amount: u64, mask: &Scalar, commitment: &[u8]) -> bool {
    let expected = gen_commitment(amount, mask);
    match commitment.len() {
        crate::COMPRESSED_BYTES => expected.compress()[..] == *commitment,
        crate::UNCOMPRESSED_BYTES => expected.uncompressed()[..] == *commitment,
        _ => false,
    }
}

/// Check `sum(inputs) == sum(outputs) + fee * H` without opening any commitment
///
/// The masks must balance as well, which the transaction builder arranges
/// by choosing the last output mask.
pub fn verify_balance(inputs: &[GroupElement], outputs: &[GroupElement], fee: u64) -> bool {
    let fee_commitment = GeneratorSet::global().h_generator() * Scalar::from(fee);
    sum_commitments(inputs) == sum_commitments(outputs) + fee_commitment
}

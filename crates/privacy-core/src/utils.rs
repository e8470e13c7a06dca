//! Vector utilities over scalars and points

use crate::{GroupElement, PrivacyError, PrivacyResult};
use k256::Scalar;

fn check_lengths(a: usize, b: usize) -> PrivacyResult<()> {
    if a != b {
        return Err(PrivacyError::IncompatibleVectorLength {
            expected: a,
            actual: b,
        });
    }
    Ok(())
}

/// Compute powers of a scalar: [1, x, x^2, x^3, ..., x^(n-1)]
pub fn scalar_powers(x: &Scalar, n: usize) -> Vec<Scalar> {
    let mut powers = Vec::with_capacity(n);
    let mut current = Scalar::ONE;

    for _ in 0..n {
        powers.push(current);
        current *= x;
    }

    powers
}

/// Sum of [1, x, ..., x^(n-1)]
pub fn sum_of_powers(x: &Scalar, n: usize) -> Scalar {
    scalar_powers(x, n).iter().sum()
}

/// Compute the inner product of two scalar vectors
pub fn inner_product(a: &[Scalar], b: &[Scalar]) -> PrivacyResult<Scalar> {
    check_lengths(a.len(), b.len())?;
    Ok(a.iter().zip(b.iter()).map(|(ai, bi)| ai * bi).sum())
}

/// Hadamard (element-wise) product of two scalar vectors
pub fn hadamard_product(a: &[Scalar], b: &[Scalar]) -> PrivacyResult<Vec<Scalar>> {
    check_lengths(a.len(), b.len())?;
    Ok(a.iter().zip(b.iter()).map(|(ai, bi)| ai * bi).collect())
}

/// Add two scalar vectors element-wise
pub fn vector_add(a: &[Scalar], b: &[Scalar]) -> PrivacyResult<Vec<Scalar>> {
    check_lengths(a.len(), b.len())?;
    Ok(a.iter().zip(b.iter()).map(|(ai, bi)| ai + bi).collect())
}

/// Subtract two scalar vectors element-wise: a - b
pub fn vector_sub(a: &[Scalar], b: &[Scalar]) -> PrivacyResult<Vec<Scalar>> {
    check_lengths(a.len(), b.len())?;
    Ok(a.iter().zip(b.iter()).map(|(ai, bi)| ai - bi).collect())
}

/// Scale a vector by a scalar
pub fn vector_scale(vec: &[Scalar], scalar: &Scalar) -> Vec<Scalar> {
    vec.iter().map(|v| v * scalar).collect()
}

/// Add a scalar to every element
pub fn vector_add_scalar(vec: &[Scalar], scalar: &Scalar) -> Vec<Scalar> {
    vec.iter().map(|v| v + scalar).collect()
}

/// Scale each point by the matching scalar: [s_0 P_0, s_1 P_1, ...]
pub fn point_hadamard(points: &[GroupElement], scalars: &[Scalar]) -> PrivacyResult<Vec<GroupElement>> {
    check_lengths(points.len(), scalars.len())?;
    Ok(points.iter().zip(scalars.iter()).map(|(p, s)| *p * *s).collect())
}

/// Construct the little-endian bit decomposition of a value
pub fn bit_decomposition(value: u64, bits: usize) -> Vec<Scalar> {
    (0..bits)
        .map(|i| if i < 64 && (value >> i) & 1 == 1 { Scalar::ONE } else { Scalar::ZERO })
        .collect()
}

/// Check if a number is a power of 2
pub fn is_power_of_two(n: usize) -> bool {
    n != 0 && (n & (n - 1)) == 0
}

/// log2 of a power of two
pub fn log2_exact(n: usize) -> PrivacyResult<usize> {
    if !is_power_of_two(n) {
        return Err(PrivacyError::IncompatibleVectorLength {
            expected: n.next_power_of_two(),
            actual: n,
        });
    }
    Ok(n.trailing_zeros() as usize)
}

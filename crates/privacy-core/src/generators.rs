//! Deterministic generator derivation
//!
//! No trusted setup: every generator is a nothing-up-my-sleeve point found by
//! try-and-increment over Keccak-256, so any verifier can rebuild the exact
//! same set from the index alone.
//!
//! - `G` is the secp256k1 base point (mask generator).
//! - `H` is `hash_to_point(compress(G))` (amount generator).
//! - `Gi[i]`, `Hi[i]` and `U` are `hash_to_point(compress(H) || label)` with
//!   labels `"Gi" || be32(i)`, `"Hi" || be32(i)` and `"U"`.

use crate::{
    transcript::keccak256, GroupElement, PrivacyError, PrivacyResult, BITS_PER_VALUE,
    MAX_AGGREGATION,
};
use k256::Scalar;
use log::debug;
use once_cell::sync::Lazy;
use rayon::prelude::*;

/// Vector length needed by the largest supported aggregated range proof
pub const MAX_GENERATORS: usize = BITS_PER_VALUE * MAX_AGGREGATION;

static GLOBAL_GENERATORS: Lazy<GeneratorSet> = Lazy::new(|| GeneratorSet::new(MAX_GENERATORS));

/// Map a seed to a curve point with even `y` by hashing `seed || be32(counter)`
/// until the digest is a valid x-coordinate.
pub fn hash_to_point(seed: &[u8]) -> GroupElement {
    let mut counter: u32 = 0;
    loop {
        let mut data = Vec::with_capacity(seed.len() + 4);
        data.extend_from_slice(seed);
        data.extend_from_slice(&counter.to_be_bytes());

        let mut candidate = [0u8; 33];
        candidate[0] = 0x02;
        candidate[1..].copy_from_slice(&keccak256(&data));
        if let Ok(point) = GroupElement::from_bytes(&candidate) {
            return point;
        }
        counter = counter.wrapping_add(1);
    }
}

/// Generator set for commitments and inner-product arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSet {
    /// Mask generator G
    g: GroupElement,
    /// Amount generator H
    h: GroupElement,
    /// Vector generators for left side
    g_vec: Vec<GroupElement>,
    /// Vector generators for right side
    h_vec: Vec<GroupElement>,
    /// Generator for inner product
    u: GroupElement,
}

impl GeneratorSet {
    /// Create a new generator set with the specified vector length
    pub fn new(vector_length: usize) -> Self {
        let g = GroupElement::generator();
        let h = hash_to_point(&g.compress());
        let h_seed = h.compress();

        let derive = |label: &[u8], i: usize| {
            let mut seed = h_seed.to_vec();
            seed.extend_from_slice(label);
            seed.extend_from_slice(&(i as u32).to_be_bytes());
            hash_to_point(&seed)
        };

        let g_vec: Vec<GroupElement> =
            (0..vector_length).into_par_iter().map(|i| derive(b"Gi", i)).collect();
        let h_vec: Vec<GroupElement> =
            (0..vector_length).into_par_iter().map(|i| derive(b"Hi", i)).collect();

        let mut u_seed = h_seed.to_vec();
        u_seed.extend_from_slice(b"U");
        let u = hash_to_point(&u_seed);

        debug!("Derived generator set with vector length {vector_length}");

        Self { g, h, g_vec, h_vec, u }
    }

    /// Process-wide generator set sized for the largest aggregated range proof
    pub fn global() -> &'static GeneratorSet {
        &GLOBAL_GENERATORS
    }

    /// Get the vector length
    pub fn vector_length(&self) -> usize {
        self.g_vec.len()
    }

    /// Get the G generator (used for masks)
    pub fn g_generator(&self) -> GroupElement {
        self.g
    }

    /// Get the H generator (used for amounts)
    pub fn h_generator(&self) -> GroupElement {
        self.h
    }

    /// Get the U generator (used for inner product commitments)
    pub fn u_generator(&self) -> GroupElement {
        self.u
    }

    /// First `length` generators of each vector
    pub fn vectors(&self, length: usize) -> PrivacyResult<(&[GroupElement], &[GroupElement])> {
        if length > self.vector_length() {
            return Err(PrivacyError::InvalidParameters(format!(
                "need {} generators, have {}",
                length,
                self.vector_length()
            )));
        }
        Ok((&self.g_vec[..length], &self.h_vec[..length]))
    }

    /// Compute vector commitment: <a, Gi> + <b, Hi>
    pub fn vector_commit(&self, a: &[Scalar], b: &[Scalar]) -> PrivacyResult<GroupElement> {
        if a.len() != b.len() {
            return Err(PrivacyError::IncompatibleVectorLength {
                expected: a.len(),
                actual: b.len(),
            });
        }
        let (g_vec, h_vec) = self.vectors(a.len())?;

        let scalars = a.iter().chain(b.iter()).cloned();
        let points = g_vec.iter().chain(h_vec.iter()).cloned();

        Ok(GroupElement::multiscalar_mul(scalars, points))
    }

    /// Compute inner product commitment: <a, Gi> + <b, Hi> + <a,b> U
    pub fn inner_product_commit(&self, a: &[Scalar], b: &[Scalar]) -> PrivacyResult<GroupElement> {
        let vector_commit = self.vector_commit(a, b)?;
        let inner_product = crate::utils::inner_product(a, b)?;

        Ok(vector_commit + self.u * inner_product)
    }
}

//! Keccak-256 Fiat-Shamir transcript
//!
//! Challenges are `Keccak256(buffer) mod n` where `buffer` is the ordered
//! concatenation of everything appended so far. Points enter the buffer as
//! their uncompressed `x || y` coordinates with the SEC1 prefix byte dropped.
//! Verifiers recompute challenges bit-for-bit, so neither the hash nor the
//! encoding may change.

use crate::{scalar, GroupElement};
use k256::Scalar;
use sha3::{Digest, Keccak256};

/// Keccak-256 of `data`
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Reduce `Keccak256(data)` modulo the group order
pub fn hash_to_scalar(data: &[u8]) -> Scalar {
    scalar::from_bytes_reduced(&keccak256(data))
}

/// Challenge for a pair of points, as used by each inner-product round
pub fn hash_points_to_scalar(points: &[GroupElement]) -> Scalar {
    let mut transcript = KeccakTranscript::new();
    for point in points {
        transcript.append_point(point);
    }
    transcript.challenge_scalar()
}

/// Running transcript whose challenges hash the full prior buffer
#[derive(Debug, Clone, Default)]
pub struct KeccakTranscript {
    buffer: Vec<u8>,
}

impl KeccakTranscript {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Append a group element to the transcript
    pub fn append_point(&mut self, point: &GroupElement) {
        self.buffer.extend_from_slice(&point.transcript_bytes());
    }

    /// Append a 32-byte big-endian scalar
    pub fn append_scalar(&mut self, x: &Scalar) {
        self.buffer.extend_from_slice(&scalar::to_bytes(x));
    }

    /// Challenge scalar over everything appended so far
    ///
    /// The buffer is left untouched, so the next challenge hashes this prior
    /// content followed by whatever is appended in between.
    pub fn challenge_scalar(&self) -> Scalar {
        hash_to_scalar(&self.buffer)
    }

    /// Bytes hashed by the next challenge
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }
}

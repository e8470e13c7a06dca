//! Inner Product Argument proof structure

use privacy_core::{scalar, GroupElement, PrivacyError, PrivacyResult, Scalar, COMPRESSED_BYTES};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Bytes contributed by one folding round: L, R and the challenge
const ROUND_BYTES: usize = 2 * COMPRESSED_BYTES + scalar::SCALAR_BYTES;

/// An inner product argument proof
///
/// `l_vec[i]`, `r_vec[i]` and `challenges[i]` belong to the round whose input
/// vectors had length `2^(i+1)`, so index 0 is the innermost round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerProductProof {
    /// L values from each folding round (log_2(n) elements)
    pub l_vec: Vec<GroupElement>,
    /// R values from each folding round (log_2(n) elements)
    pub r_vec: Vec<GroupElement>,
    /// Final scalar value a
    pub a: Scalar,
    /// Final scalar value b
    pub b: Scalar,
    /// Fiat-Shamir challenge of each folding round
    pub challenges: Vec<Scalar>,
}

impl InnerProductProof {
    /// Get the number of folding rounds
    pub fn num_rounds(&self) -> usize {
        self.l_vec.len()
    }

    /// Validate proof structure
    pub fn validate_structure(&self) -> PrivacyResult<()> {
        let rounds = self.l_vec.len();
        for len in [self.r_vec.len(), self.challenges.len()] {
            if len != rounds {
                return Err(PrivacyError::IncompatibleVectorLength {
                    expected: rounds,
                    actual: len,
                });
            }
        }

        // Empty vectors are valid for the base case (vector length 1)
        Ok(())
    }

    /// Get proof size in bytes
    pub fn size_bytes(&self) -> usize {
        self.num_rounds() * ROUND_BYTES + 2 * scalar::SCALAR_BYTES
    }

    /// Append `L... || R... || a || b || challenges...` to `out`
    pub fn write_to(&self, out: &mut Vec<u8>) {
        for point in &self.l_vec {
            out.extend_from_slice(&point.compress());
        }
        for point in &self.r_vec {
            out.extend_from_slice(&point.compress());
        }
        out.extend_from_slice(&scalar::to_bytes(&self.a));
        out.extend_from_slice(&scalar::to_bytes(&self.b));
        for challenge in &self.challenges {
            out.extend_from_slice(&scalar::to_bytes(challenge));
        }
    }

    /// Serialize proof to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.size_bytes());
        self.write_to(&mut result);
        result
    }

    /// Deserialize proof from bytes, inferring the number of rounds from the length
    pub fn from_bytes(bytes: &[u8]) -> PrivacyResult<Self> {
        let body = bytes
            .len()
            .checked_sub(2 * scalar::SCALAR_BYTES)
            .ok_or_else(|| PrivacyError::InvalidEncoding("Insufficient bytes for proof".to_string()))?;
        if body % ROUND_BYTES != 0 {
            return Err(PrivacyError::InvalidEncoding(format!(
                "Invalid proof size {}",
                bytes.len()
            )));
        }
        Self::read(bytes, body / ROUND_BYTES)
    }

    /// Parse a proof with a known number of rounds; `bytes` must match exactly
    pub fn read(bytes: &[u8], rounds: usize) -> PrivacyResult<Self> {
        let expected_size = rounds * ROUND_BYTES + 2 * scalar::SCALAR_BYTES;
        if bytes.len() != expected_size {
            return Err(PrivacyError::InvalidEncoding(format!(
                "Invalid proof size: expected {}, got {}",
                expected_size,
                bytes.len()
            )));
        }

        let (points, scalars) = bytes.split_at(2 * rounds * COMPRESSED_BYTES);
        let mut points = points
            .chunks_exact(COMPRESSED_BYTES)
            .map(GroupElement::from_bytes)
            .collect::<PrivacyResult<Vec<_>>>()?;
        let r_vec = points.split_off(rounds);
        let l_vec = points;

        let mut scalars = scalars
            .chunks_exact(scalar::SCALAR_BYTES)
            .map(scalar::from_canonical_bytes)
            .collect::<PrivacyResult<Vec<_>>>()?;
        let challenges = scalars.split_off(2);

        Ok(Self {
            l_vec,
            r_vec,
            a: scalars[0],
            b: scalars[1],
            challenges,
        })
    }
}

impl Serialize for InnerProductProof {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        hex::encode(self.to_bytes()).serialize(s)
    }
}

impl<'de> Deserialize<'de> for InnerProductProof {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let hex_str = String::deserialize(de)?;
        let bytes = hex::decode(hex_str).map_err(serde::de::Error::custom)?;
        Self::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}

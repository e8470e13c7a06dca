//! Range proof structure and wire encoding
//!
//! ```text
//! CommsLength (u32 BE) || V_0..V_{M-1} (33 each) || A || S || T1 || T2 (33 each)
//!   || cy || cz || cx || Th || Tau || Mu (32 each)
//!   || Ipp.L (33 x log2(64M)) || Ipp.R (33 x log2(64M)) || Ipp.A || Ipp.B (32 each)
//!   || Ipp.Challenges (32 x log2(64M))
//! ```

use crate::check_aggregation;
use byteorder::{BigEndian, ByteOrder};
use ipa::InnerProductProof;
use privacy_core::{
    scalar, utils::log2_exact, GroupElement, PrivacyError, PrivacyResult, Scalar, BITS_PER_VALUE,
    COMPRESSED_BYTES,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const LENGTH_PREFIX_BYTES: usize = 4;
/// A, S, T1, T2
const FIXED_POINTS: usize = 4;
/// cy, cz, cx, Th, Tau, Mu
const FIXED_SCALARS: usize = 6;

/// An aggregated proof that each of `M` committed values lies in [0, 2^64)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeProof {
    /// Pedersen commitments V_j to the proven values
    pub commitments: Vec<GroupElement>,
    /// Commitment to the bit vectors aL, aR
    pub a: GroupElement,
    /// Commitment to the blinding vectors sL, sR
    pub s: GroupElement,
    /// Commitment to the degree-1 coefficient of t(X)
    pub t1: GroupElement,
    /// Commitment to the degree-2 coefficient of t(X)
    pub t2: GroupElement,
    /// Challenge y
    pub cy: Scalar,
    /// Challenge z
    pub cz: Scalar,
    /// Challenge x
    pub cx: Scalar,
    /// t(x) = <l, r>
    pub th: Scalar,
    /// Blinding of t(x)
    pub taux: Scalar,
    /// Aggregate blinding of A and S
    pub mu: Scalar,
    /// Inner product argument for <l, r> = th
    pub ipp: InnerProductProof,
}

impl RangeProof {
    /// Number of aggregated values
    pub fn aggregation(&self) -> usize {
        self.commitments.len()
    }

    /// Encoded size for `m` aggregated values
    pub fn serialized_size(m: usize) -> PrivacyResult<usize> {
        let rounds = log2_exact(BITS_PER_VALUE * m)?;
        Ok(LENGTH_PREFIX_BYTES
            + (m + FIXED_POINTS) * COMPRESSED_BYTES
            + FIXED_SCALARS * scalar::SCALAR_BYTES
            + rounds * (2 * COMPRESSED_BYTES + scalar::SCALAR_BYTES)
            + 2 * scalar::SCALAR_BYTES)
    }

    /// Serialize the proof to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; LENGTH_PREFIX_BYTES];
        BigEndian::write_u32(&mut bytes[..LENGTH_PREFIX_BYTES], self.commitments.len() as u32);

        for point in self.commitments.iter().chain([&self.a, &self.s, &self.t1, &self.t2]) {
            bytes.extend_from_slice(&point.compress());
        }
        for x in [&self.cy, &self.cz, &self.cx, &self.th, &self.taux, &self.mu] {
            bytes.extend_from_slice(&scalar::to_bytes(x));
        }
        self.ipp.write_to(&mut bytes);
        bytes
    }

    /// Deserialize proof from bytes
    pub fn from_bytes(bytes: &[u8]) -> PrivacyResult<Self> {
        if bytes.len() < LENGTH_PREFIX_BYTES {
            return Err(PrivacyError::InvalidEncoding("Insufficient bytes".to_string()));
        }

        let m = BigEndian::read_u32(&bytes[..LENGTH_PREFIX_BYTES]) as usize;
        check_aggregation(m)?;

        let expected = Self::serialized_size(m)?;
        if bytes.len() != expected {
            return Err(PrivacyError::InvalidEncoding(format!(
                "Invalid proof size: expected {}, got {}",
                expected,
                bytes.len()
            )));
        }

        let mut offset = LENGTH_PREFIX_BYTES;
        let mut next_point = || -> PrivacyResult<GroupElement> {
            let point = GroupElement::from_bytes(&bytes[offset..offset + COMPRESSED_BYTES])?;
            offset += COMPRESSED_BYTES;
            Ok(point)
        };

        let commitments = (0..m).map(|_| next_point()).collect::<PrivacyResult<Vec<_>>>()?;
        let a = next_point()?;
        let s = next_point()?;
        let t1 = next_point()?;
        let t2 = next_point()?;

        let scalars_start = LENGTH_PREFIX_BYTES + (m + FIXED_POINTS) * COMPRESSED_BYTES;
        let ipp_start = scalars_start + FIXED_SCALARS * scalar::SCALAR_BYTES;
        let scalars = bytes[scalars_start..ipp_start]
            .chunks_exact(scalar::SCALAR_BYTES)
            .map(scalar::from_canonical_bytes)
            .collect::<PrivacyResult<Vec<_>>>()?;

        let rounds = log2_exact(BITS_PER_VALUE * m)?;
        let ipp = InnerProductProof::read(&bytes[ipp_start..], rounds)?;

        Ok(Self {
            commitments,
            a,
            s,
            t1,
            t2,
            cy: scalars[0],
            cz: scalars[1],
            cx: scalars[2],
            th: scalars[3],
            taux: scalars[4],
            mu: scalars[5],
            ipp,
        })
    }

    /// Hex of the wire encoding
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parse the hex wire encoding
    pub fn from_hex(s: &str) -> PrivacyResult<Self> {
        let bytes = hex::decode(s).map_err(|e| PrivacyError::InvalidEncoding(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

impl Serialize for RangeProof {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.to_hex().serialize(s)
    }
}

impl<'de> Deserialize<'de> for RangeProof {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let hex_str = String::deserialize(de)?;
        Self::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}

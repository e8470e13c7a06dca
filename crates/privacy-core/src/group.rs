//! Group operations and point utilities

use crate::{PrivacyError, PrivacyResult};
use k256::{
    elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint},
    AffinePoint, EncodedPoint, ProjectivePoint, Scalar,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Length of a SEC1 compressed point
pub const COMPRESSED_BYTES: usize = 33;
/// Length of a SEC1 uncompressed point
pub const UNCOMPRESSED_BYTES: usize = 65;
/// Length of the point bytes fed into Fiat-Shamir hashes (uncompressed, prefix dropped)
pub const TRANSCRIPT_POINT_BYTES: usize = UNCOMPRESSED_BYTES - 1;

/// A point on secp256k1 with additional utility methods
///
/// The point at infinity encodes as all-zero bytes of the requested width so
/// that every field of a serialized proof keeps a fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupElement(pub ProjectivePoint);

impl GroupElement {
    /// Identity element
    pub fn identity() -> Self {
        Self(ProjectivePoint::IDENTITY)
    }

    /// The secp256k1 base point
    pub fn generator() -> Self {
        Self(ProjectivePoint::GENERATOR)
    }

    pub fn is_identity(&self) -> bool {
        self.0 == ProjectivePoint::IDENTITY
    }

    /// 33-byte compressed encoding
    pub fn compress(&self) -> [u8; COMPRESSED_BYTES] {
        let mut out = [0u8; COMPRESSED_BYTES];
        if !self.is_identity() {
            out.copy_from_slice(self.0.to_affine().to_encoded_point(true).as_bytes());
        }
        out
    }

    /// 65-byte uncompressed encoding
    pub fn uncompressed(&self) -> [u8; UNCOMPRESSED_BYTES] {
        let mut out = [0u8; UNCOMPRESSED_BYTES];
        if !self.is_identity() {
            out.copy_from_slice(self.0.to_affine().to_encoded_point(false).as_bytes());
        }
        out
    }

    /// Compressed or uncompressed encoding
    pub fn encode(&self, compressed: bool) -> Vec<u8> {
        if compressed {
            self.compress().to_vec()
        } else {
            self.uncompressed().to_vec()
        }
    }

    /// Raw `x || y` coordinates, the form every challenge hash consumes
    pub fn transcript_bytes(&self) -> [u8; TRANSCRIPT_POINT_BYTES] {
        let mut out = [0u8; TRANSCRIPT_POINT_BYTES];
        out.copy_from_slice(&self.uncompressed()[1..]);
        out
    }

    /// Decode a compressed or uncompressed point, checking it lies on the curve
    pub fn from_bytes(bytes: &[u8]) -> PrivacyResult<Self> {
        if bytes.len() != COMPRESSED_BYTES && bytes.len() != UNCOMPRESSED_BYTES {
            return Err(PrivacyError::InvalidEncoding(format!(
                "point must be {} or {} bytes, got {}",
                COMPRESSED_BYTES,
                UNCOMPRESSED_BYTES,
                bytes.len()
            )));
        }

        if bytes.iter().all(|b| *b == 0) {
            return Ok(Self::identity());
        }

        let encoded =
            EncodedPoint::from_bytes(bytes).map_err(|e| PrivacyError::InvalidEncoding(e.to_string()))?;
        if encoded.is_identity() {
            return Err(PrivacyError::InvalidEncoding("unexpected identity tag".to_string()));
        }

        Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
            .map(|affine| Self(ProjectivePoint::from(affine)))
            .ok_or(PrivacyError::PointNotOnCurve)
    }

    /// Parse a hex-encoded point
    pub fn from_hex(s: &str) -> PrivacyResult<Self> {
        let bytes = hex::decode(s).map_err(|e| PrivacyError::InvalidEncoding(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Hex of the compressed encoding
    pub fn to_hex(&self) -> String {
        hex::encode(self.compress())
    }

    /// Perform multi-scalar multiplication
    pub fn multiscalar_mul<I, J>(scalars: I, points: J) -> Self
    where
        I: IntoIterator<Item = Scalar>,
        J: IntoIterator<Item = GroupElement>,
    {
        Self(
            scalars
                .into_iter()
                .zip(points)
                .fold(ProjectivePoint::IDENTITY, |acc, (s, p)| acc + p.0 * s),
        )
    }
}

impl Default for GroupElement {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Add for GroupElement {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl std::ops::AddAssign for GroupElement {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl std::ops::Sub for GroupElement {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl std::ops::Mul<Scalar> for GroupElement {
    type Output = Self;

    fn mul(self, scalar: Scalar) -> Self {
        Self(self.0 * scalar)
    }
}

impl std::ops::Neg for GroupElement {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for GroupElement {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::identity(), |acc, p| acc + p)
    }
}

impl From<ProjectivePoint> for GroupElement {
    fn from(point: ProjectivePoint) -> Self {
        Self(point)
    }
}

impl From<GroupElement> for ProjectivePoint {
    fn from(element: GroupElement) -> Self {
        element.0
    }
}

impl Serialize for GroupElement {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.to_hex().serialize(s)
    }
}

impl<'de> Deserialize<'de> for GroupElement {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let hex_str = String::deserialize(de)?;
        Self::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::random_scalar;
    use rand::rngs::OsRng;

    #[test]
    fn test_mul_by_zero_is_identity() {
        let p = GroupElement::generator() * Scalar::ZERO;
        assert!(p.is_identity());
        assert_eq!(p.compress(), [0u8; COMPRESSED_BYTES]);
    }

    #[test]
    fn test_mul_wraps_mod_order() {
        let k = random_scalar(&mut OsRng);
        let g = GroupElement::generator();
        // (n - 1) * G + G = identity
        assert!((g * -Scalar::ONE + g).is_identity());
        assert_eq!(g * (k + Scalar::ONE), g * k + g);
    }

    #[test]
    fn test_encoding_roundtrip() {
        let p = GroupElement::generator() * random_scalar(&mut OsRng);

        let compressed = p.compress();
        assert!(compressed[0] == 0x02 || compressed[0] == 0x03);
        assert_eq!(GroupElement::from_bytes(&compressed).unwrap(), p);

        let uncompressed = p.uncompressed();
        assert_eq!(uncompressed[0], 0x04);
        assert_eq!(GroupElement::from_bytes(&uncompressed).unwrap(), p);
        assert_eq!(&p.transcript_bytes()[..], &uncompressed[1..]);
    }

    #[test]
    fn test_identity_roundtrip() {
        let id = GroupElement::identity();
        assert_eq!(GroupElement::from_bytes(&id.compress()).unwrap(), id);
        assert_eq!(GroupElement::from_bytes(&id.uncompressed()).unwrap(), id);
    }

    #[test]
    fn test_decode_rejects_bad_length_and_tag() {
        assert!(matches!(
            GroupElement::from_bytes(&[2u8; 10]),
            Err(PrivacyError::InvalidEncoding(_))
        ));

        let mut bad_tag = GroupElement::generator().compress();
        bad_tag[0] = 0x07;
        assert!(matches!(GroupElement::from_bytes(&bad_tag), Err(PrivacyError::InvalidEncoding(_))));
    }

    #[test]
    fn test_decode_rejects_off_curve() {
        let mut off_curve = GroupElement::generator().uncompressed();
        off_curve[64] ^= 0x01;
        assert_eq!(GroupElement::from_bytes(&off_curve), Err(PrivacyError::PointNotOnCurve));
    }

    #[test]
    fn test_multiscalar_mul_matches_naive() {
        let g = GroupElement::generator();
        let p = g * Scalar::from(5u64);
        let q = g * Scalar::from(7u64);
        let msm = GroupElement::multiscalar_mul([Scalar::from(2u64), Scalar::from(3u64)], [p, q]);
        assert_eq!(msm, g * Scalar::from(31u64));
    }
}

//! Modular arithmetic over the secp256k1 group order `n`
//!
//! `k256::Scalar` already keeps every value reduced mod `n`; the helpers here
//! add the fallible and fixed-width operations the proof layers rely on.

use crate::{PrivacyError, PrivacyResult};
use k256::elliptic_curve::{ops::Reduce, Field, PrimeField};
use k256::{FieldBytes, Scalar, U256};
use rand_core::{CryptoRng, RngCore};
use std::cmp::Ordering;

/// Width in bytes of a serialized scalar
pub const SCALAR_BYTES: usize = 32;

/// Sample a uniformly random scalar
pub fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Scalar {
    Scalar::random(&mut *rng)
}

/// Modular inverse, failing on zero
pub fn invert(x: &Scalar) -> PrivacyResult<Scalar> {
    Option::<Scalar>::from(x.invert()).ok_or(PrivacyError::DivisionByZero)
}

/// Invert every element of a slice
pub fn invert_all(xs: &[Scalar]) -> PrivacyResult<Vec<Scalar>> {
    xs.iter().map(invert).collect()
}

/// `base^exp mod n`
pub fn pow(base: &Scalar, exp: u64) -> Scalar {
    base.pow_vartime([exp])
}

/// Numeric comparison of the canonical representatives in `[0, n)`
pub fn compare(a: &Scalar, b: &Scalar) -> Ordering {
    a.to_bytes().as_slice().cmp(b.to_bytes().as_slice())
}

/// Big-endian 32-byte encoding
pub fn to_bytes(x: &Scalar) -> [u8; SCALAR_BYTES] {
    let mut out = [0u8; SCALAR_BYTES];
    out.copy_from_slice(&x.to_bytes());
    out
}

/// Reduce an arbitrary 32-byte big-endian integer mod `n`
pub fn from_bytes_reduced(bytes: &[u8; SCALAR_BYTES]) -> Scalar {
    <Scalar as Reduce<U256>>::reduce_bytes(&FieldBytes::clone_from_slice(bytes))
}

/// Parse a canonical 32-byte big-endian scalar, rejecting values `>= n`
pub fn from_canonical_bytes(bytes: &[u8]) -> PrivacyResult<Scalar> {
    if bytes.len() != SCALAR_BYTES {
        return Err(PrivacyError::InvalidEncoding(format!(
            "scalar must be {} bytes, got {}",
            SCALAR_BYTES,
            bytes.len()
        )));
    }
    Option::<Scalar>::from(Scalar::from_repr(FieldBytes::clone_from_slice(bytes)))
        .ok_or_else(|| PrivacyError::InvalidEncoding("scalar is not reduced mod n".to_string()))
}

/// Big-endian hex, zero-padded to exactly `width` bytes
pub fn to_hex(x: &Scalar, width: usize) -> PrivacyResult<String> {
    let bytes = to_bytes(x);
    let significant = bytes.iter().position(|b| *b != 0).unwrap_or(SCALAR_BYTES);
    if SCALAR_BYTES - significant > width {
        return Err(PrivacyError::InvalidParameters(format!(
            "scalar does not fit in {} bytes",
            width
        )));
    }

    let mut padded = vec![0u8; width.saturating_sub(SCALAR_BYTES)];
    let start = SCALAR_BYTES.saturating_sub(width);
    padded.extend_from_slice(&bytes[start..]);
    Ok(hex::encode(padded))
}

/// Parse big-endian hex of any width up to 32 significant bytes
pub fn from_hex(s: &str) -> PrivacyResult<Scalar> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    let padded = if s.len() % 2 == 1 { format!("0{}", s) } else { s.to_string() };
    let raw = hex::decode(&padded).map_err(|e| PrivacyError::InvalidEncoding(e.to_string()))?;

    let significant = raw.iter().position(|b| *b != 0).unwrap_or(raw.len());
    let raw = &raw[significant..];
    if raw.len() > SCALAR_BYTES {
        return Err(PrivacyError::InvalidEncoding("hex scalar wider than 32 bytes".to_string()));
    }

    let mut bytes = [0u8; SCALAR_BYTES];
    bytes[SCALAR_BYTES - raw.len()..].copy_from_slice(raw);
    from_canonical_bytes(&bytes)
}

/// Returns the value as `u64` when it lies in `[0, 2^64)`
pub fn to_u64(x: &Scalar) -> Option<u64> {
    let bytes = to_bytes(x);
    if bytes[..SCALAR_BYTES - 8].iter().any(|b| *b != 0) {
        return None;
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&bytes[SCALAR_BYTES - 8..]);
    Some(u64::from_be_bytes(low))
}

/// `2^64` as a scalar, the first value outside the provable range
pub fn two_pow_64() -> Scalar {
    pow(&Scalar::from(2u64), 64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn test_invert_zero_fails() {
        assert_eq!(invert(&Scalar::ZERO), Err(PrivacyError::DivisionByZero));
    }

    #[test]
    fn test_invert_roundtrip() {
        let x = random_scalar(&mut OsRng);
        let x_inv = invert(&x).unwrap();
        assert_eq!(x * x_inv, Scalar::ONE);
    }

    #[test]
    fn test_negate_and_subtract_wrap() {
        let one = Scalar::ONE;
        let minus_one = -one;
        assert_eq!(minus_one + one, Scalar::ZERO);
        assert_eq!(Scalar::ZERO - one, minus_one);
        assert_eq!(compare(&minus_one, &one), Ordering::Greater);
    }

    #[test]
    fn test_pow() {
        assert_eq!(pow(&Scalar::from(3u64), 4), Scalar::from(81u64));
        assert_eq!(pow(&Scalar::from(7u64), 0), Scalar::ONE);
    }

    #[test]
    fn test_hex_is_zero_padded() {
        let hex = to_hex(&Scalar::from(0xabu64), 32).unwrap();
        assert_eq!(hex.len(), 64);
        assert!(hex.starts_with("0000"));
        assert!(hex.ends_with("ab"));

        let narrow = to_hex(&Scalar::from(0x1234u64), 4).unwrap();
        assert_eq!(narrow, "00001234");
    }

    #[test]
    fn test_hex_too_narrow_fails() {
        assert!(to_hex(&Scalar::from(u64::MAX), 4).is_err());
    }

    #[test]
    fn test_hex_roundtrip() {
        let x = random_scalar(&mut OsRng);
        let parsed = from_hex(&to_hex(&x, 32).unwrap()).unwrap();
        assert_eq!(parsed, x);
        assert_eq!(from_hex("0x1").unwrap(), Scalar::ONE);
    }

    #[test]
    fn test_hex_rejects_unreduced() {
        let n_hex = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";
        assert!(matches!(from_hex(n_hex), Err(PrivacyError::InvalidEncoding(_))));
    }

    #[test]
    fn test_reduction_mod_n() {
        let all_ones = [0xffu8; 32];
        let reduced = from_bytes_reduced(&all_ones);
        // 2^256 - 1 - n
        let expected = from_hex("14551231950b75fc4402da1732fc9bebe").unwrap();
        assert_eq!(reduced, expected);
    }

    #[test]
    fn test_to_u64_bounds() {
        assert_eq!(to_u64(&Scalar::from(u64::MAX)), Some(u64::MAX));
        assert_eq!(to_u64(&two_pow_64()), None);
        assert_eq!(to_u64(&-Scalar::ONE), None);
    }
}

//! Additive stream encoding for amounts and masks
//!
//! Both the value and the key are read as 256-bit big-endian integers. The
//! ciphertext is their sum modulo 2^256, so decoding is a single wrapping
//! subtraction and every ciphertext is exactly 32 bytes.

use k256::elliptic_curve::bigint::{ArrayEncoding, U256};
use privacy_core::{scalar, Scalar};

/// Width of every encrypted field
pub const ENCRYPTED_BYTES: usize = 32;

/// `(value + key) mod 2^256`
pub fn encode(value: &[u8; ENCRYPTED_BYTES], key: &[u8; ENCRYPTED_BYTES]) -> [u8; ENCRYPTED_BYTES] {
    let sum = U256::from_be_slice(value).wrapping_add(&U256::from_be_slice(key));
    sum.to_be_byte_array().into()
}

/// `(encoded - key) mod 2^256`
pub fn decode(encoded: &[u8; ENCRYPTED_BYTES], key: &[u8; ENCRYPTED_BYTES]) -> [u8; ENCRYPTED_BYTES] {
    let diff = U256::from_be_slice(encoded).wrapping_sub(&U256::from_be_slice(key));
    diff.to_be_byte_array().into()
}

pub fn encrypt_amount(amount: u64, key: &[u8; ENCRYPTED_BYTES]) -> [u8; ENCRYPTED_BYTES] {
    let mut value = [0u8; ENCRYPTED_BYTES];
    value[ENCRYPTED_BYTES - 8..].copy_from_slice(&amount.to_be_bytes());
    encode(&value, key)
}

/// Recover an amount, or `None` if the plaintext does not fit in 64 bits
pub fn decrypt_amount(encrypted: &[u8; ENCRYPTED_BYTES], key: &[u8; ENCRYPTED_BYTES]) -> Option<u64> {
    let value = decode(encrypted, key);
    let (high, low) = value.split_at(ENCRYPTED_BYTES - 8);
    if high.iter().any(|b| *b != 0) {
        return None;
    }
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(low);
    Some(u64::from_be_bytes(bytes))
}

pub fn encrypt_mask(mask: &Scalar, key: &[u8; ENCRYPTED_BYTES]) -> [u8; ENCRYPTED_BYTES] {
    encode(&scalar::to_bytes(mask), key)
}

/// Recover a mask, or `None` if the plaintext is not a canonical scalar
pub fn decrypt_mask(encrypted: &[u8; ENCRYPTED_BYTES], key: &[u8; ENCRYPTED_BYTES]) -> Option<Scalar> {
    scalar::from_canonical_bytes(&decode(encrypted, key)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_wraps_modulo_2_256() {
        let value = [0xffu8; 32];
        let mut key = [0u8; 32];
        key[31] = 2;

        let mut expected = [0u8; 32];
        expected[31] = 1;
        assert_eq!(encode(&value, &key), expected);
        assert_eq!(decode(&expected, &key), value);
    }

    #[test]
    fn test_carry_propagates() {
        let mut value = [0u8; 32];
        value[31] = 0xff;
        let mut key = [0u8; 32];
        key[31] = 0x01;

        let encoded = encode(&value, &key);
        assert_eq!(encoded[30], 0x01);
        assert_eq!(encoded[31], 0x00);
    }

    #[test]
    fn test_amount_roundtrip() {
        let key = [0xabu8; 32];
        for amount in [0u64, 1, 1_000_000, u64::MAX] {
            assert_eq!(decrypt_amount(&encrypt_amount(amount, &key), &key), Some(amount));
        }
    }

    #[test]
    fn test_wrong_key_does_not_yield_amount() {
        let key = [0x11u8; 32];
        let other = [0x22u8; 32];
        assert_eq!(decrypt_amount(&encrypt_amount(5, &key), &other), None);
    }

    #[test]
    fn test_mask_roundtrip() {
        let key = [0x5au8; 32];
        let mask = -Scalar::ONE;
        assert_eq!(decrypt_mask(&encrypt_mask(&mask, &key), &key), Some(mask));
    }

    #[test]
    fn test_non_canonical_mask_rejected() {
        let key = [0u8; 32];
        assert_eq!(decrypt_mask(&[0xffu8; 32], &key), None);
    }
}

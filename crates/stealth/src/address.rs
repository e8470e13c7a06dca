//! Base58 privacy addresses
//!
//! Layout before base58: `pubSpend (33) || pubView (33) || checksum (4)` where
//! the checksum is the first four bytes of `Keccak256(pubSpend || pubView)`.

use privacy_core::{keccak256, GroupElement, PrivacyError, PrivacyResult, COMPRESSED_BYTES};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// Checksum bytes appended to the key material
pub const CHECKSUM_BYTES: usize = 4;
/// Decoded address length
pub const ADDRESS_BYTES: usize = 2 * COMPRESSED_BYTES + CHECKSUM_BYTES;

/// Public spend and view keys of a receiver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivacyAddress {
    pub pub_spend: GroupElement,
    pub pub_view: GroupElement,
}

impl PrivacyAddress {
    pub fn new(pub_spend: GroupElement, pub_view: GroupElement) -> Self {
        Self { pub_spend, pub_view }
    }

    /// Base58 encoding with the Keccak checksum
    pub fn encode(&self) -> String {
        let mut data = Vec::with_capacity(ADDRESS_BYTES);
        data.extend_from_slice(&self.pub_spend.compress());
        data.extend_from_slice(&self.pub_view.compress());
        let checksum = checksum(&data);
        data.extend_from_slice(&checksum);
        bs58::encode(data).into_string()
    }

    /// Parse a base58 address, validating length, checksum and both points
    pub fn decode(s: &str) -> PrivacyResult<Self> {
        let data = bs58::decode(s)
            .into_vec()
            .map_err(|e| PrivacyError::InvalidEncoding(e.to_string()))?;
        if data.len() != ADDRESS_BYTES {
            return Err(PrivacyError::InvalidEncoding(format!(
                "address must decode to {} bytes, got {}",
                ADDRESS_BYTES,
                data.len()
            )));
        }

        let (keys, expected) = data.split_at(2 * COMPRESSED_BYTES);
        if checksum(keys) != expected {
            return Err(PrivacyError::InvalidChecksum);
        }

        let pub_spend = GroupElement::from_bytes(&keys[..COMPRESSED_BYTES])?;
        let pub_view = GroupElement::from_bytes(&keys[COMPRESSED_BYTES..])?;
        if pub_spend.is_identity() || pub_view.is_identity() {
            return Err(PrivacyError::InvalidEncoding("address key is the identity".to_string()));
        }

        Ok(Self { pub_spend, pub_view })
    }
}

fn checksum(keys: &[u8]) -> [u8; CHECKSUM_BYTES] {
    let hash = keccak256(keys);
    let mut out = [0u8; CHECKSUM_BYTES];
    out.copy_from_slice(&hash[..CHECKSUM_BYTES]);
    out
}

impl fmt::Display for PrivacyAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for PrivacyAddress {
    type Err = PrivacyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl Serialize for PrivacyAddress {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.encode().serialize(s)
    }
}

impl<'de> Deserialize<'de> for PrivacyAddress {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(de)?;
        Self::decode(&encoded).map_err(serde::de::Error::custom)
    }
}

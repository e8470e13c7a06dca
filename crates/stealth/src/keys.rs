//! Spend/view key pairs for the one-time address protocol

use crate::PrivacyAddress;
use privacy_core::{hash_to_scalar, scalar, GroupElement, PrivacyError, PrivacyResult, Scalar};
use rand_core::{CryptoRng, RngCore};
use std::fmt;

/// Public spend and view keys, plus the private halves when we own them
///
/// A key set parsed from an address holds only the public keys and can
/// receive payments. One built from a private spend key can also scan for
/// and spend outputs.
#[derive(Clone, PartialEq, Eq)]
pub struct StealthKeySet {
    pub pub_spend: GroupElement,
    pub pub_view: GroupElement,
    priv_spend: Option<Scalar>,
    priv_view: Option<Scalar>,
}

impl StealthKeySet {
    /// Derive the full key set from a private spend key
    ///
    /// The private view key is `Hs(privSpend)`.
    pub fn from_private_spend_key(priv_spend: Scalar) -> PrivacyResult<Self> {
        if priv_spend == Scalar::ZERO {
            return Err(PrivacyError::InvalidParameters("private spend key is zero".to_string()));
        }

        let priv_view = hash_to_scalar(&scalar::to_bytes(&priv_spend));
        if priv_view == Scalar::ZERO {
            return Err(PrivacyError::InvalidParameters("derived view key is zero".to_string()));
        }

        Ok(Self {
            pub_spend: GroupElement::generator() * priv_spend,
            pub_view: GroupElement::generator() * priv_view,
            priv_spend: Some(priv_spend),
            priv_view: Some(priv_view),
        })
    }

    /// Fresh key set from a random spend key
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        loop {
            if let Ok(keys) = Self::from_private_spend_key(scalar::random_scalar(rng)) {
                return keys;
            }
        }
    }

    /// Receive-only key set
    pub fn from_public_keys(pub_spend: GroupElement, pub_view: GroupElement) -> PrivacyResult<Self> {
        if pub_spend.is_identity() || pub_view.is_identity() {
            return Err(PrivacyError::InvalidParameters("public key is the identity".to_string()));
        }
        Ok(Self {
            pub_spend,
            pub_view,
            priv_spend: None,
            priv_view: None,
        })
    }

    /// Copy of this key set with the private keys stripped
    pub fn public_view(&self) -> Self {
        Self {
            pub_spend: self.pub_spend,
            pub_view: self.pub_view,
            priv_spend: None,
            priv_view: None,
        }
    }

    pub fn priv_spend(&self) -> Option<&Scalar> {
        self.priv_spend.as_ref()
    }

    pub fn priv_view(&self) -> Option<&Scalar> {
        self.priv_view.as_ref()
    }

    /// Whether this key set can recognise and spend its outputs
    pub fn can_spend(&self) -> bool {
        self.priv_spend.is_some() && self.priv_view.is_some()
    }

    pub fn address(&self) -> PrivacyAddress {
        PrivacyAddress::new(self.pub_spend, self.pub_view)
    }
}

impl From<&PrivacyAddress> for StealthKeySet {
    fn from(address: &PrivacyAddress) -> Self {
        Self {
            pub_spend: address.pub_spend,
            pub_view: address.pub_view,
            priv_spend: None,
            priv_view: None,
        }
    }
}

// Private keys never reach logs
impl fmt::Debug for StealthKeySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StealthKeySet")
            .field("pub_spend", &self.pub_spend.to_hex())
            .field("pub_view", &self.pub_view.to_hex())
            .field("can_spend", &self.can_spend())
            .finish()
    }
}

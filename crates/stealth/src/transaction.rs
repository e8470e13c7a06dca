//! Per-output transaction proofs
//!
//! The sender picks an ephemeral `r`, publishes `R = r G` and derives the
//! shared point `S = r PubView`. The receiver recomputes `S = privView R`.
//! From `S` both sides derive
//!
//! - `f = Hs(compress(S))`, giving the one-time address `PubSpend + f G`
//! - `aesKey = Keccak256(uncompressed(S))`, keying the amount and mask encoding
//! - the default commitment mask `Keccak256(compress(S))`

use crate::{encryption, StealthKeySet};
use log::{debug, trace};
use privacy_core::{
    gen_commitment, hash_to_scalar, keccak256, scalar, GroupElement, PrivacyError, PrivacyResult, Scalar,
};
use rand_core::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Everything a sender publishes for one output, plus the mask it used
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionProof {
    pub onetime_address: GroupElement,
    pub tx_public_key: GroupElement,
    pub mask: Scalar,
    pub commitment: GroupElement,
    pub encrypted_amount: [u8; encryption::ENCRYPTED_BYTES],
    pub encrypted_mask: [u8; encryption::ENCRYPTED_BYTES],
}

/// An output recognised as ours
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedOutput {
    /// One-time private key `privSpend + f`, needed to spend the output
    pub priv_key: Scalar,
    pub pub_key: GroupElement,
    pub amount: Option<u64>,
    pub mask: Option<Scalar>,
}

/// Key material derived from one ECDH shared point
struct SharedSecret {
    compressed: Zeroizing<[u8; 33]>,
    aes_key: Zeroizing<[u8; 32]>,
}

impl SharedSecret {
    fn new(point: GroupElement) -> Self {
        let uncompressed = Zeroizing::new(point.uncompressed());
        Self {
            compressed: Zeroizing::new(point.compress()),
            aes_key: Zeroizing::new(keccak256(&uncompressed[..])),
        }
    }

    /// `f` in `PubSpend + f G`
    fn derivation_scalar(&self) -> Scalar {
        hash_to_scalar(&self.compressed[..])
    }

    /// Deterministic mask whose leading hex nibble is never zero
    fn default_mask(&self) -> Scalar {
        let mut bytes = Zeroizing::new(keccak256(&self.compressed[..]));
        if bytes[0] >> 4 == 0 {
            bytes[0] |= 0x10;
        }
        scalar::from_bytes_reduced(&bytes)
    }
}

/// Build the stealth output paying `amount` to `(pub_spend, pub_view)`
///
/// Unless `predefined_mask` is given, the commitment mask is derived from the
/// shared secret so the receiver can rebuild it.
pub fn gen_transaction_proof<R: RngCore + CryptoRng>(
    amount: u64,
    pub_spend: &GroupElement,
    pub_view: &GroupElement,
    predefined_mask: Option<Scalar>,
    rng: &mut R,
) -> PrivacyResult<TransactionProof> {
    if pub_spend.is_identity() || pub_view.is_identity() {
        return Err(PrivacyError::InvalidParameters("receiver key is the identity".to_string()));
    }

    let r = Zeroizing::new(scalar::random_scalar(rng));
    let secret = SharedSecret::new(*pub_view * *r);

    let onetime_address = *pub_spend + GroupElement::generator() * secret.derivation_scalar();
    let tx_public_key = GroupElement::generator() * *r;
    let mask = predefined_mask.unwrap_or_else(|| secret.default_mask());

    debug!("Generated stealth output {}", onetime_address.to_hex());

    Ok(TransactionProof {
        onetime_address,
        tx_public_key,
        mask,
        commitment: gen_commitment(amount, &mask),
        encrypted_amount: encryption::encrypt_amount(amount, &secret.aes_key),
        encrypted_mask: encryption::encrypt_mask(&mask, &secret.aes_key),
    })
}

/// Test whether an output belongs to `keys`, recovering its spend key
///
/// Returns `None` when the output is not ours or `keys` holds no private
/// keys. Amount and mask are only decrypted when supplied.
pub fn check_transaction_proof(
    keys: &StealthKeySet,
    tx_public_key: &GroupElement,
    onetime_address: &GroupElement,
    encrypted_amount: Option<&[u8; encryption::ENCRYPTED_BYTES]>,
    encrypted_mask: Option<&[u8; encryption::ENCRYPTED_BYTES]>,
) -> Option<OwnedOutput> {
    let (priv_spend, priv_view) = match (keys.priv_spend(), keys.priv_view()) {
        (Some(spend), Some(view)) => (spend, view),
        _ => return None,
    };

    let secret = SharedSecret::new(*tx_public_key * *priv_view);
    let priv_key = *priv_spend + secret.derivation_scalar();
    let pub_key = GroupElement::generator() * priv_key;

    let ours = pub_key.compress()[..].ct_eq(&onetime_address.compress()[..]);
    if !bool::from(ours) {
        trace!("Output {} is not ours", onetime_address.to_hex());
        return None;
    }

    Some(OwnedOutput {
        priv_key,
        pub_key,
        amount: encrypted_amount.and_then(|enc| encryption::decrypt_amount(enc, &secret.aes_key)),
        mask: encrypted_mask.and_then(|enc| encryption::decrypt_mask(enc, &secret.aes_key)),
    })
}

impl StealthKeySet {
    /// Build an output paying this key set
    pub fn gen_transaction_proof<R: RngCore + CryptoRng>(
        &self,
        amount: u64,
        predefined_mask: Option<Scalar>,
        rng: &mut R,
    ) -> PrivacyResult<TransactionProof> {
        gen_transaction_proof(amount, &self.pub_spend, &self.pub_view, predefined_mask, rng)
    }

    /// Scan a full transaction proof, decrypting both amount and mask
    pub fn check_transaction_proof(&self, proof: &TransactionProof) -> Option<OwnedOutput> {
        check_transaction_proof(
            self,
            &proof.tx_public_key,
            &proof.onetime_address,
            Some(&proof.encrypted_amount),
            Some(&proof.encrypted_mask),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PrivacyAddress;
    use privacy_core::verify_commitment;
    use rand::{rngs::StdRng, thread_rng, SeedableRng};

    #[test]
    fn test_round_trip() {
        let mut rng = StdRng::seed_from_u64(11);
        let keys = StealthKeySet::generate(&mut rng);

        let proof = keys.gen_transaction_proof(1_000_000, None, &mut rng).unwrap();
        let owned = keys.check_transaction_proof(&proof).expect("output should be ours");

        assert_eq!(owned.amount, Some(1_000_000));
        assert_eq!(owned.mask, Some(proof.mask));
        assert_eq!(owned.pub_key, proof.onetime_address);
        assert_eq!(GroupElement::generator() * owned.priv_key, proof.onetime_address);
        assert!(verify_commitment(1_000_000, &proof.mask, &proof.commitment.compress()));
    }

    #[test]
    fn test_pay_to_decoded_address() {
        let mut rng = StdRng::seed_from_u64(17);
        let owner = StealthKeySet::generate(&mut rng);
        let encoded = owner.address().encode();

        let address: PrivacyAddress = encoded.parse().unwrap();
        let payee = StealthKeySet::from(&address);
        assert!(!payee.can_spend());
        assert_eq!(payee, owner.public_view());

        let proof = payee.gen_transaction_proof(250, None, &mut rng).unwrap();
        let owned = owner.check_transaction_proof(&proof).expect("owner should recognise the output");
        assert_eq!(owned.amount, Some(250));
        assert_eq!(owned.mask, Some(proof.mask));
        assert_eq!(GroupElement::generator() * owned.priv_key, proof.onetime_address);
        assert_eq!(payee.check_transaction_proof(&proof), None);
    }

    #[test]
    fn test_non_owner_never_matches() {
        let mut rng = StdRng::seed_from_u64(12);
        let receiver = StealthKeySet::generate(&mut rng);
        let proof = receiver.gen_transaction_proof(42, None, &mut rng).unwrap();

        for _ in 0..1000 {
            let stranger = StealthKeySet::generate(&mut rng);
            assert_eq!(stranger.check_transaction_proof(&proof), None);
        }
    }

    #[test]
    fn test_public_only_keys_cannot_scan() {
        let keys = StealthKeySet::generate(&mut thread_rng());
        let proof = keys.gen_transaction_proof(5, None, &mut thread_rng()).unwrap();
        assert_eq!(keys.public_view().check_transaction_proof(&proof), None);
    }

    #[test]
    fn test_predefined_mask_is_used() {
        let keys = StealthKeySet::generate(&mut thread_rng());
        let mask = Scalar::from(777u64);
        let proof = keys.gen_transaction_proof(9, Some(mask), &mut thread_rng()).unwrap();

        assert_eq!(proof.mask, mask);
        assert_eq!(proof.commitment, gen_commitment(9, &mask));
        assert_eq!(keys.check_transaction_proof(&proof).unwrap().mask, Some(mask));
    }

    #[test]
    fn test_default_mask_matches_shared_secret() {
        let mut rng = StdRng::seed_from_u64(13);
        let keys = StealthKeySet::generate(&mut rng);
        let proof = keys.gen_transaction_proof(3, None, &mut rng).unwrap();

        let shared = proof.tx_public_key * *keys.priv_view().unwrap();
        assert_eq!(proof.mask, SharedSecret::new(shared).default_mask());
    }

    #[test]
    fn test_default_mask_leading_nibble() {
        let mut rng = StdRng::seed_from_u64(14);
        for _ in 0..64 {
            let point = GroupElement::generator() * scalar::random_scalar(&mut rng);
            let secret = SharedSecret::new(point);
            let raw = keccak256(&secret.compressed[..]);
            let mask = scalar::to_bytes(&secret.default_mask());

            assert_ne!(mask[0] >> 4, 0);
            if raw[0] >> 4 == 0 {
                assert_eq!(mask[0], raw[0] | 0x10);
                assert_eq!(mask[1..], raw[1..]);
            }
        }
    }

    #[test]
    fn test_scan_without_ciphertexts() {
        let mut rng = StdRng::seed_from_u64(15);
        let keys = StealthKeySet::generate(&mut rng);
        let proof = keys.gen_transaction_proof(8, None, &mut rng).unwrap();

        let owned = check_transaction_proof(&keys, &proof.tx_public_key, &proof.onetime_address, None, None).unwrap();
        assert_eq!(owned.amount, None);
        assert_eq!(owned.mask, None);
        assert_eq!(owned.pub_key, proof.onetime_address);
    }

    #[test]
    fn test_tampered_tx_key_not_recognised() {
        let mut rng = StdRng::seed_from_u64(16);
        let keys = StealthKeySet::generate(&mut rng);
        let mut proof = keys.gen_transaction_proof(8, None, &mut rng).unwrap();
        proof.tx_public_key = proof.tx_public_key + GroupElement::generator();
        assert_eq!(keys.check_transaction_proof(&proof), None);
    }

    #[test]
    fn test_identity_receiver_rejected() {
        let g = GroupElement::generator();
        let result = gen_transaction_proof(1, &g, &GroupElement::identity(), None, &mut thread_rng());
        assert!(matches!(result, Err(PrivacyError::InvalidParameters(_))));
    }
}

//! # Stealth Addresses
//!
//! One-time output addresses for confidential transactions over secp256k1.
//!
//! A receiver publishes a [`PrivacyAddress`] carrying two public keys,
//! `PubSpend = privSpend G` and `PubView = privView G`. For every output the
//! sender derives a fresh ECDH shared point with `PubView` and uses it to
//!
//! - hide the receiver behind a one-time address `PubSpend + Hs(S) G`
//! - encrypt the amount and commitment mask for the receiver
//! - derive the Pedersen commitment mask unless one is supplied
//!
//! Only the holder of `privView` can recognise the output, and only the
//! holder of `privSpend` as well can recover its one-time private key.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stealth::StealthKeySet;
//! use rand::rngs::OsRng;
//!
//! let receiver = StealthKeySet::generate(&mut OsRng);
//! let proof = receiver.gen_transaction_proof(500, None, &mut OsRng).unwrap();
//!
//! let owned = receiver.check_transaction_proof(&proof).unwrap();
//! assert_eq!(owned.amount, Some(500));
//! ```

pub mod address;
pub mod encryption;
pub mod keys;
pub mod transaction;


pub use address::*;
pub use keys::*;
pub use transaction::*;

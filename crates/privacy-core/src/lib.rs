//! # Privacy Core
//!
//! This crate provides the foundational types and primitives for the
//! confidential-transaction layer over secp256k1. It includes:
//!
//! - Modular arithmetic over the group order and point encoding
//! - A Keccak-256 transcript for Fiat-Shamir challenges
//! - Deterministic generator derivation
//! - Pedersen commitments and their homomorphic sums
//! - Error types and vector utilities
//!
//! ## Mathematical Background
//!
//! Amounts are hidden in Pedersen commitments over two generators with
//! unknown discrete-log relation:
//! ```text
//! C = mask * G + amount * H
//! ```
//! Commitments add homomorphically, so `sum(inputs) == sum(outputs) + fee * H`
//! proves conservation of value without revealing any amount. Range proofs
//! additionally use the vector generators `{Gi}`, `{Hi}` and `U`.

pub mod commitment;
pub mod errors;
pub mod generators;
pub mod group;
pub mod scalar;
pub mod transcript;
pub mod utils;


pub use commitment::*;
pub use errors::*;
pub use generators::*;
pub use group::*;
pub use transcript::*;

/// Re-export commonly used types from k256
pub use k256::Scalar;

/// Bits per proven value
pub const BITS_PER_VALUE: usize = 64;

/// Largest number of values a single range proof aggregates
pub const MAX_AGGREGATION: usize = 8;

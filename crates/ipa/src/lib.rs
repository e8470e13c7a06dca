//! # Inner Product Argument (IPA)
//!
//! This crate implements the inner product argument used to compress range
//! proofs. The IPA proves knowledge of vectors `a` and `b` such that:
//!
//! ```text
//! P + c U = <a, G> + <b, H> + <a,b> U,   c = <a,b>
//! ```
//!
//! ## Mathematical Background
//!
//! The inner product argument uses a recursive folding approach:
//!
//! 1. **Base Case**: For vectors of length 1, the proof is just the values `a` and `b`.
//!
//! 2. **Recursive Case**: For vectors of length `n > 1`:
//!    - Split vectors: `a = (a_L, a_R)`, `b = (b_L, b_R)`
//!    - Compute cross terms:
//!      - `L = <a_L, G_R> + <b_R, H_L> + <a_L, b_R> U`
//!      - `R = <a_R, G_L> + <b_L, H_R> + <a_R, b_L> U`
//!    - Challenge `x = Keccak256(L || R) mod n` (points as raw `x || y`)
//!    - Fold vectors:
//!      - `a' = x a_L + x^{-1} a_R`
//!      - `b' = x^{-1} b_L + x b_R`
//!    - Fold generators:
//!      - `G' = x^{-1} G_L + x G_R`
//!      - `H' = x H_L + x^{-1} H_R`
//!    - Recurse with folded values
//!
//! The proof consists of every round's `L`, `R` and challenge, indexed by
//! `log2(length) - 1` so the innermost round comes first.

pub mod proof;
pub mod prover;
pub mod verifier;

pub use proof::*;
pub use prover::*;
pub use verifier::*;

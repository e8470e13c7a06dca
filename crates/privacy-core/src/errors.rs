//! Error types for privacy-layer operations

use thiserror::Error;

/// Main error type for commitment, proof and stealth operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrivacyError {
    /// An amount is negative or does not fit in 64 bits
    #[error("Value is not in range [0, 2^{bits})")]
    ValueOutOfRange { bits: usize },

    /// Aggregated proofs only support 1, 2, 4 or 8 values
    #[error("Unsupported aggregation size {0}, expected one of 1, 2, 4, 8")]
    UnsupportedAggregationSize(usize),

    /// Malformed point, scalar or proof bytes
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Well-formed point encoding that does not satisfy the curve equation
    #[error("Point is not on the curve")]
    PointNotOnCurve,

    /// A recomputed Fiat-Shamir challenge differs from the one carried by the proof
    #[error("Fiat-Shamir challenge mismatch: {0}")]
    ChallengeMismatch(&'static str),

    /// Modular inverse of zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Vector operands of mismatched or unsupported length
    #[error("Incompatible vector length: expected {expected}, got {actual}")]
    IncompatibleVectorLength { expected: usize, actual: usize },

    /// Address or buffer checksum mismatch
    #[error("Invalid checksum")]
    InvalidChecksum,

    /// Proof is structurally valid but an equation does not hold
    #[error("Invalid proof: {0}")]
    InvalidProof(String),

    /// Invalid parameters provided
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for privacy-layer operations
pub type PrivacyResult<T> = Result<T, PrivacyError>;

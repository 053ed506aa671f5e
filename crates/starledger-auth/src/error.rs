//! Error types for ownership verification.

use thiserror::Error;

/// Reasons an ownership proof is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OwnershipError {
    /// The challenge is older than the freshness window.
    #[error("challenge issued at {issued_at} expired: {now} is at least {window}s later")]
    ExpiredChallenge { issued_at: u64, now: u64, window: u64 },

    /// The signature does not match the address and message.
    #[error("signature does not match address and message")]
    BadSignature,

    /// The message is not a challenge this ledger issues.
    #[error("malformed challenge: {0}")]
    MalformedChallenge(String),

    /// The challenge was issued to a different address.
    #[error("challenge was issued to {found}, not {expected}")]
    AddressMismatch { expected: String, found: String },

    /// The challenge already authorized a claim.
    #[error("challenge has already been used")]
    ChallengeReused,
}

/// Result type for ownership operations.
pub type Result<T> = std::result::Result<T, OwnershipError>;

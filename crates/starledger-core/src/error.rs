//! Error types for the Star Ledger core.

use thiserror::Error;

/// Core errors that can occur while encoding, decoding, or reading blocks.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("decoding error: {0}")]
    DecodingError(String),

    /// The genesis block carries a sentinel, never an ownership record.
    #[error("the genesis block carries no star claim")]
    TamperedGenesisAccess,
}

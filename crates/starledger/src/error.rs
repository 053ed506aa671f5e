//! Error types for the Ledger.

use starledger_auth::OwnershipError;
use starledger_core::{CoreError, Diagnostic};
use thiserror::Error;

/// Errors that can occur during Ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The ownership proof was rejected. Nothing was appended.
    #[error("ownership verification failed: {0}")]
    VerificationFailed(#[from] OwnershipError),

    /// The chain failed validation on a read path.
    #[error("chain is invalid: {} problem(s) detected", .0.len())]
    ChainInvalid(Vec<Diagnostic>),

    /// An internal invariant broke during append.
    #[error("append failed: {0}")]
    AppendFailure(String),

    /// Block encoding or decoding error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

/// Result type for Ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

//! # Star Ledger
//!
//! An in-memory, append-only ledger of star ownership claims, each wrapped in
//! a hash-linked block.
//!
//! ## Overview
//!
//! - **Blocks**: height, time, previous hash, content hash, encoded body
//! - **Ownership proofs**: a claimant signs a fresh challenge before a claim
//!   is accepted
//! - **Validation**: the whole chain can be re-checked at any time,
//!   independently of what the append path assigned
//!
//! ## Key Concepts
//!
//! - **Genesis**: height 0, no previous hash, a sentinel body. Created when
//!   the ledger is constructed.
//! - **Challenge**: `address:timestamp:starRegistry`, valid for 300 seconds.
//! - **Diagnostic**: one detected integrity violation. Validation reports,
//!   it never fails.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use starledger::{Ledger, LedgerConfig};
//! use starledger::auth::Ed25519Verifier;
//! use starledger::core::{Keypair, ManualClock, Star};
//!
//! let clock = Arc::new(ManualClock::new(1_700_000_000));
//! let ledger = Ledger::new(LedgerConfig::default(), clock, Arc::new(Ed25519Verifier)).unwrap();
//! assert_eq!(ledger.height(), Some(0));
//!
//! let keypair = Keypair::generate();
//! let address = keypair.address();
//! let message = ledger.request_ownership_challenge(&address);
//! let signature = keypair.sign_challenge(&message);
//!
//! let block = ledger
//!     .submit_star_claim(&address, &message, &signature, Star::new("1", "2"))
//!     .unwrap();
//! assert_eq!(block.height, 1);
//! assert_eq!(ledger.stars_by_owner(&address).unwrap().len(), 1);
//! assert!(ledger.validate_chain().is_healthy());
//! ```
//!
//! ## Re-exports
//!
//! - `starledger::core` - Blocks, codec, validator
//! - `starledger::auth` - Ownership challenges and verification

pub mod error;
pub mod ledger;

#[cfg(any(test, feature = "test-utils"))]
mod tamper;

// Re-export component crates
pub use starledger_auth as auth;
pub use starledger_core as core;

pub use error::{LedgerError, Result};
pub use ledger::{Ledger, LedgerConfig};

// Re-export commonly used types
pub use starledger_auth::{OwnershipError, SignatureVerifier};
pub use starledger_core::{
    Block, BlockHash, ChainHealth, Clock, Diagnostic, DiagnosticCategory, Payload, Star,
    StarClaim,
};

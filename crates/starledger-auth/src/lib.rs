//! # Star Ledger Auth
//!
//! Ownership proofs for star claims.
//!
//! ## Overview
//!
//! Before a claim is accepted the claimant proves control of their address:
//!
//! 1. The ledger issues a challenge `address:timestamp:starRegistry`
//! 2. The claimant signs it with the key behind `address`
//! 3. The [`OwnershipVerifier`] checks the challenge is fresh (younger than
//!    300 seconds) and that the signature matches
//!
//! Binding the embedded address and purpose tag to the claim is opt-in
//! through [`AuthConfig`].
//!
//! The signature scheme is pluggable through [`SignatureVerifier`];
//! [`Ed25519Verifier`] is bundled.
//!
//! ## Replay
//!
//! Challenges are stateless and may be replayed inside their window.
//! [`ChallengeRegistry`] adds opt-in single-use enforcement.
//!
//! ```rust
//! use std::sync::Arc;
//! use starledger_auth::{AuthConfig, Ed25519Verifier, OwnershipVerifier};
//! use starledger_core::{Keypair, ManualClock};
//!
//! let verifier = OwnershipVerifier::new(
//!     AuthConfig::default(),
//!     Arc::new(ManualClock::new(1_700_000_000)),
//!     Arc::new(Ed25519Verifier),
//! );
//!
//! let keypair = Keypair::generate();
//! let message = verifier.issue_challenge(&keypair.address());
//! let signature = keypair.sign_challenge(&message);
//! assert!(verifier.verify(&keypair.address(), &message, &signature).is_ok());
//! ```

pub mod challenge;
pub mod error;
pub mod registry;
pub mod signature;
pub mod verifier;

pub use challenge::{AuthConfig, Challenge, DEFAULT_FRESHNESS_WINDOW_SECS, DEFAULT_PURPOSE_TAG};
pub use error::{OwnershipError, Result};
pub use registry::ChallengeRegistry;
pub use signature::{Ed25519Verifier, SignatureVerifier};
pub use verifier::OwnershipVerifier;

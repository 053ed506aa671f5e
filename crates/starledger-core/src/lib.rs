//! # Star Ledger Core
//!
//! Pure primitives for the Star Ledger: blocks, the block codec, and the
//! full-chain validator.
//!
//! This crate contains no locking, no storage, no networking. It is pure
//! computation over hash-linked blocks.
//!
//! ## Key Types
//!
//! - [`Block`] - One ledger entry: linkage metadata, timestamp, encoded body
//! - [`BlockHash`] - Content hash of a block (Blake3)
//! - [`Payload`] - Decoded body: the genesis sentinel or a [`StarClaim`]
//! - [`ChainHealth`] - Result of [`validate_chain`], a list of [`Diagnostic`]s
//!
//! ## Hashing
//!
//! Block hashes cover deterministic CBOR of every field except the hash
//! itself. See [`canonical`] module.

pub mod block;
pub mod canonical;
pub mod clock;
pub mod crypto;
pub mod error;
pub mod health;
pub mod payload;
pub mod types;
pub mod validation;

pub use block::Block;
pub use canonical::{canonical_block_bytes, compute_hash, decode_body, encode_body};
pub use clock::{Clock, ManualClock, SystemClock};
pub use crypto::{Ed25519PublicKey, Ed25519Signature, Keypair};
pub use error::CoreError;
pub use health::{ChainHealth, Diagnostic, DiagnosticCategory};
pub use payload::{Payload, Star, StarClaim, GENESIS_MARKER};
pub use types::BlockHash;
pub use validation::validate_chain;

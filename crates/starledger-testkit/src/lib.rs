//! # Star Ledger Testkit
//!
//! Testing utilities for the Star Ledger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known blocks with their exact body and canonical bytes
//! - **Generators**: Proptest strategies for stars, claims, and blocks
//! - **Fixtures**: A ledger on a manual clock with a claimant keypair
//!
//! ## Golden Vectors
//!
//! ```rust
//! use starledger_testkit::vectors::{all_vectors, block_from_vector};
//!
//! for vector in all_vectors() {
//!     let block = block_from_vector(&vector);
//!     assert!(block.validate());
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use starledger_testkit::generators::{block_from_params, BlockParams};
//!
//! proptest! {
//!     #[test]
//!     fn hash_is_deterministic(params: BlockParams) {
//!         let b1 = block_from_params(&params);
//!         let b2 = block_from_params(&params);
//!         prop_assert_eq!(b1.hash, b2.hash);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use starledger_testkit::fixtures::TestFixture;
//! use starledger_core::Star;
//!
//! let fixture = TestFixture::new();
//! let block = fixture.claim(Star::new("1", "2")).unwrap();
//! assert_eq!(block.height, 1);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{keypairs, TestFixture, FIXTURE_START};
pub use generators::{block_from_params, BlockParams};
pub use vectors::{all_vectors, block_from_vector, verify_all_vectors, GoldenVector};

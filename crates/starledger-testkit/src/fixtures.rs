//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use starledger::{Block, Ledger, LedgerConfig, Result};
use starledger_auth::Ed25519Verifier;
use starledger_core::{Keypair, ManualClock, Star};

/// Clock reading every fixture starts at.
pub const FIXTURE_START: u64 = 1_700_000_000;

/// A test fixture: a ledger on a manual clock plus a claimant keypair.
pub struct TestFixture {
    pub keypair: Keypair,
    pub clock: Arc<ManualClock>,
    pub ledger: Ledger,
}

impl TestFixture {
    /// Create a new test fixture with a random keypair.
    pub fn new() -> Self {
        Self::build(Keypair::generate(), LedgerConfig::default())
    }

    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self::build(Keypair::from_seed(&seed), LedgerConfig::default())
    }

    /// Create with a deterministic keypair and custom ledger config.
    pub fn with_config(seed: [u8; 32], config: LedgerConfig) -> Self {
        Self::build(Keypair::from_seed(&seed), config)
    }

    fn build(keypair: Keypair, config: LedgerConfig) -> Self {
        let clock = Arc::new(ManualClock::new(FIXTURE_START));
        let ledger = match Ledger::new(config, clock.clone(), Arc::new(Ed25519Verifier)) {
            Ok(ledger) => ledger,
            Err(e) => panic!("fixture ledger failed to initialize: {}", e),
        };
        Self {
            keypair,
            clock,
            ledger,
        }
    }

    /// The claimant's address.
    pub fn address(&self) -> String {
        self.keypair.address()
    }

    /// Request a challenge for the fixture's address and sign it.
    ///
    /// Returns `(message, signature)`.
    pub fn signed_challenge(&self) -> (String, String) {
        let message = self.ledger.request_ownership_challenge(&self.address());
        let signature = self.keypair.sign_challenge(&message);
        (message, signature)
    }

    /// Submit a claim for `star` with a fresh signed challenge.
    pub fn claim(&self, star: Star) -> Result<Block> {
        let (message, signature) = self.signed_challenge();
        self.ledger
            .submit_star_claim(&self.address(), &message, &signature, star)
    }

    /// Submit `count` distinct claims, one second apart.
    pub fn claim_many(&self, count: usize) -> Result<Vec<Block>> {
        (0..count)
            .map(|i| {
                self.clock.advance(1);
                self.claim(Star::new(format!("{}", i), "0"))
            })
            .collect()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic keypairs for multi-claimant tests.
pub fn keypairs(count: usize) -> Vec<Keypair> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            seed[1] = (i >> 8) as u8;
            Keypair::from_seed(&seed)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_starts_at_genesis() {
        let fixture = TestFixture::with_seed([0x42; 32]);
        assert_eq!(fixture.ledger.height(), Some(0));
        assert_eq!(fixture.ledger.latest_block().unwrap().time, FIXTURE_START);
    }

    #[test]
    fn test_claim_many() {
        let fixture = TestFixture::with_seed([0x42; 32]);
        let blocks = fixture.claim_many(3).unwrap();

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[2].height, 3);
        assert_eq!(blocks[2].time, FIXTURE_START + 3);
        assert_eq!(fixture.ledger.stars_by_owner(&fixture.address()).unwrap().len(), 3);
    }

    #[test]
    fn test_keypairs_are_distinct() {
        let pairs = keypairs(4);
        let mut addresses: Vec<_> = pairs.iter().map(Keypair::address).collect();
        addresses.sort();
        addresses.dedup();
        assert_eq!(addresses.len(), 4);
    }
}

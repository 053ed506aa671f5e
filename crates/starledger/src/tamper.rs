//! Structural mutation hooks.
//!
//! These bypass the append path to corrupt a ledger on purpose, so tests can
//! exercise every detection path of the validator. Only compiled for tests
//! and under the `test-utils` feature.

use starledger_core::Block;

use crate::ledger::Ledger;

impl Ledger {
    /// Edit the block at sequence position `position` in place.
    ///
    /// Returns false if there is no such block.
    pub fn tamper_block<F>(&self, position: usize, edit: F) -> bool
    where
        F: FnOnce(&mut Block),
    {
        let mut state = self.write();
        match state.chain.get_mut(position) {
            Some(block) => {
                tracing::warn!(position, "tampering with block");
                edit(block);
                true
            }
            None => false,
        }
    }

    /// Overwrite position `to` with a copy of the block at `from`.
    pub fn transfer_block(&self, from: usize, to: usize) -> bool {
        let mut state = self.write();
        let Some(block) = state.chain.get(from).cloned() else {
            return false;
        };
        match state.chain.get_mut(to) {
            Some(slot) => {
                tracing::warn!(from, to, "overwriting block with a copy");
                *slot = block;
                true
            }
            None => false,
        }
    }

    /// Set the height counter without touching the sequence.
    pub fn force_height_counter(&self, height: Option<u64>) {
        let mut state = self.write();
        tracing::warn!(?height, previous = ?state.height, "forcing height counter");
        state.height = height;
    }

    /// Drop every block from position `len` on, leaving the counter alone.
    ///
    /// Returns false if the sequence was already that short.
    pub fn truncate(&self, len: usize) -> bool {
        let mut state = self.write();
        if state.chain.len() <= len {
            return false;
        }
        tracing::warn!(from = state.chain.len(), to = len, "truncating chain");
        state.chain.truncate(len);
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use starledger_auth::Ed25519Verifier;
    use starledger_core::{ManualClock, Payload, Star, StarClaim};

    use crate::ledger::LedgerConfig;

    use super::*;

    fn ledger(claims: usize) -> Ledger {
        let ledger = Ledger::new(
            LedgerConfig::default(),
            Arc::new(ManualClock::new(1_700_000_000)),
            Arc::new(Ed25519Verifier),
        )
        .unwrap();
        for i in 0..claims {
            let claim = StarClaim::new("A", Star::new(i.to_string(), "2"));
            ledger.append(&Payload::from(claim)).unwrap();
        }
        ledger
    }

    #[test]
    fn test_tamper_block() {
        let ledger = ledger(1);
        assert!(ledger.tamper_block(1, |block| block.time += 1));
        assert!(!ledger.block_by_height(1).unwrap().validate());
        assert!(!ledger.tamper_block(5, |_| {}));
    }

    #[test]
    fn test_transfer_block() {
        let ledger = ledger(2);
        let source = ledger.block_by_height(2).unwrap();
        assert!(ledger.transfer_block(2, 1));
        assert_eq!(ledger.blocks()[1], source);
        assert!(!ledger.transfer_block(9, 1));
        assert!(!ledger.transfer_block(1, 9));
    }

    #[test]
    fn test_force_height_counter() {
        let ledger = ledger(0);
        ledger.force_height_counter(Some(4));
        assert_eq!(ledger.height(), Some(4));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_truncate_keeps_counter() {
        let ledger = ledger(3);
        assert!(ledger.truncate(2));
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.height(), Some(3));
        assert!(!ledger.truncate(2));
    }
}

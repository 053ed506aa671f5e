//! Full-chain validation.
//!
//! The validator re-derives every linkage and hash from the blocks alone and
//! does not trust anything the append path assigned. It never fails: every
//! violation becomes a [`Diagnostic`].

use crate::block::Block;
use crate::health::{ChainHealth, Diagnostic};

/// Maximum number of missing slots reported individually.
pub const MAX_REPORTED_MISSING: u64 = 32;

/// Validate a chain and its redundant height counter.
///
/// Walks positions from newest to oldest. Chain-level diagnostics come first,
/// then per-block diagnostics in walk order. Every check is independent:
/// one failure never hides another on the same block.
pub fn validate_chain(blocks: &[Block], height_counter: Option<u64>) -> ChainHealth {
    let mut diagnostics = Vec::new();

    if blocks.is_empty() {
        diagnostics.push(Diagnostic::application(None, "chain is empty: no genesis block"));
    }

    let last_index = (blocks.len() as u64).checked_sub(1);
    if height_counter != last_index {
        diagnostics.push(Diagnostic::blockchain(
            None,
            format!(
                "height counter {} is out of sync with chain length {}",
                display_counter(height_counter),
                blocks.len()
            ),
        ));
    }

    // Positions the counter claims beyond the end of the sequence.
    if let (Some(counter), len) = (height_counter, blocks.len() as u64) {
        if counter >= len {
            let missing = counter - len + 1;
            let listed = missing.min(MAX_REPORTED_MISSING);
            for position in (counter - (listed - 1)..=counter).rev() {
                diagnostics.push(Diagnostic::application(
                    Some(position),
                    "block is missing from the chain",
                ));
            }
            if missing > listed {
                diagnostics.push(Diagnostic::application(
                    None,
                    format!("{} further missing blocks not listed", missing - listed),
                ));
            }
        }
    }

    for (index, block) in blocks.iter().enumerate().rev() {
        let position = index as u64;
        if index == 0 {
            check_genesis(block, &mut diagnostics);
        } else {
            check_linked(block, &blocks[index - 1], position, &mut diagnostics);
        }
    }

    ChainHealth::from_diagnostics(diagnostics)
}

/// Checks for the block in position 0.
fn check_genesis(block: &Block, diagnostics: &mut Vec<Diagnostic>) {
    if block.height != 0 {
        diagnostics.push(Diagnostic::blockchain(
            Some(0),
            format!("genesis block has height {}, expected 0", block.height),
        ));
    }

    if let Some(previous) = &block.previous_block_hash {
        diagnostics.push(Diagnostic::blockchain(
            Some(0),
            format!("genesis block links to previous hash {}", previous),
        ));
    }

    if !block.validate() {
        diagnostics.push(Diagnostic::block(0, "content hash does not match block contents"));
    }
}

/// Checks for a block with a predecessor.
fn check_linked(
    block: &Block,
    previous: &Block,
    position: u64,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if previous.height.checked_add(1) != Some(block.height) {
        diagnostics.push(Diagnostic::blockchain(
            Some(position),
            format!(
                "height {} does not follow previous height {}",
                block.height, previous.height
            ),
        ));
    }

    if block.previous_block_hash != previous.hash {
        diagnostics.push(Diagnostic::blockchain(
            Some(position),
            format!(
                "previous hash {} does not match hash {} of block {}",
                display_hash(block.previous_block_hash.as_ref()),
                display_hash(previous.hash.as_ref()),
                position - 1
            ),
        ));
    }

    if !block.validate() {
        diagnostics.push(Diagnostic::block(
            position,
            "content hash does not match block contents",
        ));
    }
}

fn display_counter(counter: Option<u64>) -> String {
    counter.map_or_else(|| "<unset>".to_string(), |c| c.to_string())
}

fn display_hash(hash: Option<&crate::types::BlockHash>) -> String {
    hash.map_or_else(|| "<none>".to_string(), |h| h.to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::encode_body;
    use crate::health::DiagnosticCategory;
    use crate::payload::{Payload, Star, StarClaim};

    fn build_chain(claims: usize) -> Vec<Block> {
        let mut chain = vec![Block::new(&Payload::Genesis)
            .unwrap()
            .with_linkage(0, 1_000, None)
            .sealed()];

        for i in 0..claims {
            let last = chain.last().unwrap();
            let claim = StarClaim::new(format!("owner-{}", i), Star::new("1", "2"));
            let block = Block::new(&Payload::from(claim))
                .unwrap()
                .with_linkage(last.height + 1, 1_000 + i as u64, last.hash)
                .sealed();
            chain.push(block);
        }
        chain
    }

    fn counter(chain: &[Block]) -> Option<u64> {
        (chain.len() as u64).checked_sub(1)
    }

    #[test]
    fn test_healthy_chain() {
        let chain = build_chain(4);
        assert!(validate_chain(&chain, counter(&chain)).is_healthy());
    }

    #[test]
    fn test_genesis_only_chain_is_healthy() {
        let chain = build_chain(0);
        assert!(validate_chain(&chain, Some(0)).is_healthy());
    }

    #[test]
    fn test_empty_chain() {
        let health = validate_chain(&[], None);
        assert_eq!(health.diagnostics().len(), 1);
        assert!(health.reports(DiagnosticCategory::Application, None));
    }

    #[test]
    fn test_empty_chain_with_stale_counter() {
        let health = validate_chain(&[], Some(0));
        assert!(health.reports(DiagnosticCategory::Application, None));
        assert!(health.reports(DiagnosticCategory::BlockchainValidation, None));
        assert!(health.reports(DiagnosticCategory::Application, Some(0)));
    }

    #[test]
    fn test_counter_desync_with_intact_blocks() {
        let chain = build_chain(2);
        let health = validate_chain(&chain, Some(1));

        assert_eq!(health.diagnostics().len(), 1);
        assert!(health.reports(DiagnosticCategory::BlockchainValidation, None));
    }

    #[test]
    fn test_counter_ahead_reports_missing_blocks() {
        let chain = build_chain(1);
        let health = validate_chain(&chain, Some(3));

        assert!(health.reports(DiagnosticCategory::BlockchainValidation, None));
        assert!(health.reports(DiagnosticCategory::Application, Some(2)));
        assert!(health.reports(DiagnosticCategory::Application, Some(3)));
        assert!(!health.reports(DiagnosticCategory::Application, Some(1)));
    }

    #[test]
    fn test_missing_report_is_capped() {
        let chain = build_chain(0);
        let health = validate_chain(&chain, Some(u64::MAX));

        let missing = health
            .diagnostics()
            .iter()
            .filter(|d| d.category == DiagnosticCategory::Application && d.height.is_some())
            .count() as u64;
        assert_eq!(missing, MAX_REPORTED_MISSING);
        assert!(health.reports(DiagnosticCategory::Application, None));
    }

    #[test]
    fn test_tampered_body_reports_block_validation() {
        let mut chain = build_chain(3);
        let forged = StarClaim::new("mallory", Star::new("9", "9"));
        chain[2].body = encode_body(&Payload::from(forged)).unwrap();

        let health = validate_chain(&chain, counter(&chain));
        assert!(health.reports(DiagnosticCategory::BlockValidation, Some(2)));
        assert_eq!(health.first_bad_height(), Some(2));
        // Block 3 still links to block 2's stored hash.
        assert!(!health.reports(DiagnosticCategory::BlockchainValidation, Some(3)));
    }

    #[test]
    fn test_resealed_tamper_breaks_next_link() {
        let mut chain = build_chain(3);
        chain[1].time += 1;
        chain[1].seal();

        let health = validate_chain(&chain, counter(&chain));
        assert!(!health.reports(DiagnosticCategory::BlockValidation, Some(1)));
        assert!(health.reports(DiagnosticCategory::BlockchainValidation, Some(2)));
    }

    #[test]
    fn test_height_gap_reported() {
        let mut chain = build_chain(2);
        chain[2].height = 7;
        chain[2].seal();

        let health = validate_chain(&chain, counter(&chain));
        assert!(health.reports(DiagnosticCategory::BlockchainValidation, Some(2)));
        assert!(!health.reports(DiagnosticCategory::BlockValidation, Some(2)));
    }

    #[test]
    fn test_genesis_replaced_by_later_block() {
        let mut chain = build_chain(2);
        chain[0] = chain[1].clone();

        let health = validate_chain(&chain, counter(&chain));
        let at_zero: Vec<_> = health
            .diagnostics()
            .iter()
            .filter(|d| d.height == Some(0))
            .collect();
        assert!(at_zero
            .iter()
            .any(|d| d.category == DiagnosticCategory::BlockchainValidation
                && d.message.contains("height")));
        assert!(health.reports(DiagnosticCategory::BlockchainValidation, Some(1)));
    }

    #[test]
    fn test_checks_are_not_short_circuited() {
        let mut chain = build_chain(2);
        chain[2].height = 9;
        chain[2].previous_block_hash = None;

        let health = validate_chain(&chain, counter(&chain));
        let at_two: Vec<_> = health
            .diagnostics()
            .iter()
            .filter(|d| d.height == Some(2))
            .collect();
        assert_eq!(at_two.len(), 3);
    }

    #[test]
    fn test_reporting_order_is_newest_first() {
        let mut chain = build_chain(3);
        chain[1].time += 1;
        chain[3].time += 1;

        let health = validate_chain(&chain, counter(&chain));
        let heights: Vec<_> = health
            .diagnostics()
            .iter()
            .filter(|d| d.category == DiagnosticCategory::BlockValidation)
            .filter_map(|d| d.height)
            .collect();
        assert_eq!(heights, vec![3, 1]);
    }
}

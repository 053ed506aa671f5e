//! Single-use challenge tracking.
//!
//! Challenges are stateless, so a signed challenge could authorize several
//! claims inside its freshness window. The registry remembers consumed
//! challenges for exactly that window; anything older is rejected as expired
//! by the verifier anyway, so it is pruned.

use std::collections::HashMap;

use crate::challenge::Challenge;
use crate::error::{OwnershipError, Result};

/// Set of challenges that already authorized a claim.
#[derive(Debug, Default)]
pub struct ChallengeRegistry {
    /// Message -> issue time.
    used: HashMap<String, u64>,
    window_secs: u64,
}

impl ChallengeRegistry {
    pub fn new(window_secs: u64) -> Self {
        Self {
            used: HashMap::new(),
            window_secs,
        }
    }

    /// Record `challenge` as used, failing if it already was.
    pub fn consume(&mut self, challenge: &Challenge, now: u64) -> Result<()> {
        self.ensure_unused(challenge, now)?;
        self.record(challenge);
        Ok(())
    }

    /// Fail if `challenge` already authorized a claim. Records nothing.
    pub fn ensure_unused(&mut self, challenge: &Challenge, now: u64) -> Result<()> {
        self.prune(now);
        if self.is_used(challenge) {
            tracing::warn!(address = %challenge.address, "challenge replayed");
            return Err(OwnershipError::ChallengeReused);
        }
        Ok(())
    }

    /// Mark `challenge` as used.
    pub fn record(&mut self, challenge: &Challenge) {
        self.used.insert(challenge.to_string(), challenge.issued_at);
    }

    /// Drop entries whose freshness window has closed.
    pub fn prune(&mut self, now: u64) {
        let window = self.window_secs;
        self.used
            .retain(|_, issued_at| now.saturating_sub(*issued_at) < window);
    }

    pub fn is_used(&self, challenge: &Challenge) -> bool {
        self.used.contains_key(&challenge.to_string())
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

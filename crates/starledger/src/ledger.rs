//! The Ledger: the ordered block sequence and its public API.
//!
//! All mutations (`initialize`, `append`, `submit_star_claim`) run under the
//! write half of one lock, so every append observes a consistent last block.
//! Reads share the read half and never see an append mid-flight.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use starledger_auth::{
    AuthConfig, ChallengeRegistry, Ed25519Verifier, OwnershipVerifier, SignatureVerifier,
    DEFAULT_FRESHNESS_WINDOW_SECS, DEFAULT_PURPOSE_TAG,
};
use starledger_core::{
    validate_chain, Block, BlockHash, ChainHealth, Clock, Payload, Star, StarClaim, SystemClock,
};

use crate::error::{LedgerError, Result};

/// Configuration for the Ledger.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Challenges aged this many seconds or more are rejected.
    pub freshness_window_secs: u64,
    /// Trailing tag of issued challenges.
    pub purpose_tag: String,
    /// Whether to validate the full chain before serving star queries.
    pub validate_on_read: bool,
    /// Whether a signed challenge may authorize only one claim.
    pub single_use_challenges: bool,
    /// Whether the address embedded in a challenge must be the claimant's.
    pub require_address_match: bool,
    /// Whether a challenge must carry `purpose_tag`.
    pub require_purpose_tag: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            freshness_window_secs: DEFAULT_FRESHNESS_WINDOW_SECS,
            purpose_tag: DEFAULT_PURPOSE_TAG.to_string(),
            validate_on_read: true,
            single_use_challenges: false,
            require_address_match: false,
            require_purpose_tag: false,
        }
    }
}

impl LedgerConfig {
    /// The verifier settings derived from this config.
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            freshness_window_secs: self.freshness_window_secs,
            purpose_tag: self.purpose_tag.clone(),
            require_address_match: self.require_address_match,
            require_purpose_tag: self.require_purpose_tag,
        }
    }
}

/// Everything guarded by the ledger lock.
#[derive(Debug)]
pub(crate) struct LedgerState {
    pub(crate) chain: Vec<Block>,
    /// Redundant index of the last block. Kept separately from `chain` so
    /// the validator can detect the two drifting apart.
    pub(crate) height: Option<u64>,
    pub(crate) challenges: ChallengeRegistry,
}

/// The star ownership ledger.
///
/// Created once per process and shared with `Arc`. Construction synthesizes
/// the genesis block; [`Ledger::shutdown`] releases it.
pub struct Ledger {
    state: RwLock<LedgerState>,
    verifier: OwnershipVerifier,
    clock: Arc<dyn Clock>,
    config: LedgerConfig,
}

impl Ledger {
    /// Create a ledger and its genesis block.
    pub fn new(
        config: LedgerConfig,
        clock: Arc<dyn Clock>,
        signatures: Arc<dyn SignatureVerifier>,
    ) -> Result<Self> {
        let verifier = OwnershipVerifier::new(config.auth_config(), clock.clone(), signatures);
        let ledger = Self {
            state: RwLock::new(LedgerState {
                chain: Vec::new(),
                height: None,
                challenges: ChallengeRegistry::new(config.freshness_window_secs),
            }),
            verifier,
            clock,
            config,
        };
        ledger.initialize()?;
        Ok(ledger)
    }

    /// Create a ledger on the system clock with Ed25519 addresses.
    pub fn with_defaults(config: LedgerConfig) -> Result<Self> {
        Self::new(config, Arc::new(SystemClock), Arc::new(Ed25519Verifier))
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Append the genesis block if the chain is empty.
    ///
    /// Returns whether a genesis block was created.
    pub fn initialize(&self) -> Result<bool> {
        let mut state = self.write();
        if !state.chain.is_empty() {
            tracing::debug!("ledger already initialized");
            return Ok(false);
        }

        let genesis = self.append_locked(&mut state, &Payload::Genesis)?;
        tracing::info!(hash = %display_hash(genesis.hash.as_ref()), "genesis block created");
        Ok(true)
    }

    /// Tear the ledger down, returning its final block sequence.
    pub fn shutdown(self) -> Vec<Block> {
        let state = self
            .state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        tracing::info!(blocks = state.chain.len(), "ledger shut down");
        state.chain
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Append Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a block carrying `payload`.
    ///
    /// Claims from users go through [`Ledger::submit_star_claim`], which
    /// verifies ownership first.
    pub fn append(&self, payload: &Payload) -> Result<Block> {
        let mut state = self.write();
        self.append_locked(&mut state, payload)
    }

    /// Verify an ownership proof and append the claim.
    ///
    /// Verification and append happen under one write lock. A rejected
    /// proof leaves the ledger untouched.
    pub fn submit_star_claim(
        &self,
        address: &str,
        message: &str,
        signature: &str,
        star: Star,
    ) -> Result<Block> {
        let mut state = self.write();

        let challenge = match self.verifier.verify(address, message, signature) {
            Ok(challenge) => challenge,
            Err(e) => {
                tracing::warn!(address, error = %e, "star claim rejected");
                return Err(e.into());
            }
        };

        if self.config.single_use_challenges {
            state.challenges.ensure_unused(&challenge, self.clock.now())?;
        }

        let payload = Payload::from(StarClaim::new(address, star));
        let block = self.append_locked(&mut state, &payload)?;

        // Spent only once a block exists.
        if self.config.single_use_challenges {
            state.challenges.record(&challenge);
        }
        Ok(block)
    }

    /// Assign linkage, seal and push. Caller holds the write lock.
    fn append_locked(&self, state: &mut LedgerState, payload: &Payload) -> Result<Block> {
        let expected_counter = (state.chain.len() as u64).checked_sub(1);
        if state.height != expected_counter {
            return Err(self.append_failure(format!(
                "height counter {:?} out of sync with {} blocks",
                state.height,
                state.chain.len()
            )));
        }

        let (height, previous) = match state.chain.last() {
            None => (0, None),
            Some(last) => {
                let Some(last_hash) = last.hash else {
                    return Err(self.append_failure(format!(
                        "last block at height {} is not sealed",
                        last.height
                    )));
                };
                let Some(height) = last.height.checked_add(1) else {
                    return Err(self.append_failure("height overflow".to_string()));
                };
                (height, Some(last_hash))
            }
        };

        let block = Block::new(payload)?
            .with_linkage(height, self.clock.now(), previous)
            .sealed();

        state.chain.push(block.clone());
        state.height = Some(height);

        tracing::info!(height, hash = %display_hash(block.hash.as_ref()), "block appended");
        Ok(block)
    }

    fn append_failure(&self, reason: String) -> LedgerError {
        tracing::warn!(%reason, "append invariant broken");
        LedgerError::AppendFailure(reason)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// The height counter (index of the last block).
    pub fn height(&self) -> Option<u64> {
        self.read().height
    }

    pub fn len(&self) -> usize {
        self.read().chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().chain.is_empty()
    }

    pub fn latest_block(&self) -> Option<Block> {
        self.read().chain.last().cloned()
    }

    /// Snapshot of the whole sequence.
    pub fn blocks(&self) -> Vec<Block> {
        self.read().chain.clone()
    }

    /// Find a block by its stored hash.
    ///
    /// Scans the whole sequence and returns the first match.
    pub fn block_by_hash(&self, hash: &BlockHash) -> Option<Block> {
        tracing::debug!(%hash, "lookup by hash");
        self.read()
            .chain
            .iter()
            .find(|block| block.hash.as_ref() == Some(hash))
            .cloned()
    }

    /// Find a block by hex hash. Unparseable input finds nothing.
    pub fn block_by_hash_hex(&self, hash: &str) -> Option<Block> {
        let hash = BlockHash::from_hex(hash).ok()?;
        self.block_by_hash(&hash)
    }

    /// Find a block by its `height` field.
    ///
    /// Scans the whole sequence and returns the first match; the position in
    /// the sequence is not consulted.
    pub fn block_by_height(&self, height: u64) -> Option<Block> {
        tracing::debug!(height, "lookup by height");
        self.read()
            .chain
            .iter()
            .find(|block| block.height == height)
            .cloned()
    }

    /// All star claims owned by `address`, oldest first.
    ///
    /// Validates the full chain first (unless disabled in config) and fails
    /// with [`LedgerError::ChainInvalid`] rather than return possibly corrupt
    /// data.
    pub fn stars_by_owner(&self, address: &str) -> Result<Vec<StarClaim>> {
        let state = self.read();

        if self.config.validate_on_read {
            if let ChainHealth::Corrupted { diagnostics } =
                validate_chain(&state.chain, state.height)
            {
                tracing::warn!(
                    address,
                    problems = diagnostics.len(),
                    "refusing star query on invalid chain"
                );
                return Err(LedgerError::ChainInvalid(diagnostics));
            }
        }

        let mut claims = Vec::new();
        for block in state.chain.iter().skip(1) {
            if let Payload::StarClaim(claim) = block.payload()? {
                if claim.owner == address {
                    claims.push(claim);
                }
            }
        }
        Ok(claims)
    }

    /// Run the full-chain validator.
    pub fn validate_chain(&self) -> ChainHealth {
        let state = self.read();
        let health = validate_chain(&state.chain, state.height);
        if !health.is_healthy() {
            tracing::warn!(
                problems = health.diagnostics().len(),
                first_bad_height = ?health.first_bad_height(),
                "chain validation failed"
            );
        }
        health
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ownership Challenges
    // ─────────────────────────────────────────────────────────────────────────

    /// Issue the message `address` must sign before submitting a claim.
    pub fn request_ownership_challenge(&self, address: &str) -> String {
        self.verifier.issue_challenge(address)
    }

    pub fn verifier(&self) -> &OwnershipVerifier {
        &self.verifier
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Locking
    // ─────────────────────────────────────────────────────────────────────────

    // A panic never leaves the state half-written, so poisoned guards are
    // safe to reuse.
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read();
        f.debug_struct("Ledger")
            .field("blocks", &state.chain.len())
            .field("height", &state.height)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn display_hash(hash: Option<&BlockHash>) -> String {
    hash.map_or_else(|| "<none>".to_string(), BlockHash::to_hex)
}

//! The ownership verifier: issues challenges and checks signed ones.

use std::fmt;
use std::sync::Arc;

use starledger_core::Clock;

use crate::challenge::{AuthConfig, Challenge};
use crate::error::{OwnershipError, Result};
use crate::signature::SignatureVerifier;

/// Issues ownership challenges and verifies signed responses.
///
/// Stateless: freshness is judged from the timestamp embedded in the
/// challenge, so a challenge stays valid for every use inside its window.
/// See [`crate::ChallengeRegistry`] for single-use enforcement.
#[derive(Clone)]
pub struct OwnershipVerifier {
    config: AuthConfig,
    clock: Arc<dyn Clock>,
    signatures: Arc<dyn SignatureVerifier>,
}

impl OwnershipVerifier {
    pub fn new(
        config: AuthConfig,
        clock: Arc<dyn Clock>,
        signatures: Arc<dyn SignatureVerifier>,
    ) -> Self {
        Self {
            config,
            clock,
            signatures,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Issue the message `address` must sign: `address:now:purpose`.
    pub fn issue_challenge(&self, address: &str) -> String {
        Challenge::new(address, self.clock.now(), self.config.purpose_tag.as_str()).to_string()
    }

    /// Verify a signed challenge for `address`.
    ///
    /// Checks, in order: the message parses, it is younger than the
    /// freshness window, and the signature capability accepts it. The
    /// embedded address and purpose tag are only enforced when enabled in
    /// [`AuthConfig`], before the freshness check.
    pub fn verify(&self, address: &str, message: &str, signature: &str) -> Result<Challenge> {
        let challenge = Challenge::parse(message)?;

        if self.config.require_purpose_tag && challenge.purpose_tag != self.config.purpose_tag {
            return Err(OwnershipError::MalformedChallenge(format!(
                "unexpected purpose {:?}",
                challenge.purpose_tag
            )));
        }

        if self.config.require_address_match && challenge.address != address {
            return Err(OwnershipError::AddressMismatch {
                expected: address.to_string(),
                found: challenge.address,
            });
        }

        let now = self.clock.now();
        let window = self.config.freshness_window_secs;
        if !challenge.is_fresh(now, window) {
            return Err(OwnershipError::ExpiredChallenge {
                issued_at: challenge.issued_at,
                now,
                window,
            });
        }

        if !self.signatures.verify(message, address, signature) {
            return Err(OwnershipError::BadSignature);
        }

        tracing::debug!(address, issued_at = challenge.issued_at, "ownership proof accepted");
        Ok(challenge)
    }
}

impl fmt::Debug for OwnershipVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnershipVerifier")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

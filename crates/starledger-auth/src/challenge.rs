//! Ownership challenges.
//!
//! A challenge is the plain string `address:timestamp:purpose`. It carries
//! everything needed to judge its freshness, so nothing is stored when one
//! is issued.

use std::fmt;

use crate::error::{OwnershipError, Result};

/// Default age limit of a challenge, in seconds.
pub const DEFAULT_FRESHNESS_WINDOW_SECS: u64 = 300;

/// Default purpose tag closing every challenge.
pub const DEFAULT_PURPOSE_TAG: &str = "starRegistry";

/// Challenge issuing and acceptance settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Challenges aged this many seconds or more are rejected.
    pub freshness_window_secs: u64,
    /// Trailing tag identifying challenges issued for this ledger.
    pub purpose_tag: String,
    /// Reject challenges whose embedded address is not the claimant's.
    pub require_address_match: bool,
    /// Reject challenges carrying a purpose tag other than `purpose_tag`.
    pub require_purpose_tag: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            freshness_window_secs: DEFAULT_FRESHNESS_WINDOW_SECS,
            purpose_tag: DEFAULT_PURPOSE_TAG.to_string(),
            require_address_match: false,
            require_purpose_tag: false,
        }
    }
}

/// A parsed ownership challenge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Challenge {
    pub address: String,
    /// Issue time (Unix seconds).
    pub issued_at: u64,
    pub purpose_tag: String,
}

impl Challenge {
    pub fn new(address: impl Into<String>, issued_at: u64, purpose_tag: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            issued_at,
            purpose_tag: purpose_tag.into(),
        }
    }

    /// Parse a challenge message.
    ///
    /// Splits from the right so the timestamp and tag are always the last two
    /// fields.
    pub fn parse(message: &str) -> Result<Self> {
        let mut parts = message.rsplitn(3, ':');
        let (tag, timestamp, address) = match (parts.next(), parts.next(), parts.next()) {
            (Some(tag), Some(timestamp), Some(address)) => (tag, timestamp, address),
            _ => {
                return Err(OwnershipError::MalformedChallenge(
                    "expected address:timestamp:purpose".into(),
                ))
            }
        };

        if address.is_empty() {
            return Err(OwnershipError::MalformedChallenge("empty address".into()));
        }

        let issued_at = timestamp.parse::<u64>().map_err(|_| {
            OwnershipError::MalformedChallenge(format!("invalid timestamp {:?}", timestamp))
        })?;

        Ok(Self::new(address, issued_at, tag))
    }

    /// Seconds elapsed since issue. Future timestamps count as zero.
    pub fn age(&self, now: u64) -> u64 {
        now.saturating_sub(self.issued_at)
    }

    /// Whether the challenge is younger than `window` seconds at `now`.
    pub fn is_fresh(&self, now: u64, window: u64) -> bool {
        self.age(now) < window
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.address, self.issued_at, self.purpose_tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format() {
        let challenge = Challenge::new("A", 1_700_000_000, DEFAULT_PURPOSE_TAG);
        assert_eq!(challenge.to_string(), "A:1700000000:starRegistry");
    }

    #[test]
    fn test_parse() {
        let challenge = Challenge::parse("A:1700000000:starRegistry").unwrap();
        assert_eq!(challenge.address, "A");
        assert_eq!(challenge.issued_at, 1_700_000_000);
        assert_eq!(challenge.purpose_tag, "starRegistry");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for message in [
            "",
            "A:1700000000",
            ":1700000000:starRegistry",
            "A:soon:starRegistry",
            "A:-5:starRegistry",
        ] {
            assert!(
                matches!(Challenge::parse(message), Err(OwnershipError::MalformedChallenge(_))),
                "accepted {:?}",
                message
            );
        }
    }

    #[test]
    fn test_freshness_boundary() {
        let challenge = Challenge::new("A", 1_000, DEFAULT_PURPOSE_TAG);
        assert!(challenge.is_fresh(1_000, 300));
        assert!(challenge.is_fresh(1_299, 300));
        assert!(!challenge.is_fresh(1_300, 300));
        assert!(!challenge.is_fresh(5_000, 300));
    }

    #[test]
    fn test_future_challenge_has_zero_age() {
        let challenge = Challenge::new("A", 2_000, DEFAULT_PURPOSE_TAG);
        assert_eq!(challenge.age(1_000), 0);
        assert!(challenge.is_fresh(1_000, 300));
    }

    proptest! {
        #[test]
        fn prop_format_parse_roundtrip(
            address in "[a-zA-Z0-9]{1,64}",
            issued_at in any::<u64>(),
        ) {
            let challenge = Challenge::new(address, issued_at, DEFAULT_PURPOSE_TAG);
            let parsed = Challenge::parse(&challenge.to_string()).unwrap();
            prop_assert_eq!(parsed, challenge);
        }
    }
}

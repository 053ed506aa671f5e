//! Block payloads: the genesis sentinel and star-ownership claims.

use serde::{Deserialize, Serialize};

/// The literal carried by the genesis block in place of a claim.
pub const GENESIS_MARKER: &str = "Genesis Block";

/// Celestial coordinates and description of a registered star.
///
/// Only `dec` and `ra` are required. Absent optional fields are omitted from
/// the encoded form so a minimal star encodes to exactly `{"dec":..,"ra":..}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Star {
    /// Declination.
    pub dec: String,

    /// Right ascension.
    pub ra: String,

    /// Magnitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mag: Option<String>,

    /// Constellation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cen: Option<String>,

    /// Free-form story attached by the owner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,
}

impl Star {
    /// A star with only the required coordinates.
    pub fn new(dec: impl Into<String>, ra: impl Into<String>) -> Self {
        Self {
            dec: dec.into(),
            ra: ra.into(),
            mag: None,
            cen: None,
            story: None,
        }
    }

    /// Set the magnitude.
    pub fn with_mag(mut self, mag: impl Into<String>) -> Self {
        self.mag = Some(mag.into());
        self
    }

    /// Set the constellation.
    pub fn with_cen(mut self, cen: impl Into<String>) -> Self {
        self.cen = Some(cen.into());
        self
    }

    /// Set the story.
    pub fn with_story(mut self, story: impl Into<String>) -> Self {
        self.story = Some(story.into());
        self
    }
}

/// An ownership record: `owner` claims the star in `data`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StarClaim {
    /// Address of the claimant.
    pub owner: String,

    /// The claimed star.
    pub data: Star,
}

impl StarClaim {
    pub fn new(owner: impl Into<String>, data: Star) -> Self {
        Self {
            owner: owner.into(),
            data,
        }
    }
}

/// Decoded content of a block body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// The genesis sentinel.
    Genesis,
    /// A star-ownership claim.
    StarClaim(StarClaim),
}

impl Payload {
    pub fn is_genesis(&self) -> bool {
        matches!(self, Payload::Genesis)
    }

    /// The claim carried by this payload, if any.
    pub fn as_claim(&self) -> Option<&StarClaim> {
        match self {
            Payload::StarClaim(claim) => Some(claim),
            Payload::Genesis => None,
        }
    }
}

impl From<StarClaim> for Payload {
    fn from(claim: StarClaim) -> Self {
        Payload::StarClaim(claim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_star_json_shape() {
        let star = Star::new("1", "2");
        let json = serde_json::to_string(&star).unwrap();
        assert_eq!(json, r#"{"dec":"1","ra":"2"}"#);
    }

    #[test]
    fn test_full_star_keeps_field_order() {
        let star = Star::new("68° 52' 56.9", "16h 29m 1.0s")
            .with_mag("4.2")
            .with_cen("Ursa Minor")
            .with_story("Found star using https://www.google.com/sky/");
        let json = serde_json::to_string(&star).unwrap();
        assert!(json.starts_with(r#"{"dec":"#));
        assert!(json.find("\"mag\"").unwrap() < json.find("\"story\"").unwrap());

        let back: Star = serde_json::from_str(&json).unwrap();
        assert_eq!(back, star);
    }

    #[test]
    fn test_claim_json_shape() {
        let claim = StarClaim::new("A", Star::new("1", "2"));
        let json = serde_json::to_string(&claim).unwrap();
        assert_eq!(json, r#"{"owner":"A","data":{"dec":"1","ra":"2"}}"#);
    }

    #[test]
    fn test_payload_accessors() {
        let claim = StarClaim::new("A", Star::new("1", "2"));
        let payload = Payload::from(claim.clone());
        assert!(!payload.is_genesis());
        assert_eq!(payload.as_claim(), Some(&claim));
        assert!(Payload::Genesis.as_claim().is_none());
    }
}

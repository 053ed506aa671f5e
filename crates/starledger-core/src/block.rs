//! Block: one hash-linked ledger entry.
//!
//! A block starts out pending: its body is set but its linkage fields are
//! not. The ledger assigns height, time and the previous hash, then seals the
//! block by computing its content hash. Once appended it is never edited.

use serde::{Deserialize, Serialize};

use crate::canonical::{compute_hash, decode_body, encode_body};
use crate::error::CoreError;
use crate::payload::{Payload, StarClaim};
use crate::types::BlockHash;

/// A ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Position in the chain (0 for genesis).
    pub height: u64,

    /// Creation time (Unix seconds).
    pub time: u64,

    /// Hash of the preceding block (None for genesis).
    pub previous_block_hash: Option<BlockHash>,

    /// Content hash over every other field (None while pending).
    pub hash: Option<BlockHash>,

    /// Encoded payload, see [`crate::canonical::encode_body`].
    pub body: String,
}

impl Block {
    /// Create a pending block carrying `payload`.
    pub fn new(payload: &Payload) -> Result<Self, CoreError> {
        Ok(Self {
            height: 0,
            time: 0,
            previous_block_hash: None,
            hash: None,
            body: encode_body(payload)?,
        })
    }

    /// The sealed genesis block created at `time`.
    pub fn genesis(time: u64) -> Result<Self, CoreError> {
        Ok(Self::new(&Payload::Genesis)?
            .with_linkage(0, time, None)
            .sealed())
    }

    /// Assign the linkage fields.
    pub fn with_linkage(mut self, height: u64, time: u64, previous: Option<BlockHash>) -> Self {
        self.height = height;
        self.time = time;
        self.previous_block_hash = previous;
        self
    }

    /// Compute and store the content hash.
    pub fn sealed(mut self) -> Self {
        self.seal();
        self
    }

    /// Compute and store the content hash in place.
    pub fn seal(&mut self) {
        self.hash = Some(compute_hash(self));
    }

    /// Check the stored hash against the block's current contents.
    ///
    /// A pending block (no stored hash) never validates.
    pub fn validate(&self) -> bool {
        match self.hash {
            Some(stored) => stored == compute_hash(self),
            None => false,
        }
    }

    /// Whether this block sits in the genesis position.
    pub fn is_genesis(&self) -> bool {
        self.height == 0 && self.previous_block_hash.is_none()
    }

    pub fn is_sealed(&self) -> bool {
        self.hash.is_some()
    }

    /// Decode the body, including the genesis sentinel.
    pub fn payload(&self) -> Result<Payload, CoreError> {
        decode_body(&self.body)
    }

    /// Decode the star claim carried by this block.
    ///
    /// The genesis block never exposes its sentinel as ownership data.
    pub fn get_data(&self) -> Result<StarClaim, CoreError> {
        if self.is_genesis() {
            return Err(CoreError::TamperedGenesisAccess);
        }
        match self.payload()? {
            Payload::StarClaim(claim) => Ok(claim),
            Payload::Genesis => Err(CoreError::TamperedGenesisAccess),
        }
    }
}

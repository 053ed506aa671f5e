//! Block codec: deterministic block bytes, content hashing, and body encoding.
//!
//! Block bytes use RFC 8949 Core Deterministic Encoding:
//! - Map keys sorted by encoded byte comparison
//! - Integers use smallest valid encoding
//! - Definite lengths only
//!
//! The `hash` field is never part of the encoding, so a block's hash can be
//! recomputed from the block itself. Bodies are the lowercase hex of the
//! payload's JSON form; serde_json emits struct fields in declaration order,
//! which keeps decode→encode round trips byte-stable.

use ciborium::value::Value;

use crate::block::Block;
use crate::error::CoreError;
use crate::payload::{Payload, StarClaim, GENESIS_MARKER};
use crate::types::BlockHash;

/// Domain tag prepended to block bytes before hashing.
pub const HASH_DOMAIN: &[u8] = b"starledger-block-v0:";

/// Block field keys (integer keys for compact encoding).
mod keys {
    pub const HEIGHT: u64 = 0;
    pub const TIME: u64 = 1;
    pub const PREVIOUS_BLOCK_HASH: u64 = 2;
    pub const BODY: u64 = 3;
}

/// Encode every hashed field of a block to canonical CBOR bytes.
pub fn canonical_block_bytes(block: &Block) -> Vec<u8> {
    let value = block_to_cbor_value(block);
    let mut buf = Vec::new();
    encode_value_to(&mut buf, &value);
    buf
}

/// Compute the content hash of a block, ignoring its stored `hash`.
pub fn compute_hash(block: &Block) -> BlockHash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(HASH_DOMAIN);
    hasher.update(&canonical_block_bytes(block));
    BlockHash(*hasher.finalize().as_bytes())
}

/// Encode a payload into an opaque block body.
pub fn encode_body(payload: &Payload) -> Result<String, CoreError> {
    let json = match payload {
        Payload::Genesis => serde_json::to_vec(GENESIS_MARKER),
        Payload::StarClaim(claim) => serde_json::to_vec(claim),
    }
    .map_err(|e| CoreError::EncodingError(e.to_string()))?;

    Ok(hex::encode(json))
}

/// Decode an opaque block body back into its payload.
pub fn decode_body(body: &str) -> Result<Payload, CoreError> {
    let json = hex::decode(body).map_err(|e| CoreError::DecodingError(e.to_string()))?;
    let value: serde_json::Value =
        serde_json::from_slice(&json).map_err(|e| CoreError::DecodingError(e.to_string()))?;

    match value {
        serde_json::Value::String(ref s) if s == GENESIS_MARKER => Ok(Payload::Genesis),
        other => serde_json::from_value::<StarClaim>(other)
            .map(Payload::StarClaim)
            .map_err(|e| CoreError::DecodingError(e.to_string())),
    }
}

/// Convert a block to a CBOR Value (map with integer keys).
fn block_to_cbor_value(block: &Block) -> Value {
    let previous = match &block.previous_block_hash {
        Some(hash) => Value::Bytes(hash.0.to_vec()),
        None => Value::Null,
    };

    Value::Map(vec![
        (Value::Integer(keys::HEIGHT.into()), Value::Integer(block.height.into())),
        (Value::Integer(keys::TIME.into()), Value::Integer(block.time.into())),
        (Value::Integer(keys::PREVIOUS_BLOCK_HASH.into()), previous),
        (Value::Integer(keys::BODY.into()), Value::Text(block.body.clone())),
    ])
}

/// Recursively encode a CBOR value.
///
/// Only the value shapes produced by [`block_to_cbor_value`] are reachable.
fn encode_value_to(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Integer(i) => {
            let n: i128 = (*i).into();
            // Block fields are unsigned; negative integers never occur.
            encode_uint(buf, 0, n as u64);
        }
        Value::Bytes(b) => {
            encode_uint(buf, 2, b.len() as u64);
            buf.extend_from_slice(b);
        }
        Value::Text(s) => {
            encode_uint(buf, 3, s.len() as u64);
            buf.extend_from_slice(s.as_bytes());
        }
        Value::Map(entries) => {
            encode_map_canonical(buf, entries);
        }
        Value::Null => {
            buf.push(0xf6);
        }
        _ => {
            panic!("unsupported CBOR value type in block encoding");
        }
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffffffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a map canonically (major type 5).
///
/// Keys are sorted by their encoded byte comparison.
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &[(Value, Value)]) {
    let mut key_value_pairs: Vec<(Vec<u8>, &Value)> = entries
        .iter()
        .map(|(k, v)| {
            let mut key_buf = Vec::new();
            encode_value_to(&mut key_buf, k);
            (key_buf, v)
        })
        .collect();

    key_value_pairs.sort_by(|a, b| a.0.cmp(&b.0));

    encode_uint(buf, 5, key_value_pairs.len() as u64);

    for (key_bytes, value) in key_value_pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value);
    }
}

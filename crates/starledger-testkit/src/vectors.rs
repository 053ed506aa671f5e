//! Golden test vectors for deterministic verification.
//!
//! Each vector pins the exact body encoding and canonical block bytes of one
//! block. Any change to the codec that alters stored hashes breaks these.

use serde::Serialize;

use starledger_core::{canonical_block_bytes, Block, BlockHash, Payload, Star, StarClaim};

/// The payload of a golden vector.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VectorPayload {
    Genesis,
    Claim {
        owner: &'static str,
        dec: &'static str,
        ra: &'static str,
        mag: Option<&'static str>,
        cen: Option<&'static str>,
        story: Option<&'static str>,
    },
}

impl VectorPayload {
    pub fn to_payload(&self) -> Payload {
        match self {
            VectorPayload::Genesis => Payload::Genesis,
            VectorPayload::Claim {
                owner,
                dec,
                ra,
                mag,
                cen,
                story,
            } => Payload::from(StarClaim::new(
                *owner,
                Star {
                    dec: dec.to_string(),
                    ra: ra.to_string(),
                    mag: mag.map(String::from),
                    cen: cen.map(String::from),
                    story: story.map(String::from),
                },
            )),
        }
    }
}

/// A golden test vector.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub height: u64,
    pub time: u64,
    pub previous_block_hash: Option<[u8; 32]>,
    pub payload: VectorPayload,
    /// Expected block body (hex).
    pub expected_body: &'static str,
    /// Expected canonical block bytes (hex).
    pub expected_block_bytes: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "genesis",
            height: 0,
            time: 1_700_000_000,
            previous_block_hash: None,
            payload: VectorPayload::Genesis,
            expected_body: "2247656e6573697320426c6f636b22",
            expected_block_bytes: concat!(
                "a40000011a6553f10002f603781e",
                "323234373635366536353733363937333230343236633666363336623232",
            ),
        },
        GoldenVector {
            name: "minimal claim",
            height: 1,
            time: 1_700_000_010,
            previous_block_hash: Some([0x11; 32]),
            payload: VectorPayload::Claim {
                owner: "A",
                dec: "1",
                ra: "2",
                mag: None,
                cen: None,
                story: None,
            },
            expected_body: concat!(
                "7b226f776e6572223a2241222c2264617461223a7b22646563223a2231222c",
                "227261223a2232227d7d",
            ),
            expected_block_bytes: concat!(
                "a40001011a6553f10a025820",
                "1111111111111111111111111111111111111111111111111111111111111111",
                "037852",
                "37623232366637373665363537323232336132323431323232633232363436313734",
                "363132323361376232323634363536333232336132323331323232633232373236",
                "313232336132323332323237643764",
            ),
        },
        GoldenVector {
            name: "full claim, two-byte height",
            height: 300,
            time: 1_700_000_600,
            previous_block_hash: Some([0xab; 32]),
            payload: VectorPayload::Claim {
                owner: "A",
                dec: "68° 52' 56.9",
                ra: "16h 29m 1.0s",
                mag: Some("4.2"),
                cen: Some("Ursa Minor"),
                story: Some("Polaris"),
            },
            expected_body: concat!(
                "7b226f776e6572223a2241222c2264617461223a7b22646563223a223638c2b0",
                "203532272035362e39222c227261223a223136682032396d20312e3073222c22",
                "6d6167223a22342e32222c2263656e223a2255727361204d696e6f72222c2273",
                "746f7279223a22506f6c61726973227d7d",
            ),
            expected_block_bytes: concat!(
                "a40019012c011a6553f358025820",
                "abababababababababababababababababababababababababababababababab",
                "0378e2",
                "37623232366637373665363537323232336132323431323232633232363436313734",
                "363132323361376232323634363536333232336132323336333863326230323033",
                "353332323732303335333632653339323232633232373236313232336132323331",
                "333636383230333233393664323033313265333037333232326332323664363136",
                "373232336132323334326533323232326332323633363536653232336132323535",
                "373237333631323034643639366536663732323232633232373337343666373237",
                "393232336132323530366636633631373236393733323237643764",
            ),
        },
    ]
}

/// Build the sealed block described by a vector.
pub fn block_from_vector(vector: &GoldenVector) -> Block {
    match Block::new(&vector.payload.to_payload()) {
        Ok(block) => block
            .with_linkage(
                vector.height,
                vector.time,
                vector.previous_block_hash.map(BlockHash::from_bytes),
            )
            .sealed(),
        Err(e) => panic!("vector {:?} failed to encode: {}", vector.name, e),
    }
}

/// Check every vector against this implementation.
///
/// Returns `(name, matches, block hash hex)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let block = block_from_vector(v);
            let bytes = hex::encode(canonical_block_bytes(&block));
            let matches = block.body == v.expected_body && bytes == v.expected_block_bytes;
            let hash = block.hash.map(|h| h.to_hex()).unwrap_or_default();
            (v.name.to_string(), matches, hash)
        })
        .collect()
}

/// Export the vectors with their computed hashes as JSON, for other
/// implementations to check against.
pub fn export_json() -> serde_json::Value {
    let entries = all_vectors()
        .into_iter()
        .map(|v| {
            let hash = block_from_vector(&v).hash.map(|h| h.to_hex());
            serde_json::json!({ "vector": v, "hash": hash })
        })
        .collect::<Vec<_>>();
    serde_json::Value::Array(entries)
}

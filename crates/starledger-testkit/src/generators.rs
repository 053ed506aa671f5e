//! Proptest generators for property-based testing.

use proptest::prelude::*;

use starledger_core::{Block, BlockHash, Keypair, Payload, Star, StarClaim};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random BlockHash.
pub fn block_hash() -> impl Strategy<Value = BlockHash> {
    any::<[u8; 32]>().prop_map(BlockHash::from_bytes)
}

/// Generate an address: hex of an Ed25519 public key.
pub fn address() -> impl Strategy<Value = String> {
    keypair().prop_map(|kp| kp.address())
}

/// Generate a reasonable timestamp (Unix seconds).
pub fn timestamp() -> impl Strategy<Value = u64> {
    0u64..=4_102_444_800
}

/// Generate a star, optional fields included at random.
pub fn star() -> impl Strategy<Value = Star> {
    (
        "[-+]?[0-9]{1,2}° [0-9]{1,2}' [0-9.]{1,4}",
        "[0-9]{1,2}h [0-9]{1,2}m [0-9.]{1,4}s",
        proptest::option::of("[0-9.]{1,4}"),
        proptest::option::of("[A-Za-z ]{1,16}"),
        proptest::option::of("\\PC{0,64}"),
    )
        .prop_map(|(dec, ra, mag, cen, story)| Star {
            dec,
            ra,
            mag,
            cen,
            story,
        })
}

/// Generate a star claim.
pub fn star_claim() -> impl Strategy<Value = StarClaim> {
    (address(), star()).prop_map(|(owner, data)| StarClaim::new(owner, data))
}

/// Generate a payload: mostly claims, occasionally the genesis sentinel.
pub fn payload() -> impl Strategy<Value = Payload> {
    prop_oneof![
        1 => Just(Payload::Genesis),
        9 => star_claim().prop_map(Payload::from),
    ]
}

/// Parameters for generating a sealed block.
#[derive(Debug, Clone)]
pub struct BlockParams {
    pub height: u64,
    pub time: u64,
    pub previous_block_hash: Option<BlockHash>,
    pub payload: Payload,
}

impl Arbitrary for BlockParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<u64>(), timestamp(), proptest::option::of(block_hash()), payload())
            .prop_map(|(height, time, previous_block_hash, payload)| BlockParams {
                height,
                time,
                previous_block_hash,
                payload,
            })
            .boxed()
    }
}

/// Build a sealed block from params.
pub fn block_from_params(params: &BlockParams) -> Block {
    match Block::new(&params.payload) {
        Ok(block) => block
            .with_linkage(params.height, params.time, params.previous_block_hash)
            .sealed(),
        Err(e) => panic!("generated payload failed to encode: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starledger_core::{compute_hash, decode_body};

    proptest! {
        #[test]
        fn prop_generated_blocks_validate(params: BlockParams) {
            let block = block_from_params(&params);
            prop_assert!(block.validate());
            prop_assert_eq!(decode_body(&block.body).unwrap(), params.payload);
        }

        #[test]
        fn prop_hash_is_deterministic(params: BlockParams) {
            let first = block_from_params(&params);
            let second = block_from_params(&params);
            prop_assert_eq!(first.hash, second.hash);
            prop_assert_eq!(Some(compute_hash(&first)), first.hash);
        }

        #[test]
        fn prop_any_time_change_breaks_hash(params: BlockParams, delta in 1u64..1_000) {
            let mut block = block_from_params(&params);
            block.time = block.time.wrapping_add(delta);
            prop_assert!(!block.validate());
        }
    }
}

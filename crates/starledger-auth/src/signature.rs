//! The signature-check capability.
//!
//! The ledger does not care which signature scheme proves control of an
//! address. It only asks a [`SignatureVerifier`] whether a signature over a
//! message is valid for an address.

use starledger_core::{Ed25519PublicKey, Ed25519Signature};

/// Checks that `signature` over `message` was produced by `address`.
pub trait SignatureVerifier: Send + Sync {
    fn verify(&self, message: &str, address: &str, signature: &str) -> bool;
}

impl<F> SignatureVerifier for F
where
    F: Fn(&str, &str, &str) -> bool + Send + Sync,
{
    fn verify(&self, message: &str, address: &str, signature: &str) -> bool {
        self(message, address, signature)
    }
}

/// Ed25519 addresses: the address is a hex public key and the signature a
/// hex 64-byte signature over the message bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, message: &str, address: &str, signature: &str) -> bool {
        let Ok(public_key) = Ed25519PublicKey::from_hex(address) else {
            return false;
        };
        let Ok(signature) = Ed25519Signature::from_hex(signature) else {
            return false;
        };
        public_key.verify(message.as_bytes(), &signature).is_ok()
    }
}

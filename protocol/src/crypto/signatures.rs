//! # Digital Signatures
//!
//! Every key in the client is an Ed25519 key, but nothing above this module
//! talks to `ed25519-dalek` directly. Key expansion, signing and
//! verification go through the [`SignatureScheme`] trait so that the
//! address and transaction code depends on a seam rather than on a curve
//! library.
//!
//! ## Key layout
//!
//! A secret key is held in *expanded* form: 64 bytes laid out as
//! `seed (32) || public key (32)`. Only the seed half is secret material;
//! the public half is carried along so a key pair can be rebuilt from the
//! secret alone.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};

/// Length of a public key in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length of an expanded secret key (`seed || public`).
pub const SECRET_KEY_LENGTH: usize = 64;

/// Length of a signature in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// A signature algorithm usable for addresses and transaction inputs.
pub trait SignatureScheme {
    /// Expand a 32-byte seed into `seed || public`.
    fn expand(seed: &[u8; 32]) -> [u8; SECRET_KEY_LENGTH];

    /// Sign `message` with an expanded secret key.
    fn sign(secret: &[u8; SECRET_KEY_LENGTH], message: &[u8]) -> [u8; SIGNATURE_LENGTH];

    /// Verify `signature` over `message` against `public`.
    ///
    /// Returns `false` for malformed keys as well as for bad signatures.
    fn verify(
        public: &[u8; PUBLIC_KEY_LENGTH],
        message: &[u8],
        signature: &[u8; SIGNATURE_LENGTH],
    ) -> bool;
}

/// Ed25519 over `ed25519-dalek` (RFC 8032).
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519;

impl SignatureScheme for Ed25519 {
    fn expand(seed: &[u8; 32]) -> [u8; SECRET_KEY_LENGTH] {
        SigningKey::from_bytes(seed).to_keypair_bytes()
    }

    fn sign(secret: &[u8; SECRET_KEY_LENGTH], message: &[u8]) -> [u8; SIGNATURE_LENGTH] {
        // Only the seed half is used; the trailing public key may be a
        // placeholder (see `KeyPair::empty`).
        let mut seed = [0u8; 32];
        seed.copy_from_slice(&secret[..32]);
        let signing_key = SigningKey::from_bytes(&seed);
        signing_key.sign(message).to_bytes()
    }

    fn verify(
        public: &[u8; PUBLIC_KEY_LENGTH],
        message: &[u8],
        signature: &[u8; SIGNATURE_LENGTH],
    ) -> bool {
        let Ok(key) = VerifyingKey::from_bytes(public) else {
            return false;
        };
        let sig = Signature::from_bytes(signature);
        key.verify(message, &sig).is_ok()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_keeps_seed_and_appends_public() {
        let seed = [7u8; 32];
        let expanded = Ed25519::expand(&seed);
        assert_eq!(&expanded[..32], &seed);
        let public = SigningKey::from_bytes(&seed).verifying_key().to_bytes();
        assert_eq!(&expanded[32..], &public);
    }

    #[test]
    fn sign_then_verify() {
        let secret = Ed25519::expand(&[1u8; 32]);
        let mut public = [0u8; 32];
        public.copy_from_slice(&secret[32..]);

        let sig = Ed25519::sign(&secret, b"pay 5 FCT");
        assert!(Ed25519::verify(&public, b"pay 5 FCT", &sig));
        assert!(!Ed25519::verify(&public, b"pay 6 FCT", &sig));
    }

    #[test]
    fn signing_ignores_public_half() {
        let seed = [3u8; 32];
        let full = Ed25519::expand(&seed);
        let mut truncated = [0u8; 64];
        truncated[..32].copy_from_slice(&seed);

        assert_eq!(Ed25519::sign(&full, b"m"), Ed25519::sign(&truncated, b"m"));
    }

    #[test]
    fn tampered_signature_fails() {
        let secret = Ed25519::expand(&[9u8; 32]);
        let mut public = [0u8; 32];
        public.copy_from_slice(&secret[32..]);

        let mut sig = Ed25519::sign(&secret, b"data");
        sig[0] ^= 0x01;
        assert!(!Ed25519::verify(&public, b"data", &sig));
    }
}

//! # Key Management
//!
//! The [`KeyPair`] behind every address: a 32-byte public key plus an
//! optional 64-byte expanded secret (`seed || public`).
//!
//! A key pair built from a secret can always re-derive its public key. A
//! watch-only key pair (public key only) cannot sign. The one deliberate
//! exception to "public matches secret" is [`KeyPair::empty`], the zero
//! sentinel used when an address has not been populated yet.
//!
//! ## Security considerations
//!
//! - Secret bytes live in a [`Zeroizing`] buffer and are wiped on drop.
//! - Seeds come from `OsRng`.
//! - `Debug` never prints secret material. Key bytes are never logged.

use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use thiserror::Error;
use zeroize::Zeroizing;

use super::signatures::{
    Ed25519, SignatureScheme, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SIGNATURE_LENGTH,
};

/// Errors that can occur during key operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("key pair has no secret key")]
    MissingSecret,
}

/// Ed25519 key material for one address.
#[derive(Clone)]
pub struct KeyPair {
    public: [u8; PUBLIC_KEY_LENGTH],
    secret: Option<Zeroizing<[u8; SECRET_KEY_LENGTH]>>,
}

impl KeyPair {
    /// Generate a fresh key pair from 32 bytes of OS randomness.
    pub fn generate() -> Self {
        let mut seed = Zeroizing::new([0u8; 32]);
        OsRng.fill_bytes(&mut seed[..]);
        Self::from_seed(&seed)
    }

    /// Build a key pair deterministically from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let expanded = Zeroizing::new(Ed25519::expand(seed));
        let mut public = [0u8; PUBLIC_KEY_LENGTH];
        public.copy_from_slice(&expanded[32..]);
        Self {
            public,
            secret: Some(expanded),
        }
    }

    /// A watch-only key pair. It can verify but never sign.
    pub fn from_public_key(public: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self {
            public,
            secret: None,
        }
    }

    /// The zero sentinel: all-zero public key and all-zero secret.
    ///
    /// The two halves do not correspond to each other. Encoding this pair
    /// yields the well-known zero addresses used in test vectors.
    pub fn empty() -> Self {
        Self {
            public: [0u8; PUBLIC_KEY_LENGTH],
            secret: Some(Zeroizing::new([0u8; SECRET_KEY_LENGTH])),
        }
    }

    /// The 32-byte public key.
    pub fn public_key(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.public
    }

    /// The 32-byte seed, if a secret is present.
    pub fn seed(&self) -> Option<Zeroizing<[u8; 32]>> {
        self.secret.as_ref().map(|secret| {
            let mut seed = Zeroizing::new([0u8; 32]);
            seed.copy_from_slice(&secret[..32]);
            seed
        })
    }

    /// The expanded secret key, if present.
    pub fn secret_key(&self) -> Option<&[u8; SECRET_KEY_LENGTH]> {
        self.secret.as_deref()
    }

    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    /// Replace the public key. The secret, if any, is left untouched.
    pub fn set_public_key(&mut self, public: [u8; PUBLIC_KEY_LENGTH]) {
        self.public = public;
    }

    /// Replace the secret with the expansion of `seed` and re-derive the
    /// public key from it.
    pub fn set_seed(&mut self, seed: &[u8; 32]) {
        *self = Self::from_seed(seed);
    }

    /// Sign `message` with the secret key.
    pub fn sign(&self, message: &[u8]) -> Result<[u8; SIGNATURE_LENGTH], KeyError> {
        let secret = self.secret.as_ref().ok_or(KeyError::MissingSecret)?;
        Ok(Ed25519::sign(secret, message))
    }

    /// Verify a signature against this key pair's public key.
    pub fn verify(&self, message: &[u8], signature: &[u8; SIGNATURE_LENGTH]) -> bool {
        Ed25519::verify(&self.public, message, signature)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &hex::encode(self.public))
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl PartialEq for KeyPair {
    fn eq(&self, other: &Self) -> bool {
        self.public == other.public && self.secret.as_deref() == other.secret.as_deref()
    }
}

impl Eq for KeyPair {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

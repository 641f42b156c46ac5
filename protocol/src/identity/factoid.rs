//! # Factoid Addresses
//!
//! A Factoid address owns coins. Its public form (`FA...`) does not carry
//! the public key itself but the hash of the redeem condition (RCD) that
//! unlocks it:
//!
//! ```text
//! RCD-1   = 0x01 || ed25519 public key
//! payload = shad(RCD-1)
//! ```
//!
//! The secret form (`Fs...`) carries the 32-byte seed, from which both the
//! public key and the RCD hash are re-derived.

use std::fmt;
use zeroize::Zeroizing;

use super::address::{Address, AddressError, AddressKind};
use super::mnemonic::factoid_seed_from_mnemonic;
use crate::config::RCD_TYPE_1;
use crate::crypto::hash::shad;
use crate::crypto::keys::{KeyError, KeyPair};

/// Serialize an RCD-1 for `public_key`.
pub fn rcd1_bytes(public_key: &[u8; 32]) -> [u8; 33] {
    let mut rcd = [0u8; 33];
    rcd[0] = RCD_TYPE_1;
    rcd[1..].copy_from_slice(public_key);
    rcd
}

/// The RCD hash that forms a Factoid public address payload.
pub fn rcd_hash(public_key: &[u8; 32]) -> [u8; 32] {
    shad(&rcd1_bytes(public_key))
}

/// A Factoid key pair and its two address strings.
///
/// # Examples
///
/// ```
/// use factom_protocol::identity::FactoidAddress;
///
/// let fa = FactoidAddress::generate();
/// assert!(fa.public_string().starts_with("FA"));
/// let again = FactoidAddress::from_secret_string(&fa.secret_string().unwrap()).unwrap();
/// assert_eq!(fa, again);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct FactoidAddress {
    keys: KeyPair,
}

impl FactoidAddress {
    pub fn generate() -> Self {
        Self {
            keys: KeyPair::generate(),
        }
    }

    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            keys: KeyPair::from_seed(seed),
        }
    }

    pub fn from_key_pair(keys: KeyPair) -> Self {
        Self { keys }
    }

    /// The zero-sentinel address.
    pub fn empty() -> Self {
        Self {
            keys: KeyPair::empty(),
        }
    }

    /// Parse an `Fs...` string and expand its seed.
    pub fn from_secret_string(s: &str) -> Result<Self, AddressError> {
        let address = Address::decode_kind(s, AddressKind::FactoidSecret)?;
        Ok(Self::from_seed(address.payload()))
    }

    /// Derive the address for a 12-word mnemonic.
    pub fn from_mnemonic(words: &str) -> Result<Self, AddressError> {
        let seed = factoid_seed_from_mnemonic(words)?;
        Ok(Self::from_seed(&seed))
    }

    pub fn key_pair(&self) -> &KeyPair {
        &self.keys
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.keys.public_key()
    }

    /// The RCD-1 redeem condition for this key.
    pub fn rcd(&self) -> [u8; 33] {
        rcd1_bytes(&self.keys.public_key())
    }

    /// The 32-byte RCD hash: the payload of the public address.
    pub fn rcd_hash(&self) -> [u8; 32] {
        rcd_hash(&self.keys.public_key())
    }

    pub fn public_address(&self) -> Address {
        Address::FactoidPublic(self.rcd_hash())
    }

    pub fn public_string(&self) -> String {
        self.public_address().encode()
    }

    /// The `Fs...` string. `None` for a watch-only key pair.
    pub fn secret_string(&self) -> Option<String> {
        self.seed().map(|seed| Address::FactoidSecret(*seed).encode())
    }

    pub fn seed(&self) -> Option<Zeroizing<[u8; 32]>> {
        self.keys.seed()
    }

    pub fn sign(&self, message: &[u8]) -> Result<[u8; 64], KeyError> {
        self.keys.sign(message)
    }
}

impl fmt::Debug for FactoidAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FactoidAddress")
            .field(&self.public_string())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

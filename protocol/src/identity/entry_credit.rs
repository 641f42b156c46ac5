//! Entry Credit addresses.
//!
//! Unlike Factoid addresses, the public form (`EC...`) carries the raw
//! Ed25519 public key. The secret form (`Es...`) carries the seed.

use std::fmt;
use zeroize::Zeroizing;

use super::address::{Address, AddressError, AddressKind};
use crate::crypto::keys::{KeyError, KeyPair};

/// An Entry Credit key pair and its two address strings.
#[derive(Clone, PartialEq, Eq)]
pub struct EcAddress {
    keys: KeyPair,
}

impl EcAddress {
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

    /// Zero public key with the zero secret sentinel.
    pub fn empty() -> Self {
        Self {
            keys: KeyPair::empty(),
        }
    }

    /// Parse an `Es...` string and expand its seed.
    pub fn from_secret_string(s: &str) -> Result<Self, AddressError> {
        let address = Address::decode_kind(s, AddressKind::EcSecret)?;
        Ok(Self::from_seed(address.payload()))
    }

    /// Parse an `EC...` string into a watch-only address.
    pub fn from_public_string(s: &str) -> Result<Self, AddressError> {
        let address = Address::decode_kind(s, AddressKind::EcPublic)?;
        Ok(Self {
            keys: KeyPair::from_public_key(*address.payload()),
        })
    }

    pub fn key_pair(&self) -> &KeyPair {
        &self.keys
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.keys.public_key()
    }

    pub fn public_address(&self) -> Address {
        Address::EcPublic(self.keys.public_key())
    }

    pub fn public_string(&self) -> String {
        self.public_address().encode()
    }

    pub fn secret_string(&self) -> Option<String> {
        self.seed().map(|seed| Address::EcSecret(*seed).encode())
    }

    pub fn seed(&self) -> Option<Zeroizing<[u8; 32]>> {
        self.keys.seed()
    }

    pub fn sign(&self, message: &[u8]) -> Result<[u8; 64], KeyError> {
        self.keys.sign(message)
    }
}

impl fmt::Debug for EcAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EcAddress")
            .field(&self.public_string())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::signatures::{Ed25519, SignatureScheme};

    const ZERO_PUBLIC: &str = "EC1m9mouvUQeEidmqpUYpYtXg8fvTYi6GNHaKg8KMLbdMBrFfmUa";
    const ZERO_SECRET: &str = "Es2Rf7iM6PdsqfYCo3D1tnAR65SkLENyWJG1deUzpRMQmbh9F3eG";

    #[test]
    fn empty_address_vectors() {
        let ec = EcAddress::empty();
        assert_eq!(ec.public_string(), ZERO_PUBLIC);
        assert_eq!(ec.secret_string().unwrap(), ZERO_SECRET);
    }

    #[test]
    fn zero_secret_signs_for_its_derived_key() {
        let ec = EcAddress::from_secret_string(ZERO_SECRET).unwrap();
        assert_eq!(*ec.seed().unwrap(), [0u8; 32]);

        let msg = b"commit entry";
        let sig = ec.sign(msg).unwrap();
        assert!(Ed25519::verify(&ec.public_key(), msg, &sig));
        // The derived key is not the zero key of the sentinel.
        assert_ne!(ec.public_string(), ZERO_PUBLIC);
    }

    #[test]
    fn public_payload_is_raw_key() {
        let ec = EcAddress::generate();
        let decoded = Address::decode(&ec.public_string()).unwrap();
        assert_eq!(decoded.payload(), &ec.public_key());
    }

    #[test]
    fn watch_only_from_public_string() {
        let ec = EcAddress::generate();
        let watch = EcAddress::from_public_string(&ec.public_string()).unwrap();
        assert_eq!(watch.public_key(), ec.public_key());
        assert!(watch.secret_string().is_none());
        assert!(watch.sign(b"x").is_err());
    }

    #[test]
    fn rejects_factoid_strings() {
        assert!(EcAddress::from_secret_string(
            "Fs1KWJrpLdfucvmYwN2nWrwepLn8ercpMbzXshd1g8zyhKXLVLWj"
        )
        .is_err());
        assert!(EcAddress::from_public_string(ZERO_SECRET).is_err());
    }
}

//! The secret-key-store collaborator.
//!
//! The transaction builder never holds keys. It asks a [`KeyStore`] for the
//! key behind a public address string when an input is added and again
//! when the transaction is signed. Two implementations ship with the
//! crate: [`MemoryKeyStore`] here and the sled-backed
//! [`super::db::WalletDb`].

use parking_lot::RwLock;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::identity::{EcAddress, FactoidAddress};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyStoreError {
    #[error("no key for address {address}")]
    NotFound { address: String },

    #[error("address {address} has no secret key to store")]
    MissingSecret { address: String },

    #[error("stored key for {address} is corrupt: {reason}")]
    Corrupt { address: String, reason: String },

    #[error("storage error: {0}")]
    Storage(String),
}

/// Lookup and storage of address key pairs, keyed by public address string.
pub trait KeyStore: Send + Sync {
    /// The Factoid key pair behind an `FA...` string.
    fn factoid_address(&self, public: &str) -> Result<FactoidAddress, KeyStoreError>;

    /// The Entry Credit key pair behind an `EC...` string.
    fn ec_address(&self, public: &str) -> Result<EcAddress, KeyStoreError>;

    fn put_factoid_address(&self, address: &FactoidAddress) -> Result<(), KeyStoreError>;

    fn put_ec_address(&self, address: &EcAddress) -> Result<(), KeyStoreError>;

    /// All stored `FA...` strings, sorted.
    fn factoid_addresses(&self) -> Result<Vec<String>, KeyStoreError>;

    /// All stored `EC...` strings, sorted.
    fn ec_addresses(&self) -> Result<Vec<String>, KeyStoreError>;
}

/// An in-memory key store. Keys vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    factoid: RwLock<BTreeMap<String, FactoidAddress>>,
    ec: RwLock<BTreeMap<String, EcAddress>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyStore for MemoryKeyStore {
    fn factoid_address(&self, public: &str) -> Result<FactoidAddress, KeyStoreError> {
        self.factoid
            .read()
            .get(public)
            .cloned()
            .ok_or_else(|| KeyStoreError::NotFound {
                address: public.to_string(),
            })
    }

    fn ec_address(&self, public: &str) -> Result<EcAddress, KeyStoreError> {
        self.ec
            .read()
            .get(public)
            .cloned()
            .ok_or_else(|| KeyStoreError::NotFound {
                address: public.to_string(),
            })
    }

    fn put_factoid_address(&self, address: &FactoidAddress) -> Result<(), KeyStoreError> {
        let public = address.public_string();
        if !address.key_pair().has_secret() {
            return Err(KeyStoreError::MissingSecret { address: public });
        }
        self.factoid.write().insert(public, address.clone());
        Ok(())
    }

    fn put_ec_address(&self, address: &EcAddress) -> Result<(), KeyStoreError> {
        let public = address.public_string();
        if !address.key_pair().has_secret() {
            return Err(KeyStoreError::MissingSecret { address: public });
        }
        self.ec.write().insert(public, address.clone());
        Ok(())
    }

    fn factoid_addresses(&self) -> Result<Vec<String>, KeyStoreError> {
        Ok(self.factoid.read().keys().cloned().collect())
    }

    fn ec_addresses(&self) -> Result<Vec<String>, KeyStoreError> {
        Ok(self.ec.read().keys().cloned().collect())
    }
}

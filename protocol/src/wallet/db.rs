//! # WalletDb: Persistent Key Store
//!
//! A [`KeyStore`] backed by sled, so generated and imported addresses
//! survive a restart.
//!
//! ## Tree Layout
//!
//! | Tree                | Key                     | Value             |
//! |---------------------|-------------------------|-------------------|
//! | `factoid_addresses` | `FA...` string (UTF-8)  | ed25519 seed (32B)|
//! | `ec_addresses`      | `EC...` string (UTF-8)  | ed25519 seed (32B)|
//! | `metadata`          | key (UTF-8)             | value (bytes)     |
//!
//! Only the seed is written. The public key, and so the key under which
//! the record is filed, is derived again on every read; a record whose
//! derived address disagrees with its key is reported as corrupt rather
//! than handed to the signer.

use sled::{Db, Tree};
use std::path::Path;
use tracing::debug;
use zeroize::Zeroizing;

use super::keystore::{KeyStore, KeyStoreError};
use crate::identity::{EcAddress, FactoidAddress};

// ---------------------------------------------------------------------------
// Error Type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    #[error("unsupported wallet format version {0}")]
    UnsupportedVersion(u8),
}

pub type DbResult<T> = Result<T, DbError>;

impl From<DbError> for KeyStoreError {
    fn from(err: DbError) -> Self {
        KeyStoreError::Storage(err.to_string())
    }
}

impl From<sled::Error> for KeyStoreError {
    fn from(err: sled::Error) -> Self {
        KeyStoreError::Storage(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

const META_FORMAT_VERSION: &[u8] = b"format_version";
const FORMAT_VERSION: u8 = 1;

// ---------------------------------------------------------------------------
// WalletDb
// ---------------------------------------------------------------------------

/// sled-backed key store.
///
/// sled trees are safe to share between threads, so a `WalletDb` can sit
/// behind an `Arc<dyn KeyStore>` without further locking.
#[derive(Debug, Clone)]
pub struct WalletDb {
    db: Db,
    factoid: Tree,
    ec: Tree,
    metadata: Tree,
}

impl WalletDb {
    /// Open or create a wallet database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let db = sled::open(path)?;
        Self::from_db(db)
    }

    /// A database that is discarded when dropped. Handy in tests.
    pub fn open_temporary() -> DbResult<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::from_db(db)
    }

    fn from_db(db: Db) -> DbResult<Self> {
        let factoid = db.open_tree("factoid_addresses")?;
        let ec = db.open_tree("ec_addresses")?;
        let metadata = db.open_tree("metadata")?;

        match metadata.get(META_FORMAT_VERSION)? {
            Some(v) if v.as_ref() == [FORMAT_VERSION] => {}
            Some(v) => return Err(DbError::UnsupportedVersion(v.first().copied().unwrap_or(0))),
            None => {
                metadata.insert(META_FORMAT_VERSION, &[FORMAT_VERSION])?;
            }
        }

        Ok(Self {
            db,
            factoid,
            ec,
            metadata,
        })
    }

    pub fn format_version(&self) -> DbResult<Option<u8>> {
        Ok(self
            .metadata
            .get(META_FORMAT_VERSION)?
            .and_then(|v| v.first().copied()))
    }

    pub fn address_count(&self) -> usize {
        self.factoid.len() + self.ec.len()
    }

    pub fn flush(&self) -> DbResult<()> {
        self.db.flush()?;
        Ok(())
    }

    // -- Record helpers -----------------------------------------------------

    fn read_seed(tree: &Tree, public: &str) -> Result<Zeroizing<[u8; 32]>, KeyStoreError> {
        let bytes = tree
            .get(public.as_bytes())?
            .ok_or_else(|| KeyStoreError::NotFound {
                address: public.to_string(),
            })?;

        let seed: [u8; 32] = bytes
            .as_ref()
            .try_into()
            .map_err(|_| KeyStoreError::Corrupt {
                address: public.to_string(),
                reason: format!("expected 32 seed bytes, found {}", bytes.len()),
            })?;
        Ok(Zeroizing::new(seed))
    }

    fn write_seed(
        &self,
        tree: &Tree,
        public: String,
        seed: Option<Zeroizing<[u8; 32]>>,
    ) -> Result<(), KeyStoreError> {
        let seed = seed.ok_or_else(|| KeyStoreError::MissingSecret {
            address: public.clone(),
        })?;
        tree.insert(public.as_bytes(), seed.as_slice())?;
        self.db.flush()?;
        debug!(address = %public, "stored address");
        Ok(())
    }

    fn list(tree: &Tree) -> Result<Vec<String>, KeyStoreError> {
        let mut out = Vec::with_capacity(tree.len());
        for key in tree.iter().keys() {
            let key = key?;
            let s = String::from_utf8(key.to_vec()).map_err(|e| KeyStoreError::Corrupt {
                address: hex::encode(&key),
                reason: e.to_string(),
            })?;
            out.push(s);
        }
        Ok(out)
    }
}

fn check_derived(public: &str, derived: String) -> Result<(), KeyStoreError> {
    if derived == public {
        Ok(())
    } else {
        Err(KeyStoreError::Corrupt {
            address: public.to_string(),
            reason: format!("seed derives {derived}"),
        })
    }
}

impl KeyStore for WalletDb {
    fn factoid_address(&self, public: &str) -> Result<FactoidAddress, KeyStoreError> {
        let seed = Self::read_seed(&self.factoid, public)?;
        let address = FactoidAddress::from_seed(&seed);
        check_derived(public, address.public_string())?;
        Ok(address)
    }

    fn ec_address(&self, public: &str) -> Result<EcAddress, KeyStoreError> {
        let seed = Self::read_seed(&self.ec, public)?;
        let address = EcAddress::from_seed(&seed);
        check_derived(public, address.public_string())?;
        Ok(address)
    }

    fn put_factoid_address(&self, address: &FactoidAddress) -> Result<(), KeyStoreError> {
        self.write_seed(&self.factoid, address.public_string(), address.seed())
    }

    fn put_ec_address(&self, address: &EcAddress) -> Result<(), KeyStoreError> {
        self.write_seed(&self.ec, address.public_string(), address.seed())
    }

    fn factoid_addresses(&self) -> Result<Vec<String>, KeyStoreError> {
        Self::list(&self.factoid)
    }

    fn ec_addresses(&self) -> Result<Vec<String>, KeyStoreError> {
        Self::list(&self.ec)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

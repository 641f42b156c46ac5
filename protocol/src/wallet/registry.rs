//! Named transaction registry.
//!
//! Transactions under construction are addressed by a caller-chosen name.
//! The registry is a concurrent map from name to a per-transaction mutex:
//! operations on different names never contend, while operations on the
//! same name run one at a time.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;

use super::error::{WalletError, WalletResult};
use crate::config::MAX_TRANSACTION_NAME_LENGTH;
use crate::transaction::Transaction;

pub type SharedTransaction = Arc<Mutex<Transaction>>;

#[derive(Debug, Default)]
pub struct TransactionRegistry {
    transactions: DashMap<String, SharedTransaction>,
}

/// Names are 1 to 32 characters drawn from `[A-Za-z0-9_-]`.
pub fn validate_name(name: &str) -> WalletResult<()> {
    let ok = !name.is_empty()
        && name.len() <= MAX_TRANSACTION_NAME_LENGTH
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if ok {
        Ok(())
    } else {
        Err(WalletError::InvalidName {
            name: name.to_string(),
        })
    }
}

impl TransactionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `tx` under `name`.
    ///
    /// An existing name is reported as `DuplicateName` even when the new
    /// name would otherwise be malformed, so a caller retrying a create
    /// sees the collision first.
    pub fn create(&self, name: &str, tx: Transaction) -> WalletResult<SharedTransaction> {
        match self.transactions.entry(name.to_string()) {
            Entry::Occupied(_) => Err(WalletError::DuplicateName {
                name: name.to_string(),
            }),
            Entry::Vacant(slot) => {
                validate_name(name)?;
                let shared = Arc::new(Mutex::new(tx));
                slot.insert(Arc::clone(&shared));
                Ok(shared)
            }
        }
    }

    /// The shared handle for `name`. The map shard is released before the
    /// caller locks the transaction.
    pub fn get(&self, name: &str) -> WalletResult<SharedTransaction> {
        self.transactions
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| WalletError::NotFound {
                name: name.to_string(),
            })
    }

    pub fn delete(&self, name: &str) -> WalletResult<()> {
        self.transactions
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| WalletError::NotFound {
                name: name.to_string(),
            })
    }

    /// A copy of the named transaction as it is right now.
    pub fn snapshot(&self, name: &str) -> WalletResult<Transaction> {
        Ok(self.get(name)?.lock().clone())
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.transactions.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

//! # Wallet Module
//!
//! Ties the address types, the transaction builder and the two external
//! collaborators together behind one handle, [`Wallet`].
//!
//! ```text
//! error.rs        WalletError, the error every builder call returns
//! keystore.rs     KeyStore trait and the in-memory implementation
//! db.rs           sled-backed KeyStore
//! registry.rs     name -> Arc<Mutex<Transaction>> map
//! client.rs       Wallet: address generation, import, listing
//! transactions.rs Wallet: named transaction operations
//! ```

pub mod client;
pub mod db;
pub mod error;
pub mod keystore;
pub mod registry;
pub mod transactions;

pub use client::Wallet;
pub use db::{DbError, WalletDb};
pub use error::{WalletError, WalletResult};
pub use keystore::{KeyStore, KeyStoreError, MemoryKeyStore};
pub use registry::{validate_name, TransactionRegistry};

//! Wallet error type.
//!
//! Every builder operation reports failure through [`WalletError`]. Each
//! variant names the transaction and/or address it concerns, so a caller
//! juggling several named transactions can tell which one failed.

use thiserror::Error;

use super::keystore::KeyStoreError;
use crate::identity::{AddressError, AddressFault};
use crate::network::RateError;
use crate::transaction::{FeeError, TransactionError};

pub type WalletResult<T> = Result<T, WalletError>;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("invalid address {address:?}: {fault}")]
    InvalidAddress { address: String, fault: AddressFault },

    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("invalid transaction name {name:?}: use 1-32 characters from [A-Za-z0-9_-]")]
    InvalidName { name: String },

    #[error("transaction {name:?} already exists")]
    DuplicateName { name: String },

    #[error("transaction {name:?} not found")]
    NotFound { name: String },

    #[error("address {address} is not in the wallet")]
    NoSuchAddress { address: String },

    #[error(
        "transaction {name:?} is not balanced: inputs {inputs}, outputs {outputs}, ec outputs {ec_outputs}"
    )]
    ImbalancedTransaction {
        name: String,
        inputs: u64,
        outputs: u64,
        ec_outputs: u64,
    },

    #[error("transaction {name:?} pays a fee of {fee}, which is too low (required {required:?})")]
    FeeTooLow {
        name: String,
        fee: i128,
        required: Option<u64>,
    },

    #[error("transaction {name:?} pays a fee of {fee}, at or above the limit of {limit}")]
    FeeTooHigh { name: String, fee: u64, limit: u128 },

    #[error("could not calculate fee for transaction {name:?}")]
    FeeUncomputable { name: String },

    #[error("{address} is not an input of transaction {name:?}")]
    NotAnInput { name: String, address: String },

    #[error("{address} is not an output of transaction {name:?}")]
    NotAnOutput { name: String, address: String },

    #[error("transaction {name:?} has no inputs")]
    NoInputs { name: String },

    #[error("transaction {name:?} is signed and can no longer change")]
    TransactionFinalized { name: String },

    #[error("amount overflow or underflow in transaction {name:?}")]
    InvalidAmount { name: String },

    #[error("transaction {name:?}: {source}")]
    Transaction {
        name: String,
        #[source]
        source: TransactionError,
    },

    #[error("key store: {0}")]
    KeyStore(#[from] KeyStoreError),

    #[error(transparent)]
    Rate(#[from] RateError),
}

impl WalletError {
    /// Attach a transaction name to a builder-level error.
    pub(crate) fn transaction(name: &str, err: TransactionError) -> Self {
        let name = name.to_string();
        match err {
            TransactionError::InvalidAmount => WalletError::InvalidAmount { name },
            TransactionError::Finalized => WalletError::TransactionFinalized { name },
            TransactionError::NoInputs => WalletError::NoInputs { name },
            source => WalletError::Transaction { name, source },
        }
    }

    /// Attach a transaction name to a fee-check failure.
    pub(crate) fn fee(name: &str, err: FeeError) -> Self {
        let name_owned = name.to_string();
        match err {
            FeeError::TooLow { fee, required } => WalletError::FeeTooLow {
                name: name_owned,
                fee,
                required,
            },
            FeeError::TooHigh { fee, limit } => WalletError::FeeTooHigh {
                name: name_owned,
                fee,
                limit,
            },
            FeeError::Uncomputable => WalletError::FeeUncomputable { name: name_owned },
            FeeError::Transaction(err) => Self::transaction(name, err),
        }
    }

    /// Key-store lookups: a miss becomes `NoSuchAddress`.
    pub(crate) fn lookup(address: &str, err: KeyStoreError) -> Self {
        match err {
            KeyStoreError::NotFound { .. } => WalletError::NoSuchAddress {
                address: address.to_string(),
            },
            other => WalletError::KeyStore(other),
        }
    }
}

impl From<AddressError> for WalletError {
    fn from(err: AddressError) -> Self {
        match err {
            AddressError::InvalidAddress { address, fault } => {
                WalletError::InvalidAddress { address, fault }
            }
            AddressError::InvalidMnemonic(reason) => WalletError::InvalidMnemonic(reason),
        }
    }
}

//! Core type definitions for Factoid transactions.
//!
//! These types form the vocabulary of the transaction builder. They are
//! kept small and `Copy` so that replacing an amount or cloning a snapshot
//! never touches the heap.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::{MAX_TRANSACTION_ENTRIES, MAX_TRANSACTION_SIZE};
use crate::identity::factoid::{rcd1_bytes, rcd_hash};

// ---------------------------------------------------------------------------
// Transfers
// ---------------------------------------------------------------------------

/// One line of a transaction: a 32-byte address and an amount.
///
/// For inputs and Factoid outputs the address is an RCD hash; for EC
/// outputs it is the raw EC public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transfer {
    pub address: [u8; 32],
    pub amount: u64,
}

impl Transfer {
    pub fn new(address: [u8; 32], amount: u64) -> Self {
        Self { address, amount }
    }
}

pub type Input = Transfer;
pub type Output = Transfer;
pub type EcOutput = Transfer;

// ---------------------------------------------------------------------------
// RCD
// ---------------------------------------------------------------------------

/// A type-1 redeem condition: a single Ed25519 public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rcd {
    pub public_key: [u8; 32],
}

impl Rcd {
    pub fn new(public_key: [u8; 32]) -> Self {
        Self { public_key }
    }

    /// `0x01 || public key`.
    pub fn to_bytes(&self) -> [u8; 33] {
        rcd1_bytes(&self.public_key)
    }

    /// The address this RCD unlocks.
    pub fn hash(&self) -> [u8; 32] {
        rcd_hash(&self.public_key)
    }
}

// ---------------------------------------------------------------------------
// TransactionStatus
// ---------------------------------------------------------------------------

/// Lifecycle of a named transaction. There is no way back from `Signed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Accepting inputs, outputs and fee adjustments.
    Open,
    /// Every input carries a signature; the transaction is frozen.
    Signed,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Signed => write!(f, "signed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised by the transaction primitives themselves.
///
/// The wallet layer attaches the transaction name and turns these into
/// [`crate::wallet::WalletError`]s.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("amount arithmetic overflowed or underflowed")]
    InvalidAmount,

    #[error("a transaction holds at most {max} {kind}", max = MAX_TRANSACTION_ENTRIES)]
    TooManyEntries { kind: &'static str },

    #[error("signed transaction would be {size} bytes, limit is {max}", max = MAX_TRANSACTION_SIZE)]
    TooLarge { size: usize },

    #[error("transaction is signed and can no longer change")]
    Finalized,

    #[error("address is not an input of this transaction")]
    NotAnInput,

    #[error("address is not an output of this transaction")]
    NotAnOutput,

    #[error("transaction has no inputs to sign")]
    NoInputs,

    #[error("expected {expected} signing keys, got {got}")]
    SignerCount { expected: usize, got: usize },

    #[error("signing key {index} does not match its RCD")]
    SignerMismatch { index: usize },

    #[error("signing key {index} has no secret")]
    MissingSecret { index: usize },

    #[error("malformed transaction encoding: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::FactoidAddress;

    #[test]
    fn rcd_hash_matches_address_payload() {
        let fa = FactoidAddress::from_seed(&[4u8; 32]);
        let rcd = Rcd::new(fa.public_key());
        assert_eq!(rcd.hash(), fa.rcd_hash());
        assert_eq!(rcd.to_bytes(), fa.rcd());
    }

    #[test]
    fn status_display() {
        assert_eq!(TransactionStatus::Open.to_string(), "open");
        assert_eq!(TransactionStatus::Signed.to_string(), "signed");
    }
}

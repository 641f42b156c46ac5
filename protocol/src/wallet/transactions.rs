//! # Named Transaction Operations
//!
//! The builder surface of [`Wallet`]: create a transaction under a name,
//! add inputs and outputs by address string, settle the fee, sign, and
//! compose the submission request.
//!
//! ## Locking
//!
//! Each call looks the name up in the registry, takes that transaction's
//! mutex, and holds it for the whole call. A call either applies all of
//! its changes or returns an error with the transaction untouched.
//!
//! ## Lifecycle
//!
//! ```text
//!   new_transaction ──► Open ──(add_* / add_fee / sub_fee)──► Open
//!                        │
//!                        └──sign_transaction──► Signed ──► compose
//! ```
//!
//! A signed transaction refuses every further mutation, a second signing
//! included, with `TransactionFinalized`.

use tracing::{debug, info};

use super::client::Wallet;
use super::error::{WalletError, WalletResult};
use crate::identity::{Address, AddressKind, FactoidAddress};
use crate::network::RpcRequest;
use crate::transaction::{self, calculate_fee, check_fee, Rcd, Transaction, TransactionError};

impl Wallet {
    // -- Registry -----------------------------------------------------------

    /// Start an empty transaction stamped with the current time.
    pub fn new_transaction(&self, name: &str) -> WalletResult<()> {
        let tx = Transaction::new();
        let timestamp = tx.timestamp();
        self.transactions.create(name, tx)?;
        info!(transaction = name, timestamp, "created transaction");
        Ok(())
    }

    pub fn delete_transaction(&self, name: &str) -> WalletResult<()> {
        self.transactions.delete(name)?;
        info!(transaction = name, "deleted transaction");
        Ok(())
    }

    /// A copy of the named transaction.
    pub fn transaction(&self, name: &str) -> WalletResult<Transaction> {
        self.transactions.snapshot(name)
    }

    pub fn transaction_names(&self) -> Vec<String> {
        self.transactions.names()
    }

    // -- Inputs and outputs -------------------------------------------------

    /// Spend `amount` from a Factoid address held by the key store.
    ///
    /// Calling this again for the same address replaces the amount.
    pub fn add_input(&self, name: &str, address: &str, amount: u64) -> WalletResult<()> {
        self.with_open(name, |tx| {
            Address::decode_kind(address, AddressKind::FactoidPublic)?;
            let key = self
                .keys
                .factoid_address(address)
                .map_err(|e| WalletError::lookup(address, e))?;
            tx.set_input(Rcd::new(key.public_key()), amount)
                .map_err(|e| WalletError::transaction(name, e))?;
            debug!(transaction = name, address, amount, "set input");
            Ok(())
        })
    }

    /// Pay `amount` Factoshis to a Factoid address.
    pub fn add_output(&self, name: &str, address: &str, amount: u64) -> WalletResult<()> {
        self.with_open(name, |tx| {
            let decoded = Address::decode_kind(address, AddressKind::FactoidPublic)?;
            tx.set_output(*decoded.payload(), amount)
                .map_err(|e| WalletError::transaction(name, e))?;
            debug!(transaction = name, address, amount, "set output");
            Ok(())
        })
    }

    /// Spend `amount` Factoshis on Entry Credits for an EC address.
    pub fn add_ec_output(&self, name: &str, address: &str, amount: u64) -> WalletResult<()> {
        self.with_open(name, |tx| {
            let decoded = Address::decode_kind(address, AddressKind::EcPublic)?;
            tx.set_ec_output(*decoded.payload(), amount)
                .map_err(|e| WalletError::transaction(name, e))?;
            debug!(transaction = name, address, amount, "set ec output");
            Ok(())
        })
    }

    // -- Fees ---------------------------------------------------------------

    /// Have the input from `address` pay the fee at `rate`.
    ///
    /// The transaction must balance exactly before the call. Returns the
    /// fee that was added.
    pub fn add_fee(&self, name: &str, address: &str, rate: u64) -> WalletResult<u64> {
        self.with_open(name, |tx| {
            let decoded = Address::decode_kind(address, AddressKind::FactoidPublic)?;
            ensure_balanced(name, tx)?;
            let fee = calculate_fee(tx, rate).map_err(|e| WalletError::transaction(name, e))?;
            tx.increase_input(decoded.payload(), fee)
                .map_err(|e| match e {
                    TransactionError::NotAnInput => WalletError::NotAnInput {
                        name: name.to_string(),
                        address: address.to_string(),
                    },
                    other => WalletError::transaction(name, other),
                })?;
            debug!(transaction = name, address, fee, rate, "added fee to input");
            Ok(fee)
        })
    }

    /// Take the fee at `rate` out of the output paying `address`.
    ///
    /// The transaction must balance exactly before the call. Returns the
    /// fee that was subtracted.
    pub fn sub_fee(&self, name: &str, address: &str, rate: u64) -> WalletResult<u64> {
        self.with_open(name, |tx| {
            let decoded = Address::decode_kind(address, AddressKind::FactoidPublic)?;
            ensure_balanced(name, tx)?;
            let fee = calculate_fee(tx, rate).map_err(|e| WalletError::transaction(name, e))?;
            tx.decrease_output(decoded.payload(), fee)
                .map_err(|e| match e {
                    TransactionError::NotAnOutput => WalletError::NotAnOutput {
                        name: name.to_string(),
                        address: address.to_string(),
                    },
                    other => WalletError::transaction(name, other),
                })?;
            debug!(transaction = name, address, fee, rate, "subtracted fee from output");
            Ok(fee)
        })
    }

    // -- Signing and submission ---------------------------------------------

    /// Check the fee against the current rate, sign every input, freeze.
    pub fn sign_transaction(&self, name: &str) -> WalletResult<()> {
        self.with_open(name, |tx| {
            let rate = self.rates.rate()?;
            check_fee(tx, rate).map_err(|e| WalletError::fee(name, e))?;
            if tx.inputs().is_empty() {
                return Err(WalletError::NoInputs {
                    name: name.to_string(),
                });
            }

            let signers = tx
                .rcds()
                .iter()
                .map(|rcd| {
                    let public = Address::FactoidPublic(rcd.hash()).encode();
                    self.keys
                        .factoid_address(&public)
                        .map_err(|e| WalletError::lookup(&public, e))
                })
                .collect::<WalletResult<Vec<FactoidAddress>>>()?;

            transaction::sign_transaction(tx, &signers)
                .map_err(|e| WalletError::transaction(name, e))?;
            info!(transaction = name, id = %tx.id(), inputs = signers.len(), "signed transaction");
            Ok(())
        })
    }

    /// Wrap the encoded transaction in a `factoid-submit` request.
    ///
    /// An unsigned transaction is encoded without signatures; submitting
    /// one is up to the caller.
    pub fn compose_transaction(&self, name: &str) -> WalletResult<RpcRequest> {
        let tx = self.transactions.snapshot(name)?;
        let request = RpcRequest::factoid_submit(&tx.marshal_binary());
        info!(
            transaction = name,
            id = %tx.id(),
            request_id = request.id,
            signed = tx.is_signed(),
            "composed transaction"
        );
        Ok(request)
    }

    // -- Helpers ------------------------------------------------------------

    /// Run `f` with the named transaction locked, if it is still open.
    fn with_open<T>(
        &self,
        name: &str,
        f: impl FnOnce(&mut Transaction) -> WalletResult<T>,
    ) -> WalletResult<T> {
        let handle = self.transactions.get(name)?;
        let mut tx = handle.lock();
        if tx.is_signed() {
            return Err(WalletError::TransactionFinalized {
                name: name.to_string(),
            });
        }
        f(&mut *tx)
    }
}

fn ensure_balanced(name: &str, tx: &Transaction) -> WalletResult<()> {
    let totals = || -> Result<(u64, u64, u64), TransactionError> {
        Ok((tx.total_inputs()?, tx.total_outputs()?, tx.total_ec_outputs()?))
    };
    let (inputs, outputs, ec_outputs) = totals().map_err(|e| WalletError::transaction(name, e))?;
    let spent = outputs.checked_add(ec_outputs).ok_or(WalletError::InvalidAmount {
        name: name.to_string(),
    })?;
    if inputs != spent {
        return Err(WalletError::ImbalancedTransaction {
            name: name.to_string(),
            inputs,
            outputs,
            ec_outputs,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

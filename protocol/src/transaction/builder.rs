//! The in-progress Factoid transaction and its mutation primitives.
//!
//! A [`Transaction`] holds three ordered lists (inputs, Factoid outputs,
//! EC outputs) plus one RCD and one signature slot per input. The lists are
//! keyed by address: setting an amount for an address that is already
//! present replaces the amount instead of adding a second line.
//!
//! The builder enforces the structural rules (entry limits, lock-step
//! RCDs, frozen after signing). Naming, key lookup and fee policy live in
//! the wallet layer, which drives these primitives.

use chrono::Utc;

use super::types::{EcOutput, Input, Output, Rcd, TransactionError, TransactionStatus, Transfer};
use crate::config::{MAX_TRANSACTION_ENTRIES, RCD_SIZE, SIGNATURE_SIZE};
use crate::crypto::hash::sha256;
use crate::crypto::signatures::{Ed25519, SignatureScheme};

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A Factoid transaction under construction or already signed.
///
/// # Invariants
///
/// - `rcds.len() == inputs.len() == signatures.len()`, index-aligned.
/// - No two lines of the same list share an address.
/// - Each list holds at most 255 lines.
/// - Once `status` is `Signed`, nothing changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Creation time in Unix milliseconds.
    timestamp: u64,
    inputs: Vec<Input>,
    outputs: Vec<Output>,
    ec_outputs: Vec<EcOutput>,
    rcds: Vec<Rcd>,
    signatures: Vec<Option<[u8; SIGNATURE_SIZE]>>,
    status: TransactionStatus,
}

impl Transaction {
    /// An empty transaction stamped with the current time.
    pub fn new() -> Self {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        Self::with_timestamp(now)
    }

    /// An empty transaction with an explicit millisecond timestamp.
    pub fn with_timestamp(timestamp: u64) -> Self {
        Self {
            timestamp,
            inputs: Vec::new(),
            outputs: Vec::new(),
            ec_outputs: Vec::new(),
            rcds: Vec::new(),
            signatures: Vec::new(),
            status: TransactionStatus::Open,
        }
    }

    /// Reassemble a decoded transaction. Lengths are checked by the caller.
    pub(super) fn from_parts(
        timestamp: u64,
        inputs: Vec<Input>,
        outputs: Vec<Output>,
        ec_outputs: Vec<EcOutput>,
        rcds: Vec<Rcd>,
        signatures: Vec<Option<[u8; SIGNATURE_SIZE]>>,
    ) -> Self {
        let status = if !signatures.is_empty() && signatures.iter().all(Option::is_some) {
            TransactionStatus::Signed
        } else {
            TransactionStatus::Open
        };
        Self {
            timestamp,
            inputs,
            outputs,
            ec_outputs,
            rcds,
            signatures,
            status,
        }
    }

    // -- Accessors ----------------------------------------------------------

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    pub fn ec_outputs(&self) -> &[EcOutput] {
        &self.ec_outputs
    }

    pub fn rcds(&self) -> &[Rcd] {
        &self.rcds
    }

    pub fn signatures(&self) -> &[Option<[u8; SIGNATURE_SIZE]>] {
        &self.signatures
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    pub fn is_signed(&self) -> bool {
        self.status == TransactionStatus::Signed
    }

    // -- Totals -------------------------------------------------------------

    pub fn total_inputs(&self) -> Result<u64, TransactionError> {
        sum(&self.inputs)
    }

    pub fn total_outputs(&self) -> Result<u64, TransactionError> {
        sum(&self.outputs)
    }

    pub fn total_ec_outputs(&self) -> Result<u64, TransactionError> {
        sum(&self.ec_outputs)
    }

    // -- Mutation -----------------------------------------------------------

    fn ensure_open(&self) -> Result<(), TransactionError> {
        match self.status {
            TransactionStatus::Open => Ok(()),
            TransactionStatus::Signed => Err(TransactionError::Finalized),
        }
    }

    /// Spend `amount` from the address unlocked by `rcd`.
    ///
    /// An existing input for the same address has its amount replaced.
    /// Otherwise the input and its RCD are appended together.
    pub fn set_input(&mut self, rcd: Rcd, amount: u64) -> Result<(), TransactionError> {
        self.ensure_open()?;
        let address = rcd.hash();
        if let Some(input) = self.inputs.iter_mut().find(|i| i.address == address) {
            input.amount = amount;
            return Ok(());
        }
        if self.inputs.len() >= MAX_TRANSACTION_ENTRIES {
            return Err(TransactionError::TooManyEntries { kind: "inputs" });
        }
        self.inputs.push(Transfer::new(address, amount));
        self.rcds.push(rcd);
        self.signatures.push(None);
        Ok(())
    }

    /// Pay `amount` to a Factoid RCD hash.
    pub fn set_output(&mut self, address: [u8; 32], amount: u64) -> Result<(), TransactionError> {
        self.ensure_open()?;
        upsert(&mut self.outputs, address, amount, "outputs")
    }

    /// Buy Entry Credits for an EC public key.
    pub fn set_ec_output(
        &mut self,
        address: [u8; 32],
        amount: u64,
    ) -> Result<(), TransactionError> {
        self.ensure_open()?;
        upsert(&mut self.ec_outputs, address, amount, "ec outputs")
    }

    /// Increase the input spending from `address` by `delta`.
    pub fn increase_input(
        &mut self,
        address: &[u8; 32],
        delta: u64,
    ) -> Result<u64, TransactionError> {
        self.ensure_open()?;
        let input = self
            .inputs
            .iter_mut()
            .find(|i| &i.address == address)
            .ok_or(TransactionError::NotAnInput)?;
        input.amount = input
            .amount
            .checked_add(delta)
            .ok_or(TransactionError::InvalidAmount)?;
        Ok(input.amount)
    }

    /// Decrease the output paying `address` by `delta`.
    pub fn decrease_output(
        &mut self,
        address: &[u8; 32],
        delta: u64,
    ) -> Result<u64, TransactionError> {
        self.ensure_open()?;
        let output = self
            .outputs
            .iter_mut()
            .find(|o| &o.address == address)
            .ok_or(TransactionError::NotAnOutput)?;
        output.amount = output
            .amount
            .checked_sub(delta)
            .ok_or(TransactionError::InvalidAmount)?;
        Ok(output.amount)
    }

    /// Install one signature per input and freeze the transaction.
    pub(super) fn apply_signatures(
        &mut self,
        signatures: Vec<[u8; SIGNATURE_SIZE]>,
    ) -> Result<(), TransactionError> {
        self.ensure_open()?;
        if signatures.len() != self.rcds.len() {
            return Err(TransactionError::SignerCount {
                expected: self.rcds.len(),
                got: signatures.len(),
            });
        }
        self.signatures = signatures.into_iter().map(Some).collect();
        self.status = TransactionStatus::Signed;
        Ok(())
    }

    // -- Identity & verification ---------------------------------------------

    /// Size of the encoding once every input carries its RCD and signature.
    pub fn signed_size(&self) -> usize {
        self.marshal_binary_sig().len() + self.inputs.len() * (RCD_SIZE + SIGNATURE_SIZE)
    }

    /// Transaction id: `hex(sha256(marshal_binary_sig))`.
    ///
    /// Covers everything the inputs sign, so it does not change on signing.
    pub fn id(&self) -> String {
        hex::encode(sha256(&self.marshal_binary_sig()))
    }

    /// `true` when every input is signed by the key in its RCD.
    pub fn verify_signatures(&self) -> bool {
        if self.rcds.is_empty() {
            return false;
        }
        let data = self.marshal_binary_sig();
        self.rcds
            .iter()
            .zip(&self.signatures)
            .all(|(rcd, sig)| match sig {
                Some(sig) => Ed25519::verify(&rcd.public_key, &data, sig),
                None => false,
            })
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

fn sum(lines: &[Transfer]) -> Result<u64, TransactionError> {
    lines.iter().try_fold(0u64, |acc, line| {
        acc.checked_add(line.amount)
            .ok_or(TransactionError::InvalidAmount)
    })
}

fn upsert(
    lines: &mut Vec<Transfer>,
    address: [u8; 32],
    amount: u64,
    kind: &'static str,
) -> Result<(), TransactionError> {
    if let Some(line) = lines.iter_mut().find(|l| l.address == address) {
        line.amount = amount;
        return Ok(());
    }
    if lines.len() >= MAX_TRANSACTION_ENTRIES {
        return Err(TransactionError::TooManyEntries { kind });
    }
    lines.push(Transfer::new(address, amount));
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

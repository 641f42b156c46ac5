//! Fee calculation and the fee sanity check run before signing.
//!
//! ## Required fee
//!
//! The ledger prices a transaction in fee units, multiplied by the current
//! Factoid-per-EC exchange rate:
//!
//! ```text
//! units = ceil(signed_size / 1024)
//!       + 10 * (#outputs + #ec_outputs)
//!       + 10 * #inputs                      (one signature each)
//! fee   = rate * units
//! ```
//!
//! `signed_size` assumes every input carries its RCD and signature, so the
//! fee computed before signing is the fee the signed transaction owes.
//!
//! ## Sanity check
//!
//! The fee a transaction actually pays is `inputs - outputs - ec_outputs`.
//! Before signing it must be positive, at least the required fee, and
//! strictly below ten times the required fee. The upper bound catches
//! fat-fingered amounts that would otherwise be burned.

use thiserror::Error;

use super::builder::Transaction;
use super::types::TransactionError;
use crate::config::{
    FEE_UNITS_PER_KILOBYTE, FEE_UNITS_PER_OUTPUT, FEE_UNITS_PER_SIGNATURE, MAX_FEE_MULTIPLIER,
    MAX_TRANSACTION_SIZE,
};

/// Why a transaction's fee was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeeError {
    #[error("fee of {fee} is too low (required {required:?})")]
    TooLow { fee: i128, required: Option<u64> },

    #[error("fee of {fee} is at or above the limit of {limit}")]
    TooHigh { fee: u64, limit: u128 },

    #[error("could not calculate fee")]
    Uncomputable,

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

/// The fee `tx` owes at `rate`.
///
/// Fails with `TooLarge` when the signed encoding would exceed the ledger's
/// size limit and with `InvalidAmount` if the multiplication overflows.
pub fn calculate_fee(tx: &Transaction, rate: u64) -> Result<u64, TransactionError> {
    let size = tx.signed_size();
    if size > MAX_TRANSACTION_SIZE {
        return Err(TransactionError::TooLarge { size });
    }

    let kilobytes = size.div_ceil(1024) as u64;
    let outputs = (tx.outputs().len() + tx.ec_outputs().len()) as u64;
    let signatures = tx.inputs().len() as u64;

    let units = kilobytes * FEE_UNITS_PER_KILOBYTE
        + outputs * FEE_UNITS_PER_OUTPUT
        + signatures * FEE_UNITS_PER_SIGNATURE;

    rate.checked_mul(units)
        .ok_or(TransactionError::InvalidAmount)
}

/// The fee `tx` currently pays: inputs minus all outputs. May be negative.
pub fn paid_fee(tx: &Transaction) -> Result<i128, TransactionError> {
    let inputs = i128::from(tx.total_inputs()?);
    let outputs = i128::from(tx.total_outputs()?);
    let ec_outputs = i128::from(tx.total_ec_outputs()?);
    Ok(inputs - outputs - ec_outputs)
}

/// Check the paid fee against the required fee at `rate`.
///
/// Returns the paid fee on success.
pub fn check_fee(tx: &Transaction, rate: u64) -> Result<u64, FeeError> {
    let fee = paid_fee(tx)?;
    if fee <= 0 {
        return Err(FeeError::TooLow {
            fee,
            required: None,
        });
    }

    let required = calculate_fee(tx, rate)?;
    if required == 0 {
        return Err(FeeError::Uncomputable);
    }
    if fee < i128::from(required) {
        return Err(FeeError::TooLow {
            fee,
            required: Some(required),
        });
    }

    // A positive difference of two u64 totals fits in a u64.
    let fee = fee as u64;
    let limit = u128::from(required) * u128::from(MAX_FEE_MULTIPLIER);
    if u128::from(fee) >= limit {
        return Err(FeeError::TooHigh { fee, limit });
    }
    Ok(fee)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

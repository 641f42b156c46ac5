//! # Transaction Module
//!
//! Construction, encoding, fee policy and signing for Factoid transactions.
//! A transaction moves Factoids from one or more inputs to Factoid outputs
//! and/or Entry Credit purchases.
//!
//! ## Architecture
//!
//! ```text
//! types.rs     Transfer lines, RCDs, status, TransactionError
//! builder.rs   Transaction and its invariant-preserving mutations
//! encoding.rs  varints and the binary wire format
//! fee.rs       required fee and the pre-signing fee check
//! signing.rs   one Ed25519 signature per input, all-or-nothing
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build**: add inputs, outputs and EC outputs (amounts replace by address).
//! 2. **Fee**: grow one input or shrink one output by [`calculate_fee`].
//! 3. **Check**: [`check_fee`] bounds the paid fee to `[required, 10 * required)`.
//! 4. **Sign**: [`sign_transaction`] signs every input and freezes the transaction.
//! 5. **Submit**: [`Transaction::marshal_binary`] is hex-encoded into a request.

pub mod builder;
pub mod encoding;
pub mod fee;
pub mod signing;
pub mod types;

pub use builder::Transaction;
pub use encoding::{decode_varint, encode_varint};
pub use fee::{calculate_fee, check_fee, FeeError};
pub use signing::sign_transaction;
pub use types::{EcOutput, Input, Output, Rcd, TransactionError, TransactionStatus, Transfer};

// Copyright (c) 2026 Factom Client Developers. MIT License.
// See LICENSE for details.

//! # Factom Protocol: Client Library
//!
//! Address handling and Factoid transaction building for a Factom client.
//! Two asset classes live on the ledger: Factoids, the transferable token,
//! and Entry Credits, the non-transferable units that pay for writing
//! entries. Each class has a public address (`FA`, `EC`) and a secret
//! address (`Fs`, `Es`), all four in the same checksummed base-58 format.
//!
//! ## Architecture
//!
//! - **config**: protocol constants (version prefixes, limits, fee units).
//! - **crypto**: SHA-256 helpers and the Ed25519 key pair.
//! - **identity**: the address codec, Factoid and EC addresses, mnemonics.
//! - **entry**: ledger entries and what they cost in Entry Credits.
//! - **transaction**: the Factoid transaction, its wire encoding, fees, signing.
//! - **network**: JSON-RPC request types and the exchange-rate source.
//! - **wallet**: the key store, the named transaction registry, and the
//!   [`wallet::Wallet`] handle that drives it all.
//!
//! The library does no I/O of its own beyond the optional sled key store.
//! Requests are composed here and sent by whoever embeds it.

pub mod config;
pub mod crypto;
pub mod entry;
pub mod identity;
pub mod network;
pub mod transaction;
pub mod wallet;

//! # Identity Module
//!
//! Addresses for the two asset classes and the key material behind them.
//!
//! The identity stack is layered:
//!
//! 1. **Address codec**: the checksummed base-58 format shared by all four
//!    address kinds, plus the validity predicates.
//! 2. **Factoid / Entry Credit addresses**: key pairs that know how to
//!    render themselves as `FA`/`Fs` or `EC`/`Es` strings.
//! 3. **Mnemonic**: BIP-39/BIP-32 derivation of a Factoid seed from twelve
//!    English words.

pub mod address;
pub mod entry_credit;
pub mod factoid;
pub mod mnemonic;

pub use address::{
    address_string_type, is_valid_address, Address, AddressError, AddressFault, AddressKind,
};
pub use entry_credit::EcAddress;
pub use factoid::{rcd_hash, FactoidAddress};
pub use mnemonic::factoid_seed_from_mnemonic;

//! # Entries
//!
//! Entries are the data records written to chains. The client needs them
//! for two things: producing the canonical byte encoding (whose length
//! drives the Entry Credit price) and computing the entry hash.
//!
//! ```text
//! types.rs  Entry, binary encoding, JSON form, chain-id derivation
//! cost.rs   serialized size -> Entry Credit tier
//! ```

pub mod cost;
pub mod types;

pub use cost::entry_cost;
pub use types::{chain_id_from_name, Entry, EntryError};

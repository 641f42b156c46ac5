//! Entry Credit pricing.
//!
//! An entry costs one Entry Credit per started kilobyte of payload, where
//! the payload is everything after the 35-byte header. Every entry costs at
//! least one credit, and payloads above 10 KiB are refused outright.

use super::types::EntryError;
use crate::config::{ENTRY_HEADER_SIZE, ENTRY_TIER_SIZE, MAX_ENTRY_PAYLOAD};

/// Number of Entry Credits needed to write `serialized`, the canonical
/// encoding of an entry.
///
/// # Example
///
/// ```
/// use factom_protocol::entry::entry_cost;
///
/// assert_eq!(entry_cost(&vec![0u8; 35 + 1024]).unwrap(), 1);
/// assert_eq!(entry_cost(&vec![0u8; 35 + 1025]).unwrap(), 2);
/// ```
pub fn entry_cost(serialized: &[u8]) -> Result<u8, EntryError> {
    let payload = serialized.len().saturating_sub(ENTRY_HEADER_SIZE);
    if payload > MAX_ENTRY_PAYLOAD {
        return Err(EntryError::EntryTooLarge { payload });
    }

    let tiers = payload.div_ceil(ENTRY_TIER_SIZE).max(1);
    // At most MAX_ENTRY_PAYLOAD / ENTRY_TIER_SIZE = 10.
    Ok(tiers as u8)
}

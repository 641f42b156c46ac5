//! # Protocol Configuration & Constants
//!
//! Every fixed number the client depends on lives here: address version
//! prefixes, payload lengths, entry limits, fee units, transaction naming
//! rules and the default collaborator endpoints.
//!
//! These values are dictated by the ledger. Changing any of them produces
//! addresses and transactions that the network will reject, so treat this
//! file as read-only unless the ledger itself changes.

// ---------------------------------------------------------------------------
// Address Format
// ---------------------------------------------------------------------------

/// Binary version prefix of a Factoid public address (`FA...`).
pub const FACTOID_PUBLIC_PREFIX: [u8; 2] = [0x5f, 0xb1];

/// Binary version prefix of a Factoid secret address (`Fs...`).
pub const FACTOID_SECRET_PREFIX: [u8; 2] = [0x64, 0x78];

/// Binary version prefix of an Entry Credit public address (`EC...`).
pub const EC_PUBLIC_PREFIX: [u8; 2] = [0x59, 0x2a];

/// Binary version prefix of an Entry Credit secret address (`Es...`).
pub const EC_SECRET_PREFIX: [u8; 2] = [0x5d, 0xb6];

/// Length of the version prefix in a decoded address.
pub const PREFIX_LENGTH: usize = 2;

/// Length of the payload carried by every address kind.
pub const PAYLOAD_LENGTH: usize = 32;

/// Length of the truncated double-SHA-256 checksum.
pub const CHECKSUM_LENGTH: usize = 4;

/// Total decoded length: prefix + payload + checksum.
pub const ADDRESS_LENGTH: usize = PREFIX_LENGTH + PAYLOAD_LENGTH + CHECKSUM_LENGTH;

/// Type byte of an RCD-1 (single Ed25519 signature) redeem condition.
pub const RCD_TYPE_1: u8 = 0x01;

// ---------------------------------------------------------------------------
// Key Derivation
// ---------------------------------------------------------------------------

/// Number of words accepted in a mnemonic phrase.
pub const MNEMONIC_WORD_COUNT: usize = 12;

/// HMAC key of the BIP-32 master node.
pub const BIP32_SEED_KEY: &[u8] = b"Bitcoin seed";

/// Hardened BIP-32 child index used for Factoid keys (`m/7'`).
pub const FACTOID_DERIVATION_INDEX: u32 = 0x8000_0007;

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// Entry header: version (1) + chain id (32) + ext-id section size (2).
pub const ENTRY_HEADER_SIZE: usize = 35;

/// Largest payload (everything after the header) an entry may carry.
pub const MAX_ENTRY_PAYLOAD: usize = 10_240;

/// One Entry Credit buys this many payload bytes.
pub const ENTRY_TIER_SIZE: usize = 1_024;

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// Version written at the start of every transaction encoding.
pub const TRANSACTION_VERSION: u64 = 2;

/// Upper bound on the signed transaction encoding, in bytes.
pub const MAX_TRANSACTION_SIZE: usize = 10_240;

/// Each list length is written as a single byte.
pub const MAX_TRANSACTION_ENTRIES: usize = u8::MAX as usize;

/// Size of a serialized RCD-1: type byte plus public key.
pub const RCD_SIZE: usize = 1 + 32;

/// Size of an Ed25519 signature block.
pub const SIGNATURE_SIZE: usize = 64;

/// Fee units charged per started kilobyte of signed encoding.
pub const FEE_UNITS_PER_KILOBYTE: u64 = 1;

/// Fee units charged per output and per EC output.
pub const FEE_UNITS_PER_OUTPUT: u64 = 10;

/// Fee units charged per signature.
pub const FEE_UNITS_PER_SIGNATURE: u64 = 10;

/// A fee at or above this multiple of the required fee is refused.
pub const MAX_FEE_MULTIPLIER: u64 = 10;

/// Longest accepted transaction name.
pub const MAX_TRANSACTION_NAME_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Default ledger node endpoint.
pub const DEFAULT_FACTOMD_SERVER: &str = "localhost:8088";

/// Default wallet daemon endpoint.
pub const DEFAULT_WALLET_SERVER: &str = "localhost:8089";

/// JSON-RPC method used to submit a signed transaction.
pub const FACTOID_SUBMIT_METHOD: &str = "factoid-submit";

/// JSON-RPC protocol version string.
pub const JSONRPC_VERSION: &str = "2.0";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_length_adds_up() {
        assert_eq!(ADDRESS_LENGTH, 38);
    }

    #[test]
    fn prefixes_are_distinct() {
        let all = [
            FACTOID_PUBLIC_PREFIX,
            FACTOID_SECRET_PREFIX,
            EC_PUBLIC_PREFIX,
            EC_SECRET_PREFIX,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn derivation_index_is_hardened() {
        assert!(FACTOID_DERIVATION_INDEX >= 0x8000_0000);
        assert_eq!(FACTOID_DERIVATION_INDEX & 0x7fff_ffff, 7);
    }

    #[test]
    fn entry_limits_are_whole_tiers() {
        assert_eq!(MAX_ENTRY_PAYLOAD % ENTRY_TIER_SIZE, 0);
    }
}

//! # Address Codec
//!
//! Every key the client handles is shown to humans as a checksummed
//! base-58 string. All four address kinds share one format:
//!
//! ```text
//! version (2 bytes) || payload (32 bytes) || shad(version || payload)[..4]
//!     -> base58 (Bitcoin alphabet)
//! ```
//!
//! The version bytes are chosen so that the first two characters of the
//! string spell the kind: `FA`, `Fs`, `EC`, `Es`.
//!
//! ## Payloads
//!
//! | Kind            | Payload                               |
//! |-----------------|---------------------------------------|
//! | Factoid public  | RCD hash, `shad(0x01 || public key)`  |
//! | Factoid secret  | 32-byte Ed25519 seed                  |
//! | EC public       | raw 32-byte Ed25519 public key        |
//! | EC secret       | 32-byte Ed25519 seed                  |
//!
//! ## Validation order
//!
//! Decoding checks length, then prefix, then checksum, and reports the
//! first failure as an [`AddressFault`]. Callers that only need a yes/no
//! answer use [`is_valid_address`] or [`address_string_type`], which never
//! fail.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::{
    ADDRESS_LENGTH, CHECKSUM_LENGTH, EC_PUBLIC_PREFIX, EC_SECRET_PREFIX, FACTOID_PUBLIC_PREFIX,
    FACTOID_SECRET_PREFIX, PAYLOAD_LENGTH, PREFIX_LENGTH,
};
use crate::crypto::hash::shad;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why an address string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFault {
    /// Not valid base-58.
    Encoding,
    /// Decoded to the wrong number of bytes.
    Length { found: usize },
    /// The version bytes match no known kind.
    Prefix,
    /// The trailing four bytes do not match the checksum.
    Checksum,
    /// Well-formed, but not the kind the caller asked for.
    WrongKind {
        expected: AddressKind,
        found: AddressKind,
    },
}

impl fmt::Display for AddressFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFault::Encoding => write!(f, "not valid base58"),
            AddressFault::Length { found } => {
                write!(f, "decoded to {found} bytes, expected {ADDRESS_LENGTH}")
            }
            AddressFault::Prefix => write!(f, "unknown version prefix"),
            AddressFault::Checksum => write!(f, "checksum mismatch"),
            AddressFault::WrongKind { expected, found } => {
                write!(f, "expected {expected} address, found {found}")
            }
        }
    }
}

/// Errors produced while decoding or deriving addresses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("invalid address {address:?}: {fault}")]
    InvalidAddress { address: String, fault: AddressFault },

    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),
}

impl AddressError {
    fn invalid(address: &str, fault: AddressFault) -> Self {
        AddressError::InvalidAddress {
            address: address.to_string(),
            fault,
        }
    }
}

// ---------------------------------------------------------------------------
// AddressKind
// ---------------------------------------------------------------------------

/// The four address kinds, plus `Invalid` for strings that decode to none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressKind {
    FactoidPublic,
    FactoidSecret,
    EcPublic,
    EcSecret,
    Invalid,
}

impl AddressKind {
    /// The binary version prefix. `None` for `Invalid`.
    pub fn version(&self) -> Option<[u8; PREFIX_LENGTH]> {
        match self {
            AddressKind::FactoidPublic => Some(FACTOID_PUBLIC_PREFIX),
            AddressKind::FactoidSecret => Some(FACTOID_SECRET_PREFIX),
            AddressKind::EcPublic => Some(EC_PUBLIC_PREFIX),
            AddressKind::EcSecret => Some(EC_SECRET_PREFIX),
            AddressKind::Invalid => None,
        }
    }

    /// The two characters every string of this kind starts with.
    pub fn display_prefix(&self) -> &'static str {
        match self {
            AddressKind::FactoidPublic => "FA",
            AddressKind::FactoidSecret => "Fs",
            AddressKind::EcPublic => "EC",
            AddressKind::EcSecret => "Es",
            AddressKind::Invalid => "",
        }
    }

    fn from_version(version: &[u8]) -> Option<Self> {
        [
            AddressKind::FactoidPublic,
            AddressKind::FactoidSecret,
            AddressKind::EcPublic,
            AddressKind::EcSecret,
        ]
        .into_iter()
        .find(|kind| kind.version().as_ref().map(|v| v.as_slice()) == Some(version))
    }

    pub fn is_secret(&self) -> bool {
        matches!(self, AddressKind::FactoidSecret | AddressKind::EcSecret)
    }
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddressKind::FactoidPublic => "factoid public",
            AddressKind::FactoidSecret => "factoid secret",
            AddressKind::EcPublic => "entry credit public",
            AddressKind::EcSecret => "entry credit secret",
            AddressKind::Invalid => "invalid",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A decoded address: its kind and 32-byte payload.
///
/// # Examples
///
/// ```
/// use factom_protocol::identity::{Address, AddressKind};
///
/// let addr: Address = "EC1m9mouvUQeEidmqpUYpYtXg8fvTYi6GNHaKg8KMLbdMBrFfmUa"
///     .parse()
///     .unwrap();
/// assert_eq!(addr.kind(), AddressKind::EcPublic);
/// assert_eq!(addr.payload(), &[0u8; 32]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Address {
    FactoidPublic([u8; PAYLOAD_LENGTH]),
    FactoidSecret([u8; PAYLOAD_LENGTH]),
    EcPublic([u8; PAYLOAD_LENGTH]),
    EcSecret([u8; PAYLOAD_LENGTH]),
}

impl Address {
    /// Pair a kind with a payload. `None` when `kind` is `Invalid`.
    pub fn new(kind: AddressKind, payload: [u8; PAYLOAD_LENGTH]) -> Option<Self> {
        match kind {
            AddressKind::FactoidPublic => Some(Address::FactoidPublic(payload)),
            AddressKind::FactoidSecret => Some(Address::FactoidSecret(payload)),
            AddressKind::EcPublic => Some(Address::EcPublic(payload)),
            AddressKind::EcSecret => Some(Address::EcSecret(payload)),
            AddressKind::Invalid => None,
        }
    }

    pub fn kind(&self) -> AddressKind {
        match self {
            Address::FactoidPublic(_) => AddressKind::FactoidPublic,
            Address::FactoidSecret(_) => AddressKind::FactoidSecret,
            Address::EcPublic(_) => AddressKind::EcPublic,
            Address::EcSecret(_) => AddressKind::EcSecret,
        }
    }

    pub fn payload(&self) -> &[u8; PAYLOAD_LENGTH] {
        match self {
            Address::FactoidPublic(p)
            | Address::FactoidSecret(p)
            | Address::EcPublic(p)
            | Address::EcSecret(p) => p,
        }
    }

    fn version(&self) -> [u8; PREFIX_LENGTH] {
        match self {
            Address::FactoidPublic(_) => FACTOID_PUBLIC_PREFIX,
            Address::FactoidSecret(_) => FACTOID_SECRET_PREFIX,
            Address::EcPublic(_) => EC_PUBLIC_PREFIX,
            Address::EcSecret(_) => EC_SECRET_PREFIX,
        }
    }

    /// Render the human-readable string.
    pub fn encode(&self) -> String {
        let mut raw = Vec::with_capacity(ADDRESS_LENGTH);
        raw.extend_from_slice(&self.version());
        raw.extend_from_slice(self.payload());
        let check = shad(&raw);
        raw.extend_from_slice(&check[..CHECKSUM_LENGTH]);
        bs58::encode(raw).into_string()
    }

    /// Parse any of the four kinds.
    pub fn decode(s: &str) -> Result<Self, AddressError> {
        let raw = bs58::decode(s)
            .into_vec()
            .map_err(|_| AddressError::invalid(s, AddressFault::Encoding))?;

        if raw.len() != ADDRESS_LENGTH {
            return Err(AddressError::invalid(
                s,
                AddressFault::Length { found: raw.len() },
            ));
        }

        let (body, check) = raw.split_at(PREFIX_LENGTH + PAYLOAD_LENGTH);
        let kind = AddressKind::from_version(&body[..PREFIX_LENGTH])
            .ok_or_else(|| AddressError::invalid(s, AddressFault::Prefix))?;

        if shad(body)[..CHECKSUM_LENGTH] != *check {
            return Err(AddressError::invalid(s, AddressFault::Checksum));
        }

        let mut payload = [0u8; PAYLOAD_LENGTH];
        payload.copy_from_slice(&body[PREFIX_LENGTH..]);
        Address::new(kind, payload).ok_or_else(|| AddressError::invalid(s, AddressFault::Prefix))
    }

    /// Parse and require a specific kind.
    pub fn decode_kind(s: &str, expected: AddressKind) -> Result<Self, AddressError> {
        let address = Self::decode(s)?;
        if address.kind() != expected {
            return Err(AddressError::invalid(
                s,
                AddressFault::WrongKind {
                    expected,
                    found: address.kind(),
                },
            ));
        }
        Ok(address)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::decode(s)
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// `true` when `s` decodes to any of the four address kinds.
pub fn is_valid_address(s: &str) -> bool {
    Address::decode(s).is_ok()
}

/// Classify an address string. Never fails: undecodable input is `Invalid`.
pub fn address_string_type(s: &str) -> AddressKind {
    Address::decode(s)
        .map(|address| address.kind())
        .unwrap_or(AddressKind::Invalid)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

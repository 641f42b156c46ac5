//! Entry structure, canonical encoding and JSON form.
//!
//! ## Binary Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ version            1 byte   (always 0x00)    │
//! │ chain id          32 bytes                   │
//! │ ext-id size        2 bytes  (u16 BE)         │
//! ├──────────────────────────────────────────────┤
//! │ per ext id:  length (u16 BE) || bytes        │
//! │ content            remaining bytes           │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The first three fields form the 35-byte header; everything after it is
//! the payload that Entry Credits pay for.
//!
//! ## JSON Form
//!
//! Entries arrive from users as JSON with hex-encoded fields:
//!
//! ```json
//! { "ChainName": ["6d79", "636861696e"], "ExtIDs": ["01"], "Content": "68656c6c6f" }
//! ```
//!
//! `ChainID` may be given directly instead of `ChainName`. A chain id is
//! derived from a name as `sha256(sha256(part_0) || sha256(part_1) || ...)`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ENTRY_HEADER_SIZE, MAX_ENTRY_PAYLOAD};
use crate::crypto::hash::{sha256_array, sha256_multi, sha52};

/// Entry encoding version.
const ENTRY_VERSION: u8 = 0x00;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("entry payload of {payload} bytes exceeds the {max}-byte limit", max = MAX_ENTRY_PAYLOAD)]
    EntryTooLarge { payload: usize },

    #[error("external ids take {size} bytes, more than a u16 length can describe")]
    ExtIdsTooLarge { size: usize },

    #[error("entry names neither ChainID nor ChainName")]
    MissingChain,

    #[error("field {field} is not valid hex: {reason}")]
    InvalidHex { field: &'static str, reason: String },

    #[error("chain id must be 32 bytes, got {0}")]
    ChainIdLength(usize),

    #[error("malformed entry encoding: {0}")]
    Malformed(String),

    #[error("entry json: {0}")]
    Json(String),
}

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// A single chain entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EntryJson", into = "EntryJson")]
pub struct Entry {
    pub chain_id: [u8; 32],
    pub ext_ids: Vec<Vec<u8>>,
    pub content: Vec<u8>,
}

impl Entry {
    pub fn new(chain_id: [u8; 32], ext_ids: Vec<Vec<u8>>, content: Vec<u8>) -> Self {
        Self {
            chain_id,
            ext_ids,
            content,
        }
    }

    /// Build an entry whose chain id is derived from `chain_name`.
    pub fn with_chain_name(chain_name: &[Vec<u8>], ext_ids: Vec<Vec<u8>>, content: Vec<u8>) -> Self {
        Self::new(chain_id_from_name(chain_name), ext_ids, content)
    }

    /// Size of the ext-id section: each id plus its 2-byte length.
    pub fn ext_ids_size(&self) -> usize {
        self.ext_ids.iter().map(|id| 2 + id.len()).sum()
    }

    /// Canonical binary encoding.
    pub fn marshal(&self) -> Result<Vec<u8>, EntryError> {
        let ext_size = self.ext_ids_size();
        let ext_size_u16 =
            u16::try_from(ext_size).map_err(|_| EntryError::ExtIdsTooLarge { size: ext_size })?;

        let mut buf = Vec::with_capacity(ENTRY_HEADER_SIZE + ext_size + self.content.len());
        buf.push(ENTRY_VERSION);
        buf.extend_from_slice(&self.chain_id);
        buf.extend_from_slice(&ext_size_u16.to_be_bytes());
        for id in &self.ext_ids {
            // Each id is shorter than the whole section, which fits in a u16.
            buf.extend_from_slice(&(id.len() as u16).to_be_bytes());
            buf.extend_from_slice(id);
        }
        buf.extend_from_slice(&self.content);
        Ok(buf)
    }

    /// Decode the canonical binary encoding.
    pub fn unmarshal(data: &[u8]) -> Result<Self, EntryError> {
        if data.len() < ENTRY_HEADER_SIZE {
            return Err(EntryError::Malformed(format!(
                "{} bytes is shorter than the header",
                data.len()
            )));
        }
        if data[0] != ENTRY_VERSION {
            return Err(EntryError::Malformed(format!("unknown version {}", data[0])));
        }

        let mut chain_id = [0u8; 32];
        chain_id.copy_from_slice(&data[1..33]);
        let ext_size = u16::from_be_bytes([data[33], data[34]]) as usize;

        let body = &data[ENTRY_HEADER_SIZE..];
        if body.len() < ext_size {
            return Err(EntryError::Malformed("ext-id section runs past the end".into()));
        }
        let (mut ext, content) = body.split_at(ext_size);

        let mut ext_ids = Vec::new();
        while !ext.is_empty() {
            if ext.len() < 2 {
                return Err(EntryError::Malformed("dangling ext-id length".into()));
            }
            let len = u16::from_be_bytes([ext[0], ext[1]]) as usize;
            ext = &ext[2..];
            if ext.len() < len {
                return Err(EntryError::Malformed("ext id runs past its section".into()));
            }
            ext_ids.push(ext[..len].to_vec());
            ext = &ext[len..];
        }

        Ok(Self {
            chain_id,
            ext_ids,
            content: content.to_vec(),
        })
    }

    /// The entry hash: `sha52(marshal)`.
    pub fn hash(&self) -> Result<[u8; 32], EntryError> {
        Ok(sha52(&self.marshal()?))
    }

    /// Parse the user-facing JSON form.
    pub fn from_json(json: &str) -> Result<Self, EntryError> {
        serde_json::from_str(json).map_err(|e| EntryError::Json(e.to_string()))
    }

    /// Render the JSON form with an explicit `ChainID`.
    pub fn to_json(&self) -> Result<String, EntryError> {
        serde_json::to_string(self).map_err(|e| EntryError::Json(e.to_string()))
    }
}

/// Derive a chain id from the parts of a chain name.
pub fn chain_id_from_name(parts: &[Vec<u8>]) -> [u8; 32] {
    let digests: Vec<[u8; 32]> = parts.iter().map(|p| sha256_array(p)).collect();
    let refs: Vec<&[u8]> = digests.iter().map(|d| d.as_slice()).collect();
    sha256_multi(&refs)
}

// ---------------------------------------------------------------------------
// JSON shape
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct EntryJson {
    #[serde(rename = "ChainID", default, skip_serializing_if = "Option::is_none")]
    chain_id: Option<String>,
    #[serde(rename = "ChainName", default, skip_serializing_if = "Option::is_none")]
    chain_name: Option<Vec<String>>,
    #[serde(rename = "ExtIDs", default)]
    ext_ids: Vec<String>,
    #[serde(rename = "Content", default)]
    content: String,
}

fn decode_hex(field: &'static str, s: &str) -> Result<Vec<u8>, EntryError> {
    hex::decode(s).map_err(|e| EntryError::InvalidHex {
        field,
        reason: e.to_string(),
    })
}

impl TryFrom<EntryJson> for Entry {
    type Error = EntryError;

    fn try_from(json: EntryJson) -> Result<Self, Self::Error> {
        let chain_id = match (json.chain_id, json.chain_name) {
            (Some(id), _) => {
                let bytes = decode_hex("ChainID", &id)?;
                <[u8; 32]>::try_from(bytes.as_slice())
                    .map_err(|_| EntryError::ChainIdLength(bytes.len()))?
            }
            (None, Some(name)) => {
                let parts = name
                    .iter()
                    .map(|p| decode_hex("ChainName", p))
                    .collect::<Result<Vec<_>, _>>()?;
                chain_id_from_name(&parts)
            }
            (None, None) => return Err(EntryError::MissingChain),
        };

        let ext_ids = json
            .ext_ids
            .iter()
            .map(|id| decode_hex("ExtIDs", id))
            .collect::<Result<Vec<_>, _>>()?;
        let content = decode_hex("Content", &json.content)?;

        Ok(Entry::new(chain_id, ext_ids, content))
    }
}

impl From<Entry> for EntryJson {
    fn from(entry: Entry) -> Self {
        EntryJson {
            chain_id: Some(hex::encode(entry.chain_id)),
            chain_name: None,
            ext_ids: entry.ext_ids.iter().map(hex::encode).collect(),
            content: hex::encode(entry.content),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Entry {
        Entry::new(
            [0x11; 32],
            vec![b"first".to_vec(), Vec::new(), b"third".to_vec()],
            b"hello factom".to_vec(),
        )
    }

    #[test]
    fn marshal_layout() {
        let entry = sample();
        let raw = entry.marshal().unwrap();

        assert_eq!(raw[0], 0x00);
        assert_eq!(&raw[1..33], &[0x11; 32]);
        // 2 + 5, 2 + 0, 2 + 5
        assert_eq!(u16::from_be_bytes([raw[33], raw[34]]), 16);
        assert_eq!(&raw[35..37], &[0x00, 0x05]);
        assert_eq!(&raw[37..42], b"first");
        assert_eq!(raw.len(), ENTRY_HEADER_SIZE + 16 + entry.content.len());
        assert!(raw.ends_with(b"hello factom"));
    }

    #[test]
    fn unmarshal_inverts_marshal() {
        let entry = sample();
        let raw = entry.marshal().unwrap();
        assert_eq!(Entry::unmarshal(&raw).unwrap(), entry);
    }

    #[test]
    fn unmarshal_rejects_truncated_input() {
        let raw = sample().marshal().unwrap();
        assert!(Entry::unmarshal(&raw[..20]).is_err());
        // Cut inside the ext-id section.
        assert!(Entry::unmarshal(&raw[..40]).is_err());
    }

    #[test]
    fn empty_entry_is_header_only() {
        let entry = Entry::new([0u8; 32], Vec::new(), Vec::new());
        assert_eq!(entry.marshal().unwrap().len(), ENTRY_HEADER_SIZE);
    }

    #[test]
    fn oversized_ext_ids_rejected() {
        let entry = Entry::new([0u8; 32], vec![vec![0u8; 70_000]], Vec::new());
        assert!(matches!(
            entry.marshal(),
            Err(EntryError::ExtIdsTooLarge { size: 70_002 })
        ));
    }

    #[test]
    fn hash_is_sha52_of_encoding() {
        let entry = sample();
        assert_eq!(entry.hash().unwrap(), sha52(&entry.marshal().unwrap()));
    }

    #[test]
    fn chain_id_from_name_hashes_each_part() {
        let parts = vec![b"my".to_vec(), b"chain".to_vec()];
        let mut joined = sha256_array(b"my").to_vec();
        joined.extend_from_slice(&sha256_array(b"chain"));
        assert_eq!(chain_id_from_name(&parts), sha256_array(&joined));
    }

    #[test]
    fn json_with_chain_name() {
        let json = r#"{"ChainName":["6d79","636861696e"],"ExtIDs":["01ff"],"Content":"68656c6c6f"}"#;
        let entry = Entry::from_json(json).unwrap();
        assert_eq!(
            entry.chain_id,
            chain_id_from_name(&[b"my".to_vec(), b"chain".to_vec()])
        );
        assert_eq!(entry.ext_ids, vec![vec![0x01, 0xff]]);
        assert_eq!(entry.content, b"hello");
    }

    #[test]
    fn json_with_chain_id_roundtrip() {
        let entry = sample();
        let json = entry.to_json().unwrap();
        assert!(json.contains("\"ChainID\""));
        assert_eq!(Entry::from_json(&json).unwrap(), entry);
    }

    #[test]
    fn json_without_chain_rejected() {
        let err = Entry::from_json(r#"{"Content":"00"}"#).unwrap_err();
        assert!(matches!(err, EntryError::Json(msg) if msg.contains("ChainID")));
    }

    #[test]
    fn json_bad_hex_rejected() {
        assert!(Entry::from_json(r#"{"ChainID":"zz","Content":""}"#).is_err());
        assert!(Entry::from_json(r#"{"ChainID":"00","Content":""}"#).is_err());
    }
}

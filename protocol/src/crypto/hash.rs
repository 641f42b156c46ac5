//! # Hashing Utilities
//!
//! The ledger builds everything on the SHA-2 family. Three constructions
//! show up across the client:
//!
//! - **SHA-256**: chain names, transaction ids.
//! - **shad** (`SHA-256(SHA-256(x))`): address checksums and RCD hashes.
//! - **sha52** (`SHA-256(SHA-512(x) || x)`): entry hashes.
//!
//! All functions are pure and allocation-light. Fixed-size arrays are
//! returned where callers store the digest; `sha256` returns a `Vec` for
//! the places that immediately splice it into a larger buffer.

use sha2::{Digest, Sha256, Sha512};

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use factom_protocol::crypto::sha256;
///
/// let hash = sha256(b"factom");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> Vec<u8> {
    Sha256::digest(data).to_vec()
}

/// Compute the SHA-256 hash and return a fixed-size array.
pub fn sha256_array(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Double SHA-256: `SHA-256(SHA-256(data))`.
///
/// Used for the 4-byte address checksum and for the RCD hash that forms
/// the payload of a Factoid public address.
///
/// # Example
///
/// ```
/// use factom_protocol::crypto::shad;
///
/// let digest = shad(b"raw transaction bytes");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn shad(data: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(data)).into()
}

/// `SHA-256(SHA-512(data) || data)`.
///
/// The entry hash. Prepending the SHA-512 digest means an attacker has
/// to break both functions to forge an entry.
pub fn sha52(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(Sha512::digest(data));
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash several byte slices as one message without concatenating them.
pub fn sha256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        let hash = sha256(b"");
        let expected =
            hex::decode("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
                .unwrap();
        assert_eq!(hash, expected);
    }

    #[test]
    fn test_sha256_array_matches_vec() {
        let vec_result = sha256(b"test data");
        let arr_result = sha256_array(b"test data");
        assert_eq!(vec_result.as_slice(), arr_result.as_slice());
    }

    #[test]
    fn shad_is_sha256_twice() {
        let once = sha256(b"abc");
        assert_eq!(shad(b"abc").to_vec(), sha256(&once));
    }

    #[test]
    fn shad_known_vector() {
        // Bitcoin's canonical double-SHA-256 of the empty string.
        let expected =
            hex::decode("5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456")
                .unwrap();
        assert_eq!(shad(b"").to_vec(), expected);
    }

    #[test]
    fn sha52_matches_manual_construction() {
        let data = b"entry bytes";
        let mut buf = Sha512::digest(data).to_vec();
        buf.extend_from_slice(data);
        assert_eq!(sha52(data), sha256_array(&buf));
    }

    #[test]
    fn sha52_differs_from_sha256() {
        assert_ne!(sha52(b"x"), sha256_array(b"x"));
    }

    #[test]
    fn multi_equals_concatenation() {
        let joined = sha256_array(b"helloworld");
        assert_eq!(sha256_multi(&[b"hello", b"world"]), joined);
        assert_eq!(sha256_multi(&[]), sha256_array(b""));
    }
}

//! # Cryptographic Primitives
//!
//! Hashing, the signature-scheme seam and key material. Everything here is
//! a thin, typed wrapper around `sha2` and `ed25519-dalek`; nothing above
//! this module touches those crates directly.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{sha256, sha256_array, sha52, shad};
pub use keys::{KeyError, KeyPair};
pub use signatures::{Ed25519, SignatureScheme};

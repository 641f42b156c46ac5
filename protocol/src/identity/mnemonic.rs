//! Deterministic key derivation from a 12-word mnemonic.
//!
//! The phrase is a standard BIP-39 English mnemonic. Derivation runs:
//!
//! ```text
//! phrase -> PBKDF2-HMAC-SHA512("mnemonic", 2048 rounds)  (BIP-39 seed)
//!        -> HMAC-SHA512("Bitcoin seed", seed)             (BIP-32 master)
//!        -> hardened child m/7'                           (secp256k1 scalar add)
//!        -> 32-byte child key, used as the Ed25519 seed
//! ```
//!
//! Only the private half of BIP-32 is needed: hardened children never touch
//! the parent's public point, so the derivation is one HMAC and one scalar
//! addition modulo the secp256k1 group order.

use bip39::{Language, Mnemonic};
use hmac::{Hmac, Mac};
use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, Scalar};
use sha2::Sha512;
use zeroize::Zeroizing;

use super::address::AddressError;
use crate::config::{BIP32_SEED_KEY, FACTOID_DERIVATION_INDEX, MNEMONIC_WORD_COUNT};

type HmacSha512 = Hmac<Sha512>;

/// An extended private key: secret scalar bytes plus chain code.
struct ExtendedKey {
    key: Zeroizing<[u8; 32]>,
    chain_code: Zeroizing<[u8; 32]>,
}

/// Normalize a phrase: trim, lowercase, collapse whitespace.
fn normalize(words: &str) -> String {
    words
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> Result<Zeroizing<[u8; 64]>, AddressError> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| AddressError::InvalidMnemonic(format!("hmac key: {e}")))?;
    for part in parts {
        mac.update(part);
    }
    let mut out = Zeroizing::new([0u8; 64]);
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

fn split(digest: &[u8; 64]) -> ExtendedKey {
    let mut key = Zeroizing::new([0u8; 32]);
    let mut chain_code = Zeroizing::new([0u8; 32]);
    key.copy_from_slice(&digest[..32]);
    chain_code.copy_from_slice(&digest[32..]);
    ExtendedKey { key, chain_code }
}

fn scalar(bytes: &[u8; 32]) -> Option<Scalar> {
    Option::from(Scalar::from_repr(FieldBytes::clone_from_slice(bytes)))
}

fn master_key(seed: &[u8]) -> Result<ExtendedKey, AddressError> {
    let digest = hmac_sha512(BIP32_SEED_KEY, &[seed])?;
    let master = split(&digest);
    match scalar(&master.key) {
        Some(k) if k != Scalar::ZERO => Ok(master),
        _ => Err(AddressError::InvalidMnemonic(
            "master key outside the curve order".into(),
        )),
    }
}

fn hardened_child(parent: &ExtendedKey, index: u32) -> Result<ExtendedKey, AddressError> {
    let digest = hmac_sha512(
        parent.chain_code.as_slice(),
        &[&[0x00], parent.key.as_slice(), &index.to_be_bytes()],
    )?;
    let step = split(&digest);

    let tweak = scalar(&step.key);
    let parent_key = scalar(&parent.key);
    let (Some(tweak), Some(parent_key)) = (tweak, parent_key) else {
        return Err(AddressError::InvalidMnemonic(format!(
            "child {index:#x} is not a valid scalar"
        )));
    };

    let child = tweak + parent_key;
    if child == Scalar::ZERO {
        return Err(AddressError::InvalidMnemonic(format!(
            "child {index:#x} is zero"
        )));
    }

    let mut key = Zeroizing::new([0u8; 32]);
    key.copy_from_slice(&child.to_repr());
    Ok(ExtendedKey {
        key,
        chain_code: step.chain_code,
    })
}

/// Derive the Factoid Ed25519 seed for a 12-word mnemonic.
///
/// Fails with [`AddressError::InvalidMnemonic`] when the phrase does not
/// have exactly twelve words, contains a word outside the English list,
/// or carries a bad checksum.
pub fn factoid_seed_from_mnemonic(words: &str) -> Result<Zeroizing<[u8; 32]>, AddressError> {
    let phrase = Zeroizing::new(normalize(words));
    let count = phrase.split(' ').filter(|w| !w.is_empty()).count();
    if count != MNEMONIC_WORD_COUNT {
        return Err(AddressError::InvalidMnemonic(format!(
            "expected {MNEMONIC_WORD_COUNT} words, found {count}"
        )));
    }

    let mnemonic = Mnemonic::parse_in_normalized(Language::English, &phrase)
        .map_err(|e| AddressError::InvalidMnemonic(e.to_string()))?;
    let seed = Zeroizing::new(mnemonic.to_seed_normalized(""));

    let master = master_key(seed.as_slice())?;
    let child = hardened_child(&master, FACTOID_DERIVATION_INDEX)?;
    Ok(child.key)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const YELLOW: &str =
        "yellow yellow yellow yellow yellow yellow yellow yellow yellow yellow yellow yellow";

    #[test]
    fn normalize_collapses_case_and_spacing() {
        assert_eq!(normalize("  Yellow\tYELLOW  yellow "), "yellow yellow yellow");
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = factoid_seed_from_mnemonic(YELLOW).unwrap();
        let b = factoid_seed_from_mnemonic(&YELLOW.to_uppercase()).unwrap();
        assert_eq!(*a, *b);
    }

    #[test]
    fn wrong_word_count_rejected() {
        let eleven = YELLOW.rsplit_once(' ').unwrap().0;
        assert!(matches!(
            factoid_seed_from_mnemonic(eleven),
            Err(AddressError::InvalidMnemonic(_))
        ));
        let thirteen = format!("{YELLOW} yellow");
        assert!(factoid_seed_from_mnemonic(&thirteen).is_err());
        assert!(factoid_seed_from_mnemonic("").is_err());
    }

    #[test]
    fn unknown_word_rejected() {
        let phrase = YELLOW.replacen("yellow", "factom", 1);
        assert!(matches!(
            factoid_seed_from_mnemonic(&phrase),
            Err(AddressError::InvalidMnemonic(_))
        ));
    }

    #[test]
    fn bad_checksum_rejected() {
        // Every word valid, but twelve copies of "abandon" fail the checksum.
        let phrase = vec!["abandon"; 12].join(" ");
        assert!(factoid_seed_from_mnemonic(&phrase).is_err());
    }

    #[test]
    fn different_phrases_give_different_seeds() {
        let other = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
        let a = factoid_seed_from_mnemonic(YELLOW).unwrap();
        let b = factoid_seed_from_mnemonic(other).unwrap();
        assert_ne!(*a, *b);
    }
}

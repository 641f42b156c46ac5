//! Transaction signing with Ed25519 keypairs.
//!
//! Every input is signed independently over the same bytes: the output of
//! [`Transaction::marshal_binary_sig`]. Signature `i` belongs to RCD `i`,
//! which in turn belongs to input `i`.
//!
//! Signing is all-or-nothing. Every key is checked against its RCD and
//! every signature is produced before any of them is installed, so a
//! failure leaves the transaction exactly as it was.

use super::builder::Transaction;
use super::types::TransactionError;
use crate::identity::FactoidAddress;

/// Signs every input of `tx` and freezes it.
///
/// `signers[i]` must hold the secret key for `tx.rcds()[i]`. Fee policy is
/// not checked here; see [`super::fee::check_fee`].
///
/// # Example
///
/// ```
/// use factom_protocol::identity::FactoidAddress;
/// use factom_protocol::transaction::{sign_transaction, Rcd, Transaction};
///
/// let key = FactoidAddress::generate();
/// let mut tx = Transaction::new();
/// tx.set_input(Rcd::new(key.public_key()), 1_000).unwrap();
///
/// sign_transaction(&mut tx, &[key]).unwrap();
/// assert!(tx.verify_signatures());
/// ```
pub fn sign_transaction(
    tx: &mut Transaction,
    signers: &[FactoidAddress],
) -> Result<(), TransactionError> {
    if tx.is_signed() {
        return Err(TransactionError::Finalized);
    }
    if tx.rcds().is_empty() {
        return Err(TransactionError::NoInputs);
    }
    if signers.len() != tx.rcds().len() {
        return Err(TransactionError::SignerCount {
            expected: tx.rcds().len(),
            got: signers.len(),
        });
    }
    for (index, (signer, rcd)) in signers.iter().zip(tx.rcds()).enumerate() {
        if signer.public_key() != rcd.public_key {
            return Err(TransactionError::SignerMismatch { index });
        }
    }

    let data = tx.marshal_binary_sig();
    let signatures = signers
        .iter()
        .enumerate()
        .map(|(index, signer)| {
            signer
                .sign(&data)
                .map_err(|_| TransactionError::MissingSecret { index })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tx.apply_signatures(signatures)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::KeyPair;
    use crate::crypto::signatures::{Ed25519, SignatureScheme};
    use crate::transaction::types::Rcd;

    fn two_input_tx(a: &FactoidAddress, b: &FactoidAddress) -> Transaction {
        let mut tx = Transaction::with_timestamp(1_700_000_000_000);
        tx.set_input(Rcd::new(a.public_key()), 500).unwrap();
        tx.set_input(Rcd::new(b.public_key()), 700).unwrap();
        tx.set_output([9u8; 32], 1_000).unwrap();
        tx
    }

    #[test]
    fn every_input_gets_a_valid_signature() {
        let a = FactoidAddress::generate();
        let b = FactoidAddress::generate();
        let mut tx = two_input_tx(&a, &b);

        sign_transaction(&mut tx, &[a.clone(), b.clone()]).unwrap();

        let data = tx.marshal_binary_sig();
        for (rcd, sig) in tx.rcds().iter().zip(tx.signatures()) {
            let sig = sig.expect("signed");
            assert!(Ed25519::verify(&rcd.public_key, &data, &sig));
        }
        assert!(tx.is_signed());
        assert!(tx.verify_signatures());
    }

    #[test]
    fn signing_does_not_change_id() {
        let a = FactoidAddress::generate();
        let b = FactoidAddress::generate();
        let mut tx = two_input_tx(&a, &b);

        let id_before = tx.id();
        sign_transaction(&mut tx, &[a, b]).unwrap();
        assert_eq!(tx.id(), id_before, "signing must not change the transaction ID");
    }

    #[test]
    fn signing_is_deterministic() {
        let a = FactoidAddress::from_seed(&[1u8; 32]);
        let b = FactoidAddress::from_seed(&[2u8; 32]);
        let mut tx1 = two_input_tx(&a, &b);
        let mut tx2 = two_input_tx(&a, &b);

        sign_transaction(&mut tx1, &[a.clone(), b.clone()]).unwrap();
        sign_transaction(&mut tx2, &[a, b]).unwrap();
        assert_eq!(tx1.signatures(), tx2.signatures());
    }

    #[test]
    fn wrong_key_order_leaves_tx_untouched() {
        let a = FactoidAddress::generate();
        let b = FactoidAddress::generate();
        let mut tx = two_input_tx(&a, &b);
        let before = tx.clone();

        let err = sign_transaction(&mut tx, &[b, a]).unwrap_err();
        assert_eq!(err, TransactionError::SignerMismatch { index: 0 });
        assert_eq!(tx, before);
    }

    #[test]
    fn watch_only_key_cannot_sign() {
        let a = FactoidAddress::generate();
        let watch = FactoidAddress::from_key_pair(KeyPair::from_public_key(a.public_key()));
        let mut tx = Transaction::with_timestamp(1);
        tx.set_input(Rcd::new(a.public_key()), 5).unwrap();

        assert_eq!(
            sign_transaction(&mut tx, &[watch]),
            Err(TransactionError::MissingSecret { index: 0 })
        );
        assert!(!tx.is_signed());
    }

    #[test]
    fn no_inputs_and_wrong_count_rejected() {
        let mut empty = Transaction::with_timestamp(1);
        assert_eq!(
            sign_transaction(&mut empty, &[]),
            Err(TransactionError::NoInputs)
        );

        let a = FactoidAddress::generate();
        let b = FactoidAddress::generate();
        let mut tx = two_input_tx(&a, &b);
        assert_eq!(
            sign_transaction(&mut tx, &[a]),
            Err(TransactionError::SignerCount {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn second_signing_is_refused() {
        let a = FactoidAddress::generate();
        let mut tx = Transaction::with_timestamp(1);
        tx.set_input(Rcd::new(a.public_key()), 5).unwrap();
        sign_transaction(&mut tx, std::slice::from_ref(&a)).unwrap();
        let sigs = tx.signatures().to_vec();

        assert_eq!(
            sign_transaction(&mut tx, &[a]),
            Err(TransactionError::Finalized)
        );
        assert_eq!(tx.signatures(), sigs.as_slice());
    }
}

//! Binary wire encoding of Factoid transactions.
//!
//! ## Layout
//!
//! ```text
//! varint   version (2)
//! 6 bytes  timestamp, Unix milliseconds, big-endian
//! u8       #inputs
//! u8       #outputs
//! u8       #ec outputs
//! inputs       varint(amount) || 32-byte RCD hash
//! outputs      varint(amount) || 32-byte RCD hash
//! ec outputs   varint(amount) || 32-byte EC public key
//! ---------------------------------------- marshal_binary_sig ends here
//! per input:   RCD (0x01 || public key) || signature (64 bytes, if signed)
//! ```
//!
//! Signatures cover everything above the line, so the signed prefix is
//! also what the transaction id hashes.
//!
//! ## Varints
//!
//! Big-endian base-128: seven value bits per byte, high bit set on every
//! byte except the last. Zero is the single byte `0x00`. A full `u64`
//! needs ten bytes.

use super::builder::Transaction;
use super::types::{Rcd, TransactionError, Transfer};
use crate::config::{RCD_TYPE_1, SIGNATURE_SIZE, TRANSACTION_VERSION};

/// Append the varint encoding of `value` to `buf`.
pub fn encode_varint(buf: &mut Vec<u8>, value: u64) {
    if value == 0 {
        buf.push(0x00);
        return;
    }

    let mut started = false;
    if value & 0x8000_0000_0000_0000 != 0 {
        buf.push(0x81);
        started = true;
    }
    for i in 0..9u32 {
        let mut byte = ((value >> (56 - 7 * i)) & 0x7f) as u8;
        if byte != 0 || started {
            started = true;
            if i != 8 {
                byte |= 0x80;
            }
            buf.push(byte);
        }
    }
}

/// Decode a varint from the front of `data`, returning the value and the
/// number of bytes consumed.
pub fn decode_varint(data: &[u8]) -> Result<(u64, usize), TransactionError> {
    let mut value: u64 = 0;
    for (i, byte) in data.iter().enumerate() {
        if value > (u64::MAX >> 7) {
            return Err(TransactionError::Malformed("varint overflows u64".into()));
        }
        value = (value << 7) | u64::from(byte & 0x7f);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(TransactionError::Malformed("truncated varint".into()))
}

/// The low 48 bits of a millisecond timestamp, big-endian.
pub fn milli_time_bytes(millis: u64) -> [u8; 6] {
    let full = millis.to_be_bytes();
    let mut out = [0u8; 6];
    out.copy_from_slice(&full[2..]);
    out
}

fn put_transfers(buf: &mut Vec<u8>, lines: &[Transfer]) {
    for line in lines {
        encode_varint(buf, line.amount);
        buf.extend_from_slice(&line.address);
    }
}

impl Transaction {
    /// The signed portion of the encoding: header and all three lists.
    pub fn marshal_binary_sig(&self) -> Vec<u8> {
        let lines = self.inputs().len() + self.outputs().len() + self.ec_outputs().len();
        let mut buf = Vec::with_capacity(10 + lines * 42);

        encode_varint(&mut buf, TRANSACTION_VERSION);
        buf.extend_from_slice(&milli_time_bytes(self.timestamp()));
        // List lengths are capped at u8::MAX by the builder.
        buf.push(self.inputs().len() as u8);
        buf.push(self.outputs().len() as u8);
        buf.push(self.ec_outputs().len() as u8);

        put_transfers(&mut buf, self.inputs());
        put_transfers(&mut buf, self.outputs());
        put_transfers(&mut buf, self.ec_outputs());
        buf
    }

    /// The full encoding: signed portion followed by each input's RCD and
    /// signature. Unsigned inputs contribute only their RCD.
    pub fn marshal_binary(&self) -> Vec<u8> {
        let mut buf = self.marshal_binary_sig();
        for (rcd, signature) in self.rcds().iter().zip(self.signatures()) {
            buf.extend_from_slice(&rcd.to_bytes());
            if let Some(signature) = signature {
                buf.extend_from_slice(signature);
            }
        }
        buf
    }

    /// Decode a fully signed encoding produced by [`marshal_binary`].
    ///
    /// Unsigned encodings are ambiguous (the reader cannot tell an RCD from
    /// a missing signature) and are rejected unless there are no inputs.
    ///
    /// [`marshal_binary`]: Transaction::marshal_binary
    pub fn unmarshal_binary(data: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = Reader { data, pos: 0 };

        let version = reader.varint()?;
        if version != TRANSACTION_VERSION {
            return Err(TransactionError::Malformed(format!(
                "unsupported version {version}"
            )));
        }

        let mut time = [0u8; 8];
        time[2..].copy_from_slice(reader.take(6)?);
        let timestamp = u64::from_be_bytes(time);

        let counts = reader.take(3)?;
        let (n_in, n_out, n_ec) = (counts[0] as usize, counts[1] as usize, counts[2] as usize);

        let inputs = reader.transfers(n_in)?;
        let outputs = reader.transfers(n_out)?;
        let ec_outputs = reader.transfers(n_ec)?;

        let mut rcds = Vec::with_capacity(n_in);
        let mut signatures = Vec::with_capacity(n_in);
        for _ in 0..n_in {
            let rcd = reader.take(33)?;
            if rcd[0] != RCD_TYPE_1 {
                return Err(TransactionError::Malformed(format!(
                    "unsupported rcd type {}",
                    rcd[0]
                )));
            }
            let mut public_key = [0u8; 32];
            public_key.copy_from_slice(&rcd[1..]);
            rcds.push(Rcd::new(public_key));

            let mut signature = [0u8; SIGNATURE_SIZE];
            signature.copy_from_slice(reader.take(SIGNATURE_SIZE)?);
            signatures.push(Some(signature));
        }

        if reader.pos != data.len() {
            return Err(TransactionError::Malformed(format!(
                "{} trailing bytes",
                data.len() - reader.pos
            )));
        }

        for (input, rcd) in inputs.iter().zip(&rcds) {
            if input.address != rcd.hash() {
                return Err(TransactionError::Malformed(
                    "rcd does not hash to its input address".into(),
                ));
            }
        }

        Ok(Transaction::from_parts(
            timestamp, inputs, outputs, ec_outputs, rcds, signatures,
        ))
    }
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], TransactionError> {
        let end = self.pos + n;
        if end > self.data.len() {
            return Err(TransactionError::Malformed(format!(
                "needed {n} bytes at offset {}, only {} left",
                self.pos,
                self.data.len() - self.pos
            )));
        }
        let out = &self.data[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    fn varint(&mut self) -> Result<u64, TransactionError> {
        let (value, used) = decode_varint(&self.data[self.pos..])?;
        self.pos += used;
        Ok(value)
    }

    fn transfers(&mut self, n: usize) -> Result<Vec<Transfer>, TransactionError> {
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            let amount = self.varint()?;
            let mut address = [0u8; 32];
            address.copy_from_slice(self.take(32)?);
            out.push(Transfer::new(address, amount));
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::FactoidAddress;
    use crate::transaction::signing::sign_transaction;

    fn varint(value: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_varint(&mut buf, value);
        buf
    }

    #[test]
    fn varint_known_encodings() {
        assert_eq!(varint(0), vec![0x00]);
        assert_eq!(varint(1), vec![0x01]);
        assert_eq!(varint(127), vec![0x7f]);
        assert_eq!(varint(128), vec![0x81, 0x00]);
        assert_eq!(varint(300), vec![0x82, 0x2c]);
        assert_eq!(varint(16_384), vec![0x81, 0x80, 0x00]);
    }

    #[test]
    fn varint_u64_max_is_ten_bytes() {
        let encoded = varint(u64::MAX);
        assert_eq!(encoded.len(), 10);
        assert_eq!(encoded[0], 0x81);
        assert_eq!(*encoded.last().unwrap(), 0x7f);
        assert_eq!(decode_varint(&encoded).unwrap(), (u64::MAX, 10));
    }

    #[test]
    fn varint_decode_boundaries() {
        for value in [0, 1, 127, 128, 255, 1 << 35, (1 << 63) - 1, 1 << 63] {
            let encoded = varint(value);
            assert_eq!(decode_varint(&encoded).unwrap(), (value, encoded.len()));
        }
    }

    #[test]
    fn varint_decode_rejects_truncation_and_overflow() {
        assert!(decode_varint(&[]).is_err());
        assert!(decode_varint(&[0x81, 0x80]).is_err());
        assert!(decode_varint(&[0xff; 11]).is_err());
    }

    #[test]
    fn milli_time_drops_high_bytes() {
        assert_eq!(
            milli_time_bytes(0x0000_0123_4567_89ab),
            [0x01, 0x23, 0x45, 0x67, 0x89, 0xab]
        );
    }

    #[test]
    fn header_layout() {
        let mut tx = Transaction::with_timestamp(0x0102_0304_0506);
        tx.set_output([7u8; 32], 5).unwrap();
        let raw = tx.marshal_binary_sig();

        assert_eq!(raw[0], 0x02);
        assert_eq!(&raw[1..7], &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
        assert_eq!(&raw[7..10], &[0, 1, 0]);
        assert_eq!(raw[10], 0x05);
        assert_eq!(&raw[11..43], &[7u8; 32]);
        assert_eq!(raw.len(), 43);
    }

    #[test]
    fn unsigned_full_encoding_appends_rcds_only() {
        let fa = FactoidAddress::from_seed(&[1u8; 32]);
        let mut tx = Transaction::with_timestamp(1);
        tx.set_input(Rcd::new(fa.public_key()), 10).unwrap();

        let sig_part = tx.marshal_binary_sig();
        let full = tx.marshal_binary();
        assert_eq!(&full[..sig_part.len()], sig_part.as_slice());
        assert_eq!(&full[sig_part.len()..], &fa.rcd());
    }

    #[test]
    fn signed_encoding_decodes() {
        let fa = FactoidAddress::from_seed(&[1u8; 32]);
        let mut tx = Transaction::with_timestamp(1_700_000_000_000);
        tx.set_input(Rcd::new(fa.public_key()), 1_000_000).unwrap();
        tx.set_output([3u8; 32], 900_000).unwrap();
        tx.set_ec_output([4u8; 32], 50_000).unwrap();
        sign_transaction(&mut tx, &[fa]).unwrap();

        let decoded = Transaction::unmarshal_binary(&tx.marshal_binary()).unwrap();
        assert_eq!(decoded, tx);
        assert!(decoded.verify_signatures());
    }

    #[test]
    fn decode_rejects_trailing_and_truncated_bytes() {
        let tx = Transaction::with_timestamp(5);
        let mut raw = tx.marshal_binary();
        assert!(Transaction::unmarshal_binary(&raw).is_ok());
        raw.push(0);
        assert!(Transaction::unmarshal_binary(&raw).is_err());
        assert!(Transaction::unmarshal_binary(&raw[..4]).is_err());
    }
}

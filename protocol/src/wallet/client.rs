//! The wallet handle and its address operations.

use std::sync::Arc;
use tracing::info;

use super::error::{WalletError, WalletResult};
use super::keystore::KeyStore;
use super::registry::TransactionRegistry;
use crate::identity::{Address, AddressFault, AddressKind, EcAddress, FactoidAddress};
use crate::network::RateSource;

/// Entry point for address management and transaction building.
///
/// Holds the two collaborators it needs (a key store and a rate source)
/// and the registry of named transactions. Every method takes `&self`, so
/// a `Wallet` can be shared between threads behind an `Arc`.
pub struct Wallet {
    pub(super) keys: Arc<dyn KeyStore>,
    pub(super) rates: Arc<dyn RateSource>,
    pub(super) transactions: TransactionRegistry,
}

impl Wallet {
    pub fn new(keys: Arc<dyn KeyStore>, rates: Arc<dyn RateSource>) -> Self {
        Self {
            keys,
            rates,
            transactions: TransactionRegistry::new(),
        }
    }

    pub fn key_store(&self) -> &dyn KeyStore {
        self.keys.as_ref()
    }

    // -- Address generation -------------------------------------------------

    /// Create and store a fresh Factoid address. Returns the `FA...` string.
    pub fn generate_factoid_address(&self) -> WalletResult<String> {
        let address = FactoidAddress::generate();
        self.keys.put_factoid_address(&address)?;
        let public = address.public_string();
        info!(address = %public, "generated factoid address");
        Ok(public)
    }

    /// Create and store a fresh Entry Credit address. Returns the `EC...` string.
    pub fn generate_ec_address(&self) -> WalletResult<String> {
        let address = EcAddress::generate();
        self.keys.put_ec_address(&address)?;
        let public = address.public_string();
        info!(address = %public, "generated entry credit address");
        Ok(public)
    }

    // -- Imports ------------------------------------------------------------

    pub fn import_mnemonic(&self, words: &str) -> WalletResult<String> {
        let address = FactoidAddress::from_mnemonic(words)?;
        self.keys.put_factoid_address(&address)?;
        let public = address.public_string();
        info!(address = %public, "imported factoid address from mnemonic");
        Ok(public)
    }

    pub fn import_factoid_secret(&self, secret: &str) -> WalletResult<String> {
        let address = FactoidAddress::from_secret_string(secret)?;
        self.keys.put_factoid_address(&address)?;
        let public = address.public_string();
        info!(address = %public, "imported factoid secret");
        Ok(public)
    }

    pub fn import_ec_secret(&self, secret: &str) -> WalletResult<String> {
        let address = EcAddress::from_secret_string(secret)?;
        self.keys.put_ec_address(&address)?;
        let public = address.public_string();
        info!(address = %public, "imported entry credit secret");
        Ok(public)
    }

    /// Import an `Fs...` or `Es...` string, whichever it is.
    ///
    /// Public address strings are refused with a `WrongKind` fault.
    pub fn import_secret(&self, secret: &str) -> WalletResult<String> {
        match Address::decode(secret)? {
            Address::FactoidSecret(_) => self.import_factoid_secret(secret),
            Address::EcSecret(_) => self.import_ec_secret(secret),
            public => Err(WalletError::InvalidAddress {
                address: secret.to_string(),
                fault: AddressFault::WrongKind {
                    expected: match public.kind() {
                        AddressKind::EcPublic => AddressKind::EcSecret,
                        _ => AddressKind::FactoidSecret,
                    },
                    found: public.kind(),
                },
            }),
        }
    }

    // -- Listing ------------------------------------------------------------

    pub fn factoid_addresses(&self) -> WalletResult<Vec<String>> {
        Ok(self.keys.factoid_addresses()?)
    }

    pub fn ec_addresses(&self) -> WalletResult<Vec<String>> {
        Ok(self.keys.ec_addresses()?)
    }

    /// The secret string for a stored address of either class.
    pub fn export_secret(&self, public: &str) -> WalletResult<String> {
        let address = Address::decode(public)?;
        let secret = match address.kind() {
            AddressKind::FactoidPublic => self
                .keys
                .factoid_address(public)
                .map_err(|e| WalletError::lookup(public, e))?
                .secret_string(),
            AddressKind::EcPublic => self
                .keys
                .ec_address(public)
                .map_err(|e| WalletError::lookup(public, e))?
                .secret_string(),
            found => {
                return Err(WalletError::InvalidAddress {
                    address: public.to_string(),
                    fault: AddressFault::WrongKind {
                        expected: AddressKind::FactoidPublic,
                        found,
                    },
                })
            }
        };
        secret.ok_or_else(|| WalletError::NoSuchAddress {
            address: public.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::FixedRate;
    use crate::wallet::keystore::MemoryKeyStore;

    const YELLOW: &str =
        "yellow yellow yellow yellow yellow yellow yellow yellow yellow yellow yellow yellow";
    const YELLOW_FA: &str = "FA3cih2o2tjEUsnnFR4jX1tQXPpSXFwsp3rhVp6odL5PNCHWvZV1";
    const ZERO_FS: &str = "Fs1KWJrpLdfucvmYwN2nWrwepLn8ercpMbzXshd1g8zyhKXLVLWj";
    const ZERO_ES: &str = "Es2Rf7iM6PdsqfYCo3D1tnAR65SkLENyWJG1deUzpRMQmbh9F3eG";
    const ZERO_EC: &str = "EC1m9mouvUQeEidmqpUYpYtXg8fvTYi6GNHaKg8KMLbdMBrFfmUa";

    fn wallet() -> Wallet {
        Wallet::new(Arc::new(MemoryKeyStore::new()), Arc::new(FixedRate::new(1)))
    }

    #[test]
    fn generated_addresses_are_stored() {
        let w = wallet();
        let fa = w.generate_factoid_address().unwrap();
        let ec = w.generate_ec_address().unwrap();
        assert!(fa.starts_with("FA"));
        assert!(ec.starts_with("EC"));
        assert_eq!(w.factoid_addresses().unwrap(), vec![fa]);
        assert_eq!(w.ec_addresses().unwrap(), vec![ec]);
    }

    #[test]
    fn mnemonic_import() {
        let w = wallet();
        assert_eq!(w.import_mnemonic(YELLOW).unwrap(), YELLOW_FA);
        assert!(matches!(
            w.import_mnemonic("yellow yellow"),
            Err(WalletError::InvalidMnemonic(_))
        ));
    }

    #[test]
    fn secret_import_detects_kind() {
        let w = wallet();
        let fa = w.import_secret(ZERO_FS).unwrap();
        assert!(fa.starts_with("FA"));
        let ec = w.import_secret(ZERO_ES).unwrap();
        assert!(ec.starts_with("EC"));
        assert_eq!(w.export_secret(&ec).unwrap(), ZERO_ES);
        assert_eq!(w.export_secret(&fa).unwrap(), ZERO_FS);
    }

    #[test]
    fn public_strings_are_not_secrets() {
        let w = wallet();
        match w.import_secret(ZERO_EC) {
            Err(WalletError::InvalidAddress {
                fault: AddressFault::WrongKind { expected, found },
                ..
            }) => {
                assert_eq!(expected, AddressKind::EcSecret);
                assert_eq!(found, AddressKind::EcPublic);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            w.import_factoid_secret(ZERO_ES),
            Err(WalletError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn export_of_unknown_address() {
        let w = wallet();
        assert!(matches!(
            w.export_secret(ZERO_EC),
            Err(WalletError::NoSuchAddress { .. })
        ));
        assert!(matches!(
            w.export_secret(ZERO_ES),
            Err(WalletError::InvalidAddress { .. })
        ));
    }
}

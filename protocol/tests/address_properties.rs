//! Property tests for the address codec.

use proptest::prelude::*;

use factom_protocol::identity::{is_valid_address, Address, AddressKind};

const BASE58_ALPHABET: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

fn any_kind() -> impl Strategy<Value = AddressKind> {
    prop_oneof![
        Just(AddressKind::FactoidPublic),
        Just(AddressKind::FactoidSecret),
        Just(AddressKind::EcPublic),
        Just(AddressKind::EcSecret),
    ]
}

fn any_address() -> impl Strategy<Value = Address> {
    (any_kind(), any::<[u8; 32]>()).prop_map(|(kind, payload)| {
        Address::new(kind, payload).expect("concrete kinds always build")
    })
}

proptest! {
    #[test]
    fn encode_then_decode_is_identity(address in any_address()) {
        let s = address.encode();
        prop_assert_eq!(s.len(), 52);
        prop_assert!(s.starts_with(address.kind().display_prefix()));
        prop_assert_eq!(Address::decode(&s).unwrap(), address);
    }

    #[test]
    fn single_substitution_is_rejected(
        address in any_address(),
        position in 0usize..52,
        replacement in 0usize..58,
    ) {
        let s = address.encode();
        let mut bytes = s.clone().into_bytes();
        let new = BASE58_ALPHABET[replacement];
        prop_assume!(bytes[position] != new);
        bytes[position] = new;
        let mutated = String::from_utf8(bytes).unwrap();
        prop_assert!(!is_valid_address(&mutated), "{} -> {}", s, mutated);
    }

    #[test]
    fn decoding_never_panics(s in "\\PC{0,64}") {
        let _ = Address::decode(&s);
        let _ = is_valid_address(&s);
    }

    #[test]
    fn truncation_is_rejected(address in any_address(), cut in 1usize..52) {
        let s = address.encode();
        prop_assert!(!is_valid_address(&s[..52 - cut]));
    }
}

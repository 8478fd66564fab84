#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

    use aes::cipher::generic_array::GenericArray;
    use aes::cipher::{BlockEncrypt, KeyInit};
    use aes::Aes128;
    use proptest::prelude::*;

    use capture_core::crypto::{AddressCipher, AnonymisationKey};

    const FIPS197_KEY: &str = "000102030405060708090a0b0c0d0e0f";

    fn fips_key() -> AnonymisationKey {
        AnonymisationKey::from_hex(FIPS197_KEY).unwrap()
    }

    fn reference_block(key: &AnonymisationKey, input: [u8; 16]) -> [u8; 16] {
        let aes = Aes128::new(GenericArray::from_slice(key.as_bytes()));
        let mut block = GenericArray::clone_from_slice(&input);
        aes.encrypt_block(&mut block);
        let mut out = [0u8; 16];
        out.copy_from_slice(&block);
        out
    }

    // FIPS-197 Appendix C.1: the IPv6 path is a bare AES-128 block encryption.
    #[test]
    fn ipv6_matches_fips197_vector() {
        let cipher = AddressCipher::new(&fips_key());
        let plain: [u8; 16] = hex::decode("00112233445566778899aabbccddeeff")
            .unwrap()
            .try_into()
            .unwrap();

        let out = cipher.encrypt_v6(plain);
        assert_eq!(hex::encode(out), "69c4e0d86a7b0430d8cdb78070b4c55a");
    }

    #[test]
    fn ipv4_is_prefix_of_four_copies_block() {
        let key = fips_key();
        let cipher = AddressCipher::new(&key);
        let addr = [192, 0, 2, 1];

        let mut block = [0u8; 16];
        for chunk in block.chunks_exact_mut(4) {
            chunk.copy_from_slice(&addr);
        }
        let expected = reference_block(&key, block);

        assert_eq!(cipher.encrypt_v4(addr), expected[..4]);
    }

    #[test]
    fn ip_family_is_preserved() {
        let cipher = AddressCipher::new(&fips_key());

        let v4 = cipher.encrypt_ip(IpAddr::V4(Ipv4Addr::new(198, 51, 100, 7)));
        let v6 = cipher.encrypt_ip(IpAddr::V6(Ipv6Addr::LOCALHOST));

        assert!(v4.is_ipv4());
        assert!(v6.is_ipv6());
        assert_ne!(v6, IpAddr::V6(Ipv6Addr::LOCALHOST));
    }

    #[test]
    fn raw_bytes_only_accept_address_widths() {
        let cipher = AddressCipher::new(&fips_key());

        assert_eq!(cipher.encrypt_bytes(&[10, 0, 0, 1]).map(|v| v.len()), Some(4));
        assert_eq!(cipher.encrypt_bytes(&[0u8; 16]).map(|v| v.len()), Some(16));
        assert!(cipher.encrypt_bytes(&[0u8; 5]).is_none());
        assert!(cipher.encrypt_bytes(&[]).is_none());
    }

    #[test]
    fn raw_bytes_agree_with_typed_paths() {
        let cipher = AddressCipher::new(&fips_key());
        let v4 = [203, 0, 113, 9];
        assert_eq!(cipher.encrypt_bytes(&v4).unwrap(), cipher.encrypt_v4(v4).to_vec());
    }

    #[test]
    fn different_keys_give_different_outputs() {
        let a = AddressCipher::new(&AnonymisationKey::new([1; 16]));
        let b = AddressCipher::new(&AnonymisationKey::new([2; 16]));
        assert_ne!(a.encrypt_v6([0x20; 16]), b.encrypt_v6([0x20; 16]));
    }

    #[test]
    fn cipher_is_shareable_across_threads() {
        let cipher = AddressCipher::new(&fips_key());
        let expected = cipher.encrypt_v4([10, 1, 2, 3]);

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| assert_eq!(cipher.encrypt_v4([10, 1, 2, 3]), expected));
            }
        });
    }

    proptest! {
        #[test]
        fn prop_transform_is_deterministic(key in any::<[u8; 16]>(), addr in any::<[u8; 16]>()) {
            let cipher = AddressCipher::new(&AnonymisationKey::new(key));
            prop_assert_eq!(cipher.encrypt_v6(addr), cipher.encrypt_v6(addr));
            let v4 = [addr[0], addr[1], addr[2], addr[3]];
            prop_assert_eq!(cipher.encrypt_v4(v4), cipher.encrypt_v4(v4));
        }

        #[test]
        fn prop_ipv6_matches_reference(key in any::<[u8; 16]>(), addr in any::<[u8; 16]>()) {
            let key = AnonymisationKey::new(key);
            let cipher = AddressCipher::new(&key);
            prop_assert_eq!(cipher.encrypt_v6(addr), reference_block(&key, addr));
        }

        #[test]
        fn prop_ipv6_is_injective(a in any::<[u8; 16]>(), b in any::<[u8; 16]>()) {
            prop_assume!(a != b);
            let cipher = AddressCipher::new(&fips_key());
            prop_assert_ne!(cipher.encrypt_v6(a), cipher.encrypt_v6(b));
        }
    }
}

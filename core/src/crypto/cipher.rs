//! crypto/cipher.rs
//! Family-aware AES-128 address transform.
//!
//! - IPv6: the 16 address bytes are one AES block, encrypted directly.
//! - IPv4: the address is repeated four times to fill a block; the first
//!   4 ciphertext bytes are the result.
//!
//! Only the forward (encrypt) direction is ever used.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::Aes128;

use crate::crypto::types::AnonymisationKey;

pub const IPV4_LEN: usize = 4;
pub const IPV6_LEN: usize = 16;

/// Expanded AES-128 key schedule, built once and shared read-only.
#[derive(Clone)]
pub struct AddressCipher {
    aes: Aes128,
}

impl AddressCipher {
    pub fn new(key: &AnonymisationKey) -> Self {
        Self {
            aes: Aes128::new(GenericArray::from_slice(key.as_bytes())),
        }
    }

    #[inline]
    fn encrypt_block(&self, input: &[u8; IPV6_LEN]) -> [u8; IPV6_LEN] {
        let mut block = aes::Block::clone_from_slice(input);
        self.aes.encrypt_block(&mut block);

        let mut out = [0u8; IPV6_LEN];
        out.copy_from_slice(&block);
        out
    }

    /// Encrypt a 16-byte address as a single block.
    #[inline]
    pub fn encrypt_v6(&self, addr: [u8; IPV6_LEN]) -> [u8; IPV6_LEN] {
        self.encrypt_block(&addr)
    }

    /// Encrypt `a‖a‖a‖a` and keep the leading 4 bytes.
    pub fn encrypt_v4(&self, addr: [u8; IPV4_LEN]) -> [u8; IPV4_LEN] {
        let mut block = [0u8; IPV6_LEN];
        for chunk in block.chunks_exact_mut(IPV4_LEN) {
            chunk.copy_from_slice(&addr);
        }

        let ct = self.encrypt_block(&block);
        let mut out = [0u8; IPV4_LEN];
        out.copy_from_slice(&ct[..IPV4_LEN]);
        out
    }

    pub fn encrypt_ip(&self, addr: IpAddr) -> IpAddr {
        match addr {
            IpAddr::V4(v4) => IpAddr::V4(Ipv4Addr::from(self.encrypt_v4(v4.octets()))),
            IpAddr::V6(v6) => IpAddr::V6(Ipv6Addr::from(self.encrypt_v6(v6.octets()))),
        }
    }

    /// Transform a raw address; `None` unless the slice is 4 or 16 bytes.
    pub fn encrypt_bytes(&self, raw: &[u8]) -> Option<Vec<u8>> {
        if let Ok(v4) = <[u8; IPV4_LEN]>::try_from(raw) {
            return Some(self.encrypt_v4(v4).to_vec());
        }
        if let Ok(v6) = <[u8; IPV6_LEN]>::try_from(raw) {
            return Some(self.encrypt_v6(v6).to_vec());
        }
        None
    }
}

impl fmt::Debug for AddressCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddressCipher").finish_non_exhaustive()
    }
}

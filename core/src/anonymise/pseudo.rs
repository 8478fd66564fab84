//! anonymise/pseudo.rs
//! Pseudo-anonymisation façade: one key, many addresses and OPT records.
//!
//! Key handling follows ipcipher (PBKDF2-HMAC-SHA1, AES-128 on IPv6) with a
//! tool-specific default salt. IPv4 uses the four-copies block construction.

use std::net::IpAddr;

use crate::anonymise::opt::rewrite_opt_rdata;
use crate::anonymise::record::EndpointRecord;
use crate::config::AnonymiserConfig;
use crate::constants::DEFAULT_SALT;
use crate::crypto::{derive_key, AddressCipher, AnonymisationKey, CryptoError};

/// Immutable after construction; share it by reference or clone it across threads.
#[derive(Debug, Clone)]
pub struct PseudoAnonymiser {
    cipher: AddressCipher,
}

impl PseudoAnonymiser {
    pub fn new(key: AnonymisationKey) -> Self {
        Self {
            cipher: AddressCipher::new(&key),
        }
    }

    /// Derive the key from `passphrase` with the default salt.
    pub fn from_passphrase(passphrase: &str) -> Self {
        Self::from_passphrase_with_salt(passphrase, DEFAULT_SALT)
    }

    pub fn from_passphrase_with_salt(passphrase: &str, salt: &[u8]) -> Self {
        Self::new(derive_key(passphrase.as_bytes(), salt))
    }

    pub fn from_config(cfg: &AnonymiserConfig) -> Result<Self, CryptoError> {
        match cfg {
            AnonymiserConfig::Passphrase { passphrase, salt } => Ok(match salt {
                Some(salt) => Self::from_passphrase_with_salt(passphrase, salt.as_bytes()),
                None => Self::from_passphrase(passphrase),
            }),
            AnonymiserConfig::Key { key_hex } => Ok(Self::new(AnonymisationKey::from_hex(key_hex)?)),
        }
    }

    pub fn cipher(&self) -> &AddressCipher {
        &self.cipher
    }

    /// Anonymise an address, keeping its family.
    #[inline]
    pub fn address(&self, addr: IpAddr) -> IpAddr {
        self.cipher.encrypt_ip(addr)
    }

    /// Anonymise client-subnet addresses in OPT RDATA. Malformed RDATA is
    /// returned unchanged.
    #[inline]
    pub fn opt_rdata(&self, rdata: &[u8]) -> Vec<u8> {
        rewrite_opt_rdata(&self.cipher, rdata)
    }

    /// Anonymise both endpoints and the OPT RDATA of a record in place.
    pub fn anonymise_record<R: EndpointRecord + ?Sized>(&self, record: &mut R) {
        if let Some(addr) = record.query_address_mut() {
            *addr = self.address(*addr);
        }
        if let Some(addr) = record.response_address_mut() {
            *addr = self.address(*addr);
        }
        if let Some(rdata) = record.opt_rdata_mut() {
            *rdata = self.opt_rdata(rdata);
        }
    }
}

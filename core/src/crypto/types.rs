use std::fmt;
use thiserror::Error;

use crate::constants::KEY_LEN_16;

/// A 16-byte AES-128 key used for address pseudo-anonymisation.
///
/// Immutable once built. Debug output never prints the key material.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct AnonymisationKey([u8; KEY_LEN_16]);

impl AnonymisationKey {
    pub const fn new(bytes: [u8; KEY_LEN_16]) -> Self {
        Self(bytes)
    }

    /// Build a key from raw bytes; anything but exactly 16 bytes is rejected.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let key: [u8; KEY_LEN_16] = bytes.try_into().map_err(|_| CryptoError::InvalidKeyLen {
            expected: KEY_LEN_16,
            actual: bytes.len(),
        })?;
        Ok(Self(key))
    }

    /// Build a key from 32 hex digits.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let raw = hex::decode(s.trim())?;
        Self::from_slice(&raw)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; KEY_LEN_16] {
        &self.0
    }
}

impl From<[u8; KEY_LEN_16]> for AnonymisationKey {
    fn from(bytes: [u8; KEY_LEN_16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for AnonymisationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AnonymisationKey(..)")
    }
}

#[derive(Debug, Error)]
pub enum CryptoError {
    /// Raw key was not 16 bytes.
    #[error("invalid key length: expected={expected}, actual={actual}")]
    InvalidKeyLen { expected: usize, actual: usize },

    /// Hex-encoded key could not be decoded.
    #[error("invalid hex key: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

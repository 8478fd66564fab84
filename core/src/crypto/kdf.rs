//! crypto/kdf.rs
//! Passphrase-based derivation of the anonymisation key.
//!
//! Design:
//! - PBKDF2-HMAC-SHA1(passphrase, salt, 50 000 rounds) -> 16 bytes
//! - Same construction as ipcipher; only the default salt differs.

use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;

use crate::constants::{KEY_LEN_16, PBKDF2_ROUNDS};
use crate::crypto::types::AnonymisationKey;

/// Derive the 16-byte anonymisation key from a passphrase and salt.
///
/// Deterministic: identical inputs always yield the identical key.
#[inline]
pub fn derive_key(passphrase: &[u8], salt: &[u8]) -> AnonymisationKey {
    derive_key_with_rounds(passphrase, salt, PBKDF2_ROUNDS)
}

/// As [`derive_key`] with an explicit iteration count (minimum 1).
pub fn derive_key_with_rounds(passphrase: &[u8], salt: &[u8], rounds: u32) -> AnonymisationKey {
    let mut key = [0u8; KEY_LEN_16];
    pbkdf2_hmac::<Sha1>(passphrase, salt, rounds.max(1), &mut key);
    AnonymisationKey::new(key)
}

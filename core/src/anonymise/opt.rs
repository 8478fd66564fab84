//! anonymise/opt.rs
//! EDNS0 client-subnet rewriting inside OPT RDATA.
//!
//! RDATA layout: a sequence of `code:u16 len:u16 value[len]`. Client-subnet
//! (code 8) values are `family:u16 source:u8 scope:u8 address[..]`, where the
//! address holds the leading ceil(source / 8) bytes. Extra stored bytes, up to
//! the family width, are rewritten along with the prefix bytes.
//!
//! Malformed RDATA is never an error to the caller: it is returned unchanged.

use byteorder::{BigEndian, ByteOrder};
use thiserror::Error;
use tracing::{debug, trace};

use crate::constants::edns::{
    ECS_FIXED_LEN, FAMILY_IPV4, FAMILY_IPV6, OPTION_CLIENT_SUBNET, OPTION_HEADER_LEN,
};
use crate::crypto::cipher::{AddressCipher, IPV4_LEN, IPV6_LEN};
use crate::utils::prefix_bytes;

#[derive(Debug, Error)]
enum OptWalkError {
    #[error("truncated option header at offset {offset}")]
    TruncatedHeader { offset: usize },

    #[error("option at offset {offset} declares {declared} bytes, {remaining} remain")]
    Overrun { offset: usize, declared: usize, remaining: usize },

    #[error("client-subnet option of {len} bytes is shorter than its fixed fields")]
    EcsTooShort { len: usize },

    #[error("source prefix {prefix} exceeds family width of {width} bytes")]
    PrefixTooLong { prefix: u8, width: usize },

    #[error("address of {stored} bytes is shorter than prefix {prefix} implies")]
    AddressShort { prefix: u8, stored: usize },

    #[error("address of {stored} bytes exceeds family width of {width} bytes")]
    AddressLong { stored: usize, width: usize },
}

/// Anonymise every client-subnet address in `rdata`.
///
/// The output always has the input's length. Only address bytes of
/// recognised client-subnet options differ from the input.
pub fn rewrite_opt_rdata(cipher: &AddressCipher, rdata: &[u8]) -> Vec<u8> {
    let mut out = rdata.to_vec();

    match rewrite_in_place(cipher, &mut out) {
        Ok(rewritten) => {
            trace!(rewritten, len = rdata.len(), "OPT RDATA walked");
            out
        }
        Err(e) => {
            debug!(error = %e, len = rdata.len(), "malformed OPT RDATA passed through unchanged");
            rdata.to_vec()
        }
    }
}

/// Returns the number of client-subnet options rewritten.
fn rewrite_in_place(cipher: &AddressCipher, buf: &mut [u8]) -> Result<usize, OptWalkError> {
    let mut off = 0;
    let mut rewritten = 0;

    while off < buf.len() {
        if buf.len() - off < OPTION_HEADER_LEN {
            return Err(OptWalkError::TruncatedHeader { offset: off });
        }

        let code = BigEndian::read_u16(&buf[off..off + 2]);
        let len = BigEndian::read_u16(&buf[off + 2..off + 4]) as usize;

        let start = off + OPTION_HEADER_LEN;
        let end = start + len;
        if end > buf.len() {
            return Err(OptWalkError::Overrun {
                offset: off,
                declared: len,
                remaining: buf.len() - start,
            });
        }

        if code == OPTION_CLIENT_SUBNET && rewrite_client_subnet(cipher, &mut buf[start..end])? {
            rewritten += 1;
        }

        off = end;
    }

    Ok(rewritten)
}

/// Returns `false` when the option was left alone (unknown family, empty address).
fn rewrite_client_subnet(cipher: &AddressCipher, value: &mut [u8]) -> Result<bool, OptWalkError> {
    if value.len() < ECS_FIXED_LEN {
        return Err(OptWalkError::EcsTooShort { len: value.len() });
    }

    let family = BigEndian::read_u16(&value[0..2]);
    let prefix = value[2];

    let width = match family {
        FAMILY_IPV4 => IPV4_LEN,
        FAMILY_IPV6 => IPV6_LEN,
        _ => return Ok(false),
    };

    if prefix as usize > width * 8 {
        return Err(OptWalkError::PrefixTooLong { prefix, width });
    }

    let addr = &mut value[ECS_FIXED_LEN..];
    let stored = addr.len();
    if stored < prefix_bytes(prefix) {
        return Err(OptWalkError::AddressShort { prefix, stored });
    }
    if stored > width {
        return Err(OptWalkError::AddressLong { stored, width });
    }
    if stored == 0 {
        return Ok(false);
    }

    // Zero-extend, encrypt at full width, truncate back to the stored length.
    if width == IPV4_LEN {
        let mut full = [0u8; IPV4_LEN];
        full[..stored].copy_from_slice(addr);
        addr.copy_from_slice(&cipher.encrypt_v4(full)[..stored]);
    } else {
        let mut full = [0u8; IPV6_LEN];
        full[..stored].copy_from_slice(addr);
        addr.copy_from_slice(&cipher.encrypt_v6(full)[..stored]);
    }

    Ok(true)
}


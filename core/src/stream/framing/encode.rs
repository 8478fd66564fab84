use byteorder::{BigEndian, ByteOrder};

use crate::constants::LEN_PREFIX;
use crate::stream::framing::types::{ControlType, ProtocolError};

/// Encode a control frame.
///
/// Layout:
///
/// ```text
/// [ 0u32 (4)         ]  escape: control frame follows
/// [ control_len (4)  ]  = 4 + options.len()
/// [ control_type (4) ]
/// [ options (N)      ]
/// ```
pub fn encode_control_frame(control: ControlType, options: &[u8]) -> Result<Vec<u8>, ProtocolError> {
    let body_len = LEN_PREFIX + options.len();
    let wire_len = u32::try_from(body_len).map_err(|_| ProtocolError::ControlLength {
        len: body_len,
        max: u32::MAX as usize,
    })?;

    let mut hdr = [0u8; 3 * LEN_PREFIX];
    BigEndian::write_u32(&mut hdr[LEN_PREFIX..2 * LEN_PREFIX], wire_len);
    hdr[2 * LEN_PREFIX..].copy_from_slice(&control.to_be_bytes());

    let mut out = Vec::with_capacity(hdr.len() + options.len());
    out.extend_from_slice(&hdr);
    out.extend_from_slice(options);
    Ok(out)
}

/// Encode a data frame: `[ len (4) ][ payload (len) ]`, `len > 0`.
pub fn encode_data_frame(payload: &[u8]) -> Result<Vec<u8>, ProtocolError> {
    if payload.is_empty() {
        return Err(ProtocolError::EmptyDataFrame);
    }
    let len = u32::try_from(payload.len()).map_err(|_| ProtocolError::FrameTooLarge {
        len: payload.len(),
        max: u32::MAX as usize,
    })?;

    let mut out = Vec::with_capacity(LEN_PREFIX + payload.len());
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(payload);
    Ok(out)
}

use byteorder::{BigEndian, ByteOrder};
use bytes::Bytes;
use tracing::trace;

use crate::constants::LEN_PREFIX;
use crate::stream::framing::types::{ControlFrame, ControlType, FrameStage, ProtocolError};
use crate::utils::enum_name_or_hex;

/// Validate a declared control-body length against `4..=max`.
#[inline]
pub fn check_control_len(len: u32, max: u32) -> Result<usize, ProtocolError> {
    let len = len as usize;
    if len < LEN_PREFIX || len > max as usize {
        return Err(ProtocolError::ControlLength { len, max: max as usize });
    }
    Ok(len)
}

/// Validate a declared data-frame length against `max`.
#[inline]
pub fn check_data_len(len: u32, max: u32) -> Result<usize, ProtocolError> {
    if len > max {
        return Err(ProtocolError::FrameTooLarge {
            len: len as usize,
            max: max as usize,
        });
    }
    Ok(len as usize)
}

/// Split a control body into its type code and opaque options.
///
/// Caller guarantees the whole body (after `control_len`) is provided.
pub fn parse_control_body(body: Bytes) -> Result<ControlFrame, ProtocolError> {
    if body.len() < LEN_PREFIX {
        return Err(ProtocolError::Truncated {
            stage: FrameStage::ControlBody,
            expected: LEN_PREFIX,
            actual: body.len(),
        });
    }

    let raw = BigEndian::read_u32(&body[..LEN_PREFIX]);
    trace!(
        control = %enum_name_or_hex::<ControlType>(raw),
        options_len = body.len() - LEN_PREFIX,
        "control frame"
    );

    Ok(ControlFrame {
        control_type: ControlType::from_wire(raw)?,
        options: body.slice(LEN_PREFIX..),
    })
}

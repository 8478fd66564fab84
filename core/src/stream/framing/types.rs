use std::fmt;

use bytes::Bytes;
use num_enum::TryFromPrimitive;
use thiserror::Error;

use crate::constants::control_ids;

/// Frame Streams control-type codes.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum ControlType {
    Accept = control_ids::ACCEPT,
    Start  = control_ids::START,
    Stop   = control_ids::STOP,
    Ready  = control_ids::READY,
    Finish = control_ids::FINISH,
}

impl ControlType {
    #[inline]
    pub fn from_wire(raw: u32) -> Result<Self, ProtocolError> {
        Self::try_from_primitive(raw).map_err(|_| ProtocolError::UnknownControlType(raw))
    }

    #[inline(always)]
    pub const fn to_be_bytes(self) -> [u8; 4] {
        (self as u32).to_be_bytes()
    }
}

/// Session lifecycle shared by the decoder and the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecoderState {
    AwaitStart,
    Running,
    /// Terminal.
    Done,
}

/// A decoded control frame. `options` is the negotiation blob after the
/// type code, kept opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlFrame {
    pub control_type: ControlType,
    pub options: Bytes,
}

/// Which part of a frame was being read when the stream ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStage {
    LengthPrefix,
    ControlLength,
    ControlBody,
    DataPayload,
}

impl fmt::Display for FrameStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FrameStage::LengthPrefix => "length prefix",
            FrameStage::ControlLength => "control length",
            FrameStage::ControlBody => "control body",
            FrameStage::DataPayload => "data payload",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    /// End of stream inside a frame.
    #[error("truncated {stage}: expected {expected} bytes, got {actual}")]
    Truncated { stage: FrameStage, expected: usize, actual: usize },

    #[error("control frame length {len} outside 4..={max}")]
    ControlLength { len: usize, max: usize },

    #[error("unknown control type: 0x{0:x}")]
    UnknownControlType(u32),

    #[error("{control:?} control frame not allowed in state {state:?}")]
    UnexpectedControl { control: ControlType, state: DecoderState },

    #[error("data frame not allowed in state {state:?}")]
    UnexpectedData { state: DecoderState },

    #[error("data frame length {len} exceeds limit {max}")]
    FrameTooLarge { len: usize, max: usize },

    /// A data frame must carry at least one byte; zero marks a control frame.
    #[error("empty data frame")]
    EmptyDataFrame,

    #[error("session already finished")]
    SessionFinished,
}

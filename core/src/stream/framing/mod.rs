//! Frame Streams wire framing.
//!
//! Responsibilities:
//! - Define control types, session states and protocol errors
//! - Encode control and data frames
//! - Validate and split control bodies
//!
//! Non-responsibilities:
//! - IO
//! - Session ordering (see `stream::decoder`)

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{
    ControlFrame,
    ControlType,
    DecoderState,
    FrameStage,
    ProtocolError,
};
pub use encode::{encode_control_frame, encode_data_frame};
pub use decode::parse_control_body;

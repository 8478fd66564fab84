//! stream/writer.rs
//! Unidirectional Frame Streams sender: START, data frames, STOP.

use std::io::Write;

use tracing::debug;

use crate::stream::framing::{
    encode_control_frame, encode_data_frame, ControlType, DecoderState, ProtocolError,
};
use crate::types::StreamError;

pub struct FrameStreamWriter<W: Write> {
    inner: W,
    state: DecoderState,
    frames_written: u64,
}

impl<W: Write> FrameStreamWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            state: DecoderState::AwaitStart,
            frames_written: 0,
        }
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Write START with no negotiation options.
    pub fn start(&mut self) -> Result<(), StreamError> {
        self.start_with_options(&[])
    }

    /// Write START carrying an opaque options blob (e.g. a content type field).
    pub fn start_with_options(&mut self, options: &[u8]) -> Result<(), StreamError> {
        self.expect_state(ControlType::Start, DecoderState::AwaitStart)?;
        self.inner.write_all(&encode_control_frame(ControlType::Start, options)?)?;
        self.state = DecoderState::Running;
        Ok(())
    }

    pub fn write_data(&mut self, payload: &[u8]) -> Result<(), StreamError> {
        if self.state != DecoderState::Running {
            return Err(ProtocolError::UnexpectedData { state: self.state }.into());
        }
        self.inner.write_all(&encode_data_frame(payload)?)?;
        self.frames_written += 1;
        Ok(())
    }

    /// Write STOP, flush, and hand back the underlying writer.
    pub fn stop(mut self) -> Result<W, StreamError> {
        self.expect_state(ControlType::Stop, DecoderState::Running)?;
        self.inner.write_all(&encode_control_frame(ControlType::Stop, &[])?)?;
        self.inner.flush()?;
        debug!(frames = self.frames_written, "frame stream closed");
        Ok(self.inner)
    }

    fn expect_state(&self, control: ControlType, wanted: DecoderState) -> Result<(), ProtocolError> {
        if self.state != wanted {
            return Err(ProtocolError::UnexpectedControl { control, state: self.state });
        }
        Ok(())
    }
}

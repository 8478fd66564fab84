//! stream/decoder.rs
//! Frame Streams receiver: handshake state machine and data-frame delivery.
//!
//! Sessions:
//! - Unidirectional: START, data..., STOP (or EOF). Nothing is written back.
//! - Bidirectional: READY -> ACCEPT, START, data..., STOP -> FINISH.
//!
//! A session becomes bidirectional when the peer sends READY.

use std::io::{Read, Write};

use tracing::{debug, trace, warn};

use crate::config::DecoderConfig;
use crate::stream::framing::decode::{check_control_len, check_data_len};
use crate::stream::framing::{
    encode_control_frame, parse_control_body, ControlFrame, ControlType, DecoderState, FrameStage,
    ProtocolError,
};
use crate::stream::io::{read_body, read_len_prefix, read_u32_in_frame};
use crate::stream::sink::{PayloadDecoder, RecordSink};
use crate::telemetry::FrameCounters;
use crate::types::StreamError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Decodes one Frame Streams session end to end.
#[derive(Debug)]
pub struct FrameStreamDecoder<D> {
    decoder: D,
    config: DecoderConfig,
    state: DecoderState,
    bidirectional: bool,
    counters: FrameCounters,
}

impl<D: PayloadDecoder> FrameStreamDecoder<D> {
    pub fn new(decoder: D) -> Self {
        Self::with_config(decoder, DecoderConfig::default())
    }

    pub fn with_config(decoder: D, config: DecoderConfig) -> Self {
        Self {
            decoder,
            config,
            state: DecoderState::AwaitStart,
            bidirectional: false,
            counters: FrameCounters::default(),
        }
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    pub fn is_bidirectional(&self) -> bool {
        self.bidirectional
    }

    pub fn counters(&self) -> &FrameCounters {
        &self.counters
    }

    pub fn into_inner(self) -> D {
        self.decoder
    }

    /// Consume frames from `stream` until EOF or STOP, handing each decoded
    /// data frame to `sink` in stream order.
    ///
    /// Errors:
    /// - `StreamError::Protocol` for malformed or out-of-order framing,
    ///   including EOF inside a frame.
    /// - `StreamError::Decode` / `StreamError::Sink` from the collaborators.
    /// - `StreamError::Io` from the stream, except the FINISH reply, whose
    ///   failure is logged and ignored.
    pub fn process<S, K>(&mut self, stream: &mut S, sink: &mut K) -> Result<(), StreamError>
    where
        S: Read + Write + ?Sized,
        K: RecordSink<D::Record> + ?Sized,
    {
        if self.state == DecoderState::Done {
            return Err(ProtocolError::SessionFinished.into());
        }

        loop {
            let len = match read_len_prefix(stream)? {
                Some(len) => len,
                None => {
                    debug!(state = ?self.state, frames = self.counters.frames_data, "end of stream");
                    return Ok(());
                }
            };

            if len == 0 {
                let frame = self.read_control(stream)?;
                if self.handle_control(stream, frame)? == Flow::Stop {
                    return Ok(());
                }
            } else {
                self.handle_data(stream, len, sink)?;
            }
        }
    }

    fn read_control<S: Read + ?Sized>(&mut self, stream: &mut S) -> Result<ControlFrame, StreamError> {
        let raw_len = read_u32_in_frame(stream, FrameStage::ControlLength)?;
        let len = check_control_len(raw_len, self.config.max_control_frame_len)?;
        let body = read_body(stream, len, FrameStage::ControlBody)?;

        self.counters.add_control(len);
        Ok(parse_control_body(body)?)
    }

    fn handle_control<S: Write + ?Sized>(
        &mut self,
        stream: &mut S,
        frame: ControlFrame,
    ) -> Result<Flow, StreamError> {
        match (frame.control_type, self.state) {
            (ControlType::Ready, DecoderState::AwaitStart) if !self.bidirectional => {
                self.bidirectional = true;
                let accept = encode_control_frame(ControlType::Accept, &frame.options)?;
                stream.write_all(&accept)?;
                stream.flush()?;
                self.counters.add_reply();
                debug!(options_len = frame.options.len(), "READY received, ACCEPT sent");
                Ok(Flow::Continue)
            }
            (ControlType::Start, DecoderState::AwaitStart) => {
                self.state = DecoderState::Running;
                debug!(bidirectional = self.bidirectional, "START received");
                Ok(Flow::Continue)
            }
            (ControlType::Stop, DecoderState::Running) => {
                if self.bidirectional {
                    self.send_finish(stream);
                }
                self.state = DecoderState::Done;
                debug!(records = self.counters.records_delivered, "STOP received");
                Ok(Flow::Stop)
            }
            (control, state) => Err(ProtocolError::UnexpectedControl { control, state }.into()),
        }
    }

    /// Best effort: a peer that has already gone away must not turn a clean
    /// STOP into a failure.
    fn send_finish<S: Write + ?Sized>(&mut self, stream: &mut S) {
        let sent = encode_control_frame(ControlType::Finish, &[])
            .map_err(StreamError::from)
            .and_then(|finish| {
                stream.write_all(&finish)?;
                stream.flush()?;
                Ok(())
            });

        match sent {
            Ok(()) => self.counters.add_reply(),
            Err(e) => {
                warn!(error = %e, "FINISH not delivered");
                self.counters.add_reply_dropped();
            }
        }
    }

    fn handle_data<S, K>(&mut self, stream: &mut S, len: u32, sink: &mut K) -> Result<(), StreamError>
    where
        S: Read + ?Sized,
        K: RecordSink<D::Record> + ?Sized,
    {
        if self.state != DecoderState::Running {
            return Err(ProtocolError::UnexpectedData { state: self.state }.into());
        }

        let len = check_data_len(len, self.config.max_data_frame_len)?;
        let payload = read_body(stream, len, FrameStage::DataPayload)?;
        self.counters.add_data(len);
        trace!(len, "data frame");

        let record = self
            .decoder
            .decode(payload)
            .map_err(|e| StreamError::Decode(e.into()))?;
        sink.accept(record).map_err(|e| StreamError::Sink(e.into()))?;
        self.counters.add_record();

        Ok(())
    }
}

use std::io;

use thiserror::Error;

use crate::stream::framing::ProtocolError;

/// Boxed error raised by a caller-supplied collaborator (payload decoder or sink).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Unified stream error covering I/O, framing, payload decoding and sink failures.
/// - `From<T>` impls enable `?` across the decoder.
/// - Every variant is fatal to the current `process` call.
#[derive(Debug, Error)]
pub enum StreamError {
    /// I/O error on the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed or out-of-order framing.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The payload decoder rejected a data frame.
    #[error("decode error: {0}")]
    Decode(BoxError),

    /// The record sink failed.
    #[error("sink error: {0}")]
    Sink(BoxError),
}

impl StreamError {
    /// True when the stream itself is at fault and a fresh connection may succeed.
    pub fn is_protocol(&self) -> bool {
        matches!(self, StreamError::Protocol(_))
    }

    /// True for truncation, whether reported by framing or by the OS.
    pub fn is_truncation(&self) -> bool {
        match self {
            StreamError::Protocol(ProtocolError::Truncated { .. }) => true,
            StreamError::Io(e) => e.kind() == io::ErrorKind::UnexpectedEof,
            _ => false,
        }
    }
}

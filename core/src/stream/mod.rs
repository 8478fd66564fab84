//! stream: Frame Streams ingestion.
//!
//! Layering: `framing` (wire codec) <- `io` (blocking reads) <- `decoder`
//! (session state machine). `sink` defines the collaborator seams and
//! `writer` produces streams for capture files and tests.

pub mod framing;
pub mod io;
pub mod sink;
pub mod decoder;
pub mod writer;

pub use decoder::FrameStreamDecoder;
pub use io::DuplexStream;
pub use sink::{bounded_sink, ChannelClosed, ChannelSink, PayloadDecoder, RecordSink};
pub use writer::FrameStreamWriter;

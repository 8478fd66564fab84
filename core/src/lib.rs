//! capture-core
//!
//! Frame Streams (dnstap transport) ingestion and keyed IP
//! pseudo-anonymisation for DNS capture records.
//! Synchronous, blocking I/O. No sockets, no async runtime.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;
pub mod config;

pub mod crypto;
pub mod anonymise;
pub mod telemetry;

// Stream layers
pub mod stream;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::anonymise::{AnonymisingSink, EndpointRecord, PseudoAnonymiser};
    pub use crate::config::{AnonymiserConfig, CaptureConfig, DecoderConfig};
    pub use crate::crypto::{derive_key, AddressCipher, AnonymisationKey};
    pub use crate::stream::framing::{ControlType, DecoderState, ProtocolError};
    pub use crate::stream::{
        DuplexStream, FrameStreamDecoder, FrameStreamWriter, PayloadDecoder, RecordSink,
    };
    pub use crate::telemetry::FrameCounters;
    pub use crate::types::StreamError;
}

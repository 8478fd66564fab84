//! stream/sink.rs
//! Collaborator seams of the decoder: payload decoding and record delivery.
//!
//! Both are single-method capabilities, implemented for plain closures so
//! callers can pass `|bytes| ...` and `|record| ...` directly.

use bytes::Bytes;
use crossbeam::channel::{self, Receiver, Sender};
use thiserror::Error;

use crate::types::BoxError;

/// Turns a data frame's payload into a structured record.
pub trait PayloadDecoder {
    type Record;
    type Error: Into<BoxError>;

    fn decode(&mut self, payload: Bytes) -> Result<Self::Record, Self::Error>;
}

impl<F, R, E> PayloadDecoder for F
where
    F: FnMut(Bytes) -> Result<R, E>,
    E: Into<BoxError>,
{
    type Record = R;
    type Error = E;

    #[inline]
    fn decode(&mut self, payload: Bytes) -> Result<R, E> {
        self(payload)
    }
}

/// Receives decoded records, once per data frame, in stream order.
pub trait RecordSink<R> {
    type Error: Into<BoxError>;

    fn accept(&mut self, record: R) -> Result<(), Self::Error>;
}

impl<F, R, E> RecordSink<R> for F
where
    F: FnMut(R) -> Result<(), E>,
    E: Into<BoxError>,
{
    type Error = E;

    #[inline]
    fn accept(&mut self, record: R) -> Result<(), E> {
        self(record)
    }
}

#[derive(Debug, Error)]
#[error("record channel disconnected")]
pub struct ChannelClosed;

/// Hands records to another stage over a bounded channel.
///
/// `accept` blocks while the channel is full; a dropped receiver fails the
/// decoder with `StreamError::Sink`.
#[derive(Debug, Clone)]
pub struct ChannelSink<R> {
    tx: Sender<R>,
}

impl<R> ChannelSink<R> {
    pub fn new(tx: Sender<R>) -> Self {
        Self { tx }
    }
}

/// Create a sink and the receiving end of a channel holding at most `cap` records.
pub fn bounded_sink<R>(cap: usize) -> (ChannelSink<R>, Receiver<R>) {
    let (tx, rx) = channel::bounded(cap);
    (ChannelSink::new(tx), rx)
}

impl<R> RecordSink<R> for ChannelSink<R> {
    type Error = ChannelClosed;

    fn accept(&mut self, record: R) -> Result<(), ChannelClosed> {
        self.tx.send(record).map_err(|_| ChannelClosed)
    }
}

//! stream/io.rs
//! Blocking frame reads with truncation detection, and a duplex adapter.

use std::io::{self, Read, Write};

use byteorder::{BigEndian, ByteOrder};
use bytes::Bytes;

use crate::constants::LEN_PREFIX;
use crate::stream::framing::{FrameStage, ProtocolError};
use crate::types::StreamError;

/// Initial allocation cap for a payload; larger frames grow as bytes arrive.
const INITIAL_PAYLOAD_CAP: usize = 64 * 1024;

/// Fill `buf` until it is full or the reader reports EOF.
/// Returns the number of bytes read.
pub fn read_exact_or_eof<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut off = 0;

    while off < buf.len() {
        match r.read(&mut buf[off..]) {
            Ok(0) => break,
            Ok(n) => off += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(off)
}

/// Read the outer length prefix.
///
/// `Ok(None)` on EOF exactly at a frame boundary; EOF part-way through the
/// prefix is a truncation.
pub fn read_len_prefix<R: Read + ?Sized>(r: &mut R) -> Result<Option<u32>, StreamError> {
    let mut buf = [0u8; LEN_PREFIX];
    match read_exact_or_eof(r, &mut buf)? {
        0 => Ok(None),
        LEN_PREFIX => Ok(Some(BigEndian::read_u32(&buf))),
        n => Err(ProtocolError::Truncated {
            stage: FrameStage::LengthPrefix,
            expected: LEN_PREFIX,
            actual: n,
        }
        .into()),
    }
}

/// Read a big-endian u32 that must be present (inside a frame).
pub fn read_u32_in_frame<R: Read + ?Sized>(r: &mut R, stage: FrameStage) -> Result<u32, StreamError> {
    let mut buf = [0u8; LEN_PREFIX];
    let n = read_exact_or_eof(r, &mut buf)?;
    if n != LEN_PREFIX {
        return Err(ProtocolError::Truncated { stage, expected: LEN_PREFIX, actual: n }.into());
    }
    Ok(BigEndian::read_u32(&buf))
}

/// Read exactly `len` bytes of frame body.
pub fn read_body<R: Read + ?Sized>(r: &mut R, len: usize, stage: FrameStage) -> Result<Bytes, StreamError> {
    let mut buf = Vec::with_capacity(len.min(INITIAL_PAYLOAD_CAP));
    r.take(len as u64).read_to_end(&mut buf)?;

    if buf.len() != len {
        return Err(ProtocolError::Truncated { stage, expected: len, actual: buf.len() }.into());
    }
    Ok(Bytes::from(buf))
}

/// Pairs a reader with a writer into the `Read + Write` stream the decoder
/// consumes, e.g. a capture file with `io::sink()` for one-way input.
#[derive(Debug)]
pub struct DuplexStream<R, W> {
    reader: R,
    writer: W,
}

impl<R: Read, W: Write> DuplexStream<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: Read> DuplexStream<R, io::Sink> {
    /// Replies (ACCEPT/FINISH) are discarded.
    pub fn read_only(reader: R) -> Self {
        Self { reader, writer: io::sink() }
    }
}

impl<R: Read, W> Read for DuplexStream<R, W> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl<R, W: Write> Write for DuplexStream<R, W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.writer.write(data)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

//! telemetry/counters.rs
//! Counters collected while a decoder processes one stream.

use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

use crate::constants::LEN_PREFIX;

/// Deterministic per-stream counters.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameCounters {
    pub frames_control: u64,
    pub frames_data: u64,
    pub bytes_payload: u64,
    /// Length prefixes, control bodies and escape markers.
    pub bytes_overhead: u64,
    pub records_delivered: u64,
    pub replies_sent: u64,
    /// FINISH replies that failed to write and were swallowed.
    pub replies_dropped: u64,
}

impl FrameCounters {
    /// Record one control frame with a body of `body_len` bytes.
    pub fn add_control(&mut self, body_len: usize) {
        self.frames_control += 1;
        self.bytes_overhead += (2 * LEN_PREFIX + body_len) as u64;
    }

    /// Record one data frame carrying `payload_len` bytes.
    pub fn add_data(&mut self, payload_len: usize) {
        self.frames_data += 1;
        self.bytes_payload += payload_len as u64;
        self.bytes_overhead += LEN_PREFIX as u64;
    }

    pub fn add_record(&mut self) {
        self.records_delivered += 1;
    }

    pub fn add_reply(&mut self) {
        self.replies_sent += 1;
    }

    pub fn add_reply_dropped(&mut self) {
        self.replies_dropped += 1;
    }

    /// Total bytes consumed from the stream.
    pub fn bytes_total(&self) -> u64 {
        self.bytes_payload + self.bytes_overhead
    }

    /// Fold in counters from another decoder.
    pub fn merge(&mut self, other: &FrameCounters) {
        self.frames_control += other.frames_control;
        self.frames_data += other.frames_data;
        self.bytes_payload += other.bytes_payload;
        self.bytes_overhead += other.bytes_overhead;
        self.records_delivered += other.records_delivered;
        self.replies_sent += other.replies_sent;
        self.replies_dropped += other.replies_dropped;
    }
}

impl AddAssign for FrameCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}

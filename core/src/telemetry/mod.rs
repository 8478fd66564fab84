//! telemetry/mod.rs
//! Per-stream frame and byte counters.
//!
//! Each decoder owns its counters; callers merge them across streams.

pub mod counters;

pub use counters::*;

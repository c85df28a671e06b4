//! telemetry/mod.rs
//! Codec telemetry: counters, stage timers and immutable snapshots.
//!
//! Notes:
//! - Counters are plain integers owned by one `RecordCodec`; merge them across threads.
//! - Snapshots are immutable and serde-serializable for export.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;

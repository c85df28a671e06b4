//! telemetry/snapshot.rs
//! Immutable view over counters and stage times, ready for logs or JSON export.

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::CodecCounters;
use crate::telemetry::timers::{Stage, StageTimes};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodecSnapshot {
    pub counters: CodecCounters,
    /// Mean encoded record size in bytes, 0.0 before the first encode.
    pub avg_encoded_len: f64,
    /// Skipped unknown fields over all fields seen while decoding.
    pub unknown_field_ratio: f64,
    pub encode_us: f64,
    pub decode_us: f64,
}

impl CodecSnapshot {
    pub fn from(counters: &CodecCounters, times: &StageTimes) -> Self {
        let avg_encoded_len = if counters.records_encoded > 0 {
            counters.bytes_encoded as f64 / counters.records_encoded as f64
        } else {
            0.0
        };
        let seen = counters.fields_read + counters.unknown_fields_skipped;
        let unknown_field_ratio = if seen > 0 {
            counters.unknown_fields_skipped as f64 / seen as f64
        } else {
            0.0
        };

        Self {
            counters: counters.clone(),
            avg_encoded_len,
            unknown_field_ratio,
            encode_us: times.get_us(Stage::Encode),
            decode_us: times.get_us(Stage::Decode),
        }
    }

    /// Internal invariants: ratio within [0, 1], no encoded bytes without an encoded record.
    pub fn sanity_check(&self) -> bool {
        (0.0..=1.0).contains(&self.unknown_field_ratio)
            && (self.counters.records_encoded > 0 || self.counters.bytes_encoded == 0)
    }
}

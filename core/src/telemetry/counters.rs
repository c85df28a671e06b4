//! telemetry/counters.rs
//! Mutable counters collected while encoding and decoding.
//!
//! Summary: plain integers, owned by one codec. Merge per-thread counters at the end
//! instead of sharing one set behind a lock.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecCounters {
    pub records_encoded: u64,
    pub records_decoded: u64,
    pub decode_failures: u64,
    /// Field entries written, nested entries included.
    pub fields_written: u64,
    /// Known field entries read, nested entries included.
    pub fields_read: u64,
    pub unknown_fields_skipped: u64,
    pub bytes_encoded: u64,
    pub bytes_decoded: u64,
}

impl CodecCounters {
    /// Record one encoded record.
    /// - `out_len`: encoded length in bytes
    /// - `entries`: field entries written
    pub fn add_encode(&mut self, out_len: usize, entries: u64) {
        self.records_encoded += 1;
        self.fields_written += entries;
        self.bytes_encoded += out_len as u64;
    }

    /// Record one successfully decoded record.
    pub fn add_decode(&mut self, in_len: usize, fields_read: u64, unknown_skipped: u64) {
        self.records_decoded += 1;
        self.fields_read += fields_read;
        self.unknown_fields_skipped += unknown_skipped;
        self.bytes_decoded += in_len as u64;
    }

    pub fn add_decode_failure(&mut self) {
        self.decode_failures += 1;
    }

    pub fn merge(&mut self, other: &CodecCounters) {
        self.records_encoded += other.records_encoded;
        self.records_decoded += other.records_decoded;
        self.decode_failures += other.decode_failures;
        self.fields_written += other.fields_written;
        self.fields_read += other.fields_read;
        self.unknown_fields_skipped += other.unknown_fields_skipped;
        self.bytes_encoded += other.bytes_encoded;
        self.bytes_decoded += other.bytes_decoded;
    }
}

impl AddAssign for CodecCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}

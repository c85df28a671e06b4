//! codec.rs
//! `RecordCodec`: encode/decode with limits and telemetry attached.
//!
//! The free functions in `wire` are the stateless path; this type adds
//! counters and stage timings for services that want them.

use log::debug;

use crate::record::Record;
use crate::schema::MessageSchema;
use crate::telemetry::{time_stage, CodecCounters, CodecSnapshot, Stage, StageTimes};
use crate::types::CodecError;
use crate::wire::decode::{decode_with_stats, DecodeStats};
use crate::wire::encode::{encode_into, encoded_len};
use crate::wire::DecodeOptions;

#[derive(Debug, Default)]
pub struct RecordCodec {
    options: DecodeOptions,
    counters: CodecCounters,
    times: StageTimes,
}

impl RecordCodec {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options, counters: CodecCounters::default(), times: StageTimes::default() }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    pub fn encode(&mut self, record: &Record) -> Vec<u8> {
        let (out, entries) = time_stage(&mut self.times, Stage::Encode, || {
            let mut out = Vec::with_capacity(encoded_len(record));
            let entries = encode_into(record, &mut out);
            (out, entries)
        });
        self.counters.add_encode(out.len(), entries);
        out
    }

    pub fn decode(&mut self, schema: &'static MessageSchema, buf: &[u8]) -> Result<Record, CodecError> {
        let mut stats = DecodeStats::default();
        let options = self.options;
        let result = time_stage(&mut self.times, Stage::Decode, || {
            decode_with_stats(schema, buf, &options, &mut stats)
        });
        match result {
            Ok(record) => {
                self.counters.add_decode(buf.len(), stats.fields_read, stats.unknown_fields_skipped);
                Ok(record)
            }
            Err(e) => {
                debug!("decode of {} failed after {} fields: {}", schema.name, stats.fields_read, e);
                self.counters.add_decode_failure();
                Err(e.into())
            }
        }
    }

    pub fn counters(&self) -> &CodecCounters {
        &self.counters
    }

    pub fn snapshot(&self) -> CodecSnapshot {
        CodecSnapshot::from(&self.counters, &self.times)
    }

    pub fn reset(&mut self) {
        self.counters = CodecCounters::default();
        self.times.clear();
    }
}

//! Tagged binary wire format.
//!
//! Responsibilities:
//! - Varint and tag-header primitives
//! - Encode records in schema order with default elision
//! - Decode records with forward-compatible skipping of unknown fields
//!
//! Non-responsibilities:
//! - Field access rules (see `record`)
//! - Plain-object projection (see `plain`)

pub mod types;
pub mod varint;
pub mod encode;
pub mod decode;

pub use types::{DecodeOptions, TagHeader, WireError, WireType};
pub use encode::{encode_into, encode_record, encoded_len};
pub use decode::{decode_record, decode_record_with, DecodeStats, WireReader};

//! wire/types.rs
//! Wire types, tag headers, decode limits and wire errors.

use num_enum::TryFromPrimitive;
use thiserror::Error;

use crate::constants::{
    wire_ids, DEFAULT_MAX_DEPTH, DEFAULT_MAX_MESSAGE_LEN, MAX_FIELD_NUMBER, TAG_TYPE_BITS, TAG_TYPE_MASK,
};

/// Wire types this codec can parse or skip.
///
/// Groups (3, 4) are deprecated in the ecosystem and, like 6 and 7, rejected.
/// Fixed-width types are never produced here, only skipped when they belong to unknown fields.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum WireType {
    Varint          = wire_ids::VARINT,
    Fixed64         = wire_ids::FIXED64,
    LengthDelimited = wire_ids::LENGTH_DELIMITED,
    Fixed32         = wire_ids::FIXED32,
}

impl WireType {
    pub fn verify(raw: u8, offset: usize) -> Result<Self, WireError> {
        WireType::try_from_primitive(raw).map_err(|_| WireError::UnknownWireType { raw, offset })
    }
}

/// Decoded `(field_number, wire_type)` pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TagHeader {
    pub field_number: u32,
    pub wire_type: WireType,
}

impl TagHeader {
    pub const fn new(field_number: u32, wire_type: WireType) -> Self {
        Self { field_number, wire_type }
    }

    /// Header varint value: `field_number << 3 | wire_type`.
    pub const fn to_raw(self) -> u64 {
        ((self.field_number as u64) << TAG_TYPE_BITS) | self.wire_type as u64
    }

    /// Split a header varint. `offset` is only used for error context.
    pub fn from_raw(raw: u64, offset: usize) -> Result<Self, WireError> {
        let field_number = raw >> TAG_TYPE_BITS;
        if field_number == 0 || field_number > MAX_FIELD_NUMBER as u64 {
            return Err(WireError::InvalidFieldNumber { raw, offset });
        }
        let wire_type = WireType::verify((raw & TAG_TYPE_MASK) as u8, offset)?;
        Ok(Self { field_number: field_number as u32, wire_type })
    }
}

/// Limits applied while decoding untrusted input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum nesting of embedded messages below the top-level record.
    pub max_depth: usize,
    /// Maximum accepted size of the top-level input buffer.
    pub max_message_len: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
        }
    }
}

impl DecodeOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_message_len(mut self, max_message_len: usize) -> Self {
        self.max_message_len = max_message_len;
        self
    }
}

/// Render at most 16 bytes for error messages.
pub fn preview_bytes(b: &[u8]) -> String {
    const PREVIEW: usize = 16;
    if b.len() > PREVIEW {
        format!("0x{}.. ({} bytes)", hex::encode(&b[..PREVIEW]), b.len())
    } else {
        format!("0x{}", hex::encode(b))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    /// Input ended inside a tag header, a varint, a length prefix or a length-delimited payload.
    #[error("truncated input at byte {offset}")]
    Truncated { offset: usize },

    #[error("unknown wire type {raw} at byte {offset}")]
    UnknownWireType { raw: u8, offset: usize },

    #[error("varint longer than 10 bytes at byte {offset}")]
    VarintOverflow { offset: usize },

    #[error("invalid field number in tag header 0x{raw:x} at byte {offset}")]
    InvalidFieldNumber { raw: u64, offset: usize },

    #[error("field {field} (tag {tag}): expected wire type {expected:?}, got {found:?}")]
    WireTypeMismatch { field: &'static str, tag: u32, expected: WireType, found: WireType },

    #[error("field {field}: invalid UTF-8 in string {preview}")]
    InvalidUtf8 { field: &'static str, preview: String },

    #[error("message nesting exceeds limit {limit}")]
    RecursionLimitExceeded { limit: usize },

    #[error("message too large: {have} > {max}")]
    MessageTooLarge { have: usize, max: usize },
}

//! constants.rs
//! Wire constants and default decode limits.
//!
//! Wire notes:
//! - A tag header is a varint `(field_number << 3) | wire_type`.
//! - Field numbers share the header varint with the 3-bit wire type, which caps them at 2^29 - 1.
//! - 19000..=19999 is reserved by the ecosystem's schema compiler and never assigned.

/// Bits occupied by the wire type inside a tag header.
pub const TAG_TYPE_BITS: u32 = 3;
/// Mask extracting the wire type from a tag header.
pub const TAG_TYPE_MASK: u64 = (1 << TAG_TYPE_BITS) - 1;

/// Smallest legal field number.
pub const MIN_FIELD_NUMBER: u32 = 1;
/// Largest legal field number (2^29 - 1).
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;
/// Field numbers reserved for the schema compiler's own use.
pub const RESERVED_FIELD_NUMBERS: std::ops::RangeInclusive<u32> = 19_000..=19_999;

/// A 64-bit value needs at most ten 7-bit groups.
pub const MAX_VARINT_LEN: usize = 10;

/// Wire type identifiers (low three bits of a tag header).
pub mod wire_ids {
    pub const VARINT: u8           = 0;
    pub const FIXED64: u8          = 1;
    pub const LENGTH_DELIMITED: u8 = 2;
    pub const START_GROUP: u8      = 3;
    pub const END_GROUP: u8        = 4;
    pub const FIXED32: u8          = 5;
}

/// Default nesting limit for embedded messages while decoding.
pub const DEFAULT_MAX_DEPTH: usize = 100;
/// Default upper bound on a single top-level input buffer (64 MiB).
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 64 * 1024 * 1024;

//! record-codec
//!
//! Schema-driven structured record codec.
//! Typed field access with defaulting, plain-object projection, and the
//! tagged varint / length-delimited binary wire format.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;

// Schema metadata and record storage
pub mod schema;
pub mod value;
pub mod record;

// Transcoding
pub mod wire;
pub mod plain;
pub mod codec;

pub mod telemetry;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::codec::RecordCodec;
    pub use crate::plain::{from_plain_object, to_plain_object, PlainObject};
    pub use crate::record::{Record, RecordError};
    pub use crate::schema::{FieldDescriptor, FieldKind, MessageSchema, ScalarKind, SchemaRegistry};
    pub use crate::types::CodecError;
    pub use crate::value::Value;
    pub use crate::wire::{decode_record, encode_record, DecodeOptions, WireError};
}

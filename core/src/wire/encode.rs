//! wire/encode.rs
//!
//! Record -> bytes.
//!
//! Design notes:
//! - Fields are written in schema declaration order, so equal records encode to equal bytes.
//! - Absent fields and implicit-presence scalars holding their default are skipped.
//! - Optional and message fields are written whenever present, even when empty or zero.
//! - Repeated varint fields declared `packed` become one length-delimited blob; everything else
//!   repeated is one entry per item. Repeated messages are never packed.
//! - Lengths are computed up front (`encoded_len`), so the output is allocated exactly once.

use crate::record::Record;
use crate::schema::{FieldDescriptor, FieldKind};
use crate::value::Value;
use crate::wire::types::{TagHeader, WireType};
use crate::wire::varint::{encode_varint, from_i32, from_i64, varint_len};

/// Encode `record` into a fresh buffer.
pub fn encode_record(record: &Record) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(record));
    encode_into(record, &mut out);
    out
}

/// Append the encoding of `record` to `out`. Returns the number of field entries written
/// (nested entries included).
pub fn encode_into(record: &Record, out: &mut Vec<u8>) -> u64 {
    let mut entries = 0u64;
    for (field, value) in record.present_fields() {
        entries += write_field(field, value, out);
    }
    entries
}

/// Exact number of bytes `encode_record` would produce.
pub fn encoded_len(record: &Record) -> usize {
    record
        .present_fields()
        .map(|(field, value)| field_len(field, value))
        .sum()
}

fn write_tag(tag: u32, wire_type: WireType, out: &mut Vec<u8>) {
    encode_varint(TagHeader::new(tag, wire_type).to_raw(), out);
}

fn tag_len(tag: u32) -> usize {
    varint_len(TagHeader::new(tag, WireType::Varint).to_raw())
}

fn write_field(field: &FieldDescriptor, value: &Value, out: &mut Vec<u8>) -> u64 {
    match (field.kind, value) {
        (FieldKind::Scalar(_), v) if v.is_default() => 0,
        (FieldKind::Scalar(k) | FieldKind::Optional(k), v) => {
            write_tag(field.tag, k.wire_type(), out);
            write_scalar(v, out);
            1
        }
        (FieldKind::Message(_), Value::Message(nested)) => {
            write_tag(field.tag, WireType::LengthDelimited, out);
            write_nested(nested, out) + 1
        }
        (FieldKind::RepeatedScalar { kind, packed }, Value::List(items)) => {
            if items.is_empty() {
                0
            } else if packed && kind.is_varint() {
                write_tag(field.tag, WireType::LengthDelimited, out);
                encode_varint(packed_payload_len(items) as u64, out);
                items.iter().for_each(|item| write_scalar(item, out));
                1
            } else {
                for item in items {
                    write_tag(field.tag, kind.wire_type(), out);
                    write_scalar(item, out);
                }
                items.len() as u64
            }
        }
        (FieldKind::RepeatedMessage(_), Value::List(items)) => {
            let mut entries = 0;
            for item in items {
                if let Value::Message(nested) = item {
                    write_tag(field.tag, WireType::LengthDelimited, out);
                    entries += write_nested(nested, out) + 1;
                }
            }
            entries
        }
        // Record::set rejects any other pairing
        _ => 0,
    }
}

fn write_nested(nested: &Record, out: &mut Vec<u8>) -> u64 {
    encode_varint(encoded_len(nested) as u64, out);
    encode_into(nested, out)
}

/// Payload of a single scalar, without its tag.
fn write_scalar(value: &Value, out: &mut Vec<u8>) {
    match value {
        Value::String(s) => {
            encode_varint(s.len() as u64, out);
            out.extend_from_slice(s.as_bytes());
        }
        Value::Bytes(b) => {
            encode_varint(b.len() as u64, out);
            out.extend_from_slice(b);
        }
        Value::Int32(v) | Value::Enum(v) => encode_varint(from_i32(*v), out),
        Value::Int64(v) => encode_varint(from_i64(*v), out),
        Value::Uint32(v) => encode_varint(u64::from(*v), out),
        Value::Uint64(v) => encode_varint(*v, out),
        Value::Bool(v) => out.push(u8::from(*v)),
        Value::Message(_) | Value::List(_) => {}
    }
}

fn scalar_len(value: &Value) -> usize {
    match value {
        Value::String(s) => varint_len(s.len() as u64) + s.len(),
        Value::Bytes(b) => varint_len(b.len() as u64) + b.len(),
        Value::Int32(v) | Value::Enum(v) => varint_len(from_i32(*v)),
        Value::Int64(v) => varint_len(from_i64(*v)),
        Value::Uint32(v) => varint_len(u64::from(*v)),
        Value::Uint64(v) => varint_len(*v),
        Value::Bool(_) => 1,
        Value::Message(_) | Value::List(_) => 0,
    }
}

fn packed_payload_len(items: &[Value]) -> usize {
    items.iter().map(scalar_len).sum()
}

fn nested_len(nested: &Record) -> usize {
    let len = encoded_len(nested);
    varint_len(len as u64) + len
}

fn field_len(field: &FieldDescriptor, value: &Value) -> usize {
    match (field.kind, value) {
        (FieldKind::Scalar(_), v) if v.is_default() => 0,
        (FieldKind::Scalar(_) | FieldKind::Optional(_), v) => tag_len(field.tag) + scalar_len(v),
        (FieldKind::Message(_), Value::Message(nested)) => tag_len(field.tag) + nested_len(nested),
        (FieldKind::RepeatedScalar { kind, packed }, Value::List(items)) => {
            if items.is_empty() {
                0
            } else if packed && kind.is_varint() {
                let payload = packed_payload_len(items);
                tag_len(field.tag) + varint_len(payload as u64) + payload
            } else {
                items.iter().map(|item| tag_len(field.tag) + scalar_len(item)).sum()
            }
        }
        (FieldKind::RepeatedMessage(_), Value::List(items)) => items
            .iter()
            .filter_map(Value::as_message)
            .map(|nested| tag_len(field.tag) + nested_len(nested))
            .sum(),
        _ => 0,
    }
}

//! wire/decode.rs
//!
//! Bytes -> record.
//!
//! Design notes:
//! - Single forward scan with a byte cursor; no backtracking, no partial results on error.
//! - Unknown field numbers with a known wire type are skipped, never stored, never fatal.
//! - Singular fields seen twice: the later value wins. Repeated fields append.
//! - Repeated varint fields accept packed and unpacked entries alike.
//! - Error offsets are absolute positions in the top-level input.

use log::trace;

use crate::record::{push_item, Record};
use crate::schema::{FieldDescriptor, FieldKind, MessageSchema, ScalarKind};
use crate::value::Value;
use crate::wire::types::{preview_bytes, DecodeOptions, TagHeader, WireError, WireType};
use crate::wire::varint::decode_varint;

/// Per-call decode statistics, folded into telemetry by `RecordCodec`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecodeStats {
    pub fields_read: u64,
    pub unknown_fields_skipped: u64,
}

/// Byte cursor over one (possibly nested) message payload.
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
    /// Absolute offset of `buf[0]` in the top-level input.
    base: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0, base: 0 }
    }

    fn nested(buf: &'a [u8], base: usize) -> Self {
        Self { buf, pos: 0, base }
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.buf.len()
    }

    pub fn read_varint(&mut self) -> Result<u64, WireError> {
        let (v, used) = decode_varint(&self.buf[self.pos..], self.offset())?;
        self.pos += used;
        Ok(v)
    }

    pub fn read_tag(&mut self) -> Result<TagHeader, WireError> {
        let at = self.offset();
        let raw = self.read_varint()?;
        TagHeader::from_raw(raw, at)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], WireError> {
        let remaining = self.buf.len() - self.pos;
        if n > remaining {
            return Err(WireError::Truncated { offset: self.base + self.buf.len() });
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    /// Length prefix followed by that many bytes.
    pub fn read_len_delimited(&mut self) -> Result<&'a [u8], WireError> {
        let at = self.offset();
        let len = self.read_varint()?;
        let len = usize::try_from(len).map_err(|_| WireError::Truncated { offset: at })?;
        self.take(len)
    }

    /// Skip one value of the given wire type.
    pub fn skip(&mut self, wire_type: WireType) -> Result<(), WireError> {
        match wire_type {
            WireType::Varint => self.read_varint().map(|_| ()),
            WireType::Fixed64 => self.take(8).map(|_| ()),
            WireType::Fixed32 => self.take(4).map(|_| ()),
            WireType::LengthDelimited => self.read_len_delimited().map(|_| ()),
        }
    }
}

/// Decode a complete record of `schema` using default limits.
pub fn decode_record(schema: &'static MessageSchema, buf: &[u8]) -> Result<Record, WireError> {
    decode_record_with(schema, buf, &DecodeOptions::default())
}

pub fn decode_record_with(
    schema: &'static MessageSchema,
    buf: &[u8],
    opts: &DecodeOptions,
) -> Result<Record, WireError> {
    let mut stats = DecodeStats::default();
    decode_with_stats(schema, buf, opts, &mut stats)
}

pub fn decode_with_stats(
    schema: &'static MessageSchema,
    buf: &[u8],
    opts: &DecodeOptions,
    stats: &mut DecodeStats,
) -> Result<Record, WireError> {
    if buf.len() > opts.max_message_len {
        return Err(WireError::MessageTooLarge { have: buf.len(), max: opts.max_message_len });
    }
    let mut record = Record::new(schema);
    let mut reader = WireReader::new(buf);
    merge_fields(&mut record, &mut reader, 0, opts, stats)?;
    Ok(record)
}

fn merge_fields(
    record: &mut Record,
    reader: &mut WireReader<'_>,
    depth: usize,
    opts: &DecodeOptions,
    stats: &mut DecodeStats,
) -> Result<(), WireError> {
    let schema = record.schema();
    while !reader.is_eof() {
        let header = reader.read_tag()?;
        let Some(index) = schema.index_of(header.field_number) else {
            trace!(
                "{}: skipping unknown field {} ({:?}) at byte {}",
                schema.name,
                header.field_number,
                header.wire_type,
                reader.offset()
            );
            reader.skip(header.wire_type)?;
            stats.unknown_fields_skipped += 1;
            continue;
        };
        let field = &schema.fields[index];
        read_field(record, index, field, header.wire_type, reader, depth, opts, stats)?;
        stats.fields_read += 1;
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn read_field(
    record: &mut Record,
    index: usize,
    field: &'static FieldDescriptor,
    wire_type: WireType,
    reader: &mut WireReader<'_>,
    depth: usize,
    opts: &DecodeOptions,
    stats: &mut DecodeStats,
) -> Result<(), WireError> {
    match field.kind {
        FieldKind::Scalar(kind) | FieldKind::Optional(kind) => {
            expect_wire_type(field, kind.wire_type(), wire_type)?;
            let value = read_scalar(field, kind, reader)?;
            *record.slot_at_mut(index) = Some(value);
        }
        FieldKind::Message(nested) => {
            expect_wire_type(field, WireType::LengthDelimited, wire_type)?;
            let value = read_message(nested, reader, depth, opts, stats)?;
            *record.slot_at_mut(index) = Some(value);
        }
        FieldKind::RepeatedScalar { kind, .. } => {
            if wire_type == WireType::LengthDelimited && kind.is_varint() {
                let payload = reader.read_len_delimited()?;
                let mut packed = WireReader::nested(payload, reader.offset() - payload.len());
                let slot = record.slot_at_mut(index);
                while !packed.is_eof() {
                    let value = read_scalar(field, kind, &mut packed)?;
                    push_item(slot, value);
                }
                // an empty packed blob still marks the list as seen
                if slot.is_none() {
                    *slot = Some(Value::List(Vec::new()));
                }
            } else {
                expect_wire_type(field, kind.wire_type(), wire_type)?;
                let value = read_scalar(field, kind, reader)?;
                push_item(record.slot_at_mut(index), value);
            }
        }
        FieldKind::RepeatedMessage(nested) => {
            expect_wire_type(field, WireType::LengthDelimited, wire_type)?;
            let value = read_message(nested, reader, depth, opts, stats)?;
            push_item(record.slot_at_mut(index), value);
        }
    }
    Ok(())
}

fn expect_wire_type(field: &'static FieldDescriptor, expected: WireType, found: WireType) -> Result<(), WireError> {
    if expected == found {
        Ok(())
    } else {
        Err(WireError::WireTypeMismatch { field: field.name, tag: field.tag, expected, found })
    }
}

fn read_message(
    schema: &'static MessageSchema,
    reader: &mut WireReader<'_>,
    depth: usize,
    opts: &DecodeOptions,
    stats: &mut DecodeStats,
) -> Result<Value, WireError> {
    if depth >= opts.max_depth {
        return Err(WireError::RecursionLimitExceeded { limit: opts.max_depth });
    }
    let payload = reader.read_len_delimited()?;
    let base = reader.offset() - payload.len();
    let mut nested = Record::new(schema);
    merge_fields(&mut nested, &mut WireReader::nested(payload, base), depth + 1, opts, stats)?;
    Ok(Value::Message(Box::new(nested)))
}

fn read_scalar(field: &'static FieldDescriptor, kind: ScalarKind, reader: &mut WireReader<'_>) -> Result<Value, WireError> {
    Ok(match kind {
        ScalarKind::String => {
            let raw = reader.read_len_delimited()?;
            match std::str::from_utf8(raw) {
                Ok(s) => Value::String(s.to_string()),
                Err(_) => return Err(WireError::InvalidUtf8 { field: field.name, preview: preview_bytes(raw) }),
            }
        }
        ScalarKind::Bytes => Value::Bytes(reader.read_len_delimited()?.to_vec()),
        // 32-bit kinds keep the low 32 bits of the 64-bit varint
        ScalarKind::Int32 => Value::Int32(reader.read_varint()? as i32),
        ScalarKind::Enum => Value::Enum(reader.read_varint()? as i32),
        ScalarKind::Uint32 => Value::Uint32(reader.read_varint()? as u32),
        ScalarKind::Int64 => Value::Int64(reader.read_varint()? as i64),
        ScalarKind::Uint64 => Value::Uint64(reader.read_varint()?),
        ScalarKind::Bool => Value::Bool(reader.read_varint()? != 0),
    })
}

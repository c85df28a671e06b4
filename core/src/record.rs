//! record.rs
//! Record instances: one storage slot per schema field.
//!
//! Design notes:
//! - Slots are allocated once from the schema and never resized.
//! - An empty slot is "absent"; reads substitute the field default.
//! - `set` of a scalar default keeps the value stored. The encoder, not the store, elides defaults.
//! - Message and optional fields have presence: only `set` establishes it, only `clear` removes it.
//! - A record is not internally synchronised; concurrent readers are fine, writers need one owner.

use std::fmt;

use thiserror::Error;

use crate::plain::{to_plain_object, PlainObject};
use crate::schema::{FieldDescriptor, FieldKind, MessageSchema, ScalarKind};
use crate::value::Value;

#[derive(Clone)]
pub struct Record {
    schema: &'static MessageSchema,
    slots: Box<[Option<Value>]>,
}

impl Record {
    /// Empty record: every field absent.
    pub fn new(schema: &'static MessageSchema) -> Self {
        Self {
            schema,
            slots: vec![None; schema.fields.len()].into_boxed_slice(),
        }
    }

    pub fn schema(&self) -> &'static MessageSchema {
        self.schema
    }

    pub fn descriptor(&self, tag: u32) -> Result<&'static FieldDescriptor, RecordError> {
        self.slot(tag).map(|(_, f)| f)
    }

    fn slot(&self, tag: u32) -> Result<(usize, &'static FieldDescriptor), RecordError> {
        match self.schema.index_of(tag) {
            Some(i) => Ok((i, &self.schema.fields[i])),
            None => Err(RecordError::InvalidFieldTag { schema: self.schema.name, tag }),
        }
    }

    /// Storage presence of `tag`.
    pub fn has(&self, tag: u32) -> Result<bool, RecordError> {
        let (i, _) = self.slot(tag)?;
        Ok(self.slots[i].is_some())
    }

    /// Stored value, or the field default when absent.
    /// Absent message and optional fields read as `None`.
    pub fn get(&self, tag: u32) -> Result<Option<Value>, RecordError> {
        let (i, field) = self.slot(tag)?;
        Ok(match &self.slots[i] {
            Some(v) => Some(v.clone()),
            None => field.default_value(),
        })
    }

    /// Raw storage, without default substitution.
    pub fn get_ref(&self, tag: u32) -> Result<Option<&Value>, RecordError> {
        let (i, _) = self.slot(tag)?;
        Ok(self.slots[i].as_ref())
    }

    pub fn set(&mut self, tag: u32, value: impl Into<Value>) -> Result<(), RecordError> {
        let (i, field) = self.slot(tag)?;
        let value = value.into();
        check_value(field, &value)?;
        self.slots[i] = Some(value);
        Ok(())
    }

    /// Append to a repeated field, preserving insertion order.
    pub fn add(&mut self, tag: u32, item: impl Into<Value>) -> Result<(), RecordError> {
        let (i, field) = self.slot(tag)?;
        let item = item.into();
        if !field.is_repeated() {
            return Err(RecordError::NotRepeated { field: field.name });
        }
        check_item(field, &item)?;
        push_item(&mut self.slots[i], item);
        Ok(())
    }

    pub fn clear(&mut self, tag: u32) -> Result<(), RecordError> {
        let (i, _) = self.slot(tag)?;
        self.slots[i] = None;
        Ok(())
    }

    pub fn clear_all(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
    }

    // --- typed accessors ---

    fn scalar_ref(&self, tag: u32, want: ScalarKind) -> Result<Option<&Value>, RecordError> {
        let (i, field) = self.slot(tag)?;
        match field.kind {
            FieldKind::Scalar(k) | FieldKind::Optional(k) if k == want => Ok(self.slots[i].as_ref()),
            _ => Err(RecordError::KindMismatch {
                field: field.name,
                expected: field.kind.describe(),
                found: want.name(),
            }),
        }
    }

    pub fn get_str(&self, tag: u32) -> Result<&str, RecordError> {
        Ok(match self.scalar_ref(tag, ScalarKind::String)? {
            Some(Value::String(s)) => s.as_str(),
            _ => "",
        })
    }

    pub fn get_bytes(&self, tag: u32) -> Result<&[u8], RecordError> {
        Ok(match self.scalar_ref(tag, ScalarKind::Bytes)? {
            Some(Value::Bytes(b)) => b.as_slice(),
            _ => &[],
        })
    }

    pub fn get_i32(&self, tag: u32) -> Result<i32, RecordError> {
        Ok(match self.scalar_ref(tag, ScalarKind::Int32)? {
            Some(Value::Int32(v)) => *v,
            _ => 0,
        })
    }

    pub fn get_i64(&self, tag: u32) -> Result<i64, RecordError> {
        Ok(match self.scalar_ref(tag, ScalarKind::Int64)? {
            Some(Value::Int64(v)) => *v,
            _ => 0,
        })
    }

    pub fn get_u32(&self, tag: u32) -> Result<u32, RecordError> {
        Ok(match self.scalar_ref(tag, ScalarKind::Uint32)? {
            Some(Value::Uint32(v)) => *v,
            _ => 0,
        })
    }

    pub fn get_u64(&self, tag: u32) -> Result<u64, RecordError> {
        Ok(match self.scalar_ref(tag, ScalarKind::Uint64)? {
            Some(Value::Uint64(v)) => *v,
            _ => 0,
        })
    }

    pub fn get_bool(&self, tag: u32) -> Result<bool, RecordError> {
        Ok(matches!(self.scalar_ref(tag, ScalarKind::Bool)?, Some(Value::Bool(true))))
    }

    pub fn get_enum(&self, tag: u32) -> Result<i32, RecordError> {
        Ok(match self.scalar_ref(tag, ScalarKind::Enum)? {
            Some(Value::Enum(v)) => *v,
            _ => 0,
        })
    }

    pub fn get_message(&self, tag: u32) -> Result<Option<&Record>, RecordError> {
        let (i, field) = self.slot(tag)?;
        match field.kind {
            FieldKind::Message(_) => Ok(self.slots[i].as_ref().and_then(Value::as_message)),
            _ => Err(RecordError::KindMismatch {
                field: field.name,
                expected: field.kind.describe(),
                found: "message",
            }),
        }
    }

    /// Nested record for mutation, created empty (and made present) if absent.
    pub fn get_or_insert_message(&mut self, tag: u32) -> Result<&mut Record, RecordError> {
        let (i, field) = self.slot(tag)?;
        let nested = match field.kind {
            FieldKind::Message(s) => s,
            _ => {
                return Err(RecordError::KindMismatch {
                    field: field.name,
                    expected: field.kind.describe(),
                    found: "message",
                })
            }
        };
        let slot = &mut self.slots[i];
        if !matches!(slot, Some(Value::Message(_))) {
            *slot = Some(Value::Message(Box::new(Record::new(nested))));
        }
        match slot {
            Some(Value::Message(r)) => Ok(&mut **r),
            _ => Err(RecordError::KindMismatch {
                field: field.name,
                expected: field.kind.describe(),
                found: "message",
            }),
        }
    }

    /// Items of a repeated field, empty when absent.
    pub fn get_list(&self, tag: u32) -> Result<&[Value], RecordError> {
        let (i, field) = self.slot(tag)?;
        if !field.is_repeated() {
            return Err(RecordError::NotRepeated { field: field.name });
        }
        Ok(self.slots[i].as_ref().and_then(Value::as_list).unwrap_or(&[]))
    }

    // --- whole-record views ---

    /// Present fields in schema order.
    pub fn present_fields(&self) -> impl Iterator<Item = (&'static FieldDescriptor, &Value)> + '_ {
        self.schema
            .fields
            .iter()
            .zip(self.slots.iter())
            .filter_map(|(f, s)| s.as_ref().map(|v| (f, v)))
    }

    /// True when encoding would produce zero bytes.
    pub fn is_default(&self) -> bool {
        self.present_fields().all(|(f, v)| match f.kind {
            FieldKind::Scalar(_) => v.is_default(),
            FieldKind::RepeatedScalar { .. } | FieldKind::RepeatedMessage(_) => v.is_default(),
            FieldKind::Optional(_) | FieldKind::Message(_) => false,
        })
    }

    pub fn to_plain_object(&self) -> PlainObject {
        to_plain_object(self)
    }

    // --- decoder hooks (kinds already checked against the wire) ---

    pub(crate) fn slot_at_mut(&mut self, index: usize) -> &mut Option<Value> {
        &mut self.slots[index]
    }
}

pub(crate) fn push_item(slot: &mut Option<Value>, item: Value) {
    match slot {
        Some(Value::List(items)) => items.push(item),
        _ => *slot = Some(Value::List(vec![item])),
    }
}

fn check_value(field: &'static FieldDescriptor, value: &Value) -> Result<(), RecordError> {
    match (field.kind, value) {
        (FieldKind::Scalar(k) | FieldKind::Optional(k), v) if v.matches(k) => Ok(()),
        (FieldKind::Message(s), Value::Message(r)) => check_schema(field, s, r),
        (FieldKind::RepeatedScalar { .. } | FieldKind::RepeatedMessage(_), Value::List(items)) => {
            items.iter().try_for_each(|item| check_item(field, item))
        }
        (_, v) => Err(RecordError::KindMismatch {
            field: field.name,
            expected: field.kind.describe(),
            found: v.kind_name(),
        }),
    }
}

fn check_item(field: &'static FieldDescriptor, item: &Value) -> Result<(), RecordError> {
    match (field.kind, item) {
        (FieldKind::RepeatedScalar { kind, .. }, v) if v.matches(kind) => Ok(()),
        (FieldKind::RepeatedMessage(s), Value::Message(r)) => check_schema(field, s, r),
        (_, v) => Err(RecordError::KindMismatch {
            field: field.name,
            expected: field.kind.describe(),
            found: v.kind_name(),
        }),
    }
}

fn check_schema(
    field: &'static FieldDescriptor,
    expected: &'static MessageSchema,
    record: &Record,
) -> Result<(), RecordError> {
    if record.schema.same_as(expected) {
        Ok(())
    } else {
        Err(RecordError::SchemaMismatch {
            field: field.name,
            expected: expected.name,
            found: record.schema.name,
        })
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.schema.same_as(other.schema) && self.slots == other.slots
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.schema.name);
        for (field, value) in self.present_fields() {
            s.field(field.name, value);
        }
        s.finish()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// Tag not declared by the schema. Tags are compile-time constants, so this is a caller bug.
    #[error("invalid field tag {tag} for {schema}")]
    InvalidFieldTag { schema: &'static str, tag: u32 },

    #[error("field {field}: expected {expected}, got {found}")]
    KindMismatch { field: &'static str, expected: String, found: &'static str },

    #[error("field {field}: expected record of {expected}, got {found}")]
    SchemaMismatch { field: &'static str, expected: &'static str, found: &'static str },

    #[error("field {field} is not repeated")]
    NotRepeated { field: &'static str },
}

//! schema/types.rs
//! Field descriptors and message schemas.
//!
//! Design notes:
//! - Schemas are `static` items: built at compile time, never mutated, shared freely across threads.
//! - Nested (and recursive) message fields hold a `&'static MessageSchema`, never an owned copy.
//! - Schema identity is address identity; two statics with the same shape are still different schemas.

use std::fmt;
use std::ptr;

use thiserror::Error;

use crate::constants::{MAX_FIELD_NUMBER, MIN_FIELD_NUMBER, RESERVED_FIELD_NUMBERS};
use crate::value::Value;
use crate::wire::types::WireType;

/// Scalar value kinds a field (or a repeated element) can hold.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Bytes,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Bool,
    Enum,
}

impl ScalarKind {
    /// Wire type used for a single (unpacked) value of this kind.
    pub const fn wire_type(self) -> WireType {
        match self {
            ScalarKind::String | ScalarKind::Bytes => WireType::LengthDelimited,
            _ => WireType::Varint,
        }
    }

    /// Varint kinds are the only ones allowed to use packed encoding.
    pub const fn is_varint(self) -> bool {
        matches!(self.wire_type(), WireType::Varint)
    }

    pub const fn name(self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Bytes  => "bytes",
            ScalarKind::Int32  => "int32",
            ScalarKind::Int64  => "int64",
            ScalarKind::Uint32 => "uint32",
            ScalarKind::Uint64 => "uint64",
            ScalarKind::Bool   => "bool",
            ScalarKind::Enum   => "enum",
        }
    }

    /// Zero-equivalent value for the kind.
    pub fn default_value(self) -> Value {
        match self {
            ScalarKind::String => Value::String(String::new()),
            ScalarKind::Bytes  => Value::Bytes(Vec::new()),
            ScalarKind::Int32  => Value::Int32(0),
            ScalarKind::Int64  => Value::Int64(0),
            ScalarKind::Uint32 => Value::Uint32(0),
            ScalarKind::Uint64 => Value::Uint64(0),
            ScalarKind::Bool   => Value::Bool(false),
            ScalarKind::Enum   => Value::Enum(0),
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shape of a field: scalar, presence-tracked scalar, nested message, or a repeated variant.
#[derive(Copy, Clone)]
pub enum FieldKind {
    /// Implicit presence: the default value is never written to the wire.
    Scalar(ScalarKind),
    /// Explicit presence (wrapper / `optional`): unset reads as `None`, a set zero is still written.
    Optional(ScalarKind),
    Message(&'static MessageSchema),
    RepeatedScalar { kind: ScalarKind, packed: bool },
    RepeatedMessage(&'static MessageSchema),
}

impl FieldKind {
    pub const fn is_repeated(&self) -> bool {
        matches!(self, FieldKind::RepeatedScalar { .. } | FieldKind::RepeatedMessage(_))
    }

    /// Nested schema for message and repeated-message fields.
    pub const fn message_schema(&self) -> Option<&'static MessageSchema> {
        match self {
            FieldKind::Message(s) | FieldKind::RepeatedMessage(s) => Some(*s),
            _ => None,
        }
    }

    /// Human readable description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            FieldKind::Scalar(k) => k.name().to_string(),
            FieldKind::Optional(k) => format!("optional {}", k),
            FieldKind::Message(s) => format!("message {}", s.name),
            FieldKind::RepeatedScalar { kind, packed: true } => format!("packed repeated {}", kind),
            FieldKind::RepeatedScalar { kind, packed: false } => format!("repeated {}", kind),
            FieldKind::RepeatedMessage(s) => format!("repeated message {}", s.name),
        }
    }
}

// Manual impls: a derived Debug/PartialEq would walk into recursive schemas.
impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl PartialEq for FieldKind {
    fn eq(&self, other: &Self) -> bool {
        use FieldKind::*;
        match (self, other) {
            (Scalar(a), Scalar(b)) | (Optional(a), Optional(b)) => a == b,
            (Message(a), Message(b)) | (RepeatedMessage(a), RepeatedMessage(b)) => a.same_as(b),
            (
                RepeatedScalar { kind: a, packed: pa },
                RepeatedScalar { kind: b, packed: pb },
            ) => a == b && pa == pb,
            _ => false,
        }
    }
}

/// One field of a record schema.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    /// snake_case source name.
    pub name: &'static str,
    /// Wire field number; unique within the schema and never reused.
    pub tag: u32,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, tag: u32, kind: FieldKind) -> Self {
        Self { name, tag, kind }
    }

    pub const fn scalar(name: &'static str, tag: u32, kind: ScalarKind) -> Self {
        Self::new(name, tag, FieldKind::Scalar(kind))
    }

    pub const fn string(name: &'static str, tag: u32) -> Self {
        Self::scalar(name, tag, ScalarKind::String)
    }

    pub const fn optional(name: &'static str, tag: u32, kind: ScalarKind) -> Self {
        Self::new(name, tag, FieldKind::Optional(kind))
    }

    pub const fn message(name: &'static str, tag: u32, schema: &'static MessageSchema) -> Self {
        Self::new(name, tag, FieldKind::Message(schema))
    }

    pub const fn repeated(name: &'static str, tag: u32, kind: ScalarKind) -> Self {
        Self::new(name, tag, FieldKind::RepeatedScalar { kind, packed: false })
    }

    pub const fn packed(name: &'static str, tag: u32, kind: ScalarKind) -> Self {
        Self::new(name, tag, FieldKind::RepeatedScalar { kind, packed: true })
    }

    pub const fn repeated_message(name: &'static str, tag: u32, schema: &'static MessageSchema) -> Self {
        Self::new(name, tag, FieldKind::RepeatedMessage(schema))
    }

    pub const fn is_repeated(&self) -> bool {
        self.kind.is_repeated()
    }

    /// lowerCamelCase name exposed by the plain-object projection.
    pub fn json_name(&self) -> String {
        to_lower_camel(self.name)
    }

    /// Value a reader sees when the field is absent. `None` for message and optional fields.
    pub fn default_value(&self) -> Option<Value> {
        match self.kind {
            FieldKind::Scalar(k) => Some(k.default_value()),
            FieldKind::RepeatedScalar { .. } | FieldKind::RepeatedMessage(_) => Some(Value::List(Vec::new())),
            FieldKind::Optional(_) | FieldKind::Message(_) => None,
        }
    }
}

/// Ordered field list for one record type.
///
/// Define schemas as statics with a struct literal so the field slice is
/// extended to `'static`:
///
/// ```
/// use record_codec::schema::{FieldDescriptor, MessageSchema, ScalarKind};
///
/// static TAGGED: MessageSchema = MessageSchema {
///     name: "demo.Tagged",
///     fields: &[
///         FieldDescriptor::string("id", 1),
///         FieldDescriptor::repeated("tags", 2, ScalarKind::String),
///     ],
/// };
/// assert_eq!(TAGGED.field(2).map(|f| f.name), Some("tags"));
/// ```
#[derive(Debug)]
pub struct MessageSchema {
    /// Fully qualified record type name.
    pub name: &'static str,
    /// Fields in declaration order; encoding follows this order.
    pub fields: &'static [FieldDescriptor],
}

impl MessageSchema {
    pub fn field(&self, tag: u32) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.tag == tag)
    }

    /// Slot position of `tag` inside a record's storage.
    pub fn index_of(&self, tag: u32) -> Option<usize> {
        self.fields.iter().position(|f| f.tag == tag)
    }

    /// Accepts either the snake_case source name or its lowerCamelCase form.
    pub fn field_by_name(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .or_else(|| self.fields.iter().find(|f| f.json_name() == name))
    }

    pub fn same_as(&self, other: &MessageSchema) -> bool {
        ptr::eq(self, other)
    }

    /// Validate this schema and every schema reachable from it.
    pub fn validate(&'static self) -> Result<(), SchemaError> {
        let mut seen: Vec<&'static MessageSchema> = Vec::new();
        validate_tree(self, &mut seen)
    }

    /// Validate this schema's own field table (no recursion).
    pub fn validate_fields(&self) -> Result<(), SchemaError> {
        for (i, f) in self.fields.iter().enumerate() {
            if f.tag < MIN_FIELD_NUMBER || f.tag > MAX_FIELD_NUMBER {
                return Err(SchemaError::InvalidFieldNumber { schema: self.name, field: f.name, tag: f.tag });
            }
            if RESERVED_FIELD_NUMBERS.contains(&f.tag) {
                return Err(SchemaError::ReservedFieldNumber { schema: self.name, field: f.name, tag: f.tag });
            }
            if let FieldKind::RepeatedScalar { kind, packed: true } = f.kind {
                if !kind.is_varint() {
                    return Err(SchemaError::PackedNonVarint { schema: self.name, field: f.name, kind });
                }
            }
            for other in &self.fields[i + 1..] {
                if other.tag == f.tag {
                    return Err(SchemaError::DuplicateTag { schema: self.name, tag: f.tag });
                }
                if other.name == f.name {
                    return Err(SchemaError::DuplicateFieldName { schema: self.name, name: f.name });
                }
            }
        }
        Ok(())
    }
}

fn validate_tree(
    schema: &'static MessageSchema,
    seen: &mut Vec<&'static MessageSchema>,
) -> Result<(), SchemaError> {
    if seen.iter().any(|s| s.same_as(schema)) {
        return Ok(());
    }
    seen.push(schema);
    schema.validate_fields()?;
    for f in schema.fields {
        if let Some(nested) = f.kind.message_schema() {
            validate_tree(nested, seen)?;
        }
    }
    Ok(())
}

/// `event_id` -> `eventId`, `feature_2_flag` -> `feature2Flag`.
pub fn to_lower_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("{schema}.{field}: field number {tag} outside 1..=536870911")]
    InvalidFieldNumber { schema: &'static str, field: &'static str, tag: u32 },

    #[error("{schema}.{field}: field number {tag} is in the reserved range 19000..=19999")]
    ReservedFieldNumber { schema: &'static str, field: &'static str, tag: u32 },

    #[error("{schema}: field number {tag} declared twice")]
    DuplicateTag { schema: &'static str, tag: u32 },

    #[error("{schema}: field name {name:?} declared twice")]
    DuplicateFieldName { schema: &'static str, name: &'static str },

    #[error("{schema}.{field}: packed encoding requires a varint kind, got {kind}")]
    PackedNonVarint { schema: &'static str, field: &'static str, kind: ScalarKind },

    #[error("registry: schema {name:?} registered twice")]
    DuplicateSchemaName { name: &'static str },

    #[error("registry: unknown schema {name:?}")]
    UnknownSchema { name: String },
}

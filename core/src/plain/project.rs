//! plain/project.rs
//! Record -> plain object. Read-only: never touches the record's storage.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::Value as Json;

use crate::plain::types::{PlainError, PlainObject};
use crate::record::Record;
use crate::schema::FieldKind;
use crate::value::Value;

/// Project every schema field:
/// - scalars: stored value or default
/// - optional / message: value when present, `null` when absent
/// - repeated: list in insertion order, `[]` when absent
pub fn to_plain_object(record: &Record) -> PlainObject {
    let mut out = PlainObject::new();
    let schema = record.schema();
    for field in schema.fields {
        // slot lookups below cannot fail: `field` comes from the record's own schema
        let stored = record.get_ref(field.tag).ok().flatten();
        let projected = match (stored, field.kind) {
            (Some(v), _) => value_to_json(v),
            (None, FieldKind::Scalar(k)) => value_to_json(&k.default_value()),
            (None, FieldKind::RepeatedScalar { .. } | FieldKind::RepeatedMessage(_)) => Json::Array(Vec::new()),
            (None, FieldKind::Optional(_) | FieldKind::Message(_)) => Json::Null,
        };
        out.insert(field.json_name(), projected);
    }
    out
}

pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::String(s) => Json::String(s.clone()),
        Value::Bytes(b) => Json::String(STANDARD.encode(b)),
        Value::Int32(v) | Value::Enum(v) => Json::from(*v),
        Value::Int64(v) => Json::from(*v),
        Value::Uint32(v) => Json::from(*v),
        Value::Uint64(v) => Json::from(*v),
        Value::Bool(v) => Json::Bool(*v),
        Value::Message(r) => Json::Object(to_plain_object(r)),
        Value::List(items) => Json::Array(items.iter().map(value_to_json).collect()),
    }
}

pub fn to_json_string(record: &Record) -> Result<String, PlainError> {
    Ok(serde_json::to_string(&to_plain_object(record))?)
}

pub fn to_json_string_pretty(record: &Record) -> Result<String, PlainError> {
    Ok(serde_json::to_string_pretty(&to_plain_object(record))?)
}

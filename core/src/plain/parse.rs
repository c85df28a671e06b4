//! plain/parse.rs
//! Plain object -> record, the inverse of `to_plain_object`.
//!
//! Notes:
//! - Keys may be lowerCamelCase or the snake_case source name.
//! - `null` leaves a field absent.
//! - 64-bit integers are also accepted as decimal strings (the JSON mapping convention).

use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::Value as Json;

use crate::plain::types::{describe_json, PlainError, PlainObject};
use crate::record::Record;
use crate::schema::{FieldDescriptor, FieldKind, MessageSchema, ScalarKind};
use crate::value::Value;

pub fn from_plain_object(schema: &'static MessageSchema, map: &PlainObject) -> Result<Record, PlainError> {
    let mut record = Record::new(schema);
    for (key, json) in map {
        let field = schema
            .field_by_name(key)
            .ok_or_else(|| PlainError::UnknownField { schema: schema.name, key: key.clone() })?;
        if json.is_null() {
            continue;
        }
        let value = match field.kind {
            FieldKind::Scalar(k) | FieldKind::Optional(k) => json_to_scalar(field, k, json)?,
            FieldKind::Message(nested) => json_to_message(field, nested, json)?,
            FieldKind::RepeatedScalar { kind, .. } => Value::List(
                expect_array(field, json)?
                    .iter()
                    .map(|item| json_to_scalar(field, kind, item))
                    .collect::<Result<_, _>>()?,
            ),
            FieldKind::RepeatedMessage(nested) => Value::List(
                expect_array(field, json)?
                    .iter()
                    .map(|item| json_to_message(field, nested, item))
                    .collect::<Result<_, _>>()?,
            ),
        };
        record.set(field.tag, value)?;
    }
    Ok(record)
}

pub fn from_json_str(schema: &'static MessageSchema, s: &str) -> Result<Record, PlainError> {
    match serde_json::from_str::<Json>(s)? {
        Json::Object(map) => from_plain_object(schema, &map),
        other => Err(PlainError::NotAnObject { found: describe_json(&other) }),
    }
}

fn invalid(field: &FieldDescriptor, expected: &'static str, json: &Json) -> PlainError {
    PlainError::InvalidValue { field: field.name, expected, found: describe_json(json) }
}

fn expect_array<'j>(field: &FieldDescriptor, json: &'j Json) -> Result<&'j Vec<Json>, PlainError> {
    json.as_array().ok_or_else(|| invalid(field, "array", json))
}

fn json_to_message(
    field: &FieldDescriptor,
    schema: &'static MessageSchema,
    json: &Json,
) -> Result<Value, PlainError> {
    match json {
        Json::Object(map) => Ok(Value::Message(Box::new(from_plain_object(schema, map)?))),
        other => Err(invalid(field, "object", other)),
    }
}

fn as_i64(json: &Json) -> Option<i64> {
    json.as_i64().or_else(|| json.as_str().and_then(|s| s.parse().ok()))
}

fn as_u64(json: &Json) -> Option<u64> {
    json.as_u64().or_else(|| json.as_str().and_then(|s| s.parse().ok()))
}

fn json_to_scalar(field: &FieldDescriptor, kind: ScalarKind, json: &Json) -> Result<Value, PlainError> {
    let value = match kind {
        ScalarKind::String => json.as_str().map(|s| Value::String(s.to_string())),
        ScalarKind::Bytes => json.as_str().and_then(|s| STANDARD.decode(s).ok()).map(Value::Bytes),
        ScalarKind::Int32 => json.as_i64().and_then(|v| i32::try_from(v).ok()).map(Value::Int32),
        ScalarKind::Enum => json.as_i64().and_then(|v| i32::try_from(v).ok()).map(Value::Enum),
        ScalarKind::Uint32 => json.as_u64().and_then(|v| u32::try_from(v).ok()).map(Value::Uint32),
        ScalarKind::Int64 => as_i64(json).map(Value::Int64),
        ScalarKind::Uint64 => as_u64(json).map(Value::Uint64),
        ScalarKind::Bool => json.as_bool().map(Value::Bool),
    };
    value.ok_or_else(|| invalid(field, kind.name(), json))
}

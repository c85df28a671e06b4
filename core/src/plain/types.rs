//! plain/types.rs
//! Plain-object map type and projection errors.

use thiserror::Error;

use crate::record::RecordError;

/// Field name (lowerCamelCase) -> JSON value.
pub type PlainObject = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Error)]
pub enum PlainError {
    #[error("{schema}: unknown field {key:?}")]
    UnknownField { schema: &'static str, key: String },

    #[error("field {field}: expected {expected}, got {found}")]
    InvalidValue { field: &'static str, expected: &'static str, found: String },

    #[error("expected a JSON object, got {found}")]
    NotAnObject { found: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Short description of a JSON value for error messages.
pub(crate) fn describe_json(v: &serde_json::Value) -> String {
    const MAX_CHARS: usize = 40;
    let s = v.to_string();
    match s.char_indices().nth(MAX_CHARS) {
        Some((cut, _)) => format!("{}..", &s[..cut]),
        None => s,
    }
}

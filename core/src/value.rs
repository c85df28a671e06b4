//! value.rs
//! Tagged union over every value a record slot can hold.

use crate::record::Record;
use crate::schema::ScalarKind;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Bytes(Vec<u8>),
    Int32(i32),
    Int64(i64),
    Uint32(u32),
    Uint64(u64),
    Bool(bool),
    /// Enum fields carry their raw integer; unknown values are kept as-is.
    Enum(i32),
    Message(Box<Record>),
    List(Vec<Value>),
}

impl Value {
    /// Scalar kind of this value, `None` for messages and lists.
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            Value::String(_) => Some(ScalarKind::String),
            Value::Bytes(_)  => Some(ScalarKind::Bytes),
            Value::Int32(_)  => Some(ScalarKind::Int32),
            Value::Int64(_)  => Some(ScalarKind::Int64),
            Value::Uint32(_) => Some(ScalarKind::Uint32),
            Value::Uint64(_) => Some(ScalarKind::Uint64),
            Value::Bool(_)   => Some(ScalarKind::Bool),
            Value::Enum(_)   => Some(ScalarKind::Enum),
            Value::Message(_) | Value::List(_) => None,
        }
    }

    pub fn matches(&self, kind: ScalarKind) -> bool {
        self.scalar_kind() == Some(kind)
    }

    /// True when the value equals its kind's zero value (proto3 elision rule).
    pub fn is_default(&self) -> bool {
        match self {
            Value::String(s) => s.is_empty(),
            Value::Bytes(b)  => b.is_empty(),
            Value::Int32(v) | Value::Enum(v) => *v == 0,
            Value::Int64(v)  => *v == 0,
            Value::Uint32(v) => *v == 0,
            Value::Uint64(v) => *v == 0,
            Value::Bool(v)   => !*v,
            Value::List(items) => items.is_empty(),
            // presence of a message is never "default"
            Value::Message(_) => false,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Message(_) => "message",
            Value::List(_) => "list",
            other => other.scalar_kind().map(ScalarKind::name).unwrap_or("unknown"),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_message(&self) -> Option<&Record> {
        match self {
            Value::Message(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Uint32(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Message(Box::new(r))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

use thiserror::Error;

use crate::{
    plain::PlainError,
    record::RecordError,
    schema::SchemaError,
    wire::WireError,
};

/// Unified codec error covering schema, record access, wire and projection failures.
/// - `From<T>` impls let `?` cross layers.
/// - Messages come from the wrapped error so logs stay specific.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Schema table rejected at validation time.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Field access with a bad tag or a value of the wrong kind.
    #[error("record error: {0}")]
    Record(#[from] RecordError),

    /// Malformed or truncated wire input.
    #[error("wire error: {0}")]
    Wire(#[from] WireError),

    /// Plain-object / JSON conversion failure.
    #[error("plain object error: {0}")]
    Plain(#[from] PlainError),
}

impl CodecError {
    /// True for truncated input: the caller may retry once more bytes arrive.
    pub fn is_truncated(&self) -> bool {
        matches!(self, CodecError::Wire(WireError::Truncated { .. }))
    }
}

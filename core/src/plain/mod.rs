//! plain/mod.rs
//! Plain key/value projection of records, bridged through `serde_json`.
//!
//! This is the surface logging, JSON bridges and display layers consume.

pub mod types;
pub mod project;
pub mod parse;

pub use types::{PlainError, PlainObject};
pub use project::{to_json_string, to_json_string_pretty, to_plain_object, value_to_json};
pub use parse::{from_json_str, from_plain_object};

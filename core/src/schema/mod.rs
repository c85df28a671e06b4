//! schema/mod.rs
//! Record schema metadata: field kinds, descriptors, message schemas and the registry.
//!
//! Notes:
//! - Everything here is immutable after compilation; no locking is ever needed to read it.
//! - Field order inside a schema is declaration order and drives deterministic encoding.

pub mod types;
pub mod registry;

pub use types::*;
pub use registry::*;

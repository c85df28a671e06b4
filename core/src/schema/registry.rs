//! schema/registry.rs
//! Process-wide, read-only table of record schemas.

use log::warn;

use crate::schema::types::{MessageSchema, SchemaError};

/// Name -> schema table, usable from a `static`.
///
/// ```
/// use record_codec::schema::{FieldDescriptor, MessageSchema, SchemaRegistry};
///
/// static PING: MessageSchema = MessageSchema {
///     name: "demo.Ping",
///     fields: &[FieldDescriptor::string("id", 1)],
/// };
/// static ALL: [&MessageSchema; 1] = [&PING];
/// static REGISTRY: SchemaRegistry = SchemaRegistry::new(&ALL);
///
/// assert!(REGISTRY.lookup("demo.Ping").is_some());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SchemaRegistry {
    schemas: &'static [&'static MessageSchema],
}

impl SchemaRegistry {
    pub const fn new(schemas: &'static [&'static MessageSchema]) -> Self {
        Self { schemas }
    }

    pub fn lookup(&self, name: &str) -> Option<&'static MessageSchema> {
        self.schemas.iter().copied().find(|s| s.name == name)
    }

    pub fn resolve(&self, name: &str) -> Result<&'static MessageSchema, SchemaError> {
        self.lookup(name)
            .ok_or_else(|| SchemaError::UnknownSchema { name: name.to_string() })
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static MessageSchema> + '_ {
        self.schemas.iter().copied()
    }

    /// Check registry names are unique and every registered schema tree is well formed.
    /// Meant to run once at startup.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for (i, s) in self.schemas.iter().enumerate() {
            if self.schemas[i + 1..].iter().any(|o| o.name == s.name) {
                warn!("schema registry: duplicate schema name {}", s.name);
                return Err(SchemaError::DuplicateSchemaName { name: s.name });
            }
            if let Err(e) = s.validate() {
                warn!("schema registry: {} rejected: {}", s.name, e);
                return Err(e);
            }
        }
        Ok(())
    }
}

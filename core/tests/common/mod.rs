//! Sample schemas shared by the integration tests.
//! A small slice of the domain-event shapes: a feature flag event with
//! variations, the two-field tagged document, and a self-referencing tree.

#![allow(dead_code)]

use record_codec::record::Record;
use record_codec::schema::{FieldDescriptor, MessageSchema, ScalarKind, SchemaRegistry};
use record_codec::value::Value;
use record_codec::wire::varint::encode_varint;
use record_codec::wire::{TagHeader, WireType};

pub mod doc {
    pub const ID: u32 = 1;
    pub const TAGS: u32 = 2;
}

pub static TAGGED_DOC: MessageSchema = MessageSchema {
    name: "test.TaggedDoc",
    fields: &[
        FieldDescriptor::string("id", doc::ID),
        FieldDescriptor::repeated("tags", doc::TAGS, ScalarKind::String),
    ],
};

pub mod variation {
    pub const ID: u32 = 1;
    pub const VALUE: u32 = 2;
    pub const NAME: u32 = 3;
}

pub static VARIATION: MessageSchema = MessageSchema {
    name: "event.Variation",
    fields: &[
        FieldDescriptor::string("id", variation::ID),
        FieldDescriptor::string("value", variation::VALUE),
        FieldDescriptor::string("name", variation::NAME),
    ],
};

pub mod feature {
    pub const ID: u32 = 1;
    pub const NAME: u32 = 2;
    pub const ENABLED: u32 = 3;
    pub const VERSION: u32 = 4;
    pub const CREATED_AT: u32 = 5;
    pub const KIND: u32 = 6;
    pub const VARIATIONS: u32 = 7;
    pub const TAGS: u32 = 8;
    pub const RULE_KINDS: u32 = 9;
    pub const DEFAULT_VARIATION: u32 = 10;
    pub const OFF_VARIATION_INDEX: u32 = 11;
    pub const PAYLOAD: u32 = 12;
    pub const SEQUENCE: u32 = 13;
    pub const WEIGHT: u32 = 14;
    pub const SCORES: u32 = 15;
}

pub static FEATURE_EVENT: MessageSchema = MessageSchema {
    name: "event.FeatureCreatedEvent",
    fields: &[
        FieldDescriptor::string("id", feature::ID),
        FieldDescriptor::string("name", feature::NAME),
        FieldDescriptor::scalar("enabled", feature::ENABLED, ScalarKind::Bool),
        FieldDescriptor::scalar("version", feature::VERSION, ScalarKind::Int32),
        FieldDescriptor::scalar("created_at", feature::CREATED_AT, ScalarKind::Int64),
        FieldDescriptor::scalar("kind", feature::KIND, ScalarKind::Enum),
        FieldDescriptor::repeated_message("variations", feature::VARIATIONS, &VARIATION),
        FieldDescriptor::repeated("tags", feature::TAGS, ScalarKind::String),
        FieldDescriptor::packed("rule_kinds", feature::RULE_KINDS, ScalarKind::Enum),
        FieldDescriptor::message("default_variation", feature::DEFAULT_VARIATION, &VARIATION),
        FieldDescriptor::optional("off_variation_index", feature::OFF_VARIATION_INDEX, ScalarKind::Int32),
        FieldDescriptor::scalar("payload", feature::PAYLOAD, ScalarKind::Bytes),
        FieldDescriptor::scalar("sequence", feature::SEQUENCE, ScalarKind::Uint64),
        FieldDescriptor::scalar("weight", feature::WEIGHT, ScalarKind::Uint32),
        FieldDescriptor::repeated("scores", feature::SCORES, ScalarKind::Int64),
    ],
};

pub mod tree {
    pub const LABEL: u32 = 1;
    pub const CHILDREN: u32 = 2;
}

pub static TREE_NODE: MessageSchema = MessageSchema {
    name: "test.TreeNode",
    fields: &[
        FieldDescriptor::string("label", tree::LABEL),
        FieldDescriptor::repeated_message("children", tree::CHILDREN, &TREE_NODE),
    ],
};

pub static ALL: [&MessageSchema; 4] = [&TAGGED_DOC, &VARIATION, &FEATURE_EVENT, &TREE_NODE];
pub static REGISTRY: SchemaRegistry = SchemaRegistry::new(&ALL);

pub fn variation_record(id: &str, value: &str) -> Record {
    let mut v = Record::new(&VARIATION);
    v.set(variation::ID, id).unwrap();
    v.set(variation::VALUE, value).unwrap();
    v
}

/// Feature event with every field populated.
pub fn sample_feature() -> Record {
    let mut r = Record::new(&FEATURE_EVENT);
    r.set(feature::ID, "feature-1").unwrap();
    r.set(feature::NAME, "dark mode").unwrap();
    r.set(feature::ENABLED, true).unwrap();
    r.set(feature::VERSION, 3).unwrap();
    r.set(feature::CREATED_AT, 1_700_000_000_123i64).unwrap();
    r.set(feature::KIND, Value::Enum(2)).unwrap();
    r.add(feature::VARIATIONS, variation_record("v-on", "true")).unwrap();
    r.add(feature::VARIATIONS, variation_record("v-off", "false")).unwrap();
    r.add(feature::TAGS, "web").unwrap();
    r.add(feature::TAGS, "beta").unwrap();
    for k in [1, 2, 3] {
        r.add(feature::RULE_KINDS, Value::Enum(k)).unwrap();
    }
    r.set(feature::DEFAULT_VARIATION, variation_record("v-off", "false")).unwrap();
    r.set(feature::OFF_VARIATION_INDEX, 1).unwrap();
    r.set(feature::PAYLOAD, vec![0xDE, 0xAD, 0xBE, 0xEF]).unwrap();
    r.set(feature::SEQUENCE, u64::MAX).unwrap();
    r.set(feature::WEIGHT, 70_000u32).unwrap();
    r.add(feature::SCORES, -5i64).unwrap();
    r.add(feature::SCORES, 0i64).unwrap();
    r.add(feature::SCORES, 12i64).unwrap();
    r
}

/// Chain of `depth` nested children below the root.
pub fn tree_chain(depth: usize) -> Record {
    let mut leaf = Record::new(&TREE_NODE);
    leaf.set(tree::LABEL, format!("n{}", depth)).unwrap();
    for level in (0..depth).rev() {
        let mut parent = Record::new(&TREE_NODE);
        parent.set(tree::LABEL, format!("n{}", level)).unwrap();
        parent.add(tree::CHILDREN, leaf).unwrap();
        leaf = parent;
    }
    leaf
}

/// Tag header followed by an already-encoded payload, for hand-built wire fixtures.
pub fn raw_field(field: u32, wire_type: WireType, payload: &[u8], out: &mut Vec<u8>) {
    encode_varint(TagHeader::new(field, wire_type).to_raw(), out);
    out.extend_from_slice(payload);
}

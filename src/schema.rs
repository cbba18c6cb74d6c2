//! Record schemas, triples, partial per-shard results and vocabulary constants
//!
//! Every shard kind has an explicit record struct at the deserialization
//! boundary. Records are converted into [`Triple`]s by the shard reader so
//! classifiers only ever see one shape.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Opaque knowledge-base entity identifier (e.g. `Q42`)
pub type Qid = String;

/// Global entity -> normalized alias set. Insertion ordered so that
/// inversion is reproducible for the same input order.
pub type EntityAliases = IndexMap<Qid, IndexSet<String>>;

/// Final artifact: normalized alias -> owning entities
pub type AliasIndex = IndexMap<String, Vec<Qid>>;

/// The "instance of" property code
pub const INSTANCE_OF_PROPERTY: &str = "P31";

/// Type value marking an individual person
pub const HUMAN_TYPE: &str = "Q5";

/// Pseudo property assigned to triples read from alias-table shards
pub const ALIAS_TABLE_PROPERTY: &str = "alias";

/// Type values marking disambiguation pages
pub const DISAMBIGUATION_MARKERS: &[&str] = &[
    "Q4167410",  // Wikimedia disambiguation page
    "Q22808320", // Wikimedia human name disambiguation page
];

/// Properties whose values are alternate names of the subject entity
pub const ALIAS_PROPERTIES: &[&str] = &[
    "P138", "P734", "P735", "P742", "P1448", "P1449", "P1477", "P1533",
    "P1549", "P1559", "P1635", "P1705", "P1782", "P1785", "P1786", "P1787",
    "P1810", "P1813", "P1814", "P1888", "P1950", "P2358", "P2359", "P2365",
    "P2366", "P2521", "P2562", "P2976", "P3321", "P4239", "P4284", "P4970",
    "P5056", "P5278", "P6978", "P7383",
];

/// One (entity, property, value) fact. Exists only during a shard scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub qid: Qid,
    pub property_id: String,
    pub value: String,
}

/// A record type that can appear in a shard file
pub trait ShardRecord: serde::de::DeserializeOwned {
    fn into_triple(self) -> Triple;
}

/// Alias-table shard record: `{"qid": ..., "alias": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasRecord {
    pub qid: Qid,
    pub alias: String,
}

impl ShardRecord for AliasRecord {
    fn into_triple(self) -> Triple {
        Triple {
            qid: self.qid,
            property_id: ALIAS_TABLE_PROPERTY.to_string(),
            value: self.alias,
        }
    }
}

/// Entity-value shard record: `{"qid": ..., "property_id": ..., "value": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueRecord {
    pub qid: Qid,
    pub property_id: String,
    pub value: String,
}

impl ShardRecord for ValueRecord {
    fn into_triple(self) -> Triple {
        Triple {
            qid: self.qid,
            property_id: self.property_id,
            value: self.value,
        }
    }
}

/// Entity-relation shard record. Same fields as [`ValueRecord`], but the
/// value is the identifier of another entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationRecord {
    pub qid: Qid,
    pub property_id: String,
    pub value: String,
}

impl ShardRecord for RelationRecord {
    fn into_triple(self) -> Triple {
        Triple {
            qid: self.qid,
            property_id: self.property_id,
            value: self.value,
        }
    }
}

/// Anything a shard task returns, so the dispatcher can report progress
pub trait EntityCount {
    /// Number of distinct entities found in the shard
    fn entity_count(&self) -> usize;
}

/// Raw (not yet normalized) aliases collected from one shard
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialAliases {
    pub entries: IndexMap<Qid, Vec<String>>,
}

impl PartialAliases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, qid: &str, alias: String) {
        if let Some(aliases) = self.entries.get_mut(qid) {
            aliases.push(alias);
        } else {
            self.entries.insert(qid.to_string(), vec![alias]);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EntityCount for PartialAliases {
    fn entity_count(&self) -> usize {
        self.entries.len()
    }
}

/// Entity -> type value from one shard; last write wins per entity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialTypes {
    pub entries: IndexMap<Qid, String>,
}

impl PartialTypes {
    pub fn set(&mut self, qid: &str, type_value: String) {
        self.entries.insert(qid.to_string(), type_value);
    }
}

/// Both contributions of one entity-relation shard
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationPartial {
    pub aliases: PartialAliases,
    pub types: PartialTypes,
}

impl EntityCount for RelationPartial {
    fn entity_count(&self) -> usize {
        self.aliases.entity_count()
    }
}

/// Entities of one shard tagged with a disambiguation marker
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisambigPartial {
    pub qids: IndexSet<Qid>,
}

impl EntityCount for DisambigPartial {
    fn entity_count(&self) -> usize {
        self.qids.len()
    }
}

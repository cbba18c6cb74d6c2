//! Per-shard triple classifiers
//!
//! A classifier reduces the triples of exactly one shard into a partial
//! result that is returned whole to the dispatcher. Classifiers hold only
//! read-only configuration so one instance can be shared by every worker.

use std::path::Path;

use ahash::AHashSet;

use crate::error::Result;
use crate::schema::{
    AliasRecord, DisambigPartial, EntityCount, PartialAliases, RelationPartial, RelationRecord,
    ShardRecord, Triple, ValueRecord, ALIAS_PROPERTIES, DISAMBIGUATION_MARKERS,
    INSTANCE_OF_PROPERTY,
};
use crate::shard::ShardReader;

/// A shard-level reducer: `Triple stream -> partial result`
pub trait ShardClassifier: Sync {
    /// Record schema of the shards this classifier reads
    type Record: ShardRecord;
    /// Partial result produced for one shard
    type Output: EntityCount + Send;

    /// Reduce a stream of triples. The first error aborts the reduction.
    fn classify<I>(&self, triples: I) -> Result<Self::Output>
    where
        I: Iterator<Item = Result<Triple>>;

    /// Open a shard and reduce all of its triples
    fn classify_shard(&self, path: &Path) -> Result<Self::Output> {
        let reader = ShardReader::<Self::Record>::open(path)?;
        self.classify(reader)
    }
}

/// Alias-table shards: every value is an alias of its entity
#[derive(Debug, Clone, Copy, Default)]
pub struct AliasTableClassifier;

impl ShardClassifier for AliasTableClassifier {
    type Record = AliasRecord;
    type Output = PartialAliases;

    fn classify<I>(&self, triples: I) -> Result<PartialAliases>
    where
        I: Iterator<Item = Result<Triple>>,
    {
        let mut partial = PartialAliases::new();
        for triple in triples {
            let triple = triple?;
            partial.push(&triple.qid, triple.value);
        }
        Ok(partial)
    }
}

/// Read-only set of alias-bearing property codes
#[derive(Debug, Clone)]
pub struct AliasProperties {
    codes: AHashSet<String>,
}

impl AliasProperties {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, property_id: &str) -> bool {
        self.codes.contains(property_id)
    }
}

impl Default for AliasProperties {
    fn default() -> Self {
        Self::new(ALIAS_PROPERTIES.iter().copied())
    }
}

/// Entity-value shards: values of alias-bearing properties, lower-cased
#[derive(Debug, Clone, Default)]
pub struct ValueTableClassifier {
    properties: AliasProperties,
}

impl ValueTableClassifier {
    pub fn new(properties: AliasProperties) -> Self {
        Self { properties }
    }
}

impl ShardClassifier for ValueTableClassifier {
    type Record = ValueRecord;
    type Output = PartialAliases;

    fn classify<I>(&self, triples: I) -> Result<PartialAliases>
    where
        I: Iterator<Item = Result<Triple>>,
    {
        let mut partial = PartialAliases::new();
        for triple in triples {
            let triple = triple?;
            if !self.properties.contains(&triple.property_id) {
                continue;
            }
            partial.push(&triple.qid, triple.value.to_lowercase());
        }
        Ok(partial)
    }
}

/// Entity-relation shards: alias contributions from alias-bearing
/// properties and type contributions from the instance-of property
#[derive(Debug, Clone, Default)]
pub struct RelationClassifier {
    properties: AliasProperties,
}

impl RelationClassifier {
    pub fn new(properties: AliasProperties) -> Self {
        Self { properties }
    }
}

impl ShardClassifier for RelationClassifier {
    type Record = RelationRecord;
    type Output = RelationPartial;

    fn classify<I>(&self, triples: I) -> Result<RelationPartial>
    where
        I: Iterator<Item = Result<Triple>>,
    {
        let mut partial = RelationPartial::default();
        for triple in triples {
            let triple = triple?;
            if self.properties.contains(&triple.property_id) {
                partial.aliases.push(&triple.qid, triple.value.clone());
            }
            if triple.property_id == INSTANCE_OF_PROPERTY {
                partial.types.set(&triple.qid, triple.value);
            }
        }
        Ok(partial)
    }
}

/// Entity-relation shards: entities whose instance-of value is a
/// disambiguation-page marker
#[derive(Debug, Clone)]
pub struct DisambigClassifier {
    markers: AHashSet<String>,
}

impl DisambigClassifier {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for DisambigClassifier {
    fn default() -> Self {
        Self::new(DISAMBIGUATION_MARKERS.iter().copied())
    }
}

impl ShardClassifier for DisambigClassifier {
    type Record = RelationRecord;
    type Output = DisambigPartial;

    fn classify<I>(&self, triples: I) -> Result<DisambigPartial>
    where
        I: Iterator<Item = Result<Triple>>,
    {
        let mut partial = DisambigPartial::default();
        for triple in triples {
            let triple = triple?;
            if triple.property_id == INSTANCE_OF_PROPERTY && self.markers.contains(&triple.value) {
                partial.qids.insert(triple.qid);
            }
        }
        Ok(partial)
    }
}

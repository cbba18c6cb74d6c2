//! Merge engine: partial alias maps -> global entity alias map
//!
//! Runs single-threaded over the collected partials. Every raw alias is
//! normalized and inserted into its entity's set, so merging is a per-key set
//! union and the result does not depend on shard order or grouping.

use ahash::AHashSet;
use indexmap::IndexSet;

use crate::normalize::{normalize_alias, NormalizeOptions};
use crate::schema::{EntityAliases, PartialAliases};

/// Global entity -> alias-set map plus the reporting cardinality
#[derive(Debug, Clone, Default)]
pub struct MergedAliases {
    pub aliases: EntityAliases,
    /// Number of distinct normalized aliases across all entities
    pub distinct_aliases: usize,
}

/// Accumulates partial alias maps into one global map
#[derive(Debug, Default)]
pub struct AliasMerger {
    opts: NormalizeOptions,
    aliases: EntityAliases,
    all_aliases: AHashSet<String>,
}

impl AliasMerger {
    pub fn new(opts: NormalizeOptions) -> Self {
        Self {
            opts,
            aliases: EntityAliases::default(),
            all_aliases: AHashSet::new(),
        }
    }

    /// Fold one partial map into the global map
    pub fn add(&mut self, partial: &PartialAliases) {
        for (qid, raw_aliases) in &partial.entries {
            let set = self.aliases.entry(qid.clone()).or_insert_with(IndexSet::new);
            for raw in raw_aliases {
                let alias = normalize_alias(raw, self.opts);
                // punctuation-only input has no surface form left
                if alias.is_empty() {
                    continue;
                }
                if !self.all_aliases.contains(&alias) {
                    self.all_aliases.insert(alias.clone());
                }
                set.insert(alias);
            }
        }
    }

    pub fn finish(self) -> MergedAliases {
        tracing::info!(
            "Extracted {} QIDS and {} total aliases.",
            self.aliases.len(),
            self.all_aliases.len()
        );
        MergedAliases {
            distinct_aliases: self.all_aliases.len(),
            aliases: self.aliases,
        }
    }
}

/// Merge any number of partial alias maps
pub fn merge_aliases<'a, I>(partials: I, opts: NormalizeOptions) -> MergedAliases
where
    I: IntoIterator<Item = &'a PartialAliases>,
{
    let mut merger = AliasMerger::new(opts);
    for partial in partials {
        merger.add(partial);
    }
    merger.finish()
}

//! Inversion: entity -> aliases becomes alias -> entities

use crate::filter::QidFilter;
use crate::schema::{AliasIndex, EntityAliases};

/// Build the alias index from the (augmented) entity alias map.
///
/// Entities are visited in map order and appended to each of their aliases'
/// lists, so list order is reproducible for the same input. Entities rejected
/// by a non-empty `filter` contribute nothing. Lists are not deduplicated.
pub fn invert_aliases(aliases: &EntityAliases, filter: &QidFilter) -> AliasIndex {
    let mut index = AliasIndex::new();
    let mut skipped = 0usize;

    for (qid, entity_aliases) in aliases {
        if !filter.allows(qid) {
            skipped += 1;
            continue;
        }
        for alias in entity_aliases {
            match index.get_mut(alias) {
                Some(qids) => qids.push(qid.clone()),
                None => {
                    index.insert(alias.clone(), vec![qid.clone()]);
                }
            }
        }
    }

    tracing::debug!("Inversion skipped {} filtered entities", skipped);
    tracing::info!("{} aliases.", index.len());
    index
}
